//! # TagGuard 共有ユーティリティ
//!
//! Notifier アプリケーションが使うログ関連のユーティリティ。
//! domain / infra からは依存しない。
//!
//! - [`observability`] - subscriber の初期化と出力形式
//! - [`event_log`] - ビジネスイベントとエラーコンテキストのフィールド規約

pub mod event_log;
pub mod observability;
