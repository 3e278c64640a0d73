//! # Notifier ライブラリ
//!
//! 必須タグ違反の通知を組み立てて発行するユースケースを公開する。
//! 結合テストからも利用する。

pub mod config;
pub mod error;
pub mod usecase;
