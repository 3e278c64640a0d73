//! # 通知ユースケース
//!
//! コンプライアンスイベントから Slack 通知を組み立て、通知トピックに発行する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによる通知本文の生成
//! - [`builder`] - 分類・本文・宛先・フィールドから通知ペイロードを組み立てるコア
//! - [`service`] - 台帳参照 + 組み立て + 発行の統合サービス

pub mod builder;
pub mod service;
pub mod template_renderer;

pub use builder::NotificationBuilder;
pub use service::NotificationService;
pub use template_renderer::TemplateRenderer;
