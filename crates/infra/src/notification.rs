//! # 通知発行
//!
//! 組み立て済みの通知ペイロードを通知基盤（SNS トピック）へ発行する。
//! トピックの購読側が Slack への配信を担当する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationPublisher` trait で発行先を抽象化
//! - **2 つの実装**: SNS（本番用）、Noop（ログ出力のみ）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **再試行しない**: 失敗はそのまま呼び出し元に返し、再試行は呼び出し側の
//!   ステートマシンに委ねる

mod noop;
mod sns;

use async_trait::async_trait;
pub use noop::NoopNotificationPublisher;
pub use sns::{SnsNotificationPublisher, create_client as create_sns_client};
use tagguard_domain::notification::{NotificationError, NotificationPayload};

/// 通知発行トレイト
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// 通知ペイロードを発行する
    async fn publish(&self, payload: &NotificationPayload) -> Result<(), NotificationError>;
}
