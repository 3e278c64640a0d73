//! Noop 通知発行実装
//!
//! 通知を実際には発行せず、発行予定のペイロードをログに出力する。
//! トピック未整備の環境や動作確認時に使用する。

use async_trait::async_trait;
use tagguard_domain::notification::{NotificationError, NotificationPayload};

use super::NotificationPublisher;

/// Noop 通知発行（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationPublisher;

#[async_trait]
impl NotificationPublisher for NoopNotificationPublisher {
    async fn publish(&self, payload: &NotificationPayload) -> Result<(), NotificationError> {
        let message = payload.to_json().map_err(|e| {
            NotificationError::PublishFailed(format!("ペイロードのシリアライズに失敗: {e}"))
        })?;

        tracing::info!(
            recipients = payload.recipients().len(),
            payload = %message,
            "Noop: Slack 通知の発行をスキップ"
        );
        Ok(())
    }
}
