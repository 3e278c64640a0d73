//! SNS 通知発行実装
//!
//! Amazon SNS の Publish API で通知トピックにペイロード JSON を発行する。
//! 本番環境で使用する。

use async_trait::async_trait;
use aws_sdk_sns::Client;
use tagguard_domain::notification::{NotificationError, NotificationPayload};

use super::NotificationPublisher;

/// 既定の AWS 設定（環境変数、実行ロール）で SNS クライアントを作成する
pub async fn create_client() -> Client {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    Client::new(&config)
}

/// SNS 通知発行
///
/// `aws_sdk_sns::Client` をラップする。
pub struct SnsNotificationPublisher {
    client:    Client,
    topic_arn: String,
}

impl SnsNotificationPublisher {
    /// 新しい SNS 発行インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `client`: AWS SNS クライアント
    /// - `topic_arn`: 通知トピックの ARN
    pub fn new(client: Client, topic_arn: String) -> Self {
        Self { client, topic_arn }
    }
}

#[async_trait]
impl NotificationPublisher for SnsNotificationPublisher {
    #[tracing::instrument(skip_all, level = "debug", fields(topic_arn = %self.topic_arn))]
    async fn publish(&self, payload: &NotificationPayload) -> Result<(), NotificationError> {
        let message = payload.to_json().map_err(|e| {
            NotificationError::PublishFailed(format!("ペイロードのシリアライズに失敗: {e}"))
        })?;

        let output = self
            .client
            .publish()
            .topic_arn(&self.topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| NotificationError::PublishFailed(format!("SNS 発行失敗: {e}")))?;

        tracing::debug!(
            message_id = output.message_id().unwrap_or_default(),
            "SNS に通知を発行しました"
        );
        Ok(())
    }
}
