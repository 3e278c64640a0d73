//! # 通知サービス
//!
//! 1 件のコンプライアンスイベントを処理する全体フローを統合する。
//!
//! 1. イベントを [`ComplianceEvent`] として解釈する
//! 2. アカウント台帳からアカウントを取得する
//! 3. [`NotificationBuilder`] で通知ペイロードを組み立てる
//! 4. [`NotificationPublisher`] で発行する
//! 5. 受け取ったイベントをそのまま返す（ステートマシンの次のステップへ渡す）
//!
//! ## 設計方針
//!
//! - **依存性注入**: 台帳と発行先は trait で抽象化し、テストではモックに差し替える
//! - **発行は高々 1 回**: 組み立てに失敗した場合は発行しない
//! - **再試行しない**: どのステップの失敗も即座に呼び出し元へ返す

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tagguard_domain::{account::AccountId, compliance::ComplianceEvent};
use tagguard_infra::{notification::NotificationPublisher, repository::AccountRepository};
use tagguard_shared::{
    event_log::{error, event},
    log_business_event,
};

use super::NotificationBuilder;
use crate::error::NotifierError;

/// 通知サービス
pub struct NotificationService {
    account_repo: Arc<dyn AccountRepository>,
    publisher:    Arc<dyn NotificationPublisher>,
    builder:      NotificationBuilder,
}

impl NotificationService {
    pub fn new(
        account_repo: Arc<dyn AccountRepository>,
        publisher: Arc<dyn NotificationPublisher>,
        builder: NotificationBuilder,
    ) -> Self {
        Self {
            account_repo,
            publisher,
            builder,
        }
    }

    /// イベントを処理し、受け取ったイベントを変更せずに返す
    ///
    /// 未知のキーを含め、返す値は入力と完全に一致する。
    #[tracing::instrument(skip_all, level = "debug")]
    pub async fn handle(&self, event: Value) -> Result<Value, NotifierError> {
        let compliance_event = ComplianceEvent::deserialize(&event).map_err(|e| {
            tracing::error!(
                error.category = error::category::INPUT,
                error.kind = error::kind::MALFORMED_EVENT,
                error = %e,
                "イベントの形式が不正です"
            );
            NotifierError::InvalidEvent(e)
        })?;

        self.notify(&compliance_event).await?;

        Ok(event)
    }

    #[tracing::instrument(
        skip_all,
        fields(
            account_id = %compliance_event.account_id,
            resource_id = %compliance_event.resource_id,
        )
    )]
    async fn notify(&self, compliance_event: &ComplianceEvent) -> Result<(), NotifierError> {
        let account_id = AccountId::new(compliance_event.account_id.as_str())?;

        let account = self
            .account_repo
            .find_by_id(&account_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::ACCOUNT_LOOKUP,
                    error = %e,
                    "アカウント台帳の参照に失敗"
                );
                NotifierError::AccountLookup(e)
            })?
            .ok_or_else(|| {
                tracing::error!(
                    error.category = error::category::INFRASTRUCTURE,
                    error.kind = error::kind::ACCOUNT_LOOKUP,
                    "アカウント台帳にアカウントが存在しません"
                );
                NotifierError::AccountNotFound(account_id.to_string())
            })?;

        let payload = self.builder.build(&account, compliance_event).map_err(|e| {
            let kind = if e.is_classification_error() {
                error::kind::CLASSIFICATION
            } else {
                error::kind::MALFORMED_EVENT
            };
            tracing::error!(
                error.category = error::category::INPUT,
                error.kind = kind,
                error = %e,
                "通知の組み立てに失敗"
            );
            NotifierError::Build(e)
        })?;

        if let Err(e) = self.publisher.publish(&payload).await {
            tracing::error!(
                error.category = error::category::EXTERNAL_SERVICE,
                error.kind = error::kind::PUBLISH,
                error = %e,
                "通知の発行に失敗"
            );
            log_business_event!(
                event.category = event::category::NOTIFICATION,
                event.action = event::action::NOTIFICATION_FAILED,
                event.entity_type = event::entity_type::NON_COMPLIANT_RESOURCE,
                event.entity_id = %compliance_event.resource_id,
                event.result = event::result::FAILURE,
                notification.account_id = %account_id,
                "通知の発行に失敗"
            );
            return Err(NotifierError::Publish(e));
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_PUBLISHED,
            event.entity_type = event::entity_type::NON_COMPLIANT_RESOURCE,
            event.entity_id = %compliance_event.resource_id,
            event.result = event::result::SUCCESS,
            notification.account_id = %account_id,
            recipient_count = payload.recipients().len(),
            "通知を発行しました"
        );

        Ok(())
    }
}
