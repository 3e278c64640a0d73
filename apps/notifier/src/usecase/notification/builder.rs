//! # 通知ビルダー
//!
//! アカウント台帳レコードとコンプライアンスイベントから通知ペイロードを組み立てる。
//!
//! 1. イベントから通知ステートを分類する
//! 2. ステートに対応する本文を生成する
//! 3. 宛先を組み立てる（既定の宛先 + エラー以外ではアカウントのチャンネル）
//! 4. 4 つの固定フィールドを添えてペイロードを一度に作る
//!
//! I/O を行わず、同じ入力に対して常に同じペイロードを返す。

use tagguard_domain::{
    account::AccountRecord,
    compliance::ComplianceEvent,
    notification::{
        NotificationError,
        NotificationPayload,
        NotificationState,
        Recipients,
        compliance_fields,
    },
};

use super::TemplateRenderer;

/// 通知ビルダー
///
/// 既定の宛先は環境変数ではなくコンストラクタで受け取る。
pub struct NotificationBuilder {
    default_recipient: String,
    renderer:          TemplateRenderer,
}

impl NotificationBuilder {
    pub fn new(default_recipient: impl Into<String>, renderer: TemplateRenderer) -> Self {
        Self {
            default_recipient: default_recipient.into(),
            renderer,
        }
    }

    /// 通知ペイロードを組み立てる
    ///
    /// 分類・日時の解釈に失敗した場合は途中までのペイロードを返さず、
    /// 直ちにエラーを返す。
    pub fn build(
        &self,
        account: &AccountRecord,
        event: &ComplianceEvent,
    ) -> Result<NotificationPayload, NotificationError> {
        let state = NotificationState::classify(event)?;
        tracing::debug!(%state, "通知ステートを決定しました");

        let message_text = self.renderer.render(state, event)?;

        let recipients = Recipients::new(self.default_recipient.as_str());
        let recipients = if state.includes_account_channels() {
            recipients.with_channels(account.notification_channels())
        } else {
            recipients
        };

        Ok(NotificationPayload::new(
            recipients,
            message_text,
            compliance_fields(account, event),
        ))
    }
}
