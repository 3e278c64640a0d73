//! 通知ペイロード
//!
//! 通知トピックに発行する Slack メッセージを表す不変の値。
//! [`NotificationPayload::new`] で最終的な本文・宛先・フィールドから一度に組み立てる。
//!
//! シリアライズ後の形式:
//!
//! ```json
//! {
//!   "type": "slack",
//!   "recipients": ["<既定の宛先>", "<アカウントのチャンネル>", "..."],
//!   "payload": {
//!     "text": "<本文>",
//!     "attachments": [{ "color": "danger", "fields": [...], "attachment_type": "default" }]
//!   }
//! }
//! ```

use serde::{Serialize, Serializer};

use crate::{account::AccountRecord, compliance::ComplianceEvent};

/// 違反理由（必須タグ検査のみを扱うため固定）
pub const NON_COMPLIANT_REASON: &str = "Required Tags are not present";

const ATTACHMENT_TYPE: &str = "default";

/// 通知媒体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChannelType {
    Slack,
}

/// メッセージの重要度（Slack attachment の `color`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Danger,
}

/// 通知の宛先一覧
///
/// # 不変条件
///
/// - 先頭は常に既定の宛先（要素数 1 以上）
/// - アカウントのチャンネルは台帳の順序のまま追加し、重複を除去しない
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Recipients(Vec<String>);

impl Recipients {
    /// 既定の宛先のみを持つ一覧を作成する
    pub fn new(default_recipient: impl Into<String>) -> Self {
        Self(vec![default_recipient.into()])
    }

    /// アカウントのチャンネルを末尾に追加する
    pub fn with_channels(mut self, channels: &[String]) -> Self {
        self.0.extend_from_slice(channels);
        self
    }

    pub fn default_recipient(&self) -> &str {
        &self.0[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 常に false（既定の宛先を必ず含む）
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Slack attachment のフィールド
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    pub value: String,
    /// Slack 上で横並び表示するか
    pub short: bool,
}

impl AttachmentField {
    fn long(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            short: false,
        }
    }
}

/// 通知に添える 4 つのフィールドを組み立てる
///
/// 順序は固定: アカウント、リソース種別、リソース ID、違反理由。
/// 通知ステートによって変化しない。
pub fn compliance_fields(account: &AccountRecord, event: &ComplianceEvent) -> [AttachmentField; 4] {
    [
        AttachmentField::long(
            format!("AWS Account {}", account.display_name()),
            format!("Account Id: {}", account.account_id()),
        ),
        AttachmentField::long("Resource Type", event.resource_type.as_str()),
        AttachmentField::long("Resource Id", event.resource_id.as_str()),
        AttachmentField::long("NON-COMPLIANT Reason", NON_COMPLIANT_REASON),
    ]
}

/// 通知ペイロード
///
/// 呼び出しごとに新しく作られ、返却後は呼び出し元が所有する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPayload {
    channel_type: ChannelType,
    recipients:   Recipients,
    message_text: String,
    fields:       [AttachmentField; 4],
    severity:     Severity,
}

impl NotificationPayload {
    pub fn new(
        recipients: Recipients,
        message_text: impl Into<String>,
        fields: [AttachmentField; 4],
    ) -> Self {
        Self {
            channel_type: ChannelType::Slack,
            recipients,
            message_text: message_text.into(),
            fields,
            severity: Severity::Danger,
        }
    }

    pub fn channel_type(&self) -> ChannelType {
        self.channel_type
    }

    pub fn recipients(&self) -> &Recipients {
        &self.recipients
    }

    pub fn message_text(&self) -> &str {
        &self.message_text
    }

    pub fn fields(&self) -> &[AttachmentField; 4] {
        &self.fields
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// 通知トピックに発行する JSON 文字列
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Serialize)]
struct WireMessage<'a> {
    #[serde(rename = "type")]
    channel_type: ChannelType,
    recipients:   &'a Recipients,
    payload:      WireBody<'a>,
}

#[derive(Serialize)]
struct WireBody<'a> {
    text:        &'a str,
    attachments: [WireAttachment<'a>; 1],
}

#[derive(Serialize)]
struct WireAttachment<'a> {
    color:           Severity,
    fields:          &'a [AttachmentField; 4],
    attachment_type: &'static str,
}

impl Serialize for NotificationPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireMessage {
            channel_type: self.channel_type,
            recipients:   &self.recipients,
            payload:      WireBody {
                text:        &self.message_text,
                attachments: [WireAttachment {
                    color:           self.severity,
                    fields:          &self.fields,
                    attachment_type: ATTACHMENT_TYPE,
                }],
            },
        }
        .serialize(serializer)
    }
}
