//! # 通知
//!
//! 非準拠リソース通知の分類規則、通知ペイロード、通知エラーを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationState`] | 通知ステート | 5 種類: エラー、本番、1 回目、2 回目、3 回目 |
//! | [`ReminderStage`] | 通知段階 | `next_state` で指定される 1〜3 回目の通知 |
//! | [`NotificationPayload`] | 通知ペイロード | Slack 向けに発行するメッセージ |
//!
//! ## 分類の優先順位
//!
//! 1. `error-info` が存在する → [`NotificationState::Error`]
//! 2. `compliance.accountType == "prod"` → [`NotificationState::Production`]
//! 3. `compliance.next_state` を [`ReminderStage`] として解釈する
//!
//! ステートは永続化しない。毎回イベントだけから決定する。

mod payload;

use std::str::FromStr;

pub use payload::{
    AttachmentField,
    ChannelType,
    NON_COMPLIANT_REASON,
    NotificationPayload,
    Recipients,
    Severity,
    compliance_fields,
};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::compliance::ComplianceEvent;

/// 通知の分類・組み立て・発行で発生するエラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// `error-info` も `compliance` も存在しない
    #[error("通知の分類に必要な error-info と compliance のいずれも存在しません")]
    MissingClassification,

    /// 本番アカウント以外で `next_state` が指定されていない
    #[error("compliance.next_state が指定されていません")]
    MissingNextState,

    /// `next_state` が既知の通知段階に一致しない
    #[error("未対応の通知ステート: {0}")]
    UnknownState(String),

    /// 時刻を使う通知で `notificationCreationTime` が存在しない
    #[error("notificationCreationTime が指定されていません")]
    MissingCreationTime,

    /// `notificationCreationTime` の形式が不正
    ///
    /// 小数秒の欠落やうるう秒は chrono のパース自体は通るため `source` を持たない。
    #[error("notificationCreationTime の形式が不正です: {value}")]
    MalformedTimestamp {
        value:  String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    /// 削除予定日時が表現可能な範囲を超える
    #[error("削除予定日時を計算できません: {0}")]
    DeadlineOutOfRange(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// 通知トピックへの発行に失敗
    #[error("通知の発行に失敗: {0}")]
    PublishFailed(String),
}

impl NotificationError {
    /// 入力イベントから通知ステートを決定できなかったか
    pub fn is_classification_error(&self) -> bool {
        matches!(
            self,
            Self::MissingClassification | Self::MissingNextState | Self::UnknownState(_)
        )
    }

    /// 作成日時の欠落・形式不正・範囲外か
    pub fn is_timestamp_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCreationTime
                | Self::MalformedTimestamp { .. }
                | Self::DeadlineOutOfRange(_)
        )
    }
}

/// 通知段階（`compliance.next_state`）
///
/// ステートマシンが送る正式名（`first_notification`）と短縮名（`first`）の
/// どちらも受け入れる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum ReminderStage {
    #[strum(to_string = "first_notification", serialize = "first")]
    First,
    #[strum(to_string = "second_notification", serialize = "second")]
    Second,
    #[strum(to_string = "third_notification", serialize = "third")]
    Third,
}

/// 通知ステート
///
/// 各バリアントが通知本文のテンプレート 1 つに対応する。
/// snake_case の名前がそのままテンプレート名になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NotificationState {
    /// ステートマシン実行中のエラー → 既定の宛先のみに送信
    Error,
    /// 本番アカウント → 削除予定日時を示さず対応を促す
    Production,
    /// 1 回目: 作成日時と削除予定日時を通知
    First,
    /// 2 回目: 削除予定日時をリマインド
    Second,
    /// 3 回目: 削除予定日時を最終リマインド
    Third,
}

impl From<ReminderStage> for NotificationState {
    fn from(stage: ReminderStage) -> Self {
        match stage {
            ReminderStage::First => Self::First,
            ReminderStage::Second => Self::Second,
            ReminderStage::Third => Self::Third,
        }
    }
}

impl NotificationState {
    /// イベントから通知ステートを決定する
    ///
    /// 未知の `next_state` に対する既定の通知は存在しない。
    pub fn classify(event: &ComplianceEvent) -> Result<Self, NotificationError> {
        if event.error_info.is_some() {
            return Ok(Self::Error);
        }

        let compliance = event
            .compliance
            .as_ref()
            .ok_or(NotificationError::MissingClassification)?;

        if compliance.is_production() {
            return Ok(Self::Production);
        }

        let next_state = compliance
            .next_state
            .as_deref()
            .ok_or(NotificationError::MissingNextState)?;

        ReminderStage::from_str(next_state)
            .map(Self::from)
            .map_err(|_| NotificationError::UnknownState(next_state.to_string()))
    }

    /// アカウントの通知チャンネルを宛先に追加するか
    ///
    /// エラー通知は既定の宛先（運用チーム）のみに送る。
    pub fn includes_account_channels(self) -> bool {
        !matches!(self, Self::Error)
    }

    /// 本文に作成日時を含むか
    pub fn shows_creation_time(self) -> bool {
        matches!(self, Self::First | Self::Production)
    }

    /// 本文に削除予定日時を含むか
    pub fn shows_deletion_deadline(self) -> bool {
        matches!(self, Self::First | Self::Second | Self::Third)
    }

    /// 作成日時のパースが必要か
    pub fn requires_creation_time(self) -> bool {
        !matches!(self, Self::Error)
    }

    /// 本文テンプレート名
    pub fn template_name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::compliance::ComplianceStatus;

    fn make_event(compliance: Option<ComplianceStatus>) -> ComplianceEvent {
        ComplianceEvent {
            account_id: "012345678921".to_string(),
            resource_id: "test-resource-id".to_string(),
            resource_type: "AWS::S3::TestResourceType".to_string(),
            region: Some("eu-west-1".to_string()),
            notification_creation_time: Some("2019-07-29T09:58:39.751Z".to_string()),
            error_info: None,
            compliance,
        }
    }

    fn make_compliance(account_type: &str, next_state: Option<&str>) -> ComplianceStatus {
        ComplianceStatus {
            compliant: Some(json!("false")),
            account_type: Some(account_type.to_string()),
            next_state: next_state.map(str::to_string),
        }
    }

    #[rstest]
    #[case("first_notification", NotificationState::First)]
    #[case("second_notification", NotificationState::Second)]
    #[case("third_notification", NotificationState::Third)]
    #[case("first", NotificationState::First)]
    #[case("second", NotificationState::Second)]
    #[case("third", NotificationState::Third)]
    fn test_next_stateから通知ステートを決定する(
        #[case] next_state: &str,
        #[case] expected: NotificationState,
    ) {
        let event = make_event(Some(make_compliance("sandbox", Some(next_state))));
        assert_eq!(NotificationState::classify(&event).unwrap(), expected);
    }

    #[test]
    fn test_error_infoは他のすべての分類に優先する() {
        let mut event = make_event(Some(make_compliance("prod", Some("unknown_state"))));
        event.error_info = Some(json!({"message": "test error message"}));

        assert_eq!(
            NotificationState::classify(&event).unwrap(),
            NotificationState::Error
        );
    }

    #[test]
    fn test_本番アカウントはnext_stateより優先する() {
        let event = make_event(Some(make_compliance("prod", Some("third_notification"))));
        assert_eq!(
            NotificationState::classify(&event).unwrap(),
            NotificationState::Production
        );
    }

    #[test]
    fn test_本番アカウントはnext_stateがなくても分類できる() {
        let event = make_event(Some(make_compliance("prod", None)));
        assert_eq!(
            NotificationState::classify(&event).unwrap(),
            NotificationState::Production
        );
    }

    #[rstest]
    #[case("production")]
    #[case("PROD")]
    #[case("")]
    fn test_prod以外のアカウント種別は本番扱いしない(#[case] account_type: &str) {
        let event = make_event(Some(make_compliance(account_type, Some("second"))));
        assert_eq!(
            NotificationState::classify(&event).unwrap(),
            NotificationState::Second
        );
    }

    #[test]
    fn test_未知のnext_stateはunknown_stateになる() {
        let event = make_event(Some(make_compliance("sandbox", Some("unknown_state"))));
        let err = NotificationState::classify(&event).unwrap_err();

        assert!(matches!(err, NotificationError::UnknownState(ref s) if s == "unknown_state"));
        assert!(err.is_classification_error());
    }

    #[test]
    fn test_next_stateがない場合はmissing_next_stateになる() {
        let event = make_event(Some(make_compliance("sandbox", None)));
        let err = NotificationState::classify(&event).unwrap_err();

        assert!(matches!(err, NotificationError::MissingNextState));
        assert!(err.is_classification_error());
    }

    #[test]
    fn test_error_infoもcomplianceもない場合はmissing_classificationになる() {
        let event = make_event(None);
        let err = NotificationState::classify(&event).unwrap_err();

        assert!(matches!(err, NotificationError::MissingClassification));
        assert!(err.is_classification_error());
        assert!(!err.is_timestamp_error());
    }

    #[test]
    fn test_エラー通知のみアカウントのチャンネルを宛先に含めない() {
        assert!(!NotificationState::Error.includes_account_channels());
        assert!(NotificationState::Production.includes_account_channels());
        assert!(NotificationState::First.includes_account_channels());
        assert!(NotificationState::Second.includes_account_channels());
        assert!(NotificationState::Third.includes_account_channels());
    }

    #[test]
    fn test_テンプレート名はsnake_case() {
        assert_eq!(NotificationState::Error.template_name(), "error");
        assert_eq!(NotificationState::Production.template_name(), "production");
        assert_eq!(NotificationState::First.template_name(), "first");
        assert_eq!(NotificationState::Second.template_name(), "second");
        assert_eq!(NotificationState::Third.template_name(), "third");
    }

    #[test]
    fn test_通知段階の表示名は正式名() {
        assert_eq!(ReminderStage::First.to_string(), "first_notification");
        assert_eq!(ReminderStage::Third.to_string(), "third_notification");
    }
}
