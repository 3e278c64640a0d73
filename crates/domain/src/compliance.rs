//! # コンプライアンスイベント
//!
//! 必須タグ検査のステートマシンから渡される入力イベントと、
//! イベント中の日時の解釈規則を定義する。
//!
//! ## 入力形式
//!
//! ```json
//! {
//!   "accountId": "012345678921",
//!   "resourceId": "test-resource-id",
//!   "resourceType": "AWS::S3::Bucket",
//!   "notificationCreationTime": "2019-07-29T09:58:39.751Z",
//!   "compliance": { "accountType": "sandbox", "next_state": "first_notification" }
//! }
//! ```
//!
//! エラー経路のイベントは `compliance` の代わりに `error-info` を持ち、
//! `notificationCreationTime` を持たないことがある。
//!
//! ## 日時
//!
//! - 入力: `%Y-%m-%dT%H:%M:%S%.fZ`（UTC）
//! - 表示: `%Y-%m-%d %H:%M:%S%.6f`（マイクロ秒 6 桁固定）
//! - 削除予定日時 = 作成日時 + [`DELETION_GRACE_PERIOD_DAYS`] 日

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::notification::NotificationError;

/// 非準拠リソースが作成されてから削除されるまでの猶予日数
pub const DELETION_GRACE_PERIOD_DAYS: i64 = 14;

/// 本番アカウントを表す `accountType` の値
pub const PRODUCTION_ACCOUNT_TYPE: &str = "prod";

const CREATION_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// コンプライアンスイベント
///
/// 呼び出しの間は不変として扱う。未知のキーは無視する。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceEvent {
    pub account_id: String,
    pub resource_id: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// 違反が最初に記録された日時（エラー経路では存在しないことがある）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_creation_time: Option<String>,
    /// 存在する場合は他のすべての分類に優先する
    ///
    /// `error-info` と `errorInfo` を同時に持つイベントはどちらを採るか決められないため、
    /// serde の重複フィールドエラーとしてデシリアライズを失敗させる。
    #[serde(
        rename = "error-info",
        alias = "errorInfo",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_info: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance: Option<ComplianceStatus>,
}

/// コンプライアンス判定結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliant: Option<Value>,
    /// 自由形式のタグ。`"prod"` のみ特別扱いする
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    /// 次に送るべき通知の段階（`first_notification` など）
    #[serde(
        rename = "next_state",
        alias = "nextState",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_state: Option<String>,
}

impl ComplianceStatus {
    pub fn is_production(&self) -> bool {
        self.account_type.as_deref() == Some(PRODUCTION_ACCOUNT_TYPE)
    }
}

impl ComplianceEvent {
    /// `notificationCreationTime` を UTC 日時として解釈する
    pub fn creation_time(&self) -> Result<DateTime<Utc>, NotificationError> {
        let value = self
            .notification_creation_time
            .as_deref()
            .ok_or(NotificationError::MissingCreationTime)?;
        parse_creation_time(value)
    }

    /// エラー詳細のテキスト表現
    ///
    /// 文字列はそのまま、それ以外は JSON のコンパクト表現で返す。
    pub fn error_detail(&self) -> Option<String> {
        self.error_info.as_ref().map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }
}

/// 通知作成日時をパースする
///
/// 小数秒（`.` と 1〜9 桁）は必須。うるう秒（`:60`）は 14 日後を
/// 同じ秒で表せないため拒否する。
pub fn parse_creation_time(value: &str) -> Result<DateTime<Utc>, NotificationError> {
    let malformed = |source| NotificationError::MalformedTimestamp {
        value: value.to_string(),
        source,
    };

    let parsed = NaiveDateTime::parse_from_str(value, CREATION_TIME_FORMAT)
        .map_err(|e| malformed(Some(e)))?
        .and_utc();

    // `%.f` は小数部を省略しても通る
    if !has_fractional_seconds(value) || parsed.nanosecond() >= 1_000_000_000 {
        return Err(malformed(None));
    }

    Ok(parsed)
}

fn has_fractional_seconds(value: &str) -> bool {
    value
        .strip_suffix('Z')
        .and_then(|rest| rest.rsplit_once('.'))
        .is_some_and(|(_, digits)| {
            (1..=9).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
        })
}

/// 削除予定日時を計算する
pub fn deletion_deadline(created_at: DateTime<Utc>) -> Result<DateTime<Utc>, NotificationError> {
    created_at
        .checked_add_signed(TimeDelta::days(DELETION_GRACE_PERIOD_DAYS))
        .ok_or_else(|| NotificationError::DeadlineOutOfRange(format_timestamp(created_at)))
}

/// 通知本文に埋め込む日時表現
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.format(DISPLAY_TIME_FORMAT).to_string()
}
