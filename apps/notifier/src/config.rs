//! # Notifier 設定
//!
//! 環境変数から Notifier の設定を読み込む。
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `SLACK_NOTIFICATION_REPORT_PATH` | **Yes** | 既定の宛先（運用チームのチャンネル） |
//! | `ACCOUNTS_TABLE_NAME` | **Yes** | アカウント台帳テーブル名 |
//! | `NOTIFICATION_BACKEND` | No | `sns` / `noop`（デフォルト: `noop`） |
//! | `NOTIFICATION_TOPIC_ARN` | backend=sns の場合 | 通知トピックの ARN |
//! | `DYNAMODB_ENDPOINT` | No | DynamoDB Local のエンドポイント |

use std::env;

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("NOTIFICATION_BACKEND の値が不正です: {0}（sns / noop のいずれか）")]
    UnknownBackend(String),
}

/// Notifier の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// 既定の宛先（すべての通知の先頭に入る）
    pub default_recipient:   String,
    /// アカウント台帳テーブル名
    pub accounts_table_name: String,
    /// DynamoDB エンドポイント URL（未設定で AWS のデフォルト）
    pub dynamodb_endpoint:   Option<String>,
    /// 通知発行設定
    pub publisher:           PublisherConfig,
}

/// 通知の発行先
///
/// `NOTIFICATION_BACKEND` 環境変数で切り替える:
/// - `sns`: Amazon SNS トピックへ発行（本番）
/// - `noop`: 発行しない（ペイロードをログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublisherConfig {
    Sns { topic_arn: String },
    Noop,
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let publisher = match lookup("NOTIFICATION_BACKEND").as_deref() {
            None | Some("noop") => PublisherConfig::Noop,
            Some("sns") => PublisherConfig::Sns {
                topic_arn: required("NOTIFICATION_TOPIC_ARN")?,
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            default_recipient: required("SLACK_NOTIFICATION_REPORT_PATH")?,
            accounts_table_name: required("ACCOUNTS_TABLE_NAME")?,
            dynamodb_endpoint: lookup("DYNAMODB_ENDPOINT"),
            publisher,
        })
    }
}
