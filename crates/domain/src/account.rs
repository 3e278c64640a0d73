//! # アカウント
//!
//! 非準拠リソースを所有する AWS アカウントの台帳レコードを定義する。
//!
//! 台帳そのもの（DynamoDB テーブル）の読み出しはインフラ層の
//! `AccountRepository` が担当し、ここでは通知に必要な 3 項目
//! （アカウント ID、表示名、通知チャンネル）のみを扱う。

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// AWS アカウント ID（値オブジェクト）
///
/// 不透明な文字列として扱い、形式（12 桁の数字など）は検証しない。
///
/// # 不変条件
///
/// - 空文字列ではない
/// - 前後に空白を含まない（台帳は完全一致で引くため、補正せず拒否する）
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("{_0}")]
pub struct AccountId(String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.trim().is_empty() {
            return Err(DomainError::Validation(
                "アカウント ID は必須です".to_string(),
            ));
        }
        if value.trim() != value {
            return Err(DomainError::Validation(format!(
                "アカウント ID の前後に空白があります: {value:?}"
            )));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// アカウント台帳レコード
///
/// `notification_channels` は台帳に登録された順序を保持する。
/// 空の場合もある。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    account_id:            AccountId,
    display_name:          String,
    notification_channels: Vec<String>,
}

impl AccountRecord {
    pub fn new(
        account_id: AccountId,
        display_name: impl Into<String>,
        notification_channels: Vec<String>,
    ) -> Self {
        Self {
            account_id,
            display_name: display_name.into(),
            notification_channels,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// 通知チャンネルのアドレス一覧（台帳の登録順）
    pub fn notification_channels(&self) -> &[String] {
        &self.notification_channels
    }
}
