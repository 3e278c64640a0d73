//! # AccountRepository
//!
//! アカウント台帳の読み出しを担当するリポジトリ。
//!
//! ## テーブル構造
//!
//! - PK: `accountId` (S)
//! - `name` (S): アカウントの表示名
//! - `slackChannels` (L of S): 通知チャンネルのアドレス（任意）
//!
//! 通知に必要な 3 属性のみを射影して取得する。`name` は DynamoDB の予約語のため
//! 属性名プレースホルダ `#name` を経由する。

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{Client, types::AttributeValue};
use tagguard_domain::account::{AccountId, AccountRecord};

use crate::InfraError;

const ATTR_ACCOUNT_ID: &str = "accountId";
const ATTR_NAME: &str = "name";
const ATTR_SLACK_CHANNELS: &str = "slackChannels";

/// アカウント台帳リポジトリトレイト
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// アカウント ID の完全一致でレコードを取得する
    ///
    /// 存在しない場合は `Ok(None)` を返す。
    async fn find_by_id(&self, account_id: &AccountId)
    -> Result<Option<AccountRecord>, InfraError>;
}

/// DynamoDB 実装の AccountRepository
pub struct DynamoDbAccountRepository {
    client:     Client,
    table_name: String,
}

impl DynamoDbAccountRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl AccountRepository for DynamoDbAccountRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%account_id))]
    async fn find_by_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<AccountRecord>, InfraError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(
                ATTR_ACCOUNT_ID,
                AttributeValue::S(account_id.as_str().to_string()),
            )
            .projection_expression("accountId,#name,slackChannels")
            .expression_attribute_names("#name", ATTR_NAME)
            .send()
            .await
            .map_err(|e| {
                InfraError::dynamo_db(format!(
                    "テーブル '{}' からのアカウント取得に失敗: {e}",
                    self.table_name
                ))
            })?;

        output.item.as_ref().map(account_from_item).transpose()
    }
}

/// DynamoDB アイテムをアカウント台帳レコードに変換する
fn account_from_item(item: &HashMap<String, AttributeValue>) -> Result<AccountRecord, InfraError> {
    let account_id = AccountId::new(required_string(item, ATTR_ACCOUNT_ID)?)
        .map_err(|e| InfraError::invalid_item(e.to_string()))?;
    let name = required_string(item, ATTR_NAME)?;

    let channels = match item.get(ATTR_SLACK_CHANNELS) {
        None | Some(AttributeValue::Null(_)) => Vec::new(),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|value| match value {
                AttributeValue::S(channel) => Ok(channel.clone()),
                other => Err(InfraError::invalid_item(format!(
                    "{ATTR_SLACK_CHANNELS} の要素が文字列ではありません: {other:?}"
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(InfraError::invalid_item(format!(
                "{ATTR_SLACK_CHANNELS} がリストではありません: {other:?}"
            )));
        }
    };

    Ok(AccountRecord::new(account_id, name, channels))
}

fn required_string(
    item: &HashMap<String, AttributeValue>,
    attribute: &str,
) -> Result<String, InfraError> {
    match item.get(attribute) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(other) => Err(InfraError::invalid_item(format!(
            "{attribute} が文字列ではありません: {other:?}"
        ))),
        None => Err(InfraError::invalid_item(format!(
            "{attribute} が存在しません"
        ))),
    }
}
