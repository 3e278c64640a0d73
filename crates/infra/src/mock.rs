//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! tagguard-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use tagguard_domain::{
    account::{AccountId, AccountRecord},
    notification::{NotificationError, NotificationPayload},
};

use crate::{error::InfraError, notification::NotificationPublisher, repository::AccountRepository};

// ===== MockAccountRepository =====

/// インメモリのアカウント台帳
#[derive(Clone, Default)]
pub struct MockAccountRepository {
    accounts:    Arc<Mutex<HashMap<AccountId, AccountRecord>>>,
    unavailable: bool,
    lookups:     Arc<Mutex<Vec<AccountId>>>,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に DynamoDB エラーを返すリポジトリ
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_account(self, account: AccountRecord) -> Self {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.account_id().clone(), account);
        self
    }

    /// 呼び出された順のアカウント ID
    pub fn lookups(&self) -> Vec<AccountId> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_id(
        &self,
        account_id: &AccountId,
    ) -> Result<Option<AccountRecord>, InfraError> {
        self.lookups.lock().unwrap().push(account_id.clone());

        if self.unavailable {
            return Err(InfraError::dynamo_db("モック: 台帳に接続できません"));
        }

        Ok(self.accounts.lock().unwrap().get(account_id).cloned())
    }
}

// ===== MockNotificationPublisher =====

/// 発行されたペイロードを記録する通知発行モック
#[derive(Clone, Default)]
pub struct MockNotificationPublisher {
    published: Arc<Mutex<Vec<NotificationPayload>>>,
    failing:   bool,
}

impl MockNotificationPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に発行に失敗するモック
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// 発行されたペイロード（発行順）
    pub fn published(&self) -> Vec<NotificationPayload> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPublisher for MockNotificationPublisher {
    async fn publish(&self, payload: &NotificationPayload) -> Result<(), NotificationError> {
        if self.failing {
            return Err(NotificationError::PublishFailed(
                "モック: トピックに到達できません".to_string(),
            ));
        }

        self.published.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
