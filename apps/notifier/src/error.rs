//! # Notifier エラー定義
//!
//! 1 イベントの処理（台帳参照 → 組み立て → 発行）で発生するエラーを集約する。
//! いずれも致命的で、Notifier 自身は再試行しない。再試行の判断は呼び出し側
//! （ステートマシン）に委ねる。

use tagguard_domain::{DomainError, notification::NotificationError};
use tagguard_infra::InfraError;
use thiserror::Error;

/// Notifier で発生するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
    /// 入力イベントの構造が不正
    #[error("イベントの形式が不正です: {0}")]
    InvalidEvent(#[source] serde_json::Error),

    /// アカウント ID が不正
    #[error("アカウント ID が不正です: {0}")]
    InvalidAccountId(#[from] DomainError),

    /// アカウント台帳にレコードが存在しない
    #[error("アカウントが見つかりません: {0}")]
    AccountNotFound(String),

    /// アカウント台帳の参照に失敗
    #[error("アカウントの取得に失敗: {0}")]
    AccountLookup(#[source] InfraError),

    /// 通知の分類・本文生成に失敗
    #[error("通知の組み立てに失敗: {0}")]
    Build(#[source] NotificationError),

    /// 通知トピックへの発行に失敗
    #[error("通知の発行に失敗: {0}")]
    Publish(#[source] NotificationError),
}

impl NotifierError {
    /// アカウントの解決に失敗したか
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, Self::AccountNotFound(_) | Self::AccountLookup(_))
    }

    /// 入力イベントから通知ステートを決定できなかったか
    pub fn is_classification_error(&self) -> bool {
        matches!(self, Self::Build(e) if e.is_classification_error())
    }
}
