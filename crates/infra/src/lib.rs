//! # TagGuard インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **アカウント台帳**: DynamoDB からアカウントの表示名と通知チャンネルを取得する
//! - **通知発行**: 組み立て済みの通知ペイロードを SNS トピックに発行する
//!
//! どちらも判断ロジックを持たない薄いアダプタとし、分類や本文生成は行わない。
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`dynamodb`] - DynamoDB クライアントの生成
//! - [`repository`] - アカウント台帳リポジトリ
//! - [`notification`] - 通知発行（SNS / Noop）
//! - [`error`] - インフラ層エラー定義

pub mod dynamodb;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod notification;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
