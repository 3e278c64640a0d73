//! # リポジトリ
//!
//! 外部ストアからのレコード取得を抽象化する。
//!
//! - [`account_repository`] - アカウント台帳（DynamoDB）

pub mod account_repository;

pub use account_repository::{AccountRepository, DynamoDbAccountRepository};
