//! # DynamoDB 接続管理
//!
//! アカウント台帳テーブルを保持する Amazon DynamoDB への接続を管理する。
//!
//! ## 設計方針
//!
//! - **ローカル開発**: `DYNAMODB_ENDPOINT` が設定されていれば DynamoDB Local に接続する
//! - **本番環境**: 既定の認証情報チェーン（Lambda 実行ロール等）で Amazon DynamoDB に接続する
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use tagguard_infra::dynamodb;
//!
//! async fn setup() {
//!     let client = dynamodb::create_client(Some("http://localhost:18000")).await;
//! }
//! ```

use aws_sdk_dynamodb::Client;

/// DynamoDB Local 使用時のリージョン
const LOCAL_REGION: &str = "eu-west-1";

/// DynamoDB クライアントを作成する
///
/// `endpoint` が指定された場合は DynamoDB Local 用のクライアントを作成し、
/// 認証情報にダミー値を使用する（DynamoDB Local は認証情報を検証しない）。
/// 指定がない場合は AWS の既定の設定（環境変数、実行ロール）を読み込む。
pub async fn create_client(endpoint: Option<&str>) -> Client {
    let loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    let config = match endpoint {
        Some(endpoint) => {
            tracing::debug!(endpoint, "DynamoDB Local に接続します");
            loader
                .endpoint_url(endpoint)
                .region(aws_config::Region::new(LOCAL_REGION))
                // DynamoDB Local はクレデンシャルを検証しないが、SDK はプロバイダが必要
                .credentials_provider(aws_sdk_dynamodb::config::Credentials::new(
                    "local", "local", None, None, "local",
                ))
                .load()
                .await
        }
        None => loader.load().await,
    };

    Client::new(&config)
}
