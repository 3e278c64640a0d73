//! # Notifier
//!
//! 必須タグ検査のステートマシンから 1 件のコンプライアンスイベントを受け取り、
//! 非準拠リソースの Slack 通知を組み立てて通知トピックへ発行する。
//!
//! ## 入出力
//!
//! - 標準入力: コンプライアンスイベント（JSON）
//! - 標準出力: 受け取ったイベント（変更なし、次のステップへの入力）
//! - 標準エラー出力: ログ（`LOG_FORMAT=json` で構造化ログ）
//!
//! ## 環境変数
//!
//! 設定項目は [`tagguard_notifier::config`] を参照。
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（発行せずペイロードをログ出力）
//! SLACK_NOTIFICATION_REPORT_PATH=http://test.slack.test/infra \
//! ACCOUNTS_TABLE_NAME=accounts DYNAMODB_ENDPOINT=http://localhost:18000 \
//!   cargo run -p tagguard-notifier < event.json
//!
//! # 本番環境
//! NOTIFICATION_BACKEND=sns NOTIFICATION_TOPIC_ARN=arn:aws:sns:... \
//!   cargo run -p tagguard-notifier --release < event.json
//! ```

use std::{io::Read as _, sync::Arc};

use anyhow::Context as _;
use tagguard_infra::{
    dynamodb,
    notification::{
        NoopNotificationPublisher,
        NotificationPublisher,
        SnsNotificationPublisher,
        create_sns_client,
    },
    repository::DynamoDbAccountRepository,
};
use tagguard_notifier::{
    config::{NotifierConfig, PublisherConfig},
    usecase::{NotificationBuilder, NotificationService, TemplateRenderer},
};
use tagguard_shared::observability::{TracingConfig, init_tracing};
use tracing::Instrument as _;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("notifier");
    init_tracing(&tracing_config);

    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    let dynamodb_client = dynamodb::create_client(config.dynamodb_endpoint.as_deref()).await;
    let account_repo = Arc::new(DynamoDbAccountRepository::new(
        dynamodb_client,
        config.accounts_table_name.clone(),
    ));

    let publisher: Arc<dyn NotificationPublisher> = match &config.publisher {
        PublisherConfig::Sns { topic_arn } => {
            tracing::info!(%topic_arn, "通知バックエンド: SNS");
            Arc::new(SnsNotificationPublisher::new(
                create_sns_client().await,
                topic_arn.clone(),
            ))
        }
        PublisherConfig::Noop => {
            tracing::info!("通知バックエンド: Noop（発行せずログ出力のみ）");
            Arc::new(NoopNotificationPublisher)
        }
    };

    let renderer = TemplateRenderer::new().context("テンプレートの初期化に失敗しました")?;
    let builder = NotificationBuilder::new(config.default_recipient.as_str(), renderer);
    let service = NotificationService::new(account_repo, publisher, builder);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("標準入力の読み込みに失敗しました")?;
    let event: serde_json::Value =
        serde_json::from_str(&input).context("イベントが JSON ではありません")?;

    let result = service
        .handle(event)
        .instrument(tracing_config.root_span())
        .await
        .context("イベントの処理に失敗しました")?;

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
