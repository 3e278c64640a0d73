//! # インフラ層エラー定義
//!
//! DynamoDB との通信や、取得したアイテムの解釈で発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別
//!
//! convenience constructor でエラーを生成すると、その時点のスパン情報
//! （呼び出し経路）が自動的に記録される。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別に応じた処理には [`kind()`](InfraError::kind) を使用する。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// DynamoDB エラー
    ///
    /// AWS SDK のエラー型はジェネリクスが深く `#[from]` が困難なため、
    /// 手動で String にマップする。
    #[error("DynamoDB エラー: {0}")]
    DynamoDb(String),

    /// 取得したアイテムが想定した形式ではない
    ///
    /// 必須属性の欠落や型の不一致。
    #[error("アイテムの形式が不正です: {0}")]
    InvalidItem(String),
}

impl InfraError {
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// InfraError を分解して InfraErrorKind と SpanTrace を取り出す
    pub fn into_parts(self) -> (InfraErrorKind, SpanTrace) {
        (self.kind, self.span_trace)
    }

    /// DynamoDB エラーを生成する
    pub fn dynamo_db(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::DynamoDb(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// アイテム形式エラーを生成する
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::InvalidItem(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// テスト用に ErrorLayer 付き subscriber を設定する
    fn with_error_layer(f: impl FnOnce()) {
        let subscriber = tracing_subscriber::registry().with(tracing_error::ErrorLayer::default());
        let _guard = tracing::subscriber::set_default(subscriber);
        f();
    }

    #[test]
    fn test_dynamo_dbでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_account_lookup", account_id = "012345678921");
            let _enter = span.enter();

            let err = InfraError::dynamo_db("接続失敗");

            assert!(matches!(err.kind(), InfraErrorKind::DynamoDb(msg) if msg == "接続失敗"));
            let trace_str = format!("{}", err.span_trace());
            assert!(
                trace_str.contains("test_account_lookup"),
                "SpanTrace がスパン名を含むこと: {trace_str}",
            );
        });
    }

    #[test]
    fn test_invalid_itemでspan_traceがキャプチャされる() {
        with_error_layer(|| {
            let span = tracing::info_span!("test_parse_item");
            let _enter = span.enter();

            let err = InfraError::invalid_item("name がありません");

            assert!(matches!(
                err.kind(),
                InfraErrorKind::InvalidItem(msg) if msg == "name がありません"
            ));
            assert!(format!("{}", err.span_trace()).contains("test_parse_item"));
        });
    }

    #[test]
    fn test_displayがinfra_error_kindのメッセージを出力する() {
        let err = InfraError::invalid_item("name がありません");
        assert_eq!(
            format!("{err}"),
            "アイテムの形式が不正です: name がありません"
        );
    }

    #[test]
    fn test_into_partsで種別を取り出せる() {
        let (kind, _trace) = InfraError::dynamo_db("test").into_parts();
        assert!(matches!(kind, InfraErrorKind::DynamoDb(_)));
    }
}
