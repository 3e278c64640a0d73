//! # ログ出力
//!
//! Notifier は標準出力をイベントの受け渡しに使うため、ログはすべて標準エラー出力に書く。
//!
//! | 環境変数 | 値 |
//! |----------|----|
//! | `LOG_FORMAT` | `json`（ログ収集基盤向け） / `pretty`（手元での実行向け、既定） |
//! | `RUST_LOG` | フィルタ（既定: [`DEFAULT_FILTER`]） |

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,tagguard=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する
    ///
    /// 大文字小文字は区別する。未知の値は警告を出して `Pretty` とする
    /// （この時点ではまだ subscriber が無いため `eprintln!` で出す）。
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// [`root_span`](TracingConfig::root_span) の `service` フィールド
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(service_name, LogFormat::from_env())
    }

    /// 1 回の起動で処理するイベント全体を囲むスパン
    ///
    /// JSON 出力では `span.service` として各行に付く。
    pub fn root_span(&self) -> tracing::Span {
        tracing::info_span!("app", service = %self.service_name)
    }
}

/// グローバル subscriber を登録する
///
/// `ErrorLayer` も登録するので、`InfraError` の `SpanTrace` に呼び出し経路が残る。
/// プロセスにつき 1 回だけ呼ぶこと。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_FILTER.into());

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let fmt_layer = match config.log_format {
        LogFormat::Json => fmt_layer
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt_layer.boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn log_formatは小文字の値のみ受け付ける() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(""), LogFormat::Pretty);
    }

    #[test]
    fn log_formatの既定はpretty() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn root_spanはsubscriberなしでも作成できる() {
        let config = TracingConfig::new("notifier", LogFormat::Json);

        let span = config.root_span();

        assert_eq!(config.service_name, "notifier");
        assert!(span.is_disabled());
    }
}
