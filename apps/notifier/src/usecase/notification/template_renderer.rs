//! # テンプレートレンダラー
//!
//! tera テンプレートエンジンで通知ステートごとの本文を生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **1 ステート 1 テンプレート**: テンプレート名は `{state}.txt`
//! - **既存の受信側との互換**: 本文は改行・空白・誤字（occured）まで含めて従来と同一
//!
//! テンプレートに渡す変数:
//!
//! | 変数 | 使用するステート |
//! |------|----------------|
//! | `notification_time` | first, production |
//! | `deletion_time` | first, second, third |
//! | `error_info` | error |

use tagguard_domain::{
    compliance::{ComplianceEvent, deletion_deadline, format_timestamp},
    notification::{NotificationError, NotificationState},
};
use tera::{Context, Tera};

/// テンプレートレンダラー
pub struct TemplateRenderer {
    engine: Tera,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "first.txt",
                    include_str!("../../../templates/notifications/first.txt"),
                ),
                (
                    "second.txt",
                    include_str!("../../../templates/notifications/second.txt"),
                ),
                (
                    "third.txt",
                    include_str!("../../../templates/notifications/third.txt"),
                ),
                (
                    "production.txt",
                    include_str!("../../../templates/notifications/production.txt"),
                ),
                (
                    "error.txt",
                    include_str!("../../../templates/notifications/error.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知ステートに対応する本文を生成する
    ///
    /// エラー以外のステートでは `notificationCreationTime` の欠落・形式不正を
    /// エラーとして返す（本文に表示しないステートでも検証する）。
    pub fn render(
        &self,
        state: NotificationState,
        event: &ComplianceEvent,
    ) -> Result<String, NotificationError> {
        let context = Self::build_context(state, event)?;

        self.engine
            .render(&format!("{}.txt", state.template_name()), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))
    }

    fn build_context(
        state: NotificationState,
        event: &ComplianceEvent,
    ) -> Result<Context, NotificationError> {
        let mut context = Context::new();

        if state == NotificationState::Error {
            context.insert("error_info", &event.error_detail().unwrap_or_default());
        }

        if state.requires_creation_time() {
            let created_at = event.creation_time()?;

            if state.shows_creation_time() {
                context.insert("notification_time", &format_timestamp(created_at));
            }
            if state.shows_deletion_deadline() {
                context.insert(
                    "deletion_time",
                    &format_timestamp(deletion_deadline(created_at)?),
                );
            }
        }

        Ok(context)
    }
}
