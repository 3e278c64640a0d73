//! # TagGuard ドメイン層
//!
//! 必須タグ違反リソースの通知に関するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **純粋性**: I/O を一切行わない。入力（イベント + アカウント台帳）から
//!   通知ペイロードを決定的に導出するための型と規則のみを持つ
//! - **閉じた列挙**: 通知ステートは文字列ディスパッチではなく
//!   [`notification::NotificationState`] の列挙で表現する
//! - **不変の値**: [`notification::NotificationPayload`] は一度に組み立て、以後変更しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`account`] - アカウント ID とアカウント台帳レコード
//! - [`compliance`] - コンプライアンスイベントと日時の扱い
//! - [`notification`] - 通知ステートの分類、通知ペイロード、通知エラー
//! - [`error`] - ドメイン層で発生するエラーの定義

pub mod account;
pub mod compliance;
pub mod error;
pub mod notification;

pub use error::DomainError;
