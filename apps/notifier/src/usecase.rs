//! # ユースケース層
//!
//! - [`notification`] - 通知の組み立て（コア）と発行フロー

pub mod notification;

pub use notification::{NotificationBuilder, NotificationService, TemplateRenderer};
