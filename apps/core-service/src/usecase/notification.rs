//! # 通知ユースケース
//!
//! コンテンツ操作に伴うアプリ内通知の生成と書き込みを統合する。
//!
//! ## モジュール構成
//!
//! - [`message_renderer`] - tera テンプレートエンジンによるメッセージ生成
//! - [`service`] - 受信者解決 + レンダリング + 書き込みの統合サービス

pub mod message_renderer;
pub mod service;

pub use message_renderer::MessageRenderer;
pub use service::NotificationService;
