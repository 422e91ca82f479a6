//! # ユースケース層
//!
//! Core Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `content`: 回答・コメント・採択・評価
//! - `notification`: 通知の作成（ベストエフォート）
//! - `inbox`: 通知の一覧・既読化・削除
//! - `preferences`: 通知設定

pub(crate) mod helpers;

pub mod content;
pub mod inbox;
pub mod notification;
pub mod preferences;

pub use content::{
    ContentRepositories,
    ContentUseCaseImpl,
    HelpfulToggleResult,
    PostAnswerInput,
    PostCommentInput,
};
pub use inbox::InboxUseCaseImpl;
pub use notification::{MessageRenderer, NotificationService};
pub use preferences::PreferencesUseCaseImpl;
