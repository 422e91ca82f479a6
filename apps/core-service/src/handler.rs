//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケースに委譲

pub mod content;
pub mod health;
pub mod notification;
pub mod preferences;

pub use content::{
    ContentState,
    accept_answer,
    post_answer,
    post_answer_comment,
    post_question_comment,
    toggle_helpful,
};
pub use health::health_check;
pub use notification::{
    InboxState,
    count_unread,
    delete_notification,
    list_notifications,
    mark_read,
};
pub use preferences::{PreferencesState, get_preferences, update_preferences};
