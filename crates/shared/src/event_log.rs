//! # ビジネスイベントログとエラーコンテキストの構造化ヘルパー
//!
//! ログフィールドの命名規約とヘルパーマクロを提供する。
//!
//! ## ビジネスイベント
//!
//! [`log_business_event!`] マクロで出力する。`event.kind = "business_event"` マーカーが
//! 自動付与され、`jq 'select(.["event.kind"] == "business_event")'` でフィルタできる。
//!
//! ## エラーコンテキスト
//!
//! `tracing::error!` に `error.category` + `error.kind` フィールドを直接追加する。
//! 定数は [`error`] モジュールで提供。
//!
//! ## フィールド命名規約
//!
//! ドット記法（`event.category`、`error.kind`）を使用する。JSON 出力ではフラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// `event.kind = "business_event"` マーカーを自動付与し、
/// `tracing::info!` レベルで出力する。
///
/// ## 必須フィールド（慣例）
///
/// - `event.category`: イベントカテゴリ（[`event::category`] の定数を使用）
/// - `event.action`: アクション名（[`event::action`] の定数を使用）
/// - `event.result`: 結果（[`event::result`] の定数を使用）
///
/// ## 推奨フィールド
///
/// - `event.entity_type`: エンティティ種別（[`event::entity_type`] の定数を使用）
/// - `event.entity_id`: エンティティ ID
/// - `event.actor_id`: 操作者 ID
///
/// ```
/// use askflow_shared::{event_log::event, log_business_event};
///
/// log_business_event!(
///     event.category = event::category::ANSWER,
///     event.action = event::action::ANSWER_POSTED,
///     event.entity_type = event::entity_type::ANSWER,
///     event.entity_id = "0190...",
///     event.result = event::result::SUCCESS,
///     "回答を投稿"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const ANSWER: &str = "answer";
        pub const COMMENT: &str = "comment";
        pub const HELPFUL: &str = "helpful";
        pub const NOTIFICATION: &str = "notification";
        pub const USER: &str = "user";
    }

    /// イベントアクション
    pub mod action {
        // 回答
        pub const ANSWER_POSTED: &str = "answer.posted";
        pub const ANSWER_ACCEPTED: &str = "answer.accepted";

        // コメント
        pub const COMMENT_POSTED: &str = "comment.posted";

        // 評価
        pub const HELPFUL_MARKED: &str = "helpful.marked";
        pub const HELPFUL_UNMARKED: &str = "helpful.unmarked";

        // 通知
        pub const NOTIFICATION_CREATED: &str = "notification.created";
        pub const NOTIFICATION_FAILED: &str = "notification.failed";
        pub const NOTIFICATION_READ: &str = "notification.read";
        pub const NOTIFICATION_DELETED: &str = "notification.deleted";

        // ユーザー
        pub const PREFERENCES_UPDATED: &str = "user.preferences_updated";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const ANSWER: &str = "answer";
        pub const COMMENT: &str = "comment";
        pub const HELPFUL_MARK: &str = "helpful_mark";
        pub const NOTIFICATION: &str = "notification";
        pub const USER: &str = "user";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB）
        pub const INFRASTRUCTURE: &str = "infrastructure";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const INTERNAL: &str = "internal";
    }
}
