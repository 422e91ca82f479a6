//! # ルーター構築
//!
//! 全エンドポイントを 1 つの `Router` にまとめる。
//! `main` と結合テストの両方から使う。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handler::{
    ContentState,
    InboxState,
    PreferencesState,
    accept_answer,
    count_unread,
    delete_notification,
    get_preferences,
    health_check,
    list_notifications,
    mark_read,
    post_answer,
    post_answer_comment,
    post_question_comment,
    toggle_helpful,
    update_preferences,
};

/// ルーターを構築する
pub fn build_router(
    content_state: Arc<ContentState>,
    inbox_state: Arc<InboxState>,
    preferences_state: Arc<PreferencesState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // コンテンツ API
        .route(
            "/internal/questions/{question_id}/answers",
            post(post_answer),
        )
        .route(
            "/internal/questions/{question_id}/comments",
            post(post_question_comment),
        )
        .route(
            "/internal/answers/{answer_id}/comments",
            post(post_answer_comment),
        )
        .route("/internal/answers/{answer_id}/accept", post(accept_answer))
        .route(
            "/internal/answers/{answer_id}/helpful",
            post(toggle_helpful),
        )
        .with_state(content_state)
        // 通知 API
        .route("/internal/notifications", get(list_notifications))
        .route("/internal/notifications/unread-count", get(count_unread))
        .route(
            "/internal/notifications/{notification_id}/read",
            post(mark_read),
        )
        .route(
            "/internal/notifications/{notification_id}",
            axum::routing::delete(delete_notification),
        )
        .with_state(inbox_state)
        // 通知設定 API
        .route(
            "/internal/users/{user_id}/notification-preferences",
            get(get_preferences).put(update_preferences),
        )
        .with_state(preferences_state)
        .layer(TraceLayer::new_for_http())
}
