//! # 通知ハンドラ
//!
//! 通知受信箱の内部 API を提供する。受信者はクエリパラメータ `user_id` で指定する。
//!
//! ## エンドポイント
//!
//! - `GET /internal/notifications?user_id=` - 通知一覧（新しい順）
//! - `GET /internal/notifications/unread-count?user_id=` - 未読件数
//! - `POST /internal/notifications/{notification_id}/read?user_id=` - 既読化
//! - `DELETE /internal/notifications/{notification_id}?user_id=` - 削除

use std::sync::Arc;

use askflow_domain::{
    notification::{Notification, NotificationId},
    user::UserId,
};
use askflow_shared::ApiResponse;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::CoreError, usecase::InboxUseCaseImpl};

/// 通知 API の共有状態
pub struct InboxState {
    pub usecase: InboxUseCaseImpl,
}

/// 受信者クエリパラメータ
#[derive(Debug, Deserialize)]
pub struct RecipientQuery {
    pub user_id: Uuid,
}

/// 通知 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct NotificationDto {
    pub id:         Uuid,
    pub kind:       String,
    pub title:      String,
    pub message:    String,
    pub link:       String,
    pub is_read:    bool,
    pub created_at: String,
}

impl From<&Notification> for NotificationDto {
    fn from(notification: &Notification) -> Self {
        Self {
            id:         *notification.id().as_uuid(),
            kind:       notification.kind().to_string(),
            title:      notification.title().to_string(),
            message:    notification.message().to_string(),
            link:       notification.link().to_string(),
            is_read:    notification.is_read(),
            created_at: notification.created_at().to_rfc3339(),
        }
    }
}

/// 未読件数 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct UnreadCountDto {
    pub unread_count: i64,
}

/// GET /internal/notifications
#[tracing::instrument(skip_all, fields(user_id = %query.user_id))]
pub async fn list_notifications(
    State(state): State<Arc<InboxState>>,
    Query(query): Query<RecipientQuery>,
) -> Result<impl IntoResponse, CoreError> {
    let notifications = state
        .usecase
        .list_notifications(&UserId::from_uuid(query.user_id))
        .await?;

    let dtos: Vec<NotificationDto> = notifications.iter().map(NotificationDto::from).collect();
    Ok(Json(ApiResponse::new(dtos)))
}

/// GET /internal/notifications/unread-count
#[tracing::instrument(skip_all, fields(user_id = %query.user_id))]
pub async fn count_unread(
    State(state): State<Arc<InboxState>>,
    Query(query): Query<RecipientQuery>,
) -> Result<impl IntoResponse, CoreError> {
    let unread_count = state
        .usecase
        .count_unread(&UserId::from_uuid(query.user_id))
        .await?;

    Ok(Json(ApiResponse::new(UnreadCountDto { unread_count })))
}

/// POST /internal/notifications/{notification_id}/read
///
/// ## レスポンス
///
/// - `204 No Content`: 既読化済み（既に既読でも同じ）
/// - `404 Not Found`: 受信者宛ての通知が存在しない
#[tracing::instrument(skip_all, fields(%notification_id, user_id = %query.user_id))]
pub async fn mark_read(
    State(state): State<Arc<InboxState>>,
    Path(notification_id): Path<Uuid>,
    Query(query): Query<RecipientQuery>,
) -> Result<impl IntoResponse, CoreError> {
    state
        .usecase
        .mark_read(
            &NotificationId::from_uuid(notification_id),
            &UserId::from_uuid(query.user_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /internal/notifications/{notification_id}
///
/// ## レスポンス
///
/// - `204 No Content`: 削除成功
/// - `404 Not Found`: 受信者宛ての通知が存在しない
#[tracing::instrument(skip_all, fields(%notification_id, user_id = %query.user_id))]
pub async fn delete_notification(
    State(state): State<Arc<InboxState>>,
    Path(notification_id): Path<Uuid>,
    Query(query): Query<RecipientQuery>,
) -> Result<impl IntoResponse, CoreError> {
    state
        .usecase
        .delete_notification(
            &NotificationId::from_uuid(notification_id),
            &UserId::from_uuid(query.user_id),
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
