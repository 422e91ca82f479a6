//! # 通知設定ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /internal/users/{user_id}/notification-preferences` - 通知設定取得
//! - `PUT /internal/users/{user_id}/notification-preferences` - 通知設定更新
//!
//! ボディは camelCase のキー（`newAnswer` など）。省略したキーは `true` として扱う。

use std::sync::Arc;

use askflow_domain::{notification::NotificationPreferences, user::UserId};
use askflow_shared::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{error::CoreError, usecase::PreferencesUseCaseImpl};

/// 通知設定 API の共有状態
pub struct PreferencesState {
    pub usecase: PreferencesUseCaseImpl,
}

/// GET /internal/users/{user_id}/notification-preferences
#[tracing::instrument(skip_all, fields(%user_id))]
pub async fn get_preferences(
    State(state): State<Arc<PreferencesState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, CoreError> {
    let preferences = state
        .usecase
        .get_preferences(&UserId::from_uuid(user_id))
        .await?;

    Ok(Json(ApiResponse::new(preferences)))
}

/// PUT /internal/users/{user_id}/notification-preferences
#[tracing::instrument(skip_all, fields(%user_id))]
pub async fn update_preferences(
    State(state): State<Arc<PreferencesState>>,
    Path(user_id): Path<Uuid>,
    Json(preferences): Json<NotificationPreferences>,
) -> Result<impl IntoResponse, CoreError> {
    let updated = state
        .usecase
        .update_preferences(&UserId::from_uuid(user_id), preferences)
        .await?;

    Ok(Json(ApiResponse::new(updated)))
}
