//! # Core Service エラー定義
//!
//! Core Service 固有のエラーと、HTTP レスポンスへの変換を定義する。

use askflow_infra::InfraError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// エラーレスポンス（RFC 7807 Problem Details）
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

/// Core Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// 権限不足
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 競合（一意制約違反）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

/// 一意制約違反は 409 として返し、それ以外は 500 として扱う
impl From<InfraError> for CoreError {
    fn from(err: InfraError) -> Self {
        if err.is_conflict() {
            CoreError::Conflict(err.to_string())
        } else {
            CoreError::Database(err)
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let (status, error_type, title, detail) = match &self {
            CoreError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "https://askflow.example.com/errors/not-found",
                "Not Found",
                msg.clone(),
            ),
            CoreError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "https://askflow.example.com/errors/bad-request",
                "Bad Request",
                msg.clone(),
            ),
            CoreError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                "https://askflow.example.com/errors/forbidden",
                "Forbidden",
                msg.clone(),
            ),
            CoreError::Conflict(msg) => (
                StatusCode::CONFLICT,
                "https://askflow.example.com/errors/conflict",
                "Conflict",
                msg.clone(),
            ),
            CoreError::Database(e) => {
                tracing::error!(
                    error.category = askflow_shared::event_log::error::category::INFRASTRUCTURE,
                    error.kind = askflow_shared::event_log::error::kind::DATABASE,
                    span_trace = %e.span_trace(),
                    "データベースエラー: {}",
                    e
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "https://askflow.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
            CoreError::Internal(msg) => {
                tracing::error!(
                    error.category = askflow_shared::event_log::error::category::INFRASTRUCTURE,
                    error.kind = askflow_shared::event_log::error::kind::INTERNAL,
                    "内部エラー: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "https://askflow.example.com/errors/internal-error",
                    "Internal Server Error",
                    "内部エラーが発生しました".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error_type: error_type.to_string(),
                title:      title.to_string(),
                status:     status.as_u16(),
                detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(CoreError::NotFound("回答が見つかりません".into()), StatusCode::NOT_FOUND)]
    #[case(CoreError::BadRequest("不正".into()), StatusCode::BAD_REQUEST)]
    #[case(CoreError::Forbidden("不可".into()), StatusCode::FORBIDDEN)]
    #[case(CoreError::Conflict("重複".into()), StatusCode::CONFLICT)]
    #[case(CoreError::Internal("失敗".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_into_responseはエラー種別に応じたステータスを返す(
        #[case] error: CoreError,
        #[case] expected: StatusCode,
    ) {
        let response = error.into_response();

        assert_eq!(response.status(), expected);
    }

    #[tokio::test]
    async fn test_into_responseはproblem_details形式のボディを返す() {
        let response = CoreError::NotFound("回答が見つかりません".into()).into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "https://askflow.example.com/errors/not-found",
                "title": "Not Found",
                "status": 404,
                "detail": "回答が見つかりません",
            })
        );
    }

    #[tokio::test]
    async fn test_内部エラーの詳細はレスポンスに含まれない() {
        let response = CoreError::Internal("connection refused".into()).into_response();

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["detail"], "内部エラーが発生しました");
    }

    #[test]
    fn test_一意制約違反のinfra_errorはconflictに変換される() {
        let err: CoreError = InfraError::conflict("helpful_marks_answer_id_user_id_key").into();

        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn test_その他のinfra_errorはdatabaseに変換される() {
        let err: CoreError = InfraError::unexpected("boom").into();

        assert!(matches!(err, CoreError::Database(_)));
    }
}
