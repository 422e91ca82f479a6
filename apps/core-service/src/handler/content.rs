//! # コンテンツハンドラ
//!
//! 回答・コメント・採択・評価の内部 API を提供する。
//! 操作者 ID は上流のゲートウェイで認証済みのものをボディで受け取る。
//!
//! ## エンドポイント
//!
//! - `POST /internal/questions/{question_id}/answers` - 回答投稿
//! - `POST /internal/questions/{question_id}/comments` - 質問へのコメント投稿
//! - `POST /internal/answers/{answer_id}/comments` - 回答へのコメント投稿
//! - `POST /internal/answers/{answer_id}/accept` - 回答の採択
//! - `POST /internal/answers/{answer_id}/helpful` - 「役に立った」評価のトグル

use std::sync::Arc;

use askflow_domain::{
    answer::{Answer, AnswerId},
    comment::Comment,
    question::QuestionId,
    user::UserId,
};
use askflow_shared::ApiResponse;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::CoreError,
    usecase::{ContentUseCaseImpl, HelpfulToggleResult, PostAnswerInput, PostCommentInput},
};

/// コンテンツ API の共有状態
pub struct ContentState {
    pub usecase: ContentUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 回答投稿リクエスト
#[derive(Debug, Deserialize)]
pub struct PostAnswerRequest {
    pub author_id: Uuid,
    pub body:      String,
}

/// コメント投稿リクエスト
#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub author_id: Uuid,
    pub body:      String,
}

/// 操作者のみを含むリクエスト（採択・評価）
#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    pub user_id: Uuid,
}

/// 回答 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerDto {
    pub id:          Uuid,
    pub question_id: Uuid,
    pub author_id:   Uuid,
    pub body:        String,
    pub is_accepted: bool,
    pub created_at:  String,
    pub updated_at:  String,
}

impl From<&Answer> for AnswerDto {
    fn from(answer: &Answer) -> Self {
        Self {
            id:          *answer.id().as_uuid(),
            question_id: *answer.question_id().as_uuid(),
            author_id:   *answer.author_id().as_uuid(),
            body:        answer.body().as_str().to_string(),
            is_accepted: answer.is_accepted(),
            created_at:  answer.created_at().to_rfc3339(),
            updated_at:  answer.updated_at().to_rfc3339(),
        }
    }
}

/// コメント DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentDto {
    pub id:          Uuid,
    pub parent_type: String,
    pub parent_id:   Uuid,
    pub author_id:   Uuid,
    pub body:        String,
    pub created_at:  String,
}

impl From<&Comment> for CommentDto {
    fn from(comment: &Comment) -> Self {
        Self {
            id:          *comment.id().as_uuid(),
            parent_type: comment.parent().type_str().to_string(),
            parent_id:   *comment.parent().id_uuid(),
            author_id:   *comment.author_id().as_uuid(),
            body:        comment.body().as_str().to_string(),
            created_at:  comment.created_at().to_rfc3339(),
        }
    }
}

/// 評価トグル結果 DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct HelpfulToggleDto {
    pub marked:        bool,
    pub helpful_count: i64,
}

impl From<HelpfulToggleResult> for HelpfulToggleDto {
    fn from(result: HelpfulToggleResult) -> Self {
        Self {
            marked:        result.marked,
            helpful_count: result.helpful_count,
        }
    }
}

// --- ハンドラ ---

/// POST /internal/questions/{question_id}/answers
///
/// ## レスポンス
///
/// - `201 Created`: 作成された回答
/// - `400 Bad Request`: 本文が空または長すぎる
/// - `404 Not Found`: 質問または回答者が見つからない
#[tracing::instrument(skip_all, fields(%question_id))]
pub async fn post_answer(
    State(state): State<Arc<ContentState>>,
    Path(question_id): Path<Uuid>,
    Json(req): Json<PostAnswerRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let input = PostAnswerInput {
        question_id: QuestionId::from_uuid(question_id),
        author_id:   UserId::from_uuid(req.author_id),
        body:        req.body,
    };

    let answer = state.usecase.post_answer(input).await?;

    let response = ApiResponse::new(AnswerDto::from(&answer));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /internal/questions/{question_id}/comments
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたコメント
/// - `400 Bad Request`: 本文が空または長すぎる
/// - `404 Not Found`: 質問または投稿者が見つからない
#[tracing::instrument(skip_all, fields(%question_id))]
pub async fn post_question_comment(
    State(state): State<Arc<ContentState>>,
    Path(question_id): Path<Uuid>,
    Json(req): Json<PostCommentRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let input = PostCommentInput::on_question(
        QuestionId::from_uuid(question_id),
        UserId::from_uuid(req.author_id),
        req.body,
    );

    let comment = state.usecase.post_comment(input).await?;

    let response = ApiResponse::new(CommentDto::from(&comment));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /internal/answers/{answer_id}/comments
///
/// ## レスポンス
///
/// - `201 Created`: 作成されたコメント
/// - `400 Bad Request`: 本文が空または長すぎる
/// - `404 Not Found`: 回答または投稿者が見つからない
#[tracing::instrument(skip_all, fields(%answer_id))]
pub async fn post_answer_comment(
    State(state): State<Arc<ContentState>>,
    Path(answer_id): Path<Uuid>,
    Json(req): Json<PostCommentRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let input = PostCommentInput::on_answer(
        AnswerId::from_uuid(answer_id),
        UserId::from_uuid(req.author_id),
        req.body,
    );

    let comment = state.usecase.post_comment(input).await?;

    let response = ApiResponse::new(CommentDto::from(&comment));
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /internal/answers/{answer_id}/accept
///
/// ## レスポンス
///
/// - `200 OK`: 採択済みの回答
/// - `403 Forbidden`: 質問者以外
/// - `404 Not Found`: 回答・質問・操作者が見つからない
/// - `409 Conflict`: 同時採択の競合
#[tracing::instrument(skip_all, fields(%answer_id))]
pub async fn accept_answer(
    State(state): State<Arc<ContentState>>,
    Path(answer_id): Path<Uuid>,
    Json(req): Json<ActorRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let answer = state
        .usecase
        .accept_answer(AnswerId::from_uuid(answer_id), UserId::from_uuid(req.user_id))
        .await?;

    let response = ApiResponse::new(AnswerDto::from(&answer));
    Ok((StatusCode::OK, Json(response)))
}

/// POST /internal/answers/{answer_id}/helpful
///
/// ## レスポンス
///
/// - `200 OK`: トグル後の評価状態と評価数
/// - `404 Not Found`: 回答または評価者が見つからない
/// - `409 Conflict`: 同じユーザーの評価が同時に到着した
#[tracing::instrument(skip_all, fields(%answer_id))]
pub async fn toggle_helpful(
    State(state): State<Arc<ContentState>>,
    Path(answer_id): Path<Uuid>,
    Json(req): Json<ActorRequest>,
) -> Result<impl IntoResponse, CoreError> {
    let result = state
        .usecase
        .toggle_helpful(AnswerId::from_uuid(answer_id), UserId::from_uuid(req.user_id))
        .await?;

    let response = ApiResponse::new(HelpfulToggleDto::from(result));
    Ok((StatusCode::OK, Json(response)))
}
