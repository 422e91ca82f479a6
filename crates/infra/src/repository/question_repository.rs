//! # QuestionRepository
//!
//! 質問の読み取りを担当するリポジトリ。
//! 質問の作成・編集は別サービスの責務で、ここでは通知に必要な参照のみ扱う。

use async_trait::async_trait;
use askflow_domain::{
    question::{Question, QuestionId},
    user::UserId,
    value_objects::QuestionTitle,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 質問リポジトリトレイト
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// ID で質問を検索する
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, InfraError>;
}

#[derive(sqlx::FromRow)]
struct QuestionRow {
    id:         Uuid,
    title:      String,
    author_id:  Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuestionRow> for Question {
    type Error = InfraError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        Ok(Question::new(
            QuestionId::from_uuid(row.id),
            QuestionTitle::new(row.title).map_err(|e| InfraError::unexpected(e.to_string()))?,
            UserId::from_uuid(row.author_id),
            row.created_at,
        ))
    }
}

/// PostgreSQL 実装の QuestionRepository
#[derive(Debug, Clone)]
pub struct PostgresQuestionRepository {
    pool: PgPool,
}

impl PostgresQuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, InfraError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, title, author_id, created_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Question::try_from).transpose()
    }
}
