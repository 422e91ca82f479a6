//! # AnswerRepository
//!
//! 回答の永続化を担当するリポジトリ。
//!
//! ## 採択の整合性
//!
//! 1 つの質問で採択済みの回答は高々 1 件。`answers_one_accepted_per_question`
//! 部分一意インデックスで DB 側でも保証する。採択の切り替えは
//! [`AnswerRepository::clear_accepted`] → [`AnswerRepository::update_acceptance`]
//! を同一トランザクションで行う。

use async_trait::async_trait;
use askflow_domain::{
    answer::{Answer, AnswerId, AnswerRecord},
    question::QuestionId,
    user::UserId,
    value_objects::AnswerBody,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 回答リポジトリトレイト
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// 回答を挿入する
    async fn insert(&self, tx: &mut TxContext, answer: &Answer) -> Result<(), InfraError>;

    /// ID で回答を検索する
    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, InfraError>;

    /// 質問の採択済み回答をすべて未採択に戻す
    ///
    /// # 戻り値
    ///
    /// 採択を解除した件数
    async fn clear_accepted(
        &self,
        tx: &mut TxContext,
        question_id: &QuestionId,
        now: DateTime<Utc>,
    ) -> Result<u64, InfraError>;

    /// 回答の採択状態と更新日時を保存する
    async fn update_acceptance(&self, tx: &mut TxContext, answer: &Answer)
    -> Result<(), InfraError>;
}

#[derive(sqlx::FromRow)]
struct AnswerRow {
    id:          Uuid,
    question_id: Uuid,
    author_id:   Uuid,
    body:        String,
    is_accepted: bool,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

impl TryFrom<AnswerRow> for Answer {
    type Error = InfraError;

    fn try_from(row: AnswerRow) -> Result<Self, Self::Error> {
        Ok(Answer::from_db(AnswerRecord {
            id:          AnswerId::from_uuid(row.id),
            question_id: QuestionId::from_uuid(row.question_id),
            author_id:   UserId::from_uuid(row.author_id),
            body:        AnswerBody::new(row.body)
                .map_err(|e| InfraError::unexpected(e.to_string()))?,
            is_accepted: row.is_accepted,
            created_at:  row.created_at,
            updated_at:  row.updated_at,
        }))
    }
}

/// PostgreSQL 実装の AnswerRepository
#[derive(Debug, Clone)]
pub struct PostgresAnswerRepository {
    pool: PgPool,
}

impl PostgresAnswerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %answer.id()))]
    async fn insert(&self, tx: &mut TxContext, answer: &Answer) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO answers (
                id, question_id, author_id, body, is_accepted, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(answer.id().as_uuid())
        .bind(answer.question_id().as_uuid())
        .bind(answer.author_id().as_uuid())
        .bind(answer.body().as_str())
        .bind(answer.is_accepted())
        .bind(answer.created_at())
        .bind(answer.updated_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, InfraError> {
        let row = sqlx::query_as::<_, AnswerRow>(
            r#"
            SELECT id, question_id, author_id, body, is_accepted, created_at, updated_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Answer::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%question_id))]
    async fn clear_accepted(
        &self,
        tx: &mut TxContext,
        question_id: &QuestionId,
        now: DateTime<Utc>,
    ) -> Result<u64, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE answers
            SET is_accepted = FALSE, updated_at = $2
            WHERE question_id = $1 AND is_accepted
            "#,
        )
        .bind(question_id.as_uuid())
        .bind(now)
        .execute(tx.conn())
        .await?;

        Ok(result.rows_affected())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %answer.id()))]
    async fn update_acceptance(
        &self,
        tx: &mut TxContext,
        answer: &Answer,
    ) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE answers
            SET is_accepted = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(answer.id().as_uuid())
        .bind(answer.is_accepted())
        .bind(answer.updated_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }
}
