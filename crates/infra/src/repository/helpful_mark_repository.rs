//! # HelpfulMarkRepository
//!
//! 「役に立った」評価の永続化を担当するリポジトリ。
//! `(answer_id, user_id)` の一意制約により 1 ユーザー 1 評価を保証する。

use async_trait::async_trait;
use askflow_domain::{
    answer::AnswerId,
    helpful_mark::{HelpfulMark, HelpfulMarkId},
    user::UserId,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// 評価リポジトリトレイト
#[async_trait]
pub trait HelpfulMarkRepository: Send + Sync {
    /// 回答とユーザーの組で評価を検索する
    async fn find_by_answer_and_user(
        &self,
        answer_id: &AnswerId,
        user_id: &UserId,
    ) -> Result<Option<HelpfulMark>, InfraError>;

    /// 評価を挿入する
    ///
    /// 同じ組の評価が既に存在する場合は `InfraErrorKind::Conflict` を返す。
    async fn insert(&self, tx: &mut TxContext, mark: &HelpfulMark) -> Result<(), InfraError>;

    /// 評価を削除する
    async fn delete(&self, tx: &mut TxContext, id: &HelpfulMarkId) -> Result<(), InfraError>;

    /// 回答の評価数を数える
    ///
    /// 同じトランザクション内の未コミットの挿入・削除も反映される。
    async fn count_by_answer(
        &self,
        tx: &mut TxContext,
        answer_id: &AnswerId,
    ) -> Result<i64, InfraError>;
}

#[derive(sqlx::FromRow)]
struct HelpfulMarkRow {
    id:         Uuid,
    answer_id:  Uuid,
    user_id:    Uuid,
    created_at: DateTime<Utc>,
}

impl From<HelpfulMarkRow> for HelpfulMark {
    fn from(row: HelpfulMarkRow) -> Self {
        HelpfulMark::new(
            HelpfulMarkId::from_uuid(row.id),
            AnswerId::from_uuid(row.answer_id),
            UserId::from_uuid(row.user_id),
            row.created_at,
        )
    }
}

/// PostgreSQL 実装の HelpfulMarkRepository
#[derive(Debug, Clone)]
pub struct PostgresHelpfulMarkRepository {
    pool: PgPool,
}

impl PostgresHelpfulMarkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HelpfulMarkRepository for PostgresHelpfulMarkRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%answer_id, %user_id))]
    async fn find_by_answer_and_user(
        &self,
        answer_id: &AnswerId,
        user_id: &UserId,
    ) -> Result<Option<HelpfulMark>, InfraError> {
        let row = sqlx::query_as::<_, HelpfulMarkRow>(
            r#"
            SELECT id, answer_id, user_id, created_at
            FROM helpful_marks
            WHERE answer_id = $1 AND user_id = $2
            "#,
        )
        .bind(answer_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(HelpfulMark::from))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %mark.id()))]
    async fn insert(&self, tx: &mut TxContext, mark: &HelpfulMark) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO helpful_marks (id, answer_id, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(mark.id().as_uuid())
        .bind(mark.answer_id().as_uuid())
        .bind(mark.user_id().as_uuid())
        .bind(mark.created_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, tx: &mut TxContext, id: &HelpfulMarkId) -> Result<(), InfraError> {
        sqlx::query("DELETE FROM helpful_marks WHERE id = $1")
            .bind(id.as_uuid())
            .execute(tx.conn())
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%answer_id))]
    async fn count_by_answer(
        &self,
        tx: &mut TxContext,
        answer_id: &AnswerId,
    ) -> Result<i64, InfraError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM helpful_marks WHERE answer_id = $1")
                .bind(answer_id.as_uuid())
                .fetch_one(tx.conn())
                .await?;

        Ok(count)
    }
}
