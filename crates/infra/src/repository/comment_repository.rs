//! # CommentRepository
//!
//! コメントの永続化を担当するリポジトリ。
//! 親は `parent_type`（`question` / `answer`）と `parent_id` の組で保存する。

use async_trait::async_trait;
use askflow_domain::comment::Comment;

use crate::{db::TxContext, error::InfraError};

/// コメントリポジトリトレイト
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// コメントを挿入する
    async fn insert(&self, tx: &mut TxContext, comment: &Comment) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の CommentRepository
///
/// 書き込みのみで、コネクションは常に [`TxContext`] から取得する。
#[derive(Debug, Clone, Default)]
pub struct PostgresCommentRepository;

impl PostgresCommentRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %comment.id()))]
    async fn insert(&self, tx: &mut TxContext, comment: &Comment) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, parent_type, parent_id, author_id, body, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id().as_uuid())
        .bind(comment.parent().type_str())
        .bind(comment.parent().id_uuid())
        .bind(comment.author_id().as_uuid())
        .bind(comment.body().as_str())
        .bind(comment.created_at())
        .execute(tx.conn())
        .await?;

        Ok(())
    }
}
