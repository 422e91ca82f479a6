//! # NotificationRepository
//!
//! 通知ストア。通知の追加と、受信者による一覧・既読化・削除を担当する。
//!
//! ## 設計方針
//!
//! - **追記のみ（作成側）**: 通知の作成は INSERT のみで、既存行を書き換えない
//! - **受信者スコープ**: 既読化・削除・一覧はすべて `recipient_id` で絞り込む
//! - **時系列ソート**: 一覧は created_at DESC で返す
//!   （`notifications_recipient_created_at_idx` インデックスを使用）

use std::str::FromStr;

use async_trait::async_trait;
use askflow_domain::{
    notification::{Notification, NotificationId, NotificationKind, NotificationRecord},
    user::UserId,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 通知リポジトリトレイト
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// 通知を挿入する
    async fn insert(&self, notification: &Notification) -> Result<(), InfraError>;

    /// 受信者の通知一覧を取得する（created_at DESC）
    async fn find_by_recipient(&self, recipient_id: &UserId)
    -> Result<Vec<Notification>, InfraError>;

    /// 受信者の未読件数を数える
    async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, InfraError>;

    /// 通知を既読にする
    ///
    /// # 戻り値
    ///
    /// 受信者の通知が存在した場合は `true`（既読済みでも `true`）
    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<bool, InfraError>;

    /// 通知を削除する
    ///
    /// # 戻り値
    ///
    /// 受信者の通知が存在し削除した場合は `true`
    async fn delete(&self, id: &NotificationId, recipient_id: &UserId)
    -> Result<bool, InfraError>;
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    id:           Uuid,
    recipient_id: Uuid,
    kind:         String,
    title:        String,
    message:      String,
    link:         String,
    is_read:      bool,
    created_at:   DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = InfraError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::from_str(&row.kind)
            .map_err(|e| InfraError::unexpected(format!("不正な通知種別 {}: {e}", row.kind)))?;

        Ok(Notification::from_db(NotificationRecord {
            id:           NotificationId::from_uuid(row.id),
            recipient_id: UserId::from_uuid(row.recipient_id),
            kind,
            title:        row.title,
            message:      row.message,
            link:         row.link,
            is_read:      row.is_read,
            created_at:   row.created_at,
        }))
    }
}

/// PostgreSQL 実装の NotificationRepository
#[derive(Debug, Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %notification.id()))]
    async fn insert(&self, notification: &Notification) -> Result<(), InfraError> {
        let kind: &'static str = notification.kind().into();

        sqlx::query(
            r#"
            INSERT INTO notifications (
                id, recipient_id, kind, title, message, link, is_read, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id().as_uuid())
        .bind(notification.recipient_id().as_uuid())
        .bind(kind)
        .bind(notification.title())
        .bind(notification.message())
        .bind(notification.link())
        .bind(notification.is_read())
        .bind(notification.created_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%recipient_id))]
    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
    ) -> Result<Vec<Notification>, InfraError> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, recipient_id, kind, title, message, link, is_read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(recipient_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%recipient_id))]
    async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, InfraError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND NOT is_read",
        )
        .bind(recipient_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1 AND recipient_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(recipient_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND recipient_id = $2")
            .bind(id.as_uuid())
            .bind(recipient_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
