//! # UserRepository
//!
//! ユーザーと通知設定の永続化を担当するリポジトリ。
//!
//! 通知設定は users テーブルの `notification_preferences` JSONB カラムに
//! camelCase のキーで格納する。欠けているキーは `true` として復元される。

use async_trait::async_trait;
use askflow_domain::{
    notification::NotificationPreferences,
    user::{User, UserId, UserRecord},
    value_objects::UserName,
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{db::TxContext, error::InfraError};

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ID でユーザーを検索する
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

    /// 通知設定を更新する
    ///
    /// # 戻り値
    ///
    /// 対象ユーザーが存在した場合は `true`
    async fn update_notification_preferences(
        &self,
        tx: &mut TxContext,
        id: &UserId,
        preferences: &NotificationPreferences,
    ) -> Result<bool, InfraError>;
}

/// DB の users テーブルの行
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    department: Option<String>,
    notification_preferences: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User::from_db(UserRecord {
            id: UserId::from_uuid(row.id),
            name: UserName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
            department: row.department,
            notification_preferences: serde_json::from_value(row.notification_preferences)?,
            created_at: row.created_at,
        }))
    }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, department, notification_preferences, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_notification_preferences(
        &self,
        tx: &mut TxContext,
        id: &UserId,
        preferences: &NotificationPreferences,
    ) -> Result<bool, InfraError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET notification_preferences = $2
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(serde_json::to_value(preferences)?)
        .execute(tx.conn())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(preferences: serde_json::Value) -> UserRow {
        UserRow {
            id: Uuid::now_v7(),
            name: "山田太郎".to_string(),
            department: None,
            notification_preferences: preferences,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_空の通知設定はすべて有効として復元される() {
        let user = User::try_from(row(serde_json::json!({}))).unwrap();

        assert_eq!(
            user.notification_preferences(),
            &NotificationPreferences::default()
        );
    }

    #[test]
    fn test_型の合わない通知設定はシリアライズエラーになる() {
        let result = User::try_from(row(serde_json::json!({ "newAnswer": "yes" })));

        assert!(matches!(
            result.unwrap_err().kind(),
            crate::error::InfraErrorKind::Serialization(_)
        ));
    }

    #[test]
    fn test_リポジトリはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresUserRepository>();
    }
}
