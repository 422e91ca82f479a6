//! # ユーザー
//!
//! 社員プロフィールを表すユーザーエンティティを定義する。
//!
//! 通知の観点では「受信者として解決できるか」と「どの通知を受け取るか
//! （[`NotificationPreferences`]）」の 2 点が重要になる。
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use askflow_domain::{
//!     notification::NotificationKind,
//!     user::{User, UserId},
//!     value_objects::UserName,
//! };
//!
//! let user = User::new(UserId::new(), UserName::new("山田太郎")?, None, chrono::Utc::now());
//!
//! // 初期状態ではすべての通知を受け取る
//! assert!(user.accepts(NotificationKind::Helpful));
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};

use crate::{
    notification::{NotificationKind, NotificationPreferences},
    value_objects::UserName,
};

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    ///
    /// 認証基盤のユーザー ID と同一の UUID を使用する。
    pub struct UserId;
}

/// ユーザーエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: UserName,
    department: Option<String>,
    notification_preferences: NotificationPreferences,
    created_at: DateTime<Utc>,
}

/// ユーザーの DB 復元パラメータ
pub struct UserRecord {
    pub id: UserId,
    pub name: UserName,
    pub department: Option<String>,
    pub notification_preferences: NotificationPreferences,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する（通知設定はすべて有効）
    pub fn new(
        id: UserId,
        name: UserName,
        department: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            department,
            notification_preferences: NotificationPreferences::default(),
            created_at: now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            department: record.department,
            notification_preferences: record.notification_preferences,
            created_at: record.created_at,
        }
    }

    /// 通知設定を差し替えた新しいインスタンスを返す
    pub fn with_notification_preferences(self, preferences: NotificationPreferences) -> Self {
        Self {
            notification_preferences: preferences,
            ..self
        }
    }

    /// 指定した種別の通知を受け取るか
    pub fn accepts(&self, kind: NotificationKind) -> bool {
        self.notification_preferences.allows(kind)
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    pub fn notification_preferences(&self) -> &NotificationPreferences {
        &self.notification_preferences
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
