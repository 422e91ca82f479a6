//! # 質問
//!
//! 通知の受信者解決とメッセージ生成に必要な範囲で質問エンティティを定義する。
//! 本文やタグ、閲覧数はこのサービスの関心外。

use chrono::{DateTime, Utc};

use crate::{user::UserId, value_objects::QuestionTitle};

define_uuid_id! {
    /// 質問 ID
    pub struct QuestionId;
}

/// 質問エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id:         QuestionId,
    title:      QuestionTitle,
    author_id:  UserId,
    created_at: DateTime<Utc>,
}

impl Question {
    pub fn new(
        id: QuestionId,
        title: QuestionTitle,
        author_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            created_at,
        }
    }

    /// 質問者本人かどうか
    pub fn is_authored_by(&self, user_id: &UserId) -> bool {
        &self.author_id == user_id
    }

    /// 質問詳細画面へのリンク（通知の遷移先）
    pub fn link(&self) -> String {
        format!("/questions/{}", self.id)
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn title(&self) -> &QuestionTitle {
        &self.title
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
