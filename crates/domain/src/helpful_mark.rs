//! # 「役に立った」評価
//!
//! 回答に対する評価。1 ユーザーにつき 1 回答あたり 1 件まで。
//! 再度押すと取り消しになる（トグル）。

use chrono::{DateTime, Utc};

use crate::{answer::AnswerId, user::UserId};

define_uuid_id! {
    /// 評価 ID
    pub struct HelpfulMarkId;
}

/// 「役に立った」評価エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpfulMark {
    id:         HelpfulMarkId,
    answer_id:  AnswerId,
    user_id:    UserId,
    created_at: DateTime<Utc>,
}

impl HelpfulMark {
    pub fn new(
        id: HelpfulMarkId,
        answer_id: AnswerId,
        user_id: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            answer_id,
            user_id,
            created_at,
        }
    }

    pub fn id(&self) -> &HelpfulMarkId {
        &self.id
    }

    pub fn answer_id(&self) -> &AnswerId {
        &self.answer_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
