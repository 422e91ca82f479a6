//! # 回答
//!
//! 質問に対する回答エンティティ。採択状態を持つ。
//!
//! ## 不変条件
//!
//! - 1 つの質問で採択済みの回答は高々 1 件（DB の部分一意インデックスでも保証）
//! - 採択できるのは質問者のみ（ユースケース層でチェック）

use chrono::{DateTime, Utc};

use crate::{question::QuestionId, user::UserId, value_objects::AnswerBody};

define_uuid_id! {
    /// 回答 ID
    pub struct AnswerId;
}

/// 回答エンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    id:          AnswerId,
    question_id: QuestionId,
    author_id:   UserId,
    body:        AnswerBody,
    is_accepted: bool,
    created_at:  DateTime<Utc>,
    updated_at:  DateTime<Utc>,
}

/// 回答の新規作成パラメータ
pub struct NewAnswer {
    pub id:          AnswerId,
    pub question_id: QuestionId,
    pub author_id:   UserId,
    pub body:        AnswerBody,
    pub now:         DateTime<Utc>,
}

/// 回答の DB 復元パラメータ
pub struct AnswerRecord {
    pub id:          AnswerId,
    pub question_id: QuestionId,
    pub author_id:   UserId,
    pub body:        AnswerBody,
    pub is_accepted: bool,
    pub created_at:  DateTime<Utc>,
    pub updated_at:  DateTime<Utc>,
}

impl Answer {
    /// 新しい回答を作成する（未採択）
    pub fn new(params: NewAnswer) -> Self {
        Self {
            id:          params.id,
            question_id: params.question_id,
            author_id:   params.author_id,
            body:        params.body,
            is_accepted: false,
            created_at:  params.now,
            updated_at:  params.now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(record: AnswerRecord) -> Self {
        Self {
            id:          record.id,
            question_id: record.question_id,
            author_id:   record.author_id,
            body:        record.body,
            is_accepted: record.is_accepted,
            created_at:  record.created_at,
            updated_at:  record.updated_at,
        }
    }

    /// 採択済みの新しいインスタンスを返す
    pub fn accepted(self, now: DateTime<Utc>) -> Self {
        Self {
            is_accepted: true,
            updated_at: now,
            ..self
        }
    }

    /// 採択を解除した新しいインスタンスを返す
    pub fn unaccepted(self, now: DateTime<Utc>) -> Self {
        Self {
            is_accepted: false,
            updated_at: now,
            ..self
        }
    }

    pub fn id(&self) -> &AnswerId {
        &self.id
    }

    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn body(&self) -> &AnswerBody {
        &self.body
    }

    pub fn is_accepted(&self) -> bool {
        self.is_accepted
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
