//! # コメント
//!
//! 質問または回答に付けられるコメント。
//! 親が質問か回答かで通知の受信者（質問者 / 回答者）が変わる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{answer::AnswerId, question::QuestionId, user::UserId, value_objects::CommentBody};

define_uuid_id! {
    /// コメント ID
    pub struct CommentId;
}

/// コメントの親
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "parent_type", content = "parent_id", rename_all = "snake_case")]
pub enum CommentParent {
    Question(QuestionId),
    Answer(AnswerId),
}

impl CommentParent {
    /// DB の `parent_type` カラムに格納する値
    pub fn type_str(&self) -> &'static str {
        match self {
            Self::Question(_) => "question",
            Self::Answer(_) => "answer",
        }
    }

    /// 親エンティティの UUID
    pub fn id_uuid(&self) -> &uuid::Uuid {
        match self {
            Self::Question(id) => id.as_uuid(),
            Self::Answer(id) => id.as_uuid(),
        }
    }
}

/// コメントエンティティ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id:         CommentId,
    parent:     CommentParent,
    author_id:  UserId,
    body:       CommentBody,
    created_at: DateTime<Utc>,
}

/// コメントの新規作成パラメータ
pub struct NewComment {
    pub id:        CommentId,
    pub parent:    CommentParent,
    pub author_id: UserId,
    pub body:      CommentBody,
    pub now:       DateTime<Utc>,
}

impl Comment {
    pub fn new(params: NewComment) -> Self {
        Self {
            id:         params.id,
            parent:     params.parent,
            author_id:  params.author_id,
            body:       params.body,
            created_at: params.now,
        }
    }

    pub fn id(&self) -> &CommentId {
        &self.id
    }

    pub fn parent(&self) -> &CommentParent {
        &self.parent
    }

    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    pub fn body(&self) -> &CommentBody {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
