//! # コンテンツユースケース
//!
//! 回答・コメント・採択・「役に立った」評価の書き込みを実装する。
//! 書き込みの成功後に同じリクエスト内で通知サービスを呼ぶが、
//! その結果はレスポンスに影響させない。
//!
//! ## モジュール構成
//!
//! - `answer`: 回答の投稿と採択
//! - `comment`: 質問・回答へのコメント投稿
//! - `helpful`: 「役に立った」評価のトグル

mod answer;
mod comment;
mod helpful;

use std::sync::Arc;

use askflow_domain::{
    answer::AnswerId,
    clock::Clock,
    comment::CommentParent,
    question::QuestionId,
    user::UserId,
};
use askflow_infra::{
    db::TransactionManager,
    repository::{
        AnswerRepository,
        CommentRepository,
        HelpfulMarkRepository,
        QuestionRepository,
        UserRepository,
    },
};

use crate::usecase::notification::NotificationService;

/// 回答投稿入力
#[derive(Debug, Clone)]
pub struct PostAnswerInput {
    pub question_id: QuestionId,
    pub author_id:   UserId,
    /// 回答本文（未検証）
    pub body:        String,
}

/// コメント投稿入力
#[derive(Debug, Clone)]
pub struct PostCommentInput {
    /// コメント先（質問または回答）
    pub parent:    CommentParent,
    pub author_id: UserId,
    /// コメント本文（未検証）
    pub body:      String,
}

/// 「役に立った」評価のトグル結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpfulToggleResult {
    /// トグル後に評価済みかどうか
    pub marked:        bool,
    /// トグル後の評価数
    pub helpful_count: i64,
}

/// コンテンツストアのリポジトリ一式
#[derive(Clone)]
pub struct ContentRepositories {
    pub question:     Arc<dyn QuestionRepository>,
    pub answer:       Arc<dyn AnswerRepository>,
    pub comment:      Arc<dyn CommentRepository>,
    pub helpful_mark: Arc<dyn HelpfulMarkRepository>,
    pub user:         Arc<dyn UserRepository>,
}

/// コンテンツユースケース実装
pub struct ContentUseCaseImpl {
    question_repo:        Arc<dyn QuestionRepository>,
    answer_repo:          Arc<dyn AnswerRepository>,
    comment_repo:         Arc<dyn CommentRepository>,
    helpful_mark_repo:    Arc<dyn HelpfulMarkRepository>,
    user_repo:            Arc<dyn UserRepository>,
    tx_manager:           Arc<dyn TransactionManager>,
    clock:                Arc<dyn Clock>,
    notification_service: Arc<NotificationService>,
}

impl ContentUseCaseImpl {
    pub fn new(
        repos: ContentRepositories,
        tx_manager: Arc<dyn TransactionManager>,
        clock: Arc<dyn Clock>,
        notification_service: Arc<NotificationService>,
    ) -> Self {
        Self {
            question_repo:     repos.question,
            answer_repo:       repos.answer,
            comment_repo:      repos.comment,
            helpful_mark_repo: repos.helpful_mark,
            user_repo:         repos.user,
            tx_manager,
            clock,
            notification_service,
        }
    }
}

impl PostCommentInput {
    /// 質問へのコメント
    pub fn on_question(question_id: QuestionId, author_id: UserId, body: String) -> Self {
        Self {
            parent: CommentParent::Question(question_id),
            author_id,
            body,
        }
    }

    /// 回答へのコメント
    pub fn on_answer(answer_id: AnswerId, author_id: UserId, body: String) -> Self {
        Self {
            parent: CommentParent::Answer(answer_id),
            author_id,
            body,
        }
    }
}
