//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! askflow-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! 障害系のテスト用に、一部のモックは失敗を注入できる
//! （[`MockQuestionRepository::fail_reads`], [`MockHelpfulMarkRepository::fail_counts`],
//! [`MockNotificationRepository::fail_writes`]）。

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use askflow_domain::{
    answer::{Answer, AnswerId},
    comment::Comment,
    helpful_mark::{HelpfulMark, HelpfulMarkId},
    notification::{Notification, NotificationId, NotificationPreferences},
    question::{Question, QuestionId},
    user::{User, UserId},
};
use chrono::{DateTime, Utc};

use crate::{
    db::{TransactionManager, TxContext},
    error::InfraError,
    repository::{
        AnswerRepository,
        CommentRepository,
        HelpfulMarkRepository,
        NotificationRepository,
        QuestionRepository,
        UserRepository,
    },
};

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }

    async fn update_notification_preferences(
        &self,
        _tx: &mut TxContext,
        id: &UserId,
        preferences: &NotificationPreferences,
    ) -> Result<bool, InfraError> {
        let mut users = self.users.lock().unwrap();
        let Some(pos) = users.iter().position(|u| u.id() == id) else {
            return Ok(false);
        };
        let updated = users[pos].clone().with_notification_preferences(*preferences);
        users[pos] = updated;
        Ok(true)
    }
}

// ===== MockQuestionRepository =====

#[derive(Clone, Default)]
pub struct MockQuestionRepository {
    questions:  Arc<Mutex<Vec<Question>>>,
    fail_reads: Arc<AtomicBool>,
}

impl MockQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_question(&self, question: Question) {
        self.questions.lock().unwrap().push(question);
    }

    /// 質問を削除する（同時削除の再現用）
    pub fn remove_question(&self, id: &QuestionId) {
        self.questions.lock().unwrap().retain(|q| q.id() != id);
    }

    /// 以降の読み取りをすべて失敗させる
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl QuestionRepository for MockQuestionRepository {
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, InfraError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("question store unavailable"));
        }
        Ok(self
            .questions
            .lock()
            .unwrap()
            .iter()
            .find(|q| q.id() == id)
            .cloned())
    }
}

// ===== MockAnswerRepository =====

#[derive(Clone, Default)]
pub struct MockAnswerRepository {
    answers: Arc<Mutex<Vec<Answer>>>,
}

impl MockAnswerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_answer(&self, answer: Answer) {
        self.answers.lock().unwrap().push(answer);
    }

    /// 保存されている回答のスナップショット
    pub fn answers(&self) -> Vec<Answer> {
        self.answers.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerRepository for MockAnswerRepository {
    async fn insert(&self, _tx: &mut TxContext, answer: &Answer) -> Result<(), InfraError> {
        self.answers.lock().unwrap().push(answer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AnswerId) -> Result<Option<Answer>, InfraError> {
        Ok(self
            .answers
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id() == id)
            .cloned())
    }

    async fn clear_accepted(
        &self,
        _tx: &mut TxContext,
        question_id: &QuestionId,
        now: DateTime<Utc>,
    ) -> Result<u64, InfraError> {
        let mut answers = self.answers.lock().unwrap();
        let mut cleared = 0;
        for answer in answers.iter_mut() {
            if answer.question_id() == question_id && answer.is_accepted() {
                *answer = answer.clone().unaccepted(now);
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    async fn update_acceptance(
        &self,
        _tx: &mut TxContext,
        answer: &Answer,
    ) -> Result<(), InfraError> {
        let mut answers = self.answers.lock().unwrap();
        if let Some(pos) = answers.iter().position(|a| a.id() == answer.id()) {
            answers[pos] = answer.clone();
        }
        Ok(())
    }
}

// ===== MockCommentRepository =====

#[derive(Clone, Default)]
pub struct MockCommentRepository {
    comments: Arc<Mutex<Vec<Comment>>>,
}

impl MockCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommentRepository for MockCommentRepository {
    async fn insert(&self, _tx: &mut TxContext, comment: &Comment) -> Result<(), InfraError> {
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }
}

// ===== MockHelpfulMarkRepository =====

#[derive(Clone, Default)]
pub struct MockHelpfulMarkRepository {
    marks:       Arc<Mutex<Vec<HelpfulMark>>>,
    fail_counts: Arc<AtomicBool>,
}

impl MockHelpfulMarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marks(&self) -> Vec<HelpfulMark> {
        self.marks.lock().unwrap().clone()
    }

    /// 以降の評価数の取得をすべて失敗させる
    pub fn fail_counts(&self) {
        self.fail_counts.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HelpfulMarkRepository for MockHelpfulMarkRepository {
    async fn find_by_answer_and_user(
        &self,
        answer_id: &AnswerId,
        user_id: &UserId,
    ) -> Result<Option<HelpfulMark>, InfraError> {
        Ok(self
            .marks
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.answer_id() == answer_id && m.user_id() == user_id)
            .cloned())
    }

    async fn insert(&self, _tx: &mut TxContext, mark: &HelpfulMark) -> Result<(), InfraError> {
        let mut marks = self.marks.lock().unwrap();
        // 一意制約 (answer_id, user_id) を再現する
        if marks
            .iter()
            .any(|m| m.answer_id() == mark.answer_id() && m.user_id() == mark.user_id())
        {
            return Err(InfraError::conflict("helpful_marks_answer_id_user_id_key"));
        }
        marks.push(mark.clone());
        Ok(())
    }

    async fn delete(&self, _tx: &mut TxContext, id: &HelpfulMarkId) -> Result<(), InfraError> {
        self.marks.lock().unwrap().retain(|m| m.id() != id);
        Ok(())
    }

    async fn count_by_answer(
        &self,
        _tx: &mut TxContext,
        answer_id: &AnswerId,
    ) -> Result<i64, InfraError> {
        if self.fail_counts.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("helpful mark store unavailable"));
        }
        let count = self
            .marks
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.answer_id() == answer_id)
            .count();
        Ok(count as i64)
    }
}

// ===== MockNotificationRepository =====

#[derive(Clone, Default)]
pub struct MockNotificationRepository {
    notifications: Arc<Mutex<Vec<Notification>>>,
    fail_writes:   Arc<AtomicBool>,
}

impl MockNotificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 保存されている通知のスナップショット（挿入順）
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn add_notification(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    /// 以降の INSERT をすべて失敗させる
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl NotificationRepository for MockNotificationRepository {
    async fn insert(&self, notification: &Notification) -> Result<(), InfraError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("notification store unavailable"));
        }
        self.notifications.lock().unwrap().push(notification.clone());
        Ok(())
    }

    async fn find_by_recipient(
        &self,
        recipient_id: &UserId,
    ) -> Result<Vec<Notification>, InfraError> {
        let mut found: Vec<Notification> = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id() == recipient_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_uuid().cmp(a.id().as_uuid()))
        });
        Ok(found)
    }

    async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, InfraError> {
        let count = self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.recipient_id() == recipient_id && !n.is_read())
            .count();
        Ok(count as i64)
    }

    async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<bool, InfraError> {
        let mut notifications = self.notifications.lock().unwrap();
        let Some(pos) = notifications
            .iter()
            .position(|n| n.id() == id && n.recipient_id() == recipient_id)
        else {
            return Ok(false);
        };
        let updated = notifications[pos].clone().marked_read();
        notifications[pos] = updated;
        Ok(true)
    }

    async fn delete(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<bool, InfraError> {
        let mut notifications = self.notifications.lock().unwrap();
        let before = notifications.len();
        notifications.retain(|n| !(n.id() == id && n.recipient_id() == recipient_id));
        Ok(notifications.len() < before)
    }
}

// ===== MockTransactionManager =====

#[derive(Clone, Default)]
pub struct MockTransactionManager;

impl MockTransactionManager {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransactionManager for MockTransactionManager {
    async fn begin(&self) -> Result<TxContext, InfraError> {
        Ok(TxContext::mock())
    }
}
