//! Q&A テストビルダー
//!
//! テストコードの重複を削減するためのビルダー。
//! インメモリのモックリポジトリと固定時刻を 1 セット保持し、
//! そこからユースケースやルーターを組み立てる。

use std::sync::Arc;

use askflow_domain::{
    answer::{Answer, AnswerId, NewAnswer},
    clock::FixedClock,
    notification::NotificationPreferences,
    question::{Question, QuestionId},
    user::{User, UserId},
    value_objects::{AnswerBody, QuestionTitle, UserName},
};
use askflow_infra::mock::{
    MockAnswerRepository,
    MockCommentRepository,
    MockHelpfulMarkRepository,
    MockNotificationRepository,
    MockQuestionRepository,
    MockTransactionManager,
    MockUserRepository,
};
use axum::Router;
use chrono::{DateTime, Utc};

use crate::{
    handler::{ContentState, InboxState, PreferencesState},
    router::build_router,
    usecase::{
        ContentRepositories,
        ContentUseCaseImpl,
        InboxUseCaseImpl,
        MessageRenderer,
        NotificationService,
        PreferencesUseCaseImpl,
    },
};

/// Q&A テストビルダー
///
/// # 使用例
///
/// ```ignore
/// use askflow_core_service::test_utils::QaTestBuilder;
///
/// #[tokio::test]
/// async fn test_example() {
///     let builder = QaTestBuilder::new();
///     let alice = builder.add_user("Alice");
///     let question = builder.add_question(&alice, "How to deploy?");
///     let sut = builder.content_usecase();
///
///     // ...
///
///     assert!(builder.notification_repo.notifications().is_empty());
/// }
/// ```
pub struct QaTestBuilder {
    now:                   DateTime<Utc>,
    pub user_repo:         MockUserRepository,
    pub question_repo:     MockQuestionRepository,
    pub answer_repo:       MockAnswerRepository,
    pub comment_repo:      MockCommentRepository,
    pub helpful_mark_repo: MockHelpfulMarkRepository,
    pub notification_repo: MockNotificationRepository,
}

impl QaTestBuilder {
    /// 固定時刻 2023-11-14T22:13:20Z で新しいビルダーを作成
    pub fn new() -> Self {
        Self {
            now:               DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            user_repo:         MockUserRepository::new(),
            question_repo:     MockQuestionRepository::new(),
            answer_repo:       MockAnswerRepository::new(),
            comment_repo:      MockCommentRepository::new(),
            helpful_mark_repo: MockHelpfulMarkRepository::new(),
            notification_repo: MockNotificationRepository::new(),
        }
    }

    /// ビルダーの now を取得
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// ユーザーを登録する（通知設定はすべて有効）
    pub fn add_user(&self, name: &str) -> User {
        let user = User::new(
            UserId::new(),
            UserName::new(name).unwrap(),
            None,
            self.now,
        );
        self.user_repo.add_user(user.clone());
        user
    }

    /// 通知設定を指定してユーザーを登録する
    pub fn add_user_with_preferences(
        &self,
        name: &str,
        preferences: NotificationPreferences,
    ) -> User {
        let user = User::new(
            UserId::new(),
            UserName::new(name).unwrap(),
            None,
            self.now,
        )
        .with_notification_preferences(preferences);
        self.user_repo.add_user(user.clone());
        user
    }

    /// 質問を登録する
    pub fn add_question(&self, author: &User, title: &str) -> Question {
        let question = Question::new(
            QuestionId::new(),
            QuestionTitle::new(title).unwrap(),
            author.id().clone(),
            self.now,
        );
        self.question_repo.add_question(question.clone());
        question
    }

    /// 未採択の回答を登録する
    pub fn add_answer(&self, question: &Question, author: &User) -> Answer {
        let answer = Answer::new(NewAnswer {
            id:          AnswerId::new(),
            question_id: question.id().clone(),
            author_id:   author.id().clone(),
            body:        AnswerBody::new(format!("{} の回答", author.name())).unwrap(),
            now:         self.now,
        });
        self.answer_repo.add_answer(answer.clone());
        answer
    }

    /// 通知サービスを構築
    pub fn notification_service(&self) -> NotificationService {
        NotificationService::new(
            Arc::new(self.question_repo.clone()),
            Arc::new(self.answer_repo.clone()),
            Arc::new(self.user_repo.clone()),
            Arc::new(self.notification_repo.clone()),
            MessageRenderer::new().unwrap(),
            Arc::new(FixedClock::new(self.now)),
        )
    }

    /// コンテンツユースケースを構築
    pub fn content_usecase(&self) -> ContentUseCaseImpl {
        ContentUseCaseImpl::new(
            ContentRepositories {
                question:     Arc::new(self.question_repo.clone()),
                answer:       Arc::new(self.answer_repo.clone()),
                comment:      Arc::new(self.comment_repo.clone()),
                helpful_mark: Arc::new(self.helpful_mark_repo.clone()),
                user:         Arc::new(self.user_repo.clone()),
            },
            Arc::new(MockTransactionManager::new()),
            Arc::new(FixedClock::new(self.now)),
            Arc::new(self.notification_service()),
        )
    }

    /// 通知受信箱ユースケースを構築
    pub fn inbox_usecase(&self) -> InboxUseCaseImpl {
        InboxUseCaseImpl::new(Arc::new(self.notification_repo.clone()))
    }

    /// 通知設定ユースケースを構築
    pub fn preferences_usecase(&self) -> PreferencesUseCaseImpl {
        PreferencesUseCaseImpl::new(
            Arc::new(self.user_repo.clone()),
            Arc::new(MockTransactionManager::new()),
        )
    }

    /// 全エンドポイントを持つルーターを構築
    pub fn router(&self) -> Router {
        build_router(
            Arc::new(ContentState {
                usecase: self.content_usecase(),
            }),
            Arc::new(InboxState {
                usecase: self.inbox_usecase(),
            }),
            Arc::new(PreferencesState {
                usecase: self.preferences_usecase(),
            }),
        )
    }
}

impl Default for QaTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
