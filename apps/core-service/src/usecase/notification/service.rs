//! # 通知サービス
//!
//! コンテンツ操作（回答・コメント・採択・評価）に伴うアプリ内通知の
//! 受信者解決 → レンダリング → 書き込みを統合するサービス。
//!
//! ## 設計方針
//!
//! - **ベストエフォート**: `notify()` は失敗してもエラーを返さず、[`NotifyOutcome`] を返す
//! - **1 トリガー 1 通知**: 状態を持たず、重複排除もまとめ送りもしない
//! - **自分宛ては作らない**: 操作者と受信者が同じなら書き込まない
//! - **依存性注入**: リポジトリと時刻は trait で抽象化

use std::sync::Arc;

use askflow_domain::{
    answer::AnswerId,
    clock::Clock,
    notification::{
        Actor,
        NewNotification,
        Notification,
        NotificationError,
        NotificationId,
        NotificationTrigger,
        NotifyOutcome,
        SkipReason,
    },
    question::{Question, QuestionId},
    user::UserId,
};
use askflow_infra::repository::{
    AnswerRepository,
    NotificationRepository,
    QuestionRepository,
    UserRepository,
};
use askflow_shared::{event_log::event, log_business_event};

use super::MessageRenderer;

/// 通知サービス
///
/// コンテンツ操作の成功後に呼ばれ、0 または 1 件の通知を作成する。
pub struct NotificationService {
    question_repo:     Arc<dyn QuestionRepository>,
    answer_repo:       Arc<dyn AnswerRepository>,
    user_repo:         Arc<dyn UserRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    renderer:          MessageRenderer,
    clock:             Arc<dyn Clock>,
}

impl NotificationService {
    pub fn new(
        question_repo: Arc<dyn QuestionRepository>,
        answer_repo: Arc<dyn AnswerRepository>,
        user_repo: Arc<dyn UserRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        renderer: MessageRenderer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            question_repo,
            answer_repo,
            user_repo,
            notification_repo,
            renderer,
            clock,
        }
    }

    /// 質問への新しい回答を質問者に通知する
    pub async fn notify_new_answer(&self, question_id: QuestionId, actor: Actor) -> NotifyOutcome {
        self.notify(NotificationTrigger::NewAnswer { question_id, actor })
            .await
    }

    /// 質問へのコメントを質問者に通知する
    pub async fn notify_question_commented(
        &self,
        question_id: QuestionId,
        actor: Actor,
    ) -> NotifyOutcome {
        self.notify(NotificationTrigger::QuestionCommented { question_id, actor })
            .await
    }

    /// 回答へのコメントを回答者に通知する
    pub async fn notify_answer_commented(&self, answer_id: AnswerId, actor: Actor) -> NotifyOutcome {
        self.notify(NotificationTrigger::AnswerCommented { answer_id, actor })
            .await
    }

    /// 回答の採択を回答者に通知する
    pub async fn notify_answer_accepted(&self, answer_id: AnswerId, actor: Actor) -> NotifyOutcome {
        self.notify(NotificationTrigger::AnswerAccepted { answer_id, actor })
            .await
    }

    /// 回答への「役に立った」評価を回答者に通知する
    pub async fn notify_answer_helpful(&self, answer_id: AnswerId, actor: Actor) -> NotifyOutcome {
        self.notify(NotificationTrigger::AnswerMarkedHelpful { answer_id, actor })
            .await
    }

    /// 通知を作成する（ベストエフォート）
    ///
    /// 受信者解決 → 自己通知チェック → 通知設定チェック → レンダリング → 書き込みを行う。
    /// どのステップで失敗してもエラーは返さず、結果はログと [`NotifyOutcome`] で表す。
    pub async fn notify(&self, trigger: NotificationTrigger) -> NotifyOutcome {
        let outcome = self
            .deliver(&trigger)
            .await
            .unwrap_or_else(NotifyOutcome::Failed);

        let kind: &str = trigger.kind().into();
        let actor_id = &trigger.actor().id;
        match &outcome {
            NotifyOutcome::Created(id) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_CREATED,
                    event.entity_type = event::entity_type::NOTIFICATION,
                    event.entity_id = %id,
                    event.actor_id = %actor_id,
                    event.result = event::result::SUCCESS,
                    notification.kind = kind,
                    notification.trigger = trigger.name(),
                    "通知を作成"
                );
            }
            NotifyOutcome::Skipped(reason) => {
                let reason: &str = reason.into();
                tracing::debug!(
                    notification.kind = kind,
                    notification.trigger = trigger.name(),
                    actor_id = %actor_id,
                    reason,
                    "通知をスキップ"
                );
            }
            NotifyOutcome::Failed(e) => {
                log_business_event!(
                    event.category = event::category::NOTIFICATION,
                    event.action = event::action::NOTIFICATION_FAILED,
                    event.entity_type = event::entity_type::NOTIFICATION,
                    event.actor_id = %actor_id,
                    event.result = event::result::FAILURE,
                    notification.kind = kind,
                    notification.trigger = trigger.name(),
                    error = %e,
                    "通知の作成に失敗"
                );
            }
        }

        outcome
    }

    async fn deliver(&self, trigger: &NotificationTrigger) -> Result<NotifyOutcome, NotificationError> {
        let (recipient_id, question) = self.resolve_target(trigger).await?;

        if recipient_id == trigger.actor().id {
            return Ok(NotifyOutcome::Skipped(SkipReason::SelfNotification));
        }

        let Some(recipient) = self
            .user_repo
            .find_by_id(&recipient_id)
            .await
            .map_err(|e| NotificationError::LookupFailed(e.to_string()))?
        else {
            return Ok(NotifyOutcome::Skipped(SkipReason::RecipientNotFound));
        };

        let kind = trigger.kind();
        if !recipient.accepts(kind) {
            return Ok(NotifyOutcome::Skipped(SkipReason::RecipientOptedOut));
        }

        let content = self.renderer.render(trigger, &question)?;

        let notification = Notification::new(NewNotification {
            id:  NotificationId::new(),
            recipient_id,
            kind,
            content,
            now: self.clock.now(),
        });

        self.notification_repo
            .insert(&notification)
            .await
            .map_err(|e| NotificationError::WriteFailed(e.to_string()))?;

        Ok(NotifyOutcome::Created(notification.id().clone()))
    }

    /// 受信者 ID とリンク先の質問を解決する
    ///
    /// 回答トリガーの受信者は回答者、リンク先は回答の親質問。
    async fn resolve_target(
        &self,
        trigger: &NotificationTrigger,
    ) -> Result<(UserId, Question), NotificationError> {
        match trigger {
            NotificationTrigger::NewAnswer { question_id, .. }
            | NotificationTrigger::QuestionCommented { question_id, .. } => {
                let question = self.find_question(question_id).await?;
                Ok((question.author_id().clone(), question))
            }
            NotificationTrigger::AnswerCommented { answer_id, .. }
            | NotificationTrigger::AnswerAccepted { answer_id, .. }
            | NotificationTrigger::AnswerMarkedHelpful { answer_id, .. } => {
                let answer = self
                    .answer_repo
                    .find_by_id(answer_id)
                    .await
                    .map_err(|e| NotificationError::LookupFailed(e.to_string()))?
                    .ok_or_else(|| NotificationError::ReferenceNotFound {
                        entity_type: "Answer",
                        id:          answer_id.to_string(),
                    })?;
                let question = self.find_question(answer.question_id()).await?;
                Ok((answer.author_id().clone(), question))
            }
        }
    }

    async fn find_question(&self, id: &QuestionId) -> Result<Question, NotificationError> {
        self.question_repo
            .find_by_id(id)
            .await
            .map_err(|e| NotificationError::LookupFailed(e.to_string()))?
            .ok_or_else(|| NotificationError::ReferenceNotFound {
                entity_type: "Question",
                id:          id.to_string(),
            })
    }
}
