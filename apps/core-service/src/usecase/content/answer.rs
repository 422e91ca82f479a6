//! 回答の投稿と採択

use askflow_domain::{
    answer::{Answer, AnswerId, NewAnswer},
    user::UserId,
    value_objects::AnswerBody,
};
use askflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::{
        content::{ContentUseCaseImpl, PostAnswerInput},
        helpers::{FindResultExt, actor_of, check_question_author},
    },
};

impl ContentUseCaseImpl {
    /// 質問に回答を投稿する
    ///
    /// ## 処理フロー
    ///
    /// 1. 質問と回答者を取得
    /// 2. 回答本文のバリデーション
    /// 3. 回答を作成して保存
    /// 4. 質問者に通知（結果はレスポンスに影響しない）
    ///
    /// ## エラー
    ///
    /// - 質問または回答者が見つからない場合: 404
    /// - 回答本文が不正な場合: 400
    /// - データベースエラー
    pub async fn post_answer(&self, input: PostAnswerInput) -> Result<Answer, CoreError> {
        // 1. 質問と回答者を取得
        let question = self
            .question_repo
            .find_by_id(&input.question_id)
            .await
            .or_not_found("質問")?;
        let author = self
            .user_repo
            .find_by_id(&input.author_id)
            .await
            .or_not_found("ユーザー")?;

        // 2. 回答本文のバリデーション
        let body = AnswerBody::new(input.body).map_err(|e| CoreError::BadRequest(e.to_string()))?;

        // 3. 回答を作成して保存
        let answer = Answer::new(NewAnswer {
            id:          AnswerId::new(),
            question_id: question.id().clone(),
            author_id:   author.id().clone(),
            body,
            now:         self.clock.now(),
        });

        let mut tx = self.tx_manager.begin().await?;
        self.answer_repo.insert(&mut tx, &answer).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::ANSWER,
            event.action = event::action::ANSWER_POSTED,
            event.entity_type = event::entity_type::ANSWER,
            event.entity_id = %answer.id(),
            event.actor_id = %author.id(),
            event.result = event::result::SUCCESS,
            question_id = %question.id(),
            "回答を投稿"
        );

        // 4. 質問者に通知
        self.notification_service
            .notify_new_answer(question.id().clone(), actor_of(&author))
            .await;

        Ok(answer)
    }

    /// 回答を採択する
    ///
    /// 1 つの質問で採択済みの回答は最大 1 件。既存の採択は同一トランザクション内で解除する。
    /// 採択済みの回答を再度採択した場合は何もせず成功を返す（通知もしない）。
    ///
    /// ## エラー
    ///
    /// - 回答・質問・操作者が見つからない場合: 404
    /// - 質問者以外が採択しようとした場合: 403
    /// - 同時採択で一意制約に違反した場合: 409
    pub async fn accept_answer(
        &self,
        answer_id: AnswerId,
        actor_id: UserId,
    ) -> Result<Answer, CoreError> {
        let answer = self
            .answer_repo
            .find_by_id(&answer_id)
            .await
            .or_not_found("回答")?;
        let question = self
            .question_repo
            .find_by_id(answer.question_id())
            .await
            .or_not_found("質問")?;

        check_question_author(&question, &actor_id, "採択")?;

        let actor = self
            .user_repo
            .find_by_id(&actor_id)
            .await
            .or_not_found("ユーザー")?;

        if answer.is_accepted() {
            return Ok(answer);
        }

        let now = self.clock.now();
        let accepted = answer.accepted(now);

        let mut tx = self.tx_manager.begin().await?;
        self.answer_repo
            .clear_accepted(&mut tx, question.id(), now)
            .await?;
        self.answer_repo.update_acceptance(&mut tx, &accepted).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::ANSWER,
            event.action = event::action::ANSWER_ACCEPTED,
            event.entity_type = event::entity_type::ANSWER,
            event.entity_id = %accepted.id(),
            event.actor_id = %actor.id(),
            event.result = event::result::SUCCESS,
            question_id = %question.id(),
            "回答を採択"
        );

        self.notification_service
            .notify_answer_accepted(accepted.id().clone(), actor_of(&actor))
            .await;

        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use askflow_domain::{notification::NotificationKind, question::QuestionId};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::QaTestBuilder;

    // === post_answer ===

    #[tokio::test]
    async fn test_post_answer_回答を保存して質問者に通知する() {
        // Arrange
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        // Act
        let answer = sut
            .post_answer(PostAnswerInput {
                question_id: question.id().clone(),
                author_id:   u2.id().clone(),
                body:        "  Use cargo build --release.  ".to_string(),
            })
            .await
            .unwrap();

        // Assert
        assert_eq!(answer.body().as_str(), "Use cargo build --release.");
        assert!(!answer.is_accepted());
        assert_eq!(answer.created_at(), builder.now());
        assert_eq!(builder.answer_repo.answers(), vec![answer]);

        let notifications = builder.notification_repo.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].recipient_id(), u1.id());
        assert_eq!(notifications[0].kind(), NotificationKind::Answer);
    }

    #[tokio::test]
    async fn test_post_answer_自分の質問への回答は通知しない() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        let result = sut
            .post_answer(PostAnswerInput {
                question_id: question.id().clone(),
                author_id:   u1.id().clone(),
                body:        "Self answer".to_string(),
            })
            .await;

        assert!(result.is_ok());
        assert!(builder.notification_repo.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_post_answer_質問が存在しない場合は404() {
        let builder = QaTestBuilder::new();
        let u2 = builder.add_user("Bob");
        let sut = builder.content_usecase();

        let result = sut
            .post_answer(PostAnswerInput {
                question_id: QuestionId::new(),
                author_id:   u2.id().clone(),
                body:        "answer".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
        assert!(builder.answer_repo.answers().is_empty());
    }

    #[tokio::test]
    async fn test_post_answer_空の本文は400() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        let result = sut
            .post_answer(PostAnswerInput {
                question_id: question.id().clone(),
                author_id:   u2.id().clone(),
                body:        "   ".to_string(),
            })
            .await;

        assert!(matches!(result, Err(CoreError::BadRequest(_))));
        assert!(builder.notification_repo.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_post_answer_通知の書き込みに失敗しても回答は成功する() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        builder.notification_repo.fail_writes();
        let sut = builder.content_usecase();

        let result = sut
            .post_answer(PostAnswerInput {
                question_id: question.id().clone(),
                author_id:   u2.id().clone(),
                body:        "answer".to_string(),
            })
            .await;

        assert!(result.is_ok());
        assert_eq!(builder.answer_repo.answers().len(), 1);
        assert!(builder.notification_repo.notifications().is_empty());
    }

    // === accept_answer ===

    #[tokio::test]
    async fn test_accept_answer_質問者が採択すると回答者に通知する() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let answer = builder.add_answer(&question, &u2);
        let sut = builder.content_usecase();

        let accepted = sut
            .accept_answer(answer.id().clone(), u1.id().clone())
            .await
            .unwrap();

        assert!(accepted.is_accepted());
        assert_eq!(accepted.updated_at(), builder.now());
        let notifications = builder.notification_repo.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].recipient_id(), u2.id());
        assert_eq!(notifications[0].kind(), NotificationKind::Accept);
        assert_eq!(
            notifications[0].message(),
            "Alice accepted your answer to 'How to deploy?'"
        );
    }

    #[tokio::test]
    async fn test_accept_answer_別の回答を採択すると以前の採択は解除される() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let u3 = builder.add_user("Carol");
        let question = builder.add_question(&u1, "How to deploy?");
        let first = builder.add_answer(&question, &u2);
        let second = builder.add_answer(&question, &u3);
        let sut = builder.content_usecase();

        sut.accept_answer(first.id().clone(), u1.id().clone())
            .await
            .unwrap();
        sut.accept_answer(second.id().clone(), u1.id().clone())
            .await
            .unwrap();

        let accepted: Vec<_> = builder
            .answer_repo
            .answers()
            .into_iter()
            .filter(|a| a.is_accepted())
            .map(|a| a.id().clone())
            .collect();
        assert_eq!(accepted, vec![second.id().clone()]);
    }

    #[tokio::test]
    async fn test_accept_answer_採択済みの回答を再度採択しても通知しない() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let answer = builder.add_answer(&question, &u2);
        let sut = builder.content_usecase();

        sut.accept_answer(answer.id().clone(), u1.id().clone())
            .await
            .unwrap();
        let again = sut
            .accept_answer(answer.id().clone(), u1.id().clone())
            .await
            .unwrap();

        assert!(again.is_accepted());
        assert_eq!(builder.notification_repo.notifications().len(), 1);
    }

    #[tokio::test]
    async fn test_accept_answer_自分の回答を採択しても通知しない() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let question = builder.add_question(&u1, "How to deploy?");
        let answer = builder.add_answer(&question, &u1);
        let sut = builder.content_usecase();

        let accepted = sut
            .accept_answer(answer.id().clone(), u1.id().clone())
            .await
            .unwrap();

        assert!(accepted.is_accepted());
        assert!(builder.notification_repo.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_accept_answer_質問者以外は403() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let answer = builder.add_answer(&question, &u2);
        let sut = builder.content_usecase();

        let result = sut
            .accept_answer(answer.id().clone(), u2.id().clone())
            .await;

        assert!(matches!(result, Err(CoreError::Forbidden(_))));
        assert!(!builder.answer_repo.answers()[0].is_accepted());
    }

    #[tokio::test]
    async fn test_accept_answer_回答が存在しない場合は404() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let sut = builder.content_usecase();

        let result = sut.accept_answer(AnswerId::new(), u1.id().clone()).await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
