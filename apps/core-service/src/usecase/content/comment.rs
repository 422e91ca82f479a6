//! 質問・回答へのコメント投稿

use askflow_domain::{
    comment::{Comment, CommentId, CommentParent, NewComment},
    value_objects::CommentBody,
};
use askflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::{
        content::{ContentUseCaseImpl, PostCommentInput},
        helpers::{FindResultExt, actor_of},
    },
};

impl ContentUseCaseImpl {
    /// 質問または回答にコメントを投稿する
    ///
    /// ## 処理フロー
    ///
    /// 1. コメント先（質問または回答）とコメント投稿者を取得
    /// 2. コメント本文のバリデーション
    /// 3. コメントを作成して保存
    /// 4. コメント先の作成者に通知
    ///
    /// ## エラー
    ///
    /// - コメント先または投稿者が見つからない場合: 404
    /// - コメント本文が不正な場合: 400
    pub async fn post_comment(&self, input: PostCommentInput) -> Result<Comment, CoreError> {
        // 1. コメント先と投稿者を取得
        match &input.parent {
            CommentParent::Question(question_id) => {
                self.question_repo
                    .find_by_id(question_id)
                    .await
                    .or_not_found("質問")?;
            }
            CommentParent::Answer(answer_id) => {
                self.answer_repo
                    .find_by_id(answer_id)
                    .await
                    .or_not_found("回答")?;
            }
        }
        let author = self
            .user_repo
            .find_by_id(&input.author_id)
            .await
            .or_not_found("ユーザー")?;

        // 2. コメント本文のバリデーション
        let body =
            CommentBody::new(input.body).map_err(|e| CoreError::BadRequest(e.to_string()))?;

        // 3. コメントを作成して保存
        let comment = Comment::new(NewComment {
            id:        CommentId::new(),
            parent:    input.parent,
            author_id: author.id().clone(),
            body,
            now:       self.clock.now(),
        });

        let mut tx = self.tx_manager.begin().await?;
        self.comment_repo.insert(&mut tx, &comment).await?;
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::COMMENT,
            event.action = event::action::COMMENT_POSTED,
            event.entity_type = event::entity_type::COMMENT,
            event.entity_id = %comment.id(),
            event.actor_id = %author.id(),
            event.result = event::result::SUCCESS,
            comment.parent_type = comment.parent().type_str(),
            comment.parent_id = %comment.parent().id_uuid(),
            "コメントを投稿"
        );

        // 4. コメント先の作成者に通知
        let actor = actor_of(&author);
        match comment.parent() {
            CommentParent::Question(question_id) => {
                self.notification_service
                    .notify_question_commented(question_id.clone(), actor)
                    .await;
            }
            CommentParent::Answer(answer_id) => {
                self.notification_service
                    .notify_answer_commented(answer_id.clone(), actor)
                    .await;
            }
        }

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use askflow_domain::{
        answer::AnswerId,
        notification::NotificationKind,
        question::QuestionId,
        user::UserId,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_utils::QaTestBuilder;

    #[tokio::test]
    async fn test_post_comment_質問へのコメントは質問者に通知する() {
        // Arrange
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        // Act
        let comment = sut
            .post_comment(PostCommentInput::on_question(
                question.id().clone(),
                u2.id().clone(),
                "Which target?".to_string(),
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(
            comment.parent(),
            &CommentParent::Question(question.id().clone())
        );
        assert_eq!(builder.comment_repo.comments(), vec![comment]);
        let notifications = builder.notification_repo.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].recipient_id(), u1.id());
        assert_eq!(notifications[0].kind(), NotificationKind::Comment);
        assert_eq!(
            notifications[0].message(),
            "Bob commented on your question 'How to deploy?'"
        );
    }

    #[tokio::test]
    async fn test_post_comment_回答へのコメントは回答者に通知する() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let answer = builder.add_answer(&question, &u2);
        let sut = builder.content_usecase();

        sut.post_comment(PostCommentInput::on_answer(
            answer.id().clone(),
            u1.id().clone(),
            "Thanks!".to_string(),
        ))
        .await
        .unwrap();

        let notifications = builder.notification_repo.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].recipient_id(), u2.id());
        assert_eq!(notifications[0].message(), "Alice commented on your answer");
        assert_eq!(notifications[0].link(), question.link());
    }

    #[tokio::test]
    async fn test_post_comment_自分の質問へのコメントは通知しない() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        sut.post_comment(PostCommentInput::on_question(
            question.id().clone(),
            u1.id().clone(),
            "Edit: clarified".to_string(),
        ))
        .await
        .unwrap();

        assert_eq!(builder.comment_repo.comments().len(), 1);
        assert!(builder.notification_repo.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_post_comment_コメントごとに通知が作られる() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        for body in ["first", "second", "third"] {
            sut.post_comment(PostCommentInput::on_question(
                question.id().clone(),
                u2.id().clone(),
                body.to_string(),
            ))
            .await
            .unwrap();
        }

        assert_eq!(builder.notification_repo.notifications().len(), 3);
    }

    #[rstest]
    #[case::question(PostCommentInput::on_question(QuestionId::new(), UserId::new(), "x".into()))]
    #[case::answer(PostCommentInput::on_answer(AnswerId::new(), UserId::new(), "x".into()))]
    #[tokio::test]
    async fn test_post_comment_コメント先が存在しない場合は404(#[case] input: PostCommentInput) {
        let builder = QaTestBuilder::new();
        let sut = builder.content_usecase();

        let result = sut.post_comment(input).await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
        assert!(builder.comment_repo.comments().is_empty());
    }

    #[tokio::test]
    async fn test_post_comment_長すぎる本文は400() {
        let builder = QaTestBuilder::new();
        let u1 = builder.add_user("Alice");
        let u2 = builder.add_user("Bob");
        let question = builder.add_question(&u1, "How to deploy?");
        let sut = builder.content_usecase();

        let result = sut
            .post_comment(PostCommentInput::on_question(
                question.id().clone(),
                u2.id().clone(),
                "a".repeat(2_001),
            ))
            .await;

        assert!(matches!(result, Err(CoreError::BadRequest(_))));
    }
}
