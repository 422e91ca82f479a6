//! 通知ファンアウトの統合テスト
//!
//! コンテンツ操作のユースケースから通知ストアまでを、
//! QaTestBuilder のインメモリリポジトリで通して検証する。

use askflow_core_service::{
    test_utils::QaTestBuilder,
    usecase::{PostAnswerInput, PostCommentInput},
};
use askflow_domain::{
    notification::{Actor, NotificationKind, NotifyOutcome, SkipReason},
    question::QuestionId,
};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_新しい回答は質問者宛ての通知を1件作る() {
    // Arrange
    let builder = QaTestBuilder::new();
    let u1 = builder.add_user("Alice");
    let u2 = builder.add_user("Bob");
    let question = builder.add_question(&u1, "How to deploy?");
    let sut = builder.content_usecase();

    // Act
    sut.post_answer(PostAnswerInput {
        question_id: question.id().clone(),
        author_id:   u2.id().clone(),
        body:        "Ship a static binary.".to_string(),
    })
    .await
    .unwrap();

    // Assert
    let notifications = builder.notification_repo.notifications();
    assert_eq!(notifications.len(), 1);
    let notification = &notifications[0];
    assert_eq!(notification.recipient_id(), u1.id());
    assert_eq!(notification.kind(), NotificationKind::Answer);
    assert_eq!(
        notification.link(),
        format!("/questions/{}", question.id())
    );
    assert!(notification.message().contains("Bob"));
    assert!(notification.message().contains("How to deploy?"));
    assert!(!notification.is_read());
    assert_eq!(notification.created_at(), builder.now());
}

#[tokio::test]
async fn test_操作者と受信者が同じならどのトリガーでも通知しない() {
    // Arrange
    let builder = QaTestBuilder::new();
    let u1 = builder.add_user("Alice");
    let question = builder.add_question(&u1, "How to deploy?");
    let own_answer = builder.add_answer(&question, &u1);
    let service = builder.notification_service();
    let actor = Actor::new(u1.id().clone(), u1.name().clone());

    // Act
    let outcomes = vec![
        service
            .notify_new_answer(question.id().clone(), actor.clone())
            .await,
        service
            .notify_question_commented(question.id().clone(), actor.clone())
            .await,
        service
            .notify_answer_commented(own_answer.id().clone(), actor.clone())
            .await,
        service
            .notify_answer_accepted(own_answer.id().clone(), actor.clone())
            .await,
        service
            .notify_answer_helpful(own_answer.id().clone(), actor)
            .await,
    ];

    // Assert
    for outcome in outcomes {
        assert_eq!(outcome, NotifyOutcome::Skipped(SkipReason::SelfNotification));
    }
    assert!(builder.notification_repo.notifications().is_empty());
}

#[tokio::test]
async fn test_質問者が他人の回答を採択すると回答者に1件だけ通知する() {
    let builder = QaTestBuilder::new();
    let u1 = builder.add_user("Alice");
    let u2 = builder.add_user("Bob");
    let question = builder.add_question(&u1, "How to deploy?");
    let answer = builder.add_answer(&question, &u2);
    let sut = builder.content_usecase();

    sut.accept_answer(answer.id().clone(), u1.id().clone())
        .await
        .unwrap();

    let notifications = builder.notification_repo.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].recipient_id(), u2.id());
    assert_eq!(notifications[0].kind(), NotificationKind::Accept);
}

#[tokio::test]
async fn test_質問者が自分の回答を採択しても通知しない() {
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
async fn test_質問が同時に削除されてもコメント投稿は成功し通知は作られない() {
    // Arrange
    let builder = QaTestBuilder::new();
    let u1 = builder.add_user("Alice");
    let u2 = builder.add_user("Bob");
    let u3 = builder.add_user("Carol");
    let question = builder.add_question(&u1, "How to deploy?");
    let answer = builder.add_answer(&question, &u2);
    builder.question_repo.remove_question(question.id());
    let sut = builder.content_usecase();

    // Act
    let result = sut
        .post_comment(PostCommentInput::on_answer(
            answer.id().clone(),
            u3.id().clone(),
            "Still relevant?".to_string(),
        ))
        .await;

    // Assert
    assert!(result.is_ok());
    assert_eq!(builder.comment_repo.comments().len(), 1);
    assert!(builder.notification_repo.notifications().is_empty());
}

#[tokio::test]
async fn test_別々のユーザーの同時評価はそれぞれ通知される() {
    // Arrange
    let builder = QaTestBuilder::new();
    let u1 = builder.add_user("Alice");
    let u2 = builder.add_user("Bob");
    let u3 = builder.add_user("Carol");
    let u4 = builder.add_user("Dave");
    let question = builder.add_question(&u1, "How to deploy?");
    let answer = builder.add_answer(&question, &u2);
    let sut = builder.content_usecase();

    // Act
    let (r3, r4) = tokio::join!(
        sut.toggle_helpful(answer.id().clone(), u3.id().clone()),
        sut.toggle_helpful(answer.id().clone(), u4.id().clone()),
    );

    // Assert
    assert!(r3.unwrap().marked);
    assert!(r4.unwrap().marked);
    let notifications = builder.notification_repo.notifications();
    assert_eq!(notifications.len(), 2);
    assert!(notifications.iter().all(|n| n.recipient_id() == u2.id()));
    assert!(
        notifications
            .iter()
            .all(|n| n.kind() == NotificationKind::Helpful)
    );
    assert_ne!(notifications[0].id(), notifications[1].id());
    assert_eq!(builder.helpful_mark_repo.marks().len(), 2);
}

#[tokio::test]
async fn test_通知ストアが書き込みに失敗しても操作は成功する() {
    let builder = QaTestBuilder::new();
    let u1 = builder.add_user("Alice");
    let u2 = builder.add_user("Bob");
    let question = builder.add_question(&u1, "How to deploy?");
    let answer = builder.add_answer(&question, &u2);
    builder.notification_repo.fail_writes();
    let sut = builder.content_usecase();

    let comment = sut
        .post_comment(PostCommentInput::on_question(
            question.id().clone(),
            u2.id().clone(),
            "ping".to_string(),
        ))
        .await;
    let accepted = sut
        .accept_answer(answer.id().clone(), u1.id().clone())
        .await;

    assert!(comment.is_ok());
    assert!(accepted.is_ok());
    assert!(builder.notification_repo.notifications().is_empty());
}

#[tokio::test]
async fn test_存在しない質問へのトリガーは例外なく失敗を返す() {
    let builder = QaTestBuilder::new();
    let u2 = builder.add_user("Bob");
    let service = builder.notification_service();

    let outcome = service
        .notify_new_answer(
            QuestionId::new(),
            Actor::new(u2.id().clone(), u2.name().clone()),
        )
        .await;

    assert!(matches!(outcome, NotifyOutcome::Failed(_)));
    assert!(builder.notification_repo.notifications().is_empty());
}
