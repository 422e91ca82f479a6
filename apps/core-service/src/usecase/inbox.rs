//! # 通知受信箱ユースケース
//!
//! 受信者ごとの通知一覧・未読数・既読化・削除を実装する。
//! どの操作も受信者 ID で絞り込むため、他人の通知には触れられない。

use std::sync::Arc;

use askflow_domain::{
    notification::{Notification, NotificationId},
    user::UserId,
};
use askflow_infra::repository::NotificationRepository;
use askflow_shared::{event_log::event, log_business_event};

use crate::error::CoreError;

/// 通知受信箱ユースケース実装
pub struct InboxUseCaseImpl {
    notification_repo: Arc<dyn NotificationRepository>,
}

impl InboxUseCaseImpl {
    pub fn new(notification_repo: Arc<dyn NotificationRepository>) -> Self {
        Self { notification_repo }
    }

    /// 通知一覧を新しい順に取得する
    pub async fn list_notifications(
        &self,
        recipient_id: &UserId,
    ) -> Result<Vec<Notification>, CoreError> {
        Ok(self.notification_repo.find_by_recipient(recipient_id).await?)
    }

    /// 未読件数を取得する
    pub async fn count_unread(&self, recipient_id: &UserId) -> Result<i64, CoreError> {
        Ok(self.notification_repo.count_unread(recipient_id).await?)
    }

    /// 通知を既読にする（冪等）
    ///
    /// 受信者宛ての通知が存在しない場合は 404。
    pub async fn mark_read(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<(), CoreError> {
        let updated = self.notification_repo.mark_read(id, recipient_id).await?;
        if !updated {
            return Err(CoreError::NotFound("通知が見つかりません".to_string()));
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_READ,
            event.entity_type = event::entity_type::NOTIFICATION,
            event.entity_id = %id,
            event.actor_id = %recipient_id,
            event.result = event::result::SUCCESS,
            "通知を既読化"
        );
        Ok(())
    }

    /// 通知を削除する
    ///
    /// 受信者宛ての通知が存在しない場合は 404。
    pub async fn delete_notification(
        &self,
        id: &NotificationId,
        recipient_id: &UserId,
    ) -> Result<(), CoreError> {
        let deleted = self.notification_repo.delete(id, recipient_id).await?;
        if !deleted {
            return Err(CoreError::NotFound("通知が見つかりません".to_string()));
        }

        log_business_event!(
            event.category = event::category::NOTIFICATION,
            event.action = event::action::NOTIFICATION_DELETED,
            event.entity_type = event::entity_type::NOTIFICATION,
            event.entity_id = %id,
            event.actor_id = %recipient_id,
            event.result = event::result::SUCCESS,
            "通知を削除"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use askflow_domain::notification::{
        NewNotification,
        NotificationKind,
        NotificationMessage,
    };
    use chrono::{DateTime, Duration, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_utils::QaTestBuilder;

    fn notification_for(recipient: &UserId, now: DateTime<Utc>) -> Notification {
        Notification::new(NewNotification {
            id:           NotificationId::new(),
            recipient_id: recipient.clone(),
            kind:         NotificationKind::Answer,
            content:      NotificationMessage {
                title:   "New answer".to_string(),
                message: "Bob answered your question 'How to deploy?'".to_string(),
                link:    "/questions/q1".to_string(),
            },
            now,
        })
    }

    #[tokio::test]
    async fn test_list_notifications_新しい順に受信者の通知だけを返す() {
        // Arrange
        let builder = QaTestBuilder::new();
        let recipient = UserId::new();
        let other = UserId::new();
        let older = notification_for(&recipient, builder.now() - Duration::minutes(5));
        let newer = notification_for(&recipient, builder.now());
        builder.notification_repo.add_notification(older.clone());
        builder.notification_repo.add_notification(newer.clone());
        builder
            .notification_repo
            .add_notification(notification_for(&other, builder.now()));
        let sut = builder.inbox_usecase();

        // Act
        let result = sut.list_notifications(&recipient).await.unwrap();

        // Assert
        assert_eq!(result, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_mark_read_既読にすると未読数が減る() {
        let builder = QaTestBuilder::new();
        let recipient = UserId::new();
        let first = notification_for(&recipient, builder.now());
        builder.notification_repo.add_notification(first.clone());
        builder
            .notification_repo
            .add_notification(notification_for(&recipient, builder.now()));
        let sut = builder.inbox_usecase();

        assert_eq!(sut.count_unread(&recipient).await.unwrap(), 2);
        sut.mark_read(first.id(), &recipient).await.unwrap();
        sut.mark_read(first.id(), &recipient).await.unwrap();

        assert_eq!(sut.count_unread(&recipient).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mark_read_他人の通知は404() {
        let builder = QaTestBuilder::new();
        let recipient = UserId::new();
        let notification = notification_for(&recipient, builder.now());
        builder.notification_repo.add_notification(notification.clone());
        let sut = builder.inbox_usecase();

        let result = sut.mark_read(notification.id(), &UserId::new()).await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
        assert!(!builder.notification_repo.notifications()[0].is_read());
    }

    #[tokio::test]
    async fn test_delete_notification_削除後は一覧に含まれない() {
        let builder = QaTestBuilder::new();
        let recipient = UserId::new();
        let notification = notification_for(&recipient, builder.now());
        builder.notification_repo.add_notification(notification.clone());
        let sut = builder.inbox_usecase();

        sut.delete_notification(notification.id(), &recipient)
            .await
            .unwrap();

        assert!(sut.list_notifications(&recipient).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_notification_存在しない通知は404() {
        let builder = QaTestBuilder::new();
        let sut = builder.inbox_usecase();

        let result = sut
            .delete_notification(&NotificationId::new(), &UserId::new())
            .await;

        assert!(matches!(result, Err(CoreError::NotFound(_))));
    }
}
