//! # 通知設定ユースケース
//!
//! ユーザーごとの通知種別の ON/OFF を取得・更新する。
//! 設定は通知サービスが受信者解決時に参照する。

use std::sync::Arc;

use askflow_domain::{notification::NotificationPreferences, user::UserId};
use askflow_infra::{db::TransactionManager, repository::UserRepository};
use askflow_shared::{event_log::event, log_business_event};

use crate::{error::CoreError, usecase::helpers::FindResultExt};

/// 通知設定ユースケース実装
pub struct PreferencesUseCaseImpl {
    user_repo:  Arc<dyn UserRepository>,
    tx_manager: Arc<dyn TransactionManager>,
}

impl PreferencesUseCaseImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, tx_manager: Arc<dyn TransactionManager>) -> Self {
        Self {
            user_repo,
            tx_manager,
        }
    }

    /// 通知設定を取得する
    pub async fn get_preferences(
        &self,
        user_id: &UserId,
    ) -> Result<NotificationPreferences, CoreError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .or_not_found("ユーザー")?;
        Ok(*user.notification_preferences())
    }

    /// 通知設定を更新する
    ///
    /// ユーザーが存在しない場合は 404。
    pub async fn update_preferences(
        &self,
        user_id: &UserId,
        preferences: NotificationPreferences,
    ) -> Result<NotificationPreferences, CoreError> {
        let mut tx = self.tx_manager.begin().await?;
        let updated = self
            .user_repo
            .update_notification_preferences(&mut tx, user_id, &preferences)
            .await?;
        if !updated {
            return Err(CoreError::NotFound("ユーザーが見つかりません".to_string()));
        }
        tx.commit().await?;

        log_business_event!(
            event.category = event::category::USER,
            event.action = event::action::PREFERENCES_UPDATED,
            event.entity_type = event::entity_type::USER,
            event.entity_id = %user_id,
            event.actor_id = %user_id,
            event.result = event::result::SUCCESS,
            "通知設定を更新"
        );
        Ok(preferences)
    }
}
