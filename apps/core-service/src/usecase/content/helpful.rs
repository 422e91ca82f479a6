//! 「役に立った」評価のトグル

use askflow_domain::{
    answer::AnswerId,
    helpful_mark::{HelpfulMark, HelpfulMarkId},
    user::UserId,
};
use askflow_shared::{event_log::event, log_business_event};

use crate::{
    error::CoreError,
    usecase::{
        content::{ContentUseCaseImpl, HelpfulToggleResult},
        helpers::{FindResultExt, actor_of},
    },
};

impl ContentUseCaseImpl {
    /// 回答への「役に立った」評価をトグルする
    ///
    /// 評価済みなら取り消し（通知なし）、未評価なら評価して回答者に通知する。
    ///
    /// ## エラー
    ///
    /// - 回答または評価者が見つからない場合: 404
    /// - 同じユーザーの評価が同時に到着し一意制約に違反した場合: 409
    pub async fn toggle_helpful(
        &self,
        answer_id: AnswerId,
        user_id: UserId,
    ) -> Result<HelpfulToggleResult, CoreError> {
        let answer = self
            .answer_repo
            .find_by_id(&answer_id)
            .await
            .or_not_found("回答")?;
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await
            .or_not_found("ユーザー")?;

        let existing = self
            .helpful_mark_repo
            .find_by_answer_and_user(answer.id(), user.id())
            .await?;

        // 評価数は同じトランザクション内で数える。
        // 取得に失敗した場合はロールバックされ、評価も通知も残らない
        let mut tx = self.tx_manager.begin().await?;
        let result = match existing {
            Some(mark) => {
                self.helpful_mark_repo.delete(&mut tx, mark.id()).await?;
                let helpful_count = self
                    .helpful_mark_repo
                    .count_by_answer(&mut tx, answer.id())
                    .await?;
                tx.commit().await?;

                log_business_event!(
                    event.category = event::category::HELPFUL,
                    event.action = event::action::HELPFUL_UNMARKED,
                    event.entity_type = event::entity_type::HELPFUL_MARK,
                    event.entity_id = %mark.id(),
                    event.actor_id = %user.id(),
                    event.result = event::result::SUCCESS,
                    answer_id = %answer.id(),
                    "評価を取り消し"
                );

                HelpfulToggleResult {
                    marked: false,
                    helpful_count,
                }
            }
            None => {
                let mark = HelpfulMark::new(
                    HelpfulMarkId::new(),
                    answer.id().clone(),
                    user.id().clone(),
                    self.clock.now(),
                );
                self.helpful_mark_repo.insert(&mut tx, &mark).await?;
                let helpful_count = self
                    .helpful_mark_repo
                    .count_by_answer(&mut tx, answer.id())
                    .await?;
                tx.commit().await?;

                log_business_event!(
                    event.category = event::category::HELPFUL,
                    event.action = event::action::HELPFUL_MARKED,
                    event.entity_type = event::entity_type::HELPFUL_MARK,
                    event.entity_id = %mark.id(),
                    event.actor_id = %user.id(),
                    event.result = event::result::SUCCESS,
                    answer_id = %answer.id(),
                    "回答を評価"
                );

                self.notification_service
                    .notify_answer_helpful(answer.id().clone(), actor_of(&user))
                    .await;

                HelpfulToggleResult {
                    marked: true,
                    helpful_count,
                }
            }
        };

        Ok(result)
    }
}
