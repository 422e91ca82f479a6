//! ユースケース層の共通ヘルパー
//!
//! リポジトリ呼び出し結果の変換や権限チェックなど、
//! 複数のユースケースで繰り返されるパターンを共通化する。

use askflow_domain::{
    notification::Actor,
    question::Question,
    user::{User, UserId},
};
use askflow_infra::InfraError;

use crate::error::CoreError;

/// リポジトリの `Result<Option<T>, InfraError>` を `Result<T, CoreError>` に変換する
///
/// ```ignore
/// let answer = self.answer_repo.find_by_id(&answer_id).await
///     .or_not_found("回答")?;
/// ```
pub(crate) trait FindResultExt<T> {
    /// `None` の場合は `CoreError::NotFound`、`InfraError` の場合は `CoreError::Internal` を返す
    fn or_not_found(self, entity_name: &str) -> Result<T, CoreError>;
}

impl<T> FindResultExt<T> for Result<Option<T>, InfraError> {
    fn or_not_found(self, entity_name: &str) -> Result<T, CoreError> {
        self.map_err(|e| CoreError::Internal(format!("{}の取得に失敗: {}", entity_name, e)))?
            .ok_or_else(|| CoreError::NotFound(format!("{}が見つかりません", entity_name)))
    }
}

/// 質問者本人かをチェックする
pub(crate) fn check_question_author(
    question: &Question,
    user_id: &UserId,
    action: &str,
) -> Result<(), CoreError> {
    if !question.is_authored_by(user_id) {
        return Err(CoreError::Forbidden(format!(
            "質問者以外は回答を{}できません",
            action,
        )));
    }
    Ok(())
}

/// 通知トリガーの操作者を組み立てる
pub(crate) fn actor_of(user: &User) -> Actor {
    Actor::new(user.id().clone(), user.name().clone())
}
