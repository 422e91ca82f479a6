//! # 通知
//!
//! アプリ内通知に関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Notification`] | 通知 | 受信者ごとの通知レコード。既読フラグ以外は不変 |
//! | [`NotificationKind`] | 通知種別 | `answer` / `comment` / `accept` / `helpful` |
//! | [`NotificationTrigger`] | 通知トリガー | 通知を発生させるコンテンツ操作（5 種類） |
//! | [`NotifyOutcome`] | 通知結果 | 作成 / スキップ / 失敗 |
//! | [`NotificationPreferences`] | 通知設定 | 種別ごとの受信可否 |
//!
//! ## 設計方針
//!
//! - **enum による通知トリガー**: 操作ごとに 1 バリアント。受信者解決の前に型で検証される
//! - **best-effort**: 通知の失敗は元のコンテンツ操作に影響しない。失敗も [`NotifyOutcome`]
//!   の値として返す
//! - **テンプレート分離**: トリガーとメッセージ生成は分離（レンダラーは core-service）

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    answer::AnswerId,
    question::QuestionId,
    user::UserId,
    value_objects::UserName,
};

define_uuid_id! {
    /// 通知 ID（一意識別子）
    ///
    /// notifications テーブルの主キー。UUID v7 を使用。
    pub struct NotificationId;
}

/// 通知種別
///
/// notifications テーブルの `kind` カラムに格納される値。
/// snake_case でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    /// 自分の質問に回答が付いた
    Answer,
    /// 自分の質問・回答にコメントが付いた
    Comment,
    /// 自分の回答が採択された
    Accept,
    /// 自分の回答が「役に立った」と評価された
    Helpful,
}

/// 通知エンティティ
///
/// 作成後に変化するのは `is_read` のみ（既読化）。削除は受信者の操作で行われる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    id:           NotificationId,
    recipient_id: UserId,
    kind:         NotificationKind,
    title:        String,
    message:      String,
    link:         String,
    is_read:      bool,
    created_at:   DateTime<Utc>,
}

/// 通知の新規作成パラメータ
pub struct NewNotification {
    pub id:           NotificationId,
    pub recipient_id: UserId,
    pub kind:         NotificationKind,
    pub content:      NotificationMessage,
    pub now:          DateTime<Utc>,
}

/// 通知の DB 復元パラメータ
pub struct NotificationRecord {
    pub id:           NotificationId,
    pub recipient_id: UserId,
    pub kind:         NotificationKind,
    pub title:        String,
    pub message:      String,
    pub link:         String,
    pub is_read:      bool,
    pub created_at:   DateTime<Utc>,
}

impl Notification {
    /// 新しい通知を作成する（未読）
    pub fn new(params: NewNotification) -> Self {
        Self {
            id:           params.id,
            recipient_id: params.recipient_id,
            kind:         params.kind,
            title:        params.content.title,
            message:      params.content.message,
            link:         params.content.link,
            is_read:      false,
            created_at:   params.now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(record: NotificationRecord) -> Self {
        Self {
            id:           record.id,
            recipient_id: record.recipient_id,
            kind:         record.kind,
            title:        record.title,
            message:      record.message,
            link:         record.link,
            is_read:      record.is_read,
            created_at:   record.created_at,
        }
    }

    /// 既読にした新しいインスタンスを返す
    ///
    /// 既読の通知に対して呼んでも状態は変わらない。
    pub fn marked_read(self) -> Self {
        Self {
            is_read: true,
            ..self
        }
    }

    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    pub fn recipient_id(&self) -> &UserId {
        &self.recipient_id
    }

    pub fn kind(&self) -> NotificationKind {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn is_read(&self) -> bool {
        self.is_read
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// レンダリング済みの通知内容
///
/// テンプレートレンダリングの出力。通知レコードの title / message / link になる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub title:   String,
    pub message: String,
    pub link:    String,
}

/// 通知設定
///
/// users テーブルの `notification_preferences` カラムに JSON で格納される。
/// キーは camelCase。欠けているキーは `true` として扱う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub new_answer:      bool,
    pub new_comment:     bool,
    pub answer_accepted: bool,
    pub answer_helpful:  bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            new_answer:      true,
            new_comment:     true,
            answer_accepted: true,
            answer_helpful:  true,
        }
    }
}

impl NotificationPreferences {
    /// 指定した種別の通知を受け取るか
    pub fn allows(&self, kind: NotificationKind) -> bool {
        match kind {
            NotificationKind::Answer => self.new_answer,
            NotificationKind::Comment => self.new_comment,
            NotificationKind::Accept => self.answer_accepted,
            NotificationKind::Helpful => self.answer_helpful,
        }
    }
}

/// 操作ユーザー
///
/// 通知メッセージに表示名を埋め込むため、ID と名前の組で持ち回る。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id:   UserId,
    pub name: UserName,
}

impl Actor {
    pub fn new(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }
}

/// 通知トリガー
///
/// 通知を発生させるコンテンツ操作。受信者は参照先の作成者になる。
#[derive(Debug, Clone)]
pub enum NotificationTrigger {
    /// 質問に回答が付いた → 質問者に送信
    NewAnswer { question_id: QuestionId, actor: Actor },
    /// 質問にコメントが付いた → 質問者に送信
    QuestionCommented { question_id: QuestionId, actor: Actor },
    /// 回答にコメントが付いた → 回答者に送信
    AnswerCommented { answer_id: AnswerId, actor: Actor },
    /// 回答が採択された → 回答者に送信
    AnswerAccepted { answer_id: AnswerId, actor: Actor },
    /// 回答が「役に立った」と評価された → 回答者に送信
    AnswerMarkedHelpful { answer_id: AnswerId, actor: Actor },
}

impl NotificationTrigger {
    /// 生成される通知の種別を返す
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::NewAnswer { .. } => NotificationKind::Answer,
            Self::QuestionCommented { .. } | Self::AnswerCommented { .. } => {
                NotificationKind::Comment
            }
            Self::AnswerAccepted { .. } => NotificationKind::Accept,
            Self::AnswerMarkedHelpful { .. } => NotificationKind::Helpful,
        }
    }

    /// 操作ユーザーを返す
    pub fn actor(&self) -> &Actor {
        match self {
            Self::NewAnswer { actor, .. }
            | Self::QuestionCommented { actor, .. }
            | Self::AnswerCommented { actor, .. }
            | Self::AnswerAccepted { actor, .. }
            | Self::AnswerMarkedHelpful { actor, .. } => actor,
        }
    }

    /// トリガー名（ログ・テンプレート選択用）
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewAnswer { .. } => "new_answer",
            Self::QuestionCommented { .. } => "question_commented",
            Self::AnswerCommented { .. } => "answer_commented",
            Self::AnswerAccepted { .. } => "answer_accepted",
            Self::AnswerMarkedHelpful { .. } => "answer_marked_helpful",
        }
    }
}

/// 通知作成エラー
///
/// 呼び出し元のリクエストを失敗させることはなく、[`NotifyOutcome::Failed`] として返される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// 受信者の解決に必要な質問・回答が見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    ReferenceNotFound {
        entity_type: &'static str,
        id:          String,
    },

    /// 参照先の読み込みに失敗
    #[error("参照先の読み込みに失敗: {0}")]
    LookupFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),

    /// 通知の書き込みに失敗
    #[error("通知の書き込みに失敗: {0}")]
    WriteFailed(String),
}

/// 通知をスキップした理由
///
/// いずれもエラーではなく、想定された no-op。
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkipReason {
    /// 操作ユーザー自身が受信者
    SelfNotification,
    /// 受信者のユーザーが存在しない
    RecipientNotFound,
    /// 受信者がこの種別の通知を無効にしている
    RecipientOptedOut,
}

/// 通知の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Created(NotificationId),
    Skipped(SkipReason),
    Failed(NotificationError),
}

impl NotifyOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// 作成された通知の ID（作成されなかった場合は `None`）
    pub fn notification_id(&self) -> Option<&NotificationId> {
        match self {
            Self::Created(id) => Some(id),
            Self::Skipped(_) | Self::Failed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn actor() -> Actor {
        Actor::new(UserId::new(), UserName::new("佐藤花子").unwrap())
    }

    #[rstest]
    #[case(NotificationKind::Answer, "answer")]
    #[case(NotificationKind::Comment, "comment")]
    #[case(NotificationKind::Accept, "accept")]
    #[case(NotificationKind::Helpful, "helpful")]
    fn test_通知種別の文字列表現(#[case] kind: NotificationKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
        assert_eq!(NotificationKind::from_str(expected).unwrap(), kind);
        assert_eq!(
            serde_json::to_value(kind).unwrap(),
            serde_json::Value::String(expected.to_string())
        );
    }

    #[test]
    fn test_未知の通知種別はパースエラー() {
        assert!(NotificationKind::from_str("mention").is_err());
    }

    #[rstest]
    #[case(NotificationTrigger::NewAnswer { question_id: QuestionId::new(), actor: actor() }, NotificationKind::Answer)]
    #[case(NotificationTrigger::QuestionCommented { question_id: QuestionId::new(), actor: actor() }, NotificationKind::Comment)]
    #[case(NotificationTrigger::AnswerCommented { answer_id: AnswerId::new(), actor: actor() }, NotificationKind::Comment)]
    #[case(NotificationTrigger::AnswerAccepted { answer_id: AnswerId::new(), actor: actor() }, NotificationKind::Accept)]
    #[case(NotificationTrigger::AnswerMarkedHelpful { answer_id: AnswerId::new(), actor: actor() }, NotificationKind::Helpful)]
    fn test_トリガーから通知種別が決まる(
        #[case] trigger: NotificationTrigger,
        #[case] expected: NotificationKind,
    ) {
        assert_eq!(trigger.kind(), expected);
    }

    #[test]
    fn test_新規通知は未読で作成される() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let notification = Notification::new(NewNotification {
            id:           NotificationId::new(),
            recipient_id: UserId::new(),
            kind:         NotificationKind::Answer,
            content:      NotificationMessage {
                title:   "New answer".to_string(),
                message: "佐藤花子 answered your question 'How to deploy?'".to_string(),
                link:    "/questions/q1".to_string(),
            },
            now,
        });

        assert!(!notification.is_read());
        assert_eq!(notification.created_at(), now);
        assert_eq!(notification.title(), "New answer");
    }

    #[test]
    fn test_marked_readは冪等() {
        let notification = Notification::new(NewNotification {
            id:           NotificationId::new(),
            recipient_id: UserId::new(),
            kind:         NotificationKind::Helpful,
            content:      NotificationMessage {
                title:   "Answer marked helpful".to_string(),
                message: "m".to_string(),
                link:    "/questions/q1".to_string(),
            },
            now:          Utc::now(),
        });

        let once = notification.marked_read();
        let twice = once.clone().marked_read();

        assert!(once.is_read());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_通知設定は欠けたキーをtrueとして扱う() {
        let prefs: NotificationPreferences =
            serde_json::from_value(serde_json::json!({ "answerHelpful": false })).unwrap();

        assert_eq!(
            prefs,
            NotificationPreferences {
                new_answer:      true,
                new_comment:     true,
                answer_accepted: true,
                answer_helpful:  false,
            }
        );
        assert!(!prefs.allows(NotificationKind::Helpful));
        assert!(prefs.allows(NotificationKind::Accept));
    }

    #[test]
    fn test_通知設定はcamel_caseでシリアライズされる() {
        let json = serde_json::to_value(NotificationPreferences::default()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "newAnswer": true,
                "newComment": true,
                "answerAccepted": true,
                "answerHelpful": true,
            })
        );
    }

    #[test]
    fn test_notify_outcomeの作成判定() {
        let id = NotificationId::new();

        assert!(NotifyOutcome::Created(id.clone()).is_created());
        assert_eq!(NotifyOutcome::Created(id.clone()).notification_id(), Some(&id));
        assert_eq!(
            NotifyOutcome::Skipped(SkipReason::SelfNotification).notification_id(),
            None
        );
        assert!(!NotifyOutcome::Failed(NotificationError::WriteFailed("x".into())).is_created());
    }

    #[test]
    fn test_スキップ理由の文字列表現() {
        let reason: &'static str = SkipReason::RecipientOptedOut.into();
        assert_eq!(reason, "recipient_opted_out");
    }
}
