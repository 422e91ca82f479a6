//! # メッセージレンダラー
//!
//! tera テンプレートエンジンで通知のタイトル・本文・リンクを生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **トリガーごとに 1 テンプレート**: テンプレート名は [`NotificationTrigger::name`] と一致する
//! - **リンク**: 常に対象の質問 `/questions/{question_id}` を指す

use askflow_domain::{
    notification::{NotificationError, NotificationMessage, NotificationTrigger},
    question::Question,
};
use tera::{Context, Tera};

/// メッセージレンダラー
///
/// tera テンプレートエンジンをラップし、`NotificationTrigger` から
/// `NotificationMessage` を生成する。
pub struct MessageRenderer {
    engine: Tera,
}

impl MessageRenderer {
    /// 新しいレンダラーインスタンスを作成
    ///
    /// `include_str!` で埋め込んだテンプレートを tera に登録する。
    /// 拡張子 `.txt` のため自動エスケープは適用されない。
    pub fn new() -> Result<Self, NotificationError> {
        let mut engine = Tera::default();

        engine
            .add_raw_templates(vec![
                (
                    "new_answer.txt",
                    include_str!("../../../templates/notifications/new_answer.txt"),
                ),
                (
                    "question_commented.txt",
                    include_str!("../../../templates/notifications/question_commented.txt"),
                ),
                (
                    "answer_commented.txt",
                    include_str!("../../../templates/notifications/answer_commented.txt"),
                ),
                (
                    "answer_accepted.txt",
                    include_str!("../../../templates/notifications/answer_accepted.txt"),
                ),
                (
                    "answer_marked_helpful.txt",
                    include_str!("../../../templates/notifications/answer_marked_helpful.txt"),
                ),
            ])
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(Self { engine })
    }

    /// 通知トリガーからメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `trigger`: 通知トリガー（操作者の表示名を含む）
    /// - `question`: 対象の質問。回答トリガーの場合は回答の親質問
    pub fn render(
        &self,
        trigger: &NotificationTrigger,
        question: &Question,
    ) -> Result<NotificationMessage, NotificationError> {
        let mut context = Context::new();
        context.insert("actor_name", trigger.actor().name.as_str());
        context.insert("question_title", question.title().as_str());

        let message = self
            .engine
            .render(&format!("{}.txt", trigger.name()), &context)
            .map_err(|e| NotificationError::TemplateFailed(e.to_string()))?;

        Ok(NotificationMessage {
            title:   title_of(trigger).to_string(),
            message: message.trim().to_string(),
            link:    question.link(),
        })
    }
}

fn title_of(trigger: &NotificationTrigger) -> &'static str {
    match trigger {
        NotificationTrigger::NewAnswer { .. } => "New answer",
        NotificationTrigger::QuestionCommented { .. }
        | NotificationTrigger::AnswerCommented { .. } => "New comment",
        NotificationTrigger::AnswerAccepted { .. } => "Answer accepted",
        NotificationTrigger::AnswerMarkedHelpful { .. } => "Answer marked helpful",
    }
}
