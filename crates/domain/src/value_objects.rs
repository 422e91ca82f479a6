//! # 共通値オブジェクト
//!
//! 複数のエンティティで共有される値オブジェクトを定義する。
//!
//! | 型 | 最大文字数 | 用途 |
//! |---|-----------|------|
//! | [`UserName`] | 50 | ユーザー表示名（通知メッセージに埋め込まれる） |
//! | [`QuestionTitle`] | 200 | 質問タイトル |
//! | [`AnswerBody`] | 10,000 | 回答本文 |
//! | [`CommentBody`] | 2,000 | コメント本文 |

define_validated_string! {
    /// ユーザー表示名
    pub struct UserName {
        label: "ユーザー名",
        max_length: 50,
    }
}

define_validated_string! {
    /// 質問タイトル
    pub struct QuestionTitle {
        label: "質問タイトル",
        max_length: 200,
    }
}

define_validated_string! {
    /// 回答本文
    pub struct AnswerBody {
        label: "回答本文",
        max_length: 10_000,
    }
}

define_validated_string! {
    /// コメント本文
    pub struct CommentBody {
        label: "コメント本文",
        max_length: 2_000,
    }
}
