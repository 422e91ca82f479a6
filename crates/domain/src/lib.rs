//! # AskFlow ドメイン層
//!
//! 社内 Q&A の中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Question, Answer）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: UserName,
//!   QuestionTitle）
//! - **通知イベント**: コンテンツ操作から導出される通知トリガーとその結果
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）に一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`question`] / [`answer`] / [`comment`] / [`helpful_mark`] - Q&A コンテンツ
//! - [`notification`] - 通知エンティティ、トリガー、送信結果
//! - [`user`] - ユーザー（プロフィール）
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメイン層で発生するエラーの定義
//!
//! ## 使用例
//!
//! ```rust
//! use askflow_domain::{DomainError, question::QuestionId};
//!
//! let question_id = QuestionId::new();
//!
//! let error = DomainError::NotFound {
//!     entity_type: "Question",
//!     id:          question_id.to_string(),
//! };
//! assert!(error.to_string().contains("Question"));
//! ```

#[macro_use]
mod macros;

pub mod answer;
pub mod clock;
pub mod comment;
pub mod error;
pub mod helpful_mark;
pub mod notification;
pub mod question;
pub mod user;
pub mod value_objects;

pub use error::DomainError;
