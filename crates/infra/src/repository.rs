//! # リポジトリ実装
//!
//! リポジトリトレイトと PostgreSQL 実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計
//!
//! ## ストアの区分
//!
//! | ストア | リポジトリ | 書き込み |
//! |--------|-----------|---------|
//! | コンテンツストア | Question / Answer / Comment / HelpfulMark / User | `TxContext` 必須 |
//! | 通知ストア | Notification | 単一 INSERT / UPDATE / DELETE（`TxContext` 不要） |

pub mod answer_repository;
pub mod comment_repository;
pub mod helpful_mark_repository;
pub mod notification_repository;
pub mod question_repository;
pub mod user_repository;

pub use answer_repository::{AnswerRepository, PostgresAnswerRepository};
pub use comment_repository::{CommentRepository, PostgresCommentRepository};
pub use helpful_mark_repository::{HelpfulMarkRepository, PostgresHelpfulMarkRepository};
pub use notification_repository::{NotificationRepository, PostgresNotificationRepository};
pub use question_repository::{PostgresQuestionRepository, QuestionRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
