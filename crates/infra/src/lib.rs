//! # AskFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 設計方針
//!
//! このクレートはリポジトリトレイトとその PostgreSQL 実装を提供する。
//! ユースケース層はトレイト（`Arc<dyn ...>`）にのみ依存し、
//! テストではインメモリモックに差し替える。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理、マイグレーション、トランザクション
//! - **リポジトリ実装**: コンテンツストア（質問・回答・コメント・評価）と通知ストア
//!
//! ## 依存関係
//!
//! ```text
//! core-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリモック（`test-utils` feature）
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use askflow_infra::{db, repository::PostgresNotificationRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/askflow").await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let notifications = PostgresNotificationRepository::new(pool.clone());
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
