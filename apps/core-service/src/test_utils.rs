//! # テストユーティリティ
//!
//! ユースケース・ハンドラ・結合テストで共有するセットアップ。

mod qa_test_builder;

pub use qa_test_builder::QaTestBuilder;
