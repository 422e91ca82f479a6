//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するシードデータ作成ヘルパー。
//! ユーザーと質問は別サービスが書き込むテーブルのため、SQL で直接作成する。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use askflow_domain::{
    answer::{Answer, AnswerId, NewAnswer},
    question::QuestionId,
    user::UserId,
    value_objects::AnswerBody,
};
use askflow_infra::{
    db::{PgTransactionManager, TransactionManager},
    repository::{AnswerRepository, PostgresAnswerRepository},
};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// ユーザーを DB に作成
pub async fn insert_user(pool: &PgPool, name: &str) -> UserId {
    let id = UserId::new();
    sqlx::query("INSERT INTO users (id, name, created_at) VALUES ($1, $2, $3)")
        .bind(id.as_uuid())
        .bind(name)
        .bind(test_now())
        .execute(pool)
        .await
        .expect("ユーザー作成に失敗");
    id
}

/// 質問を DB に作成
pub async fn insert_question(pool: &PgPool, author_id: &UserId, title: &str) -> QuestionId {
    let id = QuestionId::new();
    sqlx::query("INSERT INTO questions (id, title, author_id, created_at) VALUES ($1, $2, $3, $4)")
        .bind(id.as_uuid())
        .bind(title)
        .bind(author_id.as_uuid())
        .bind(test_now())
        .execute(pool)
        .await
        .expect("質問作成に失敗");
    id
}

/// 未採択の回答を PostgresAnswerRepository 経由で作成してコミット
pub async fn insert_answer(pool: &PgPool, question_id: &QuestionId, author_id: &UserId) -> Answer {
    let answer = Answer::new(NewAnswer {
        id:          AnswerId::new(),
        question_id: question_id.clone(),
        author_id:   author_id.clone(),
        body:        AnswerBody::new("Use containers.").unwrap(),
        now:         test_now(),
    });

    let mut tx = PgTransactionManager::new(pool.clone())
        .begin()
        .await
        .expect("トランザクション開始に失敗");
    PostgresAnswerRepository::new(pool.clone())
        .insert(&mut tx, &answer)
        .await
        .expect("回答作成に失敗");
    tx.commit().await.expect("コミットに失敗");

    answer
}
