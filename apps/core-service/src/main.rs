//! # Core Service サーバー
//!
//! Q&A コンテンツの書き込みと、それに伴うアプリ内通知を担う内部サービス。
//!
//! ## 役割
//!
//! - **コンテンツ操作**: 回答・コメントの投稿、回答の採択、「役に立った」評価
//! - **通知**: 上記操作の成功後に、作成者へ通知を 1 件作成する（ベストエフォート）
//! - **受信箱**: 通知の一覧・未読数・既読化・削除、通知設定
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CORE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CORE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,askflow=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! CORE_PORT=13001 DATABASE_URL=postgres://... cargo run -p askflow-core-service
//! ```

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context as _;
use askflow_core_service::{
    config::CoreConfig,
    handler::{ContentState, InboxState, PreferencesState},
    router::build_router,
    usecase::{
        ContentRepositories,
        ContentUseCaseImpl,
        InboxUseCaseImpl,
        MessageRenderer,
        NotificationService,
        PreferencesUseCaseImpl,
    },
};
use askflow_domain::clock::{Clock, SystemClock};
use askflow_infra::{
    db::{self, PgTransactionManager, TransactionManager},
    repository::{
        AnswerRepository,
        NotificationRepository,
        PostgresAnswerRepository,
        PostgresCommentRepository,
        PostgresHelpfulMarkRepository,
        PostgresNotificationRepository,
        PostgresQuestionRepository,
        PostgresUserRepository,
        QuestionRepository,
        UserRepository,
    },
};
use askflow_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Core Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在しない場合は無視）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("core-service"));

    let config = CoreConfig::from_env()?;

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベースへの接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;
    tracing::info!("データベースに接続しました");

    // 共有コンポーネント
    let question_repo: Arc<dyn QuestionRepository> =
        Arc::new(PostgresQuestionRepository::new(pool.clone()));
    let answer_repo: Arc<dyn AnswerRepository> =
        Arc::new(PostgresAnswerRepository::new(pool.clone()));
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let notification_repo: Arc<dyn NotificationRepository> =
        Arc::new(PostgresNotificationRepository::new(pool.clone()));
    let tx_manager: Arc<dyn TransactionManager> = Arc::new(PgTransactionManager::new(pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // 通知サービス
    let notification_service = Arc::new(NotificationService::new(
        question_repo.clone(),
        answer_repo.clone(),
        user_repo.clone(),
        notification_repo.clone(),
        MessageRenderer::new()?,
        clock.clone(),
    ));

    // コンテンツ関連
    let content_usecase = ContentUseCaseImpl::new(
        ContentRepositories {
            question:     question_repo,
            answer:       answer_repo,
            comment:      Arc::new(PostgresCommentRepository::new()),
            helpful_mark: Arc::new(PostgresHelpfulMarkRepository::new(pool.clone())),
            user:         user_repo.clone(),
        },
        tx_manager.clone(),
        clock,
        notification_service,
    );
    let content_state = Arc::new(ContentState {
        usecase: content_usecase,
    });

    // 通知受信箱・通知設定
    let inbox_state = Arc::new(InboxState {
        usecase: InboxUseCaseImpl::new(notification_repo),
    });
    let preferences_state = Arc::new(PreferencesState {
        usecase: PreferencesUseCaseImpl::new(user_repo, tx_manager),
    });

    let app = build_router(content_state, inbox_state, preferences_state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("アドレスのパースに失敗しました")?;

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Core Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
