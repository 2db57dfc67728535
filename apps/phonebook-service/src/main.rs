//! # Phonebook Service サーバー
//!
//! 電話帳（連絡先一覧）の REST API と、フロントエンドのビルド成果物を配信する。
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │   Browser    │────▶│ Phonebook Service│────▶│   MongoDB    │
//! │              │     │   port: 3001     │     │  (people)    │
//! └──────────────┘     └──────────────────┘     └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `3001`） |
//! | `MONGODB_URI` | **Yes** | MongoDB 接続文字列 |
//! | `MONGODB_DATABASE` | No | データベース名（デフォルト: 接続文字列のもの、なければ `phonebook`） |
//! | `STATIC_DIR` | No | 静的ファイルのディレクトリ（デフォルト: `build`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p phonebook-service
//!
//! # 本番環境
//! MONGODB_URI=mongodb+srv://... LOG_FORMAT=json cargo run -p phonebook-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use axum::{ServiceExt, extract::Request};
use phonebook_domain::clock::SystemClock;
use phonebook_infra::{
    db,
    repository::{ContactRepository, MongoContactRepository},
};
use phonebook_service::{app_builder::build_app, config::AppConfig};
use phonebook_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Phonebook Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(&TracingConfig::from_env("phonebook-service"));

    let config = AppConfig::from_env()?;

    tracing::info!(
        "Phonebook Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let client = db::create_client(&config.mongodb_uri).await?;
    let database = db::resolve_database(&client, config.mongodb_database.as_deref());

    // 接続できなくても起動は続け、各リクエストでエラーとして扱う
    match db::ping(&database).await {
        Ok(()) => tracing::info!(database = %database.name(), "MongoDB に接続しました"),
        Err(e) => tracing::error!(
            database = %database.name(),
            error = %e,
            "MongoDB への接続に失敗しました"
        ),
    }

    let contact_repository: Arc<dyn ContactRepository> =
        Arc::new(MongoContactRepository::new(&database));
    let app = build_app(contact_repository, Arc::new(SystemClock), &config.static_dir);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Phonebook Service サーバーが起動しました: {}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Phonebook Service サーバーを停止しました");
    Ok(())
}

/// Ctrl+C または SIGTERM を待つ
///
/// シグナルハンドラの登録に失敗した側は待ち続ける（もう一方で停止できる）。
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl+C を受信しました。停止します"),
        () = terminate => tracing::info!("SIGTERM を受信しました。停止します"),
    }
}
