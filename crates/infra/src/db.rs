//! # MongoDB 接続管理
//!
//! MongoDB クライアントの作成とデータベースの解決を行う。
//!
//! ## 設計方針
//!
//! - **クライアントは 1 つ**: `mongodb::Client` は内部に接続プールを持つため、
//!   起動時に一度だけ作成し、リポジトリ間で共有する
//! - **データベース名**: 明示指定 → 接続文字列のデフォルト → [`DEFAULT_DATABASE`] の順に解決
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use phonebook_infra::db;
//!
//! let client = db::create_client("mongodb://localhost:27017/phonebook").await?;
//! let database = db::resolve_database(&client, None);
//! db::ping(&database).await?;
//! ```

use std::time::Duration;

use mongodb::{
    Client,
    Database,
    bson::doc,
    options::ClientOptions,
};

use crate::error::InfraError;

/// 接続文字列にもデータベース名がない場合に使うデータベース名
pub const DEFAULT_DATABASE: &str = "phonebook";

/// クライアントを識別するアプリケーション名（サーバーログに出る）
const APP_NAME: &str = "phonebook-service";

/// MongoDB クライアントを作成する
///
/// 接続文字列をパースしてクライアントを作る。実際の接続は最初の操作時に
/// 張られるため、到達性の確認には [`ping`] を使う。
///
/// # 設定値
///
/// - `server_selection_timeout(5秒)`: サーバー選択のタイムアウト。
///   既定の 30 秒ではリクエストが長時間ぶら下がるため短くする
pub async fn create_client(uri: &str) -> Result<Client, InfraError> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.server_selection_timeout = Some(Duration::from_secs(5));

    Ok(Client::with_options(options)?)
}

/// 使用するデータベースを解決する
pub fn resolve_database(client: &Client, name: Option<&str>) -> Database {
    match name {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    }
}

/// `ping` コマンドで到達性を確認する
#[tracing::instrument(skip_all, level = "debug", fields(database = %database.name()))]
pub async fn ping(database: &Database) -> Result<(), InfraError> {
    database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}
