//! # Phonebook Service 設定
//!
//! 環境変数から Phonebook Service サーバーの設定を読み込む。

use std::{env, path::PathBuf};

use thiserror::Error;

/// ポート番号のデフォルト値
pub const DEFAULT_PORT: u16 = 3001;

/// 静的ファイルディレクトリのデフォルト値（フロントエンドのビルド成果物）
pub const DEFAULT_STATIC_DIR: &str = "build";

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Phonebook Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// バインドアドレス
    pub host:             String,
    /// ポート番号
    pub port:             u16,
    /// MongoDB 接続文字列
    pub mongodb_uri:      String,
    /// データベース名（未設定なら接続文字列のものを使う）
    pub mongodb_database: Option<String>,
    /// 静的ファイルを配信するディレクトリ
    pub static_dir:       PathBuf,
}

impl AppConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    ///
    /// 空文字列は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongodb_uri: get("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
            mongodb_database: get("MONGODB_DATABASE"),
            static_dir: get("STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
        })
    }
}
