//! # Phonebook インフラ層
//!
//! 連絡先の永続化を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: MongoDB クライアントの生成とデータベース解決
//! - **リポジトリ実装**: [`repository::ContactRepository`] の MongoDB 実装
//! - **テスト用実装**: `test-utils` feature で公開するインメモリリポジトリ
//!
//! ## 依存関係
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use phonebook_infra::{db, repository::MongoContactRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = db::create_client("mongodb://localhost:27017/phonebook").await?;
//!     let database = db::resolve_database(&client, None);
//!     let repository = MongoContactRepository::new(&database);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
