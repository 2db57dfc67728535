//! # リポジトリ実装
//!
//! 連絡先の永続化を抽象化するトレイトと、その MongoDB 実装を提供する。
//!
//! - **依存性逆転**: ユースケース層はトレイトにのみ依存する
//! - **テスタビリティ**: `test-utils` feature のインメモリ実装で差し替え可能

pub mod contact_repository;

pub use contact_repository::{ContactRepository, MongoContactRepository};
