//! # ユースケース層
//!
//! Phonebook Service のビジネスロジックを実装する。
//!
//! - **依存性注入**: リポジトリと時計を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは入出力の変換のみ行い、ロジックはここに集約

pub mod contact;

pub use contact::{ContactInput, ContactUseCaseImpl, PhonebookInfo};
