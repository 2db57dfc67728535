//! # Phonebook ドメイン層
//!
//! 電話帳の連絡先（Contact）を表現するドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: ストアが採番した識別子を持つ [`contact::Contact`]
//! - **値オブジェクト**: 生成時に検証される [`contact::ContactName`],
//!   [`contact::PhoneNumber`], [`contact::ContactId`]
//! - **ドメインエラー**: 入力不正・ID 形式不正・未存在を [`DomainError`] で表現
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//!      ↘             ↑
//!        ────────────
//! ```
//!
//! ドメイン層はインフラ層（MongoDB、HTTP）に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use phonebook_domain::contact::{ContactDetails, ContactId};
//!
//! let details = ContactDetails::new("Arto Hellas", "040-123456").unwrap();
//! assert_eq!(details.name().as_str(), "Arto Hellas");
//!
//! assert!(ContactId::parse("5c41c90e84d891c15dfa3431").is_ok());
//! assert!(ContactId::parse("123").is_err());
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod contact;
pub mod error;

pub use error::DomainError;
