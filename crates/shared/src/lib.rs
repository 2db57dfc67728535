//! # Phonebook 共有ユーティリティ
//!
//! サービス本体から使われる、ビジネスロジックを含まない共通部品。
//!
//! - [`error_response`] - `{"error": "..."}` 形式のエラーボディ
//! - [`health`] - ヘルスチェックのレスポンス型
//! - [`observability`] - トレーシング初期化と Request ID（`observability` feature）
//! - [`canonical_log`] - リクエストごとの 1 行サマリログ（`observability` feature）

#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod health;
pub mod observability;

pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
