//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲

pub mod contact;
pub mod fallback;
pub mod health;
pub mod info;

pub use contact::{
    ContactDto,
    ContactRequest,
    ContactState,
    create_contact,
    delete_contact,
    get_contact,
    list_contacts,
    update_contact,
};
pub use fallback::unknown_endpoint;
pub use health::{ReadinessState, health_check, readiness_check};
pub use info::get_info;
