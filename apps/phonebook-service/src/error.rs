//! # Phonebook Service エラー定義
//!
//! ハンドラから返すエラーと、HTTP レスポンスへの変換を定義する。
//!
//! 各バリアントはちょうど 1 つのステータスとボディに対応する:
//!
//! | バリアント | ステータス | ボディ |
//! |---|---|---|
//! | `UnknownEndpoint` | 404 | `{"error":"unknown endpoint"}` |
//! | `NotFound` | 404 | 空 |
//! | `MalformedId` | 400 | `{"error":"malformatted id"}` |
//! | `MissingField` | 400 | `{"error":"<field> missing"}` |
//! | `Validation` / `InvalidBody` | 400 | `{"error":"<message>"}` |
//! | `Database` | 500 | `{"error":"internal error"}` |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use phonebook_domain::DomainError;
use phonebook_infra::InfraError;
use phonebook_shared::ErrorResponse;
use thiserror::Error;

/// Phonebook Service で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// ルートが存在しない
    #[error("未定義のエンドポイントです")]
    UnknownEndpoint,

    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// ID の形式が不正
    #[error("ID の形式が不正です: {0}")]
    MalformedId(String),

    /// 必須フィールドの欠落
    #[error("必須フィールドがありません: {0}")]
    MissingField(&'static str),

    /// 入力値の検証エラー
    #[error("検証エラー: {0}")]
    Validation(String),

    /// リクエストボディが JSON として解釈できない
    #[error("不正なリクエストボディ: {0}")]
    InvalidBody(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::MalformedId(id) => Self::MalformedId(id),
            DomainError::NotFound { entity_type, id } => {
                Self::NotFound(format!("{entity_type}: {id}"))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::UnknownEndpoint => {
                (StatusCode::NOT_FOUND, Some(ErrorResponse::unknown_endpoint()))
            }
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, None),
            ApiError::MalformedId(_) => {
                (StatusCode::BAD_REQUEST, Some(ErrorResponse::malformatted_id()))
            }
            ApiError::MissingField(field) => {
                (StatusCode::BAD_REQUEST, Some(ErrorResponse::missing_field(field)))
            }
            ApiError::Validation(msg) | ApiError::InvalidBody(msg) => {
                (StatusCode::BAD_REQUEST, Some(ErrorResponse::new(msg.clone())))
            }
            ApiError::Database(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "データベースエラー"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Some(ErrorResponse::internal_error()),
                )
            }
        };

        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "リクエストエラー");
        }

        match body {
            Some(body) => (status, Json(body)).into_response(),
            None => status.into_response(),
        }
    }
}
