//! # ヘルスチェックハンドラ
//!
//! Phonebook Service の稼働状態を確認するためのエンドポイント。
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（MongoDB への到達性を確認）
//!
//! レスポンス型は [`phonebook_shared::HealthResponse`] / [`phonebook_shared::ReadinessResponse`] を参照。

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use phonebook_infra::repository::ContactRepository;
use phonebook_shared::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};

/// ストア確認のタイムアウト
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy(env!("CARGO_PKG_VERSION")))
}

/// Readiness Check 用の State
pub struct ReadinessState {
    pub contact_repository: Arc<dyn ContactRepository>,
}

/// Readiness Check エンドポイント
///
/// 全チェック OK → 200、1 つでも失敗 → 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let database = check_database(state.contact_repository.as_ref()).await;

    let response = ReadinessResponse::from_checks(HashMap::from([(
        "database".to_string(),
        database,
    )]));
    let http_status = match response.status {
        ReadinessStatus::Ready => StatusCode::OK,
        ReadinessStatus::NotReady => StatusCode::SERVICE_UNAVAILABLE,
    };

    (http_status, Json(response))
}

/// MongoDB への到達性を ping で確認する
async fn check_database(repository: &dyn ContactRepository) -> CheckStatus {
    match tokio::time::timeout(CHECK_TIMEOUT, repository.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: database ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: database check timed out");
            CheckStatus::Error
        }
    }
}
