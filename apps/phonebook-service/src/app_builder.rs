//! # ルーター構築
//!
//! 依存コンポーネントを受け取り、ルートとミドルウェアを組み立てる。
//! `main.rs` と統合テストの両方から使用する。

use std::{path::Path, sync::Arc};

use axum::{Router, handler::HandlerWithoutStateExt, routing::get};
use phonebook_domain::clock::Clock;
use phonebook_infra::repository::ContactRepository;
use phonebook_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::CorsLayer,
    normalize_path::NormalizePath,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handler::{
        ContactState,
        ReadinessState,
        create_contact,
        delete_contact,
        get_contact,
        get_info,
        health_check,
        list_contacts,
        readiness_check,
        unknown_endpoint,
        update_contact,
    },
    usecase::ContactUseCaseImpl,
};

/// 末尾スラッシュを取り除いてからルーティングするアプリケーション
///
/// パスの書き換えはルーティングより前に行う必要があるため、
/// `Router::layer` ではなく `Router` の外側を包む。
pub type App = NormalizePath<Router>;

/// アプリケーションのルーターを構築する
///
/// API にもヘルスチェックにも一致しないリクエストは `static_dir` の
/// 静的ファイルとして解決し、見つからなければ `unknown endpoint` を返す。
/// `/api/persons/` のような末尾スラッシュ付きのパスは `/api/persons` として扱う。
pub fn build_app(
    contact_repository: Arc<dyn ContactRepository>,
    clock: Arc<dyn Clock>,
    static_dir: &Path,
) -> App {
    let contact_state = Arc::new(ContactState {
        usecase: ContactUseCaseImpl::new(contact_repository.clone(), clock),
    });
    let readiness_state = Arc::new(ReadinessState { contact_repository });

    let static_files = ServeDir::new(static_dir)
        .call_fallback_on_method_not_allowed(true)
        .fallback(unknown_endpoint.into_service());

    let router = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .route("/api/persons", get(list_contacts).post(create_contact))
        .route(
            "/api/persons/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .route("/info", get(get_info))
        .with_state(contact_state)
        // 定義済みパスに未定義のメソッドで来た場合も 405 ではなく 404 にする
        .method_not_allowed_fallback(unknown_endpoint)
        .fallback_service(static_files)
        .layer(CorsLayer::permissive())
        // Request ID レイヤー（下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: UUID v7 を生成（またはクライアント提供値を使用）
        // 2. TraceLayer: スパンに request_id を含め、全ログに付与
        // 3. CanonicalLogLineLayer: リクエスト完了時に 1 行サマリログを出力（スパン内）
        // 4. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

    NormalizePath::trim_trailing_slash(router)
}
