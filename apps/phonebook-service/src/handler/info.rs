//! # 情報ページハンドラ
//!
//! `GET /info` で登録件数と現在時刻を HTML 断片として返す。

use std::sync::Arc;

use axum::{extract::State, response::Html};
use chrono::{DateTime, Utc};

use super::ContactState;

/// 件数を取得できなかった場合に表示する値
const UNKNOWN_COUNT: &str = "x";

/// ブラウザの `Date.toString()` に合わせた時刻表記（UTC 固定）
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT+0000 (Coordinated Universal Time)";

/// GET /info
///
/// 件数の取得に失敗しても 200 で返し、件数は `x` と表示する。
pub async fn get_info(State(state): State<Arc<ContactState>>) -> Html<String> {
    let info = state.usecase.phonebook_info().await;

    let count = info
        .count
        .map_or_else(|| UNKNOWN_COUNT.to_string(), |count| count.to_string());

    Html(render_info(&count, info.generated_at))
}

fn render_info(count: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "<p>Phonebook has info for {count} people</p><p>{}</p>",
        generated_at.format(TIMESTAMP_FORMAT)
    )
}
