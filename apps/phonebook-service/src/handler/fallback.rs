//! # フォールバックハンドラ
//!
//! どのルートにも静的ファイルにも一致しないリクエストを処理する。

use crate::error::ApiError;

/// 未定義のエンドポイント
///
/// 定義済みパスに未定義のメソッドで来た場合もここに来る。
pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}
