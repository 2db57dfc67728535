//! # エラーレスポンス
//!
//! フロントエンドが期待する `{"error": "<message>"}` 形式のエラーボディ。
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務（shared に axum 依存を入れない）
//! - 固定文言のエラーは便利コンストラクタで提供し、文字列のハードコードを排除

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    /// 任意のメッセージで作成する
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// ルートが存在しない
    pub fn unknown_endpoint() -> Self {
        Self::new("unknown endpoint")
    }

    /// ID の形式が不正
    pub fn malformatted_id() -> Self {
        Self::new("malformatted id")
    }

    /// 必須フィールドの欠落（例: `"name missing"`）
    pub fn missing_field(field: &str) -> Self {
        Self::new(format!("{field} missing"))
    }

    /// 内部エラー
    ///
    /// 内部情報を漏らさないため文言は固定。
    pub fn internal_error() -> Self {
        Self::new("internal error")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_jsonはerrorフィールドのみを持つ() {
        let json = serde_json::to_value(ErrorResponse::unknown_endpoint()).unwrap();

        assert_eq!(json, serde_json::json!({ "error": "unknown endpoint" }));
    }

    #[test]
    fn test_便利コンストラクタの文言() {
        assert_eq!(ErrorResponse::malformatted_id().error, "malformatted id");
        assert_eq!(ErrorResponse::missing_field("name").error, "name missing");
        assert_eq!(ErrorResponse::missing_field("number").error, "number missing");
        assert_eq!(ErrorResponse::internal_error().error, "internal error");
    }

    #[test]
    fn test_jsonデシリアライズが正しく動作する() {
        let error: ErrorResponse = serde_json::from_str(r#"{"error":"name missing"}"#).unwrap();

        assert_eq!(error, ErrorResponse::missing_field("name"));
    }
}
