//! # ドメイン層エラー定義
//!
//! 入力値の検証失敗や識別子の形式不正など、ドメイン固有の例外状態を表現する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `MalformedId` | 400 Bad Request | 識別子が ObjectId 形式でない |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//!
//! メッセージはそのままクライアントへ返るため英語で記述する。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// API 層でこのエラーを受け取り、HTTP レスポンスに変換する。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// - 必須フィールドが空白のみ
    /// - 文字数制限の超過
    #[error("{0}")]
    Validation(String),

    /// 識別子の形式不正
    ///
    /// 形式は正しいが存在しない ID（`NotFound`）とは区別する。
    #[error("malformatted id: {0}")]
    MalformedId(String),

    /// エンティティが見つからない
    #[error("{entity_type} not found: {id}")]
    NotFound {
        /// エンティティの種類（"Contact" など）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validationはメッセージをそのまま表示する() {
        let error = DomainError::Validation("name must not be blank".to_string());

        assert_eq!(error.to_string(), "name must not be blank");
    }

    #[test]
    fn test_not_foundはエンティティ種別とidを含む() {
        let error = DomainError::NotFound {
            entity_type: "Contact",
            id:          "5c41c90e84d891c15dfa3431".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Contact not found: 5c41c90e84d891c15dfa3431"
        );
    }
}
