//! # 連絡先（Contact）
//!
//! 電話帳の 1 エントリを表すエンティティと、その構成要素となる値オブジェクト。
//!
//! | 型 | 役割 |
//! |---|------|
//! | [`ContactId`] | ストアが採番する識別子（24 桁 16 進の ObjectId 形式） |
//! | [`ContactName`] | 名前（必須） |
//! | [`PhoneNumber`] | 電話番号（必須、PII） |
//! | [`ContactDetails`] | 作成・置換時に渡す名前と電話番号の組 |
//! | [`Contact`] | 永続化済みの連絡先 |
//!
//! 名前の重複は許容する（一意制約なし）。

use std::str::FromStr;

use derive_more::Display;

use crate::DomainError;

/// 連絡先 ID
///
/// MongoDB の ObjectId と同じ 24 桁の 16 進文字列。大文字小文字を区別せずに
/// パースし、内部では小文字に正規化して保持する。
///
/// 形式不正な文字列は [`DomainError::MalformedId`] になる。
/// 形式は正しいが存在しない ID との区別はリポジトリ側の責務。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct ContactId(String);

impl ContactId {
    /// 16 進表現の桁数
    pub const HEX_LENGTH: usize = 24;

    /// 文字列から ID をパースする
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if value.len() == Self::HEX_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit()) {
            Ok(Self(value.to_ascii_lowercase()))
        } else {
            Err(DomainError::MalformedId(value.to_string()))
        }
    }

    /// 16 進文字列の参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContactId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

define_validated_string! {
    /// 連絡先の名前
    pub struct ContactName {
        label: "name",
        max_length: 100,
    }
}

define_validated_string! {
    /// 電話番号
    ///
    /// 書式（ハイフンの有無、桁数）は検証しない。
    pub struct PhoneNumber {
        label: "number",
        max_length: 50,
        pii: true,
    }
}

/// 作成・更新時の入力となる名前と電話番号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    name:   ContactName,
    number: PhoneNumber,
}

impl ContactDetails {
    /// 生の文字列から検証済みの組を作る
    ///
    /// 名前を先に検証するため、両方が不正な場合は名前のエラーが返る。
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            name:   ContactName::new(name)?,
            number: PhoneNumber::new(number)?,
        })
    }

    pub fn name(&self) -> &ContactName {
        &self.name
    }

    pub fn number(&self) -> &PhoneNumber {
        &self.number
    }

    /// 名前と電話番号に分解する
    pub fn into_parts(self) -> (ContactName, PhoneNumber) {
        (self.name, self.number)
    }
}

/// 連絡先エンティティ
///
/// # 不変条件
///
/// - `id` は作成後に変わらない
/// - 更新は名前と電話番号を丸ごと置き換える
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id:     ContactId,
    name:   ContactName,
    number: PhoneNumber,
}

impl Contact {
    /// 採番済みの ID と入力値から連絡先を組み立てる
    pub fn new(id: ContactId, details: ContactDetails) -> Self {
        let (name, number) = details.into_parts();
        Self { id, name, number }
    }

    /// ストアから読み出した値で復元する
    pub fn from_db(id: ContactId, name: ContactName, number: PhoneNumber) -> Self {
        Self { id, name, number }
    }

    pub fn id(&self) -> &ContactId {
        &self.id
    }

    pub fn name(&self) -> &ContactName {
        &self.name
    }

    pub fn number(&self) -> &PhoneNumber {
        &self.number
    }

    /// ID を保ったまま名前と電話番号を置き換えた連絡先を返す
    pub fn with_details(self, details: ContactDetails) -> Self {
        Self::new(self.id, details)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("5c41c90e84d891c15dfa3431")]
    #[case("000000000000000000000000")]
    #[case("ffffffffffffffffffffffff")]
    fn test_24桁の16進文字列はidとしてパースできる(#[case] input: &str) {
        let id = ContactId::parse(input).unwrap();

        assert_eq!(id.as_str(), input);
    }

    #[test]
    fn test_大文字の16進は小文字に正規化される() {
        let id = ContactId::parse("5C41C90E84D891C15DFA3431").unwrap();

        assert_eq!(id.as_str(), "5c41c90e84d891c15dfa3431");
    }

    #[rstest]
    #[case::短すぎる("123")]
    #[case::空文字("")]
    #[case::長すぎる("5c41c90e84d891c15dfa34310")]
    #[case::非16進文字を含む("5c41c90e84d891c15dfa343g")]
    #[case::マルチバイト("５c41c90e84d891c15dfa343")]
    fn test_形式不正なidはmalformed_idになる(#[case] input: &str) {
        let result = ContactId::parse(input);

        assert_eq!(result, Err(DomainError::MalformedId(input.to_string())));
    }

    #[test]
    fn test_from_strはparseと同じ結果を返す() {
        let id: ContactId = "5c41c90e84d891c15dfa3431".parse().unwrap();

        assert_eq!(id.to_string(), "5c41c90e84d891c15dfa3431");
    }

    #[test]
    fn test_名前は前後の空白が除去される() {
        let name = ContactName::new("  Ada Lovelace ").unwrap();

        assert_eq!(name.as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_空白のみの名前はバリデーションエラー() {
        let result = ContactName::new("   ");

        assert_eq!(
            result,
            Err(DomainError::Validation("name must not be blank".to_string()))
        );
    }

    #[test]
    fn test_最大長を超える電話番号はバリデーションエラー() {
        let result = PhoneNumber::new("1".repeat(PhoneNumber::MAX_LENGTH + 1));

        assert_eq!(
            result,
            Err(DomainError::Validation(
                "number must be at most 50 characters".to_string()
            ))
        );
    }

    #[test]
    fn test_from_dbは最大長を超える値も復元できる() {
        let long_name = "a".repeat(ContactName::MAX_LENGTH + 1);

        let name = ContactName::from_db(long_name.clone()).unwrap();

        assert_eq!(name.as_str(), long_name);
    }

    #[test]
    fn test_from_dbでも空白のみは拒否される() {
        let result = PhoneNumber::from_db("  ");

        assert_eq!(
            result.map(|n| n.into_string()),
            Err(DomainError::Validation("number must not be blank".to_string()))
        );
    }

    #[test]
    fn test_電話番号のdebug出力はマスクされる() {
        let number = PhoneNumber::new("040-123456").unwrap();

        let debug = format!("{:?}", number);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("040-123456"));
    }

    #[test]
    fn test_両方不正な場合は名前のエラーが優先される() {
        let result = ContactDetails::new("", "");

        assert_eq!(
            result,
            Err(DomainError::Validation("name must not be blank".to_string()))
        );
    }

    #[test]
    fn test_with_detailsはidを保ったまま値を置き換える() {
        let id = ContactId::parse("5c41c90e84d891c15dfa3431").unwrap();
        let contact = Contact::new(
            id.clone(),
            ContactDetails::new("Arto Hellas", "040-123456").unwrap(),
        );

        let updated = contact.with_details(ContactDetails::new("Arto Hellas", "050-999").unwrap());

        assert_eq!(updated.id(), &id);
        assert_eq!(updated.name().as_str(), "Arto Hellas");
        assert_eq!(updated.number().as_str(), "050-999");
    }
}
