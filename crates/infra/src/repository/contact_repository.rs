//! # ContactRepository
//!
//! 連絡先の永続化を担当するリポジトリ。
//!
//! ## 格納形式
//!
//! コレクション `people` に以下の形で格納する:
//!
//! ```json
//! { "_id": ObjectId("5c41c90e84d891c15dfa3431"), "name": "Arto Hellas", "number": "040-123456" }
//! ```
//!
//! 既存データに含まれる `__v` などの追加フィールドは読み出し時に無視する。

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection,
    Database,
    bson::{self, Document, doc, oid::ObjectId},
    options::ReturnDocument,
};
use phonebook_domain::contact::{Contact, ContactDetails, ContactId, ContactName, PhoneNumber};
use serde::{Deserialize, Serialize};

use crate::{db, error::InfraError};

/// 連絡先を格納するコレクション名
pub const COLLECTION_NAME: &str = "people";

/// 連絡先リポジトリトレイト
///
/// 単一ドキュメント操作のみを定義する。複数ドキュメントにまたがる
/// 整合性（トランザクション）は扱わない。
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// 読み出し可能なすべての連絡先を作成順で取得する
    ///
    /// 連絡先として復元できないドキュメントは含めない。
    async fn find_all(&self) -> Result<Vec<Contact>, InfraError>;

    /// ID で連絡先を検索する
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, InfraError>;

    /// 連絡先を挿入し、採番された ID 付きで返す
    async fn insert(&self, details: &ContactDetails) -> Result<Contact, InfraError>;

    /// 名前と電話番号を置き換え、更新後の連絡先を返す
    ///
    /// 該当 ID が存在しない場合は `None`。
    async fn replace(
        &self,
        id: &ContactId,
        details: &ContactDetails,
    ) -> Result<Option<Contact>, InfraError>;

    /// 連絡先を削除する
    ///
    /// 削除したかどうかを返す。存在しない ID はエラーにしない。
    async fn delete(&self, id: &ContactId) -> Result<bool, InfraError>;

    /// 連絡先の件数を取得する
    ///
    /// [`find_all`](Self::find_all) が返す件数と一致する。
    async fn count(&self) -> Result<u64, InfraError>;

    /// ストアへの到達性を確認する
    async fn ping(&self) -> Result<(), InfraError>;
}

/// `people` コレクションのドキュメント
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ContactDocument {
    #[serde(rename = "_id")]
    id:     ObjectId,
    name:   String,
    number: String,
}

impl ContactDocument {
    fn new(id: ObjectId, details: &ContactDetails) -> Self {
        Self {
            id,
            name: details.name().as_str().to_string(),
            number: details.number().as_str().to_string(),
        }
    }

    /// 生のドキュメントから連絡先を復元する
    ///
    /// フィールドの欠落や型違いも `CorruptDocument` として返す。
    fn decode(raw: Document) -> Result<Contact, InfraError> {
        let id = raw
            .get_object_id("_id")
            .map_or_else(|_| "-".to_string(), |oid| oid.to_hex());
        let document: Self = bson::from_document(raw)
            .map_err(|e| InfraError::corrupt_document(&id, e.to_string()))?;

        document.into_contact()
    }

    /// ドメインの連絡先に復元する
    ///
    /// 書き込み時の最大長は確認しない。空白のみの値は `CorruptDocument`。
    fn into_contact(self) -> Result<Contact, InfraError> {
        let hex = self.id.to_hex();
        let corrupt =
            |e: phonebook_domain::DomainError| InfraError::corrupt_document(&hex, e.to_string());

        let id = ContactId::parse(&hex).map_err(corrupt)?;
        let name = ContactName::from_db(self.name).map_err(corrupt)?;
        let number = PhoneNumber::from_db(self.number).map_err(corrupt)?;

        Ok(Contact::from_db(id, name, number))
    }
}

/// 連絡先として読み出せるドキュメントの条件
///
/// 一覧と件数の両方に同じ条件を使い、両者の件数を一致させる。
fn readable_filter() -> Document {
    doc! {
        "_id": { "$type": "objectId" },
        "name": { "$type": "string", "$regex": "\\S" },
        "number": { "$type": "string", "$regex": "\\S" },
    }
}

/// 復元できたドキュメントだけを連絡先として集める
///
/// 復元できないものは警告ログを出して読み飛ばす。
fn collect_readable(documents: Vec<Document>) -> Vec<Contact> {
    documents
        .into_iter()
        .filter_map(|raw| match ContactDocument::decode(raw) {
            Ok(contact) => Some(contact),
            Err(e) => {
                tracing::warn!(error = %e, "復元できないドキュメントを読み飛ばしました");
                None
            }
        })
        .collect()
}

/// ContactId を ObjectId に変換する
///
/// `ContactId` は 24 桁 16 進で検証済みのため、通常は失敗しない。
fn to_object_id(id: &ContactId) -> Result<ObjectId, InfraError> {
    ObjectId::parse_str(id.as_str())
        .map_err(|e| InfraError::unexpected(format!("ObjectId への変換に失敗しました: {e}")))
}

/// MongoDB 実装の ContactRepository
#[derive(Debug, Clone)]
pub struct MongoContactRepository {
    database:   Database,
    collection: Collection<Document>,
}

impl MongoContactRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(database: &Database) -> Self {
        Self {
            database:   database.clone(),
            collection: database.collection(COLLECTION_NAME),
        }
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    #[tracing::instrument(skip_all, level = "debug")]
    async fn find_all(&self) -> Result<Vec<Contact>, InfraError> {
        let documents: Vec<Document> = self
            .collection
            .find(readable_filter())
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(collect_readable(documents))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, InfraError> {
        let oid = to_object_id(id)?;
        let document = self.collection.find_one(doc! { "_id": oid }).await?;

        document.map(ContactDocument::decode).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn insert(&self, details: &ContactDetails) -> Result<Contact, InfraError> {
        let document = ContactDocument::new(ObjectId::new(), details);
        let raw = bson::to_document(&document).map_err(|e| {
            InfraError::unexpected(format!("ドキュメントへの変換に失敗しました: {e}"))
        })?;
        self.collection.insert_one(raw).await?;

        tracing::debug!(id = %document.id, "連絡先を挿入しました");
        document.into_contact()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn replace(
        &self,
        id: &ContactId,
        details: &ContactDetails,
    ) -> Result<Option<Contact>, InfraError> {
        let oid = to_object_id(id)?;
        let document = self
            .collection
            .find_one_and_update(
                doc! { "_id": oid },
                doc! {
                    "$set": {
                        "name": details.name().as_str(),
                        "number": details.number().as_str(),
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await?;

        document.map(ContactDocument::decode).transpose()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete(&self, id: &ContactId) -> Result<bool, InfraError> {
        let oid = to_object_id(id)?;
        let result = self.collection.delete_one(doc! { "_id": oid }).await?;

        Ok(result.deleted_count > 0)
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn count(&self) -> Result<u64, InfraError> {
        Ok(self.collection.count_documents(readable_filter()).await?)
    }

    async fn ping(&self) -> Result<(), InfraError> {
        db::ping(&self.database).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn object_id() -> ObjectId {
        ObjectId::parse_str("5c41c90e84d891c15dfa3431").unwrap()
    }

    #[test]
    fn test_ドキュメントから連絡先を復元できる() {
        let document = ContactDocument {
            id:     object_id(),
            name:   "Arto Hellas".to_string(),
            number: "040-123456".to_string(),
        };

        let contact = document.into_contact().unwrap();

        assert_eq!(contact.id().as_str(), "5c41c90e84d891c15dfa3431");
        assert_eq!(contact.name().as_str(), "Arto Hellas");
        assert_eq!(contact.number().as_str(), "040-123456");
    }

    #[test]
    fn test_空の名前を持つドキュメントはcorrupt_documentになる() {
        let document = ContactDocument {
            id:     object_id(),
            name:   "".to_string(),
            number: "040-123456".to_string(),
        };

        let err = document.into_contact().unwrap_err();

        assert!(matches!(
            err.kind(),
            crate::InfraErrorKind::CorruptDocument { id, .. } if id == "5c41c90e84d891c15dfa3431"
        ));
    }

    #[test]
    fn test_最大長を超える名前のドキュメントも復元できる() {
        let long_name = "a".repeat(ContactName::MAX_LENGTH + 1);
        let raw = doc! { "_id": object_id(), "name": long_name.clone(), "number": "040-123456" };

        let contact = ContactDocument::decode(raw).unwrap();

        assert_eq!(contact.name().as_str(), long_name);
    }

    #[test]
    fn test_numberが欠落したドキュメントはcorrupt_documentになる() {
        let raw = doc! { "_id": object_id(), "name": "Arto Hellas" };

        let err = ContactDocument::decode(raw).unwrap_err();

        assert!(matches!(
            err.kind(),
            crate::InfraErrorKind::CorruptDocument { id, .. } if id == "5c41c90e84d891c15dfa3431"
        ));
    }

    #[test]
    fn test_一覧では復元できないドキュメントを読み飛ばす() {
        let long_name = "a".repeat(101);
        let documents = vec![
            doc! { "_id": object_id(), "name": "Arto Hellas", "number": "040-123456" },
            doc! { "_id": ObjectId::new(), "name": long_name.clone(), "number": "12-43-234345" },
            doc! { "_id": ObjectId::new(), "name": "Ada Lovelace" },
            doc! { "_id": ObjectId::new(), "name": "   ", "number": "39-44-5323523" },
            doc! { "_id": ObjectId::new(), "name": 123, "number": "39-23-6423122" },
        ];

        let contacts = collect_readable(documents);

        let names: Vec<&str> = contacts.iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, vec!["Arto Hellas", long_name.as_str()]);
    }

    #[test]
    fn test_入力値からドキュメントを作成する() {
        let details = ContactDetails::new("Ada Lovelace", "39-44-5323523").unwrap();

        let document = ContactDocument::new(object_id(), &details);

        assert_eq!(document.name, "Ada Lovelace");
        assert_eq!(document.number, "39-44-5323523");
    }

    #[test]
    fn test_追加フィールドを含むドキュメントもデシリアライズできる() {
        let raw = doc! {
            "_id": object_id(),
            "name": "Dan Abramov",
            "number": "12-43-234345",
            "__v": 0,
        };

        let document: ContactDocument = mongodb::bson::from_document(raw).unwrap();

        assert_eq!(document.id, object_id());
        assert_eq!(document.name, "Dan Abramov");
    }

    #[test]
    fn test_contact_idとobject_idは相互変換できる() {
        let id = ContactId::parse("5c41c90e84d891c15dfa3431").unwrap();

        let oid = to_object_id(&id).unwrap();

        assert_eq!(oid.to_hex(), id.as_str());
    }
}
