//! # テスト用インメモリリポジトリ
//!
//! ハンドラ・ユースケースのテストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! phonebook-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{
    Arc,
    Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use async_trait::async_trait;
use phonebook_domain::contact::{Contact, ContactDetails, ContactId};

use crate::{error::InfraError, repository::ContactRepository};

/// インメモリの ContactRepository
///
/// ID は挿入ごとに増える連番を 24 桁 16 進にしたもの。
/// [`set_unavailable`](Self::set_unavailable) でストア障害を再現できる。
#[derive(Clone, Default)]
pub struct InMemoryContactRepository {
    contacts:    Arc<Mutex<Vec<Contact>>>,
    sequence:    Arc<AtomicU64>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 連絡先を直接追加する（テストの前提データ用）
    pub fn add_contact(&self, details: ContactDetails) -> Contact {
        let contact = Contact::new(self.next_id(), details);
        self.contacts.lock().unwrap().push(contact.clone());
        contact
    }

    /// 以降の操作をすべて失敗させる
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn next_id(&self) -> ContactId {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        ContactId::parse(&format!("{seq:024x}")).unwrap()
    }

    fn check_available(&self) -> Result<(), InfraError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(InfraError::unexpected("ストアに接続できません"));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_all(&self) -> Result<Vec<Contact>, InfraError> {
        self.check_available()?;
        Ok(self.contacts.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, InfraError> {
        self.check_available()?;
        Ok(self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn insert(&self, details: &ContactDetails) -> Result<Contact, InfraError> {
        self.check_available()?;
        Ok(self.add_contact(details.clone()))
    }

    async fn replace(
        &self,
        id: &ContactId,
        details: &ContactDetails,
    ) -> Result<Option<Contact>, InfraError> {
        self.check_available()?;
        let mut contacts = self.contacts.lock().unwrap();
        let Some(slot) = contacts.iter_mut().find(|c| c.id() == id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_details(details.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &ContactId) -> Result<bool, InfraError> {
        self.check_available()?;
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| c.id() != id);
        Ok(contacts.len() < before)
    }

    async fn count(&self) -> Result<u64, InfraError> {
        self.check_available()?;
        Ok(self.contacts.lock().unwrap().len() as u64)
    }

    async fn ping(&self) -> Result<(), InfraError> {
        self.check_available()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn details(name: &str, number: &str) -> ContactDetails {
        ContactDetails::new(name, number).unwrap()
    }

    #[tokio::test]
    async fn test_挿入ごとに異なるidが採番される() {
        let repo = InMemoryContactRepository::new();

        let first = repo.insert(&details("Arto Hellas", "040-123456")).await.unwrap();
        let second = repo.insert(&details("Arto Hellas", "040-123456")).await.unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_replaceは存在しないidでnoneを返す() {
        let repo = InMemoryContactRepository::new();
        let missing = ContactId::parse("ffffffffffffffffffffffff").unwrap();

        let result = repo
            .replace(&missing, &details("Ada Lovelace", "39-44-5323523"))
            .await
            .unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_deleteは削除の有無を返す() {
        let repo = InMemoryContactRepository::new();
        let contact = repo.add_contact(details("Dan Abramov", "12-43-234345"));

        assert!(repo.delete(contact.id()).await.unwrap());
        assert!(!repo.delete(contact.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_unavailableの間はすべての操作が失敗する() {
        let repo = InMemoryContactRepository::new();
        repo.set_unavailable(true);

        assert!(repo.find_all().await.is_err());
        assert!(repo.count().await.is_err());
        assert!(repo.ping().await.is_err());

        repo.set_unavailable(false);
        assert!(repo.ping().await.is_ok());
    }
}
