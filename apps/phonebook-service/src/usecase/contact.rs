//! 連絡先管理ユースケース

use std::sync::Arc;

use chrono::{DateTime, Utc};
use phonebook_domain::{
    DomainError,
    clock::Clock,
    contact::{Contact, ContactDetails, ContactId},
};
use phonebook_infra::repository::ContactRepository;

use crate::error::ApiError;

/// 連絡先の作成・更新の入力
///
/// JSON で `null` または欠落したフィールドは `None` になる。
#[derive(Debug, Clone, Default)]
pub struct ContactInput {
    pub name:   Option<String>,
    pub number: Option<String>,
}

impl ContactInput {
    /// 必須チェックと値の検証を行う
    ///
    /// `name` → `number` の順に欠落を確認し、最初に見つかったものを返す。
    fn into_details(self) -> Result<ContactDetails, ApiError> {
        let name = self.name.ok_or(ApiError::MissingField("name"))?;
        let number = self.number.ok_or(ApiError::MissingField("number"))?;

        Ok(ContactDetails::new(name, number)?)
    }
}

/// `/info` ページに表示する集計
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhonebookInfo {
    /// 登録件数（取得に失敗した場合は `None`）
    pub count:        Option<u64>,
    /// 集計時刻
    pub generated_at: DateTime<Utc>,
}

/// 連絡先管理ユースケース
pub struct ContactUseCaseImpl {
    contact_repository: Arc<dyn ContactRepository>,
    clock:              Arc<dyn Clock>,
}

impl ContactUseCaseImpl {
    pub fn new(contact_repository: Arc<dyn ContactRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            contact_repository,
            clock,
        }
    }

    /// すべての連絡先を取得する
    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        Ok(self.contact_repository.find_all().await?)
    }

    /// ID で連絡先を取得する
    pub async fn get_contact(&self, id: &ContactId) -> Result<Contact, ApiError> {
        self.contact_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// 連絡先を作成する
    ///
    /// 名前の重複は確認しない。
    pub async fn create_contact(&self, input: ContactInput) -> Result<Contact, ApiError> {
        let details = input.into_details()?;

        let contact = self.contact_repository.insert(&details).await?;
        tracing::info!(contact_id = %contact.id(), "連絡先を作成しました");

        Ok(contact)
    }

    /// 連絡先の名前と電話番号を置き換える
    ///
    /// 入力の検証は作成時と同じ。存在しない ID は `NotFound`。
    pub async fn update_contact(
        &self,
        id: &ContactId,
        input: ContactInput,
    ) -> Result<Contact, ApiError> {
        let details = input.into_details()?;

        let contact = self
            .contact_repository
            .replace(id, &details)
            .await?
            .ok_or_else(|| not_found(id))?;
        tracing::info!(contact_id = %id, "連絡先を更新しました");

        Ok(contact)
    }

    /// 連絡先を削除する
    ///
    /// 存在しない ID でもエラーにしない。
    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), ApiError> {
        let deleted = self.contact_repository.delete(id).await?;
        tracing::info!(contact_id = %id, deleted, "連絡先の削除を処理しました");

        Ok(())
    }

    /// 件数と現在時刻を集計する
    ///
    /// 件数の取得に失敗してもエラーにはせず、ログに残して `count` を `None` にする。
    pub async fn phonebook_info(&self) -> PhonebookInfo {
        let count = match self.contact_repository.count().await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::error!(error = %e, "連絡先の件数取得に失敗しました");
                None
            }
        };

        PhonebookInfo {
            count,
            generated_at: self.clock.now(),
        }
    }
}

fn not_found(id: &ContactId) -> ApiError {
    DomainError::NotFound {
        entity_type: "contact",
        id:          id.to_string(),
    }
    .into()
}
