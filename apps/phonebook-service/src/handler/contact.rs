//! # 連絡先ハンドラ
//!
//! 連絡先の CRUD API を提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/persons` - 連絡先一覧
//! - `GET /api/persons/{id}` - 連絡先詳細
//! - `POST /api/persons` - 連絡先作成
//! - `PUT /api/persons/{id}` - 連絡先更新（名前と電話番号を置き換え）
//! - `DELETE /api/persons/{id}` - 連絡先削除

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use phonebook_domain::contact::{Contact, ContactId};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;

use crate::{
    error::ApiError,
    usecase::{ContactInput, ContactUseCaseImpl},
};

/// 連絡先 API と `/info` の共有状態
pub struct ContactState {
    pub usecase: ContactUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 連絡先 DTO
///
/// ストア内部のフィールド（`_id`, `__v`）は含めない。
#[derive(Debug, Serialize)]
pub struct ContactDto {
    pub id:     String,
    pub name:   String,
    pub number: String,
}

impl From<&Contact> for ContactDto {
    fn from(contact: &Contact) -> Self {
        Self {
            id:     contact.id().to_string(),
            name:   contact.name().as_str().to_string(),
            number: contact.number().as_str().to_string(),
        }
    }
}

/// 連絡先作成・更新リクエスト
///
/// 欠落と `null` はどちらも `None` として受け、ユースケースで判定する。
/// 数値と真偽値は文字列に変換して受け付ける。
#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub name:   Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub number: Option<String>,
}

/// スカラー値を文字列として読む。オブジェクトと配列は拒否する
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => Err(de::Error::custom("expected a string")),
    }
}

/// ボディ抽出の結果をリクエストに変換する
///
/// JSON の `Content-Type` がないリクエストは空ボディとして扱う。
fn into_request(
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<ContactRequest, ApiError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(ContactRequest::default()),
        Err(rejection) => Err(rejection.into()),
    }
}

impl From<ContactRequest> for ContactInput {
    fn from(request: ContactRequest) -> Self {
        Self {
            name:   request.name,
            number: request.number,
        }
    }
}

// --- ハンドラ ---

/// GET /api/persons
pub async fn list_contacts(
    State(state): State<Arc<ContactState>>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = state.usecase.list_contacts().await?;

    let items: Vec<ContactDto> = contacts.iter().map(ContactDto::from).collect();
    Ok((StatusCode::OK, Json(items)))
}

/// GET /api/persons/{id}
///
/// 形式不正な ID は 400、存在しない ID は 404（ボディなし）。
pub async fn get_contact(
    State(state): State<Arc<ContactState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = ContactId::parse(&id)?;

    let contact = state.usecase.get_contact(&id).await?;

    Ok((StatusCode::OK, Json(ContactDto::from(&contact))))
}

/// POST /api/persons
///
/// 名前・電話番号の欠落は `"name missing"` / `"number missing"` で 400。
/// 名前の重複は許容する。
pub async fn create_contact(
    State(state): State<Arc<ContactState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let request = into_request(payload)?;
    // 電話番号は個人情報のためログに出さない
    tracing::debug!(
        name = ?request.name,
        has_number = request.number.is_some(),
        "連絡先作成リクエスト"
    );

    let contact = state.usecase.create_contact(request.into()).await?;

    Ok((StatusCode::OK, Json(ContactDto::from(&contact))))
}

/// PUT /api/persons/{id}
///
/// 入力の検証は作成時と同じ。存在しない ID は 404（ボディなし）。
pub async fn update_contact(
    State(state): State<Arc<ContactState>>,
    Path(id): Path<String>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let id = ContactId::parse(&id)?;
    let request = into_request(payload)?;
    tracing::debug!(
        contact_id = %id,
        name = ?request.name,
        has_number = request.number.is_some(),
        "連絡先更新リクエスト"
    );

    let contact = state.usecase.update_contact(&id, request.into()).await?;

    Ok((StatusCode::OK, Json(ContactDto::from(&contact))))
}

/// DELETE /api/persons/{id}
///
/// 存在しない ID でも 204 を返す。
pub async fn delete_contact(
    State(state): State<Arc<ContactState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = ContactId::parse(&id)?;

    state.usecase.delete_contact(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}
