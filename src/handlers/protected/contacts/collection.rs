use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::Deserialize;

use crate::database::manager::DatabaseManager;
use crate::database::models::contact::{Contact, ContactInput};
use crate::database::repository::ContactRepository;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

use super::resolve_page;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// GET /api/contacts - list the caller's contacts, ordered by id
pub async fn list(
    Query(query): Query<ListQuery>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Contact>> {
    let (limit, offset) = resolve_page(query.limit, query.offset)?;

    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contacts = repository.list(auth_user.user_id, limit, offset).await?;

    Ok(ApiResponse::success(contacts))
}

/// POST /api/contacts - create a contact owned by the caller
pub async fn create(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ContactInput>,
) -> ApiResult<Contact> {
    payload.validate()?;

    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contact = repository.create(auth_user.user_id, &payload).await?;

    tracing::debug!("Created contact {} for user {}", contact.id, auth_user.user_id);

    Ok(ApiResponse::created(contact))
}
