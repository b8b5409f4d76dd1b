use axum::{
    extract::{Extension, Path},
    Json,
};

use crate::database::manager::DatabaseManager;
use crate::database::models::contact::{Contact, ContactInput};
use crate::database::repository::ContactRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/contacts/:id - show a single contact owned by the caller
pub async fn show(
    Path(id): Path<i32>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Contact> {
    let repository = ContactRepository::new(DatabaseManager::pool().await?);

    let contact = repository
        .get_by_id(auth_user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not Found"))?;

    Ok(ApiResponse::success(contact))
}

/// PUT /api/contacts/:id - full replace of every mutable field.
/// Fields omitted from the payload are not preserved from the old row.
pub async fn update(
    Path(id): Path<i32>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ContactInput>,
) -> ApiResult<Contact> {
    payload.validate()?;

    let repository = ContactRepository::new(DatabaseManager::pool().await?);

    let contact = repository
        .update(auth_user.user_id, id, &payload)
        .await?
        .ok_or_else(|| ApiError::not_found("Not Found"))?;

    Ok(ApiResponse::success(contact))
}

/// DELETE /api/contacts/:id - hard removal, 204 on success
pub async fn destroy(
    Path(id): Path<i32>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<()> {
    let repository = ContactRepository::new(DatabaseManager::pool().await?);

    let removed = repository
        .delete(auth_user.user_id, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Not Found"))?;

    tracing::debug!("Deleted contact {} for user {}", removed.id, auth_user.user_id);

    Ok(ApiResponse::no_content())
}
