//! Single-match field lookups.
//!
//! Known limitation, kept deliberately: when several contacts share the
//! looked-up value the API returns one of them, tie-broken to the lowest id,
//! so the answer is stable for a given data state.

use axum::extract::{Extension, Path};
use chrono::NaiveDate;

use crate::database::manager::DatabaseManager;
use crate::database::models::contact::Contact;
use crate::database::repository::ContactRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/contacts/by_email/:email
pub async fn by_email(
    Path(email): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Contact> {
    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contact = repository.get_by_email(auth_user.user_id, &email).await?;
    found(contact)
}

/// GET /api/contacts/by_phone/:phone
pub async fn by_phone(
    Path(phone): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Contact> {
    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contact = repository.get_by_phone(auth_user.user_id, &phone).await?;
    found(contact)
}

/// GET /api/contacts/by_first_name/:name
pub async fn by_first_name(
    Path(name): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Contact> {
    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contact = repository.get_by_first_name(auth_user.user_id, &name).await?;
    found(contact)
}

/// GET /api/contacts/by_second_name/:name
pub async fn by_second_name(
    Path(name): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Contact> {
    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contact = repository.get_by_second_name(auth_user.user_id, &name).await?;
    found(contact)
}

/// GET /api/contacts/by_birth_date/:date - exact date match, `YYYY-MM-DD`
pub async fn by_birth_date(
    Path(date): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Contact> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request("birth date must be formatted as YYYY-MM-DD"))?;

    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contact = repository.get_by_birth_date(auth_user.user_id, date).await?;
    found(contact)
}

fn found(contact: Option<Contact>) -> ApiResult<Contact> {
    contact
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found("Not Found"))
}
