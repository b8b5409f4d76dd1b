use axum::extract::{Extension, Query};
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::contact::Contact;
use crate::database::repository::ContactRepository;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

#[derive(Debug, Deserialize)]
pub struct BirthdayQuery {
    /// Lookahead in days; the window is [today, today + days] inclusive
    pub days: Option<i64>,
}

/// GET /api/contacts/birthdays - contacts whose birthday (month and day,
/// birth year ignored) falls within the lookahead window. The window may
/// cross a year boundary; matching handles the wraparound.
pub async fn upcoming(
    Query(query): Query<BirthdayQuery>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Contact>> {
    let days = query
        .days
        .unwrap_or(config::config().api.birthday_lookahead_days);
    if !(1..=365).contains(&days) {
        return Err(ApiError::bad_request("days must be between 1 and 365"));
    }

    let start = Utc::now().date_naive();
    let end = start + Duration::days(days);

    let repository = ContactRepository::new(DatabaseManager::pool().await?);
    let contacts = repository
        .upcoming_birthdays(auth_user.user_id, start, end)
        .await?;

    Ok(ApiResponse::success(contacts))
}
