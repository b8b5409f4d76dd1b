pub mod birthdays;
pub mod collection;
pub mod lookup;
pub mod record;

use crate::error::ApiError;

/// Resolve `limit`/`offset` query values against configured bounds.
/// Oversized limits are rejected, not clamped.
pub(crate) fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> Result<(i64, i64), ApiError> {
    let cfg = &crate::config::config().api;

    let limit = limit.unwrap_or(cfg.default_limit);
    if limit < 1 || limit > cfg.max_limit {
        return Err(ApiError::bad_request(format!(
            "limit must be between 1 and {}",
            cfg.max_limit
        )));
    }

    let offset = offset.unwrap_or(0);
    if offset < 0 {
        return Err(ApiError::bad_request("offset must not be negative"));
    }

    Ok((limit, offset))
}
