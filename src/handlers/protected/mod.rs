// Protected handlers - valid JWT required.
// The auth middleware injects AuthUser; handlers thread its user id into
// every store call so ownership scoping stays explicit and auditable.
pub mod auth;
pub mod contacts;
