use axum::extract::Extension;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami - echo the authenticated identity from the JWT
pub async fn whoami(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "id": auth_user.user_id,
        "email": auth_user.email,
    })))
}
