use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::auth::{generate_jwt, hash_password, verify_password, Claims};
use crate::config;
use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::contact::validate_email_format;
use crate::database::models::user::User;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /auth/register - create a user account
pub async fn register(Json(payload): Json<RegisterRequest>) -> ApiResult<Value> {
    validate_credentials(&payload.email, &payload.password)?;

    let pool = DatabaseManager::pool().await?;
    let password_hash = hash_password(&payload.password);

    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING *",
    )
    .bind(payload.email.trim())
    .bind(&password_hash)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.code().as_deref() == Some("23505") {
                return ApiError::conflict("An account with this email already exists");
            }
        }
        DatabaseError::from(e).into()
    })?;

    tracing::info!("Registered user {}", user.id);

    Ok(ApiResponse::created(json!({
        "id": user.id,
        "email": user.email,
    })))
}

/// POST /auth/login - verify credentials and issue a JWT
pub async fn login(Json(payload): Json<LoginRequest>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(payload.email.trim())
        .fetch_optional(&pool)
        .await
        .map_err(DatabaseError::from)?
        // Unknown email and bad password are deliberately the same answer
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let security = &config::config().security;
    let claims = Claims::new(user.id, user.email.clone());
    let token = generate_jwt(&claims, &security.jwt_secret)?;

    Ok(ApiResponse::success(json!({
        "token": token,
        "expires_in": security.jwt_expiry_hours * 3600,
        "user": {
            "id": user.id,
            "email": user.email,
        }
    })))
}

fn validate_credentials(email: &str, password: &str) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();

    if let Err(msg) = validate_email_format(email.trim()) {
        field_errors.insert("email".to_string(), msg);
    }
    if password.len() < MIN_PASSWORD_LENGTH {
        field_errors.insert(
            "password".to_string(),
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
        );
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid registration fields", Some(field_errors)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_reasonable_credentials() {
        assert!(validate_credentials("a@x.com", "longenough").is_ok());
    }

    #[test]
    fn rejects_short_password_and_bad_email() {
        let err = validate_credentials("nope", "short").unwrap_err();
        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                assert!(fields.contains_key("email"));
                assert!(fields.contains_key("password"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
