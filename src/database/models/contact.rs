use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;

use crate::error::ApiError;

/// A stored contact row, always bound to its owning user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i32,
    pub user_id: i32,
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied contact fields, used by create and by full-replace update.
/// Fields omitted from an update are not preserved; this struct is the whole
/// mutable surface of a contact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInput {
    pub first_name: String,
    pub second_name: String,
    pub email: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
}

const MAX_NAME_LEN: usize = 50;

impl ContactInput {
    /// Field-level validation, run before any persistence attempt
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if let Err(msg) = validate_name(&self.first_name) {
            field_errors.insert("first_name".to_string(), msg);
        }
        if let Err(msg) = validate_name(&self.second_name) {
            field_errors.insert("second_name".to_string(), msg);
        }
        if let Err(msg) = validate_email_format(&self.email) {
            field_errors.insert("email".to_string(), msg);
        }
        if self.phone.trim().is_empty() {
            field_errors.insert("phone".to_string(), "must not be empty".to_string());
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid contact fields", Some(field_errors)))
        }
    }
}

fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("must not be empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("must be at most {} characters", MAX_NAME_LEN));
    }
    Ok(())
}

/// Basic email format check shared by contact validation and registration
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("must not be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() || !parts[1].contains('.') {
        return Err("invalid email format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ContactInput {
        ContactInput {
            first_name: "Ann".to_string(),
            second_name: "Lee".to_string(),
            email: "a@x.com".to_string(),
            phone: "555".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 2).unwrap(),
            notes: None,
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn rejects_empty_names() {
        let mut bad = input();
        bad.first_name = "  ".to_string();
        bad.second_name = String::new();

        let err = bad.validate().unwrap_err();
        match err {
            ApiError::ValidationError { field_errors: Some(fields), .. } => {
                assert!(fields.contains_key("first_name"));
                assert!(fields.contains_key("second_name"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_overlong_name() {
        let mut bad = input();
        bad.first_name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        for email in ["", "nope", "@x.com", "a@", "a@host"] {
            assert!(validate_email_format(email).is_err(), "accepted {:?}", email);
        }
        assert!(validate_email_format("a@x.com").is_ok());
    }

    #[test]
    fn rejects_blank_phone() {
        let mut bad = input();
        bad.phone = " ".to_string();
        assert!(bad.validate().is_err());
    }
}
