use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::birthdays::window_month_day_codes;
use crate::database::manager::DatabaseError;
use crate::database::models::contact::{Contact, ContactInput};

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

/// Owner-scoped persistence for contacts.
///
/// The owner's user id is an explicit parameter on every operation and is
/// baked into every WHERE clause, so a row belonging to another user is
/// indistinguishable from a missing row.
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List the owner's contacts ordered by id, `limit`/`offset` paged
    pub async fn list(&self, owner_id: i32, limit: i64, offset: i64) -> Result<Vec<Contact>, DatabaseError> {
        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE user_id = $1 ORDER BY id LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }

    pub async fn get_by_id(&self, owner_id: i32, id: i32) -> Result<Option<Contact>, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE user_id = $1 AND id = $2",
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    pub async fn get_by_email(&self, owner_id: i32, email: &str) -> Result<Option<Contact>, DatabaseError> {
        self.first_by_text("email", owner_id, email).await
    }

    pub async fn get_by_phone(&self, owner_id: i32, phone: &str) -> Result<Option<Contact>, DatabaseError> {
        self.first_by_text("phone", owner_id, phone).await
    }

    pub async fn get_by_first_name(&self, owner_id: i32, name: &str) -> Result<Option<Contact>, DatabaseError> {
        self.first_by_text("first_name", owner_id, name).await
    }

    pub async fn get_by_second_name(&self, owner_id: i32, name: &str) -> Result<Option<Contact>, DatabaseError> {
        self.first_by_text("second_name", owner_id, name).await
    }

    /// Exact-date match: year, month and day all equal
    pub async fn get_by_birth_date(&self, owner_id: i32, date: NaiveDate) -> Result<Option<Contact>, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts WHERE user_id = $1 AND birth_date = $2 ORDER BY id LIMIT 1",
        )
        .bind(owner_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Single-match lookup on a text column. When several contacts share the
    /// value, the lowest id wins; the tie-break keeps repeated calls on an
    /// unchanged store returning the same record.
    async fn first_by_text(
        &self,
        column: &'static str,
        owner_id: i32,
        value: &str,
    ) -> Result<Option<Contact>, DatabaseError> {
        let sql = format!(
            "SELECT * FROM contacts WHERE user_id = $1 AND {} = $2 ORDER BY id LIMIT 1",
            column
        );

        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(owner_id)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(contact)
    }

    /// Insert a contact bound to `owner_id` and return the stored row
    pub async fn create(&self, owner_id: i32, input: &ContactInput) -> Result<Contact, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "INSERT INTO contacts (user_id, first_name, second_name, email, phone, birth_date, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING *",
        )
        .bind(owner_id)
        .bind(&input.first_name)
        .bind(&input.second_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.birth_date)
        .bind(&input.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(contact)
    }

    /// Full-replace update of every mutable field. Returns `None` when the
    /// contact does not exist or belongs to another user; nothing is created.
    pub async fn update(
        &self,
        owner_id: i32,
        id: i32,
        input: &ContactInput,
    ) -> Result<Option<Contact>, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "UPDATE contacts \
             SET first_name = $3, second_name = $4, email = $5, phone = $6, birth_date = $7, notes = $8, \
                 updated_at = now() \
             WHERE user_id = $1 AND id = $2 \
             RETURNING *",
        )
        .bind(owner_id)
        .bind(id)
        .bind(&input.first_name)
        .bind(&input.second_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.birth_date)
        .bind(&input.notes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(contact)
    }

    /// Hard removal. Returns the row as it was immediately before deletion,
    /// or `None` when not found / not owned.
    pub async fn delete(&self, owner_id: i32, id: i32) -> Result<Option<Contact>, DatabaseError> {
        let contact = sqlx::query_as::<_, Contact>(
            "DELETE FROM contacts WHERE user_id = $1 AND id = $2 RETURNING *",
        )
        .bind(owner_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(contact)
    }

    /// Contacts whose birthday (month and day, birth year ignored) falls
    /// inside `[start, end]` inclusive. The window is expanded to its
    /// month/day codes in Rust, then matched in a single query.
    pub async fn upcoming_birthdays(
        &self,
        owner_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Contact>, DatabaseError> {
        let codes = window_month_day_codes(start, end);
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let contacts = sqlx::query_as::<_, Contact>(
            "SELECT * FROM contacts \
             WHERE user_id = $1 \
               AND EXTRACT(MONTH FROM birth_date)::int4 * 100 + EXTRACT(DAY FROM birth_date)::int4 = ANY($2) \
             ORDER BY id",
        )
        .bind(owner_id)
        .bind(&codes)
        .fetch_all(&self.pool)
        .await?;

        Ok(contacts)
    }
}

/// Surface per-owner email uniqueness as a Conflict instead of a raw SQL error
fn map_unique_violation(err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return DatabaseError::Conflict("A contact with this email already exists".to_string());
        }
    }
    DatabaseError::Sqlx(err)
}
