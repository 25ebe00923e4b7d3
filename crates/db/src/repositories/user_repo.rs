//! Repository for the `users` table.

use ranker_core::types::DbId;
use ranker_core::validation::{FieldErrors, TAKEN};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{ConstraintField, SaveError};
use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, username, created_at, updated_at";

const CONSTRAINTS: &[ConstraintField] = &[ConstraintField {
    constraint: "uq_users_username",
    field: "username",
    message: TAKEN,
}];

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Validate and insert a new user. Usernames are trimmed and must be unique.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, SaveError> {
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let username = input.username.as_deref().map(str::trim).unwrap_or_default();
        if !username.is_empty() && Self::find_by_username(pool, username).await?.is_some() {
            errors.add("username", TAKEN);
        }
        if !errors.is_empty() {
            return Err(SaveError::Invalid(errors));
        }

        let query = format!("INSERT INTO users (username) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_one(pool)
            .await
            .map_err(|e| SaveError::from_constraint(e, CONSTRAINTS))
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by exact username.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// List all users in sign-up order.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id ASC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }
}
