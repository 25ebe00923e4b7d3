//! Repository for the `votes` table.

use ranker_core::types::DbId;
use sqlx::PgPool;

use crate::error::{ConstraintField, SaveError};
use crate::models::vote::Vote;

const COLUMNS: &str = "id, work_id, user_id, created_at";

/// Message for a second vote by the same user on the same work.
pub const ALREADY_VOTED: &str = "has already voted for this work";

/// Message for a reference to a row that does not exist.
pub const MUST_EXIST: &str = "must exist";

const CONSTRAINTS: &[ConstraintField] = &[
    ConstraintField {
        constraint: "uq_votes_user_work",
        field: "user_id",
        message: ALREADY_VOTED,
    },
    ConstraintField {
        constraint: "votes_user_id_fkey",
        field: "user_id",
        message: MUST_EXIST,
    },
    ConstraintField {
        constraint: "votes_work_id_fkey",
        field: "work_id",
        message: MUST_EXIST,
    },
];

/// Provides vote casting and lookups.
pub struct VoteRepo;

impl VoteRepo {
    /// Record `user_id`'s vote for `work_id`.
    ///
    /// A user may vote for a given work once; a repeat vote, or a reference
    /// to a missing user or work, fails with a field error.
    pub async fn cast(pool: &PgPool, work_id: DbId, user_id: DbId) -> Result<Vote, SaveError> {
        if Self::exists(pool, work_id, user_id).await? {
            return Err(SaveError::invalid("user_id", ALREADY_VOTED));
        }

        let query = format!(
            "INSERT INTO votes (work_id, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(work_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
            .map_err(|e| SaveError::from_constraint(e, CONSTRAINTS))
    }

    /// All votes for a work, oldest first.
    pub async fn list_by_work(pool: &PgPool, work_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE work_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Vote>(&query)
            .bind(work_id)
            .fetch_all(pool)
            .await
    }

    /// Number of votes a work has received.
    pub async fn count_by_work(pool: &PgPool, work_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM votes WHERE work_id = $1")
            .bind(work_id)
            .fetch_one(pool)
            .await
    }

    /// All votes cast by a user, oldest first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Vote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM votes WHERE user_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    async fn exists(pool: &PgPool, work_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE work_id = $1 AND user_id = $2)",
        )
        .bind(work_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
