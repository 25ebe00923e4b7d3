//! Repository for the `works` table and the vote-count rankings over it.

use ranker_core::ranking::RankingQuery;
use ranker_core::types::DbId;
use ranker_core::validation::{FieldErrors, TAKEN};
use ranker_core::work::normalize_category;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{ConstraintField, SaveError};
use crate::models::work::{CreateWork, RankedWork, UpdateWork, Work};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, category, title, creator, publication_year, description, created_at, updated_at";

/// Constraints on `works` that correspond to a field error.
const CONSTRAINTS: &[ConstraintField] = &[ConstraintField {
    constraint: "uq_works_category_title",
    field: "title",
    message: TAKEN,
}];

/// Provides validation, CRUD and ranking for works.
pub struct WorkRepo;

impl WorkRepo {
    /// Run every validation rule against `input` without writing anything.
    ///
    /// Checks presence of all required fields and that the title is not
    /// already used by another work in the same category. `except_id`
    /// excludes the work being updated from the uniqueness check.
    ///
    /// Returns an empty [`FieldErrors`] when the input is valid.
    pub async fn validate(
        pool: &PgPool,
        input: &CreateWork,
        except_id: Option<DbId>,
    ) -> Result<FieldErrors, sqlx::Error> {
        let mut errors = match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        if let (Some(category), Some(title)) = (present(&input.category), present(&input.title)) {
            if Self::title_taken(pool, &normalize_category(category), title, except_id).await? {
                errors.add("title", TAKEN);
            }
        }

        Ok(errors)
    }

    /// Validate and insert a new work, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateWork) -> Result<Work, SaveError> {
        let errors = Self::validate(pool, input, None).await?;
        let values = match input.values() {
            Some(values) if errors.is_empty() => values,
            _ => return Err(rejected(errors)),
        };

        let query = format!(
            "INSERT INTO works (category, title, creator, publication_year, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(&values.category)
            .bind(values.title)
            .bind(values.creator)
            .bind(values.publication_year)
            .bind(values.description)
            .fetch_one(pool)
            .await
            .map_err(|e| SaveError::from_constraint(e, CONSTRAINTS))
    }

    /// Find a work by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Work>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works WHERE id = $1");
        sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a work by ID together with its vote count.
    pub async fn find_ranked_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RankedWork>, sqlx::Error> {
        sqlx::query_as::<_, RankedWork>(
            "SELECT w.id, w.category, w.title, w.creator, w.publication_year, w.description,
                    w.created_at, w.updated_at, COUNT(v.id) AS vote_count
             FROM works w
             LEFT JOIN votes v ON v.work_id = w.id
             WHERE w.id = $1
             GROUP BY w.id",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List all works in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Work>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM works ORDER BY id ASC");
        sqlx::query_as::<_, Work>(&query).fetch_all(pool).await
    }

    /// Total number of works.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM works")
            .fetch_one(pool)
            .await
    }

    /// Apply a patch to a work after validating the merged result.
    ///
    /// Returns `Ok(None)` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWork,
    ) -> Result<Option<Work>, SaveError> {
        let Some(existing) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let merged = input.apply_to(&existing);
        let errors = Self::validate(pool, &merged, Some(id)).await?;
        let values = match merged.values() {
            Some(values) if errors.is_empty() => values,
            _ => return Err(rejected(errors)),
        };

        let query = format!(
            "UPDATE works SET
                category = $2,
                title = $3,
                creator = $4,
                publication_year = $5,
                description = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Work>(&query)
            .bind(id)
            .bind(&values.category)
            .bind(values.title)
            .bind(values.creator)
            .bind(values.publication_year)
            .bind(values.description)
            .fetch_optional(pool)
            .await
            .map_err(|e| SaveError::from_constraint(e, CONSTRAINTS))
    }

    /// Delete a work by ID. Its votes are removed by cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM works WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every work (and, by cascade, every vote). Returns the number
    /// of works removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM works").execute(pool).await?;
        Ok(result.rows_affected())
    }

    /// Run a ranking query: works with their vote counts, ordered by vote
    /// count descending then ID ascending, optionally filtered by category
    /// and truncated.
    pub async fn rank(
        pool: &PgPool,
        ranking: &RankingQuery,
    ) -> Result<Vec<RankedWork>, sqlx::Error> {
        // `LIMIT NULL` is "no limit" in PostgreSQL.
        sqlx::query_as::<_, RankedWork>(
            "SELECT w.id, w.category, w.title, w.creator, w.publication_year, w.description,
                    w.created_at, w.updated_at, COUNT(v.id) AS vote_count
             FROM works w
             LEFT JOIN votes v ON v.work_id = w.id
             WHERE ($1::TEXT IS NULL OR w.category = $1)
             GROUP BY w.id
             ORDER BY vote_count DESC, w.id ASC
             LIMIT $2",
        )
        .bind(&ranking.category)
        .bind(ranking.limit)
        .fetch_all(pool)
        .await
    }

    /// The work with the most votes across all categories, or `None` if
    /// there are no works. Ties go to the lowest ID.
    pub async fn winner(pool: &PgPool) -> Result<Option<RankedWork>, sqlx::Error> {
        let mut ranked = Self::rank(pool, &RankingQuery::winner()).await?;
        Ok(ranked.pop())
    }

    /// Up to ten works from `category`, most votes first. Empty when the
    /// category has no works.
    pub async fn top_ten(pool: &PgPool, category: &str) -> Result<Vec<RankedWork>, sqlx::Error> {
        Self::rank(pool, &RankingQuery::top_ten(category)).await
    }

    /// Every work in `category`, most votes first.
    pub async fn display_by_votes(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<RankedWork>, sqlx::Error> {
        Self::rank(pool, &RankingQuery::display_by_votes(category)).await
    }

    /// Whether another work in `category` already uses `title`.
    async fn title_taken(
        pool: &PgPool,
        category: &str,
        title: &str,
        except_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM works
                WHERE category = $1 AND title = $2 AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(category)
        .bind(title)
        .bind(except_id)
        .fetch_one(pool)
        .await
    }
}

fn rejected(errors: FieldErrors) -> SaveError {
    tracing::debug!(fields = errors.len(), %errors, "Work rejected by validation");
    SaveError::Invalid(errors)
}

/// The field's value if it is present and not blank.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
