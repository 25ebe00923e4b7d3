//! Errors returned by repository write operations.

use ranker_core::validation::FieldErrors;

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure of a validated write (create / update / cast).
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// The input failed validation. Nothing was written.
    #[error("Validation failed: {0}")]
    Invalid(FieldErrors),

    /// Infrastructure failure, opaque to callers.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Maps a named database constraint onto the field error it represents.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConstraintField {
    pub constraint: &'static str,
    pub field: &'static str,
    pub message: &'static str,
}

impl SaveError {
    pub(crate) fn invalid(field: &str, message: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        SaveError::Invalid(errors)
    }

    /// Translate a unique or foreign-key violation on one of `known`
    /// constraints into a field error. Anything else stays a database error.
    ///
    /// Reached when a concurrent writer slipped past the application-level
    /// pre-check, so the database constraint is what rejected the row.
    pub(crate) fn from_constraint(err: sqlx::Error, known: &[ConstraintField]) -> Self {
        if let Some(constraint) = violated_constraint(&err) {
            if let Some(mapping) = known.iter().find(|m| m.constraint == constraint) {
                tracing::warn!(
                    constraint,
                    field = mapping.field,
                    "Constraint violation translated to validation error"
                );
                return SaveError::invalid(mapping.field, mapping.message);
            }
        }
        SaveError::Database(err)
    }
}

/// Name of the unique / foreign-key constraint `err` violated, if any.
fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    let sqlx::Error::Database(db_err) = err else {
        return None;
    };
    match db_err.code().as_deref() {
        Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION) => db_err.constraint(),
        _ => None,
    }
}
