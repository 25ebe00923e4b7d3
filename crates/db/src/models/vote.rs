//! Vote entity model and DTOs.

use ranker_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A vote row from the `votes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub work_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for casting a vote. The work comes from the request path.
/// A missing `user_id` is reported as a blank-field error by the handler.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVote {
    pub user_id: Option<DbId>,
}
