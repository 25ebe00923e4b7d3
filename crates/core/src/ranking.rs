//! Vote-count ranking.
//!
//! `winner`, `top_ten` and `display_by_votes` are all "count votes per work,
//! sort, optionally truncate". They share one [`RankingQuery`] shape so the
//! repository runs a single statement and the ordering is identical across
//! all three:
//!
//! 1. vote count, descending
//! 2. work id, ascending (older works win ties)

use crate::work::normalize_category;

/// Maximum number of works returned by a top-ten query.
pub const TOP_TEN_LIMIT: i64 = 10;

/// Parameters for a ranking query. `None` means "no filter" / "no limit".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankingQuery {
    pub category: Option<String>,
    pub limit: Option<i64>,
}

impl RankingQuery {
    /// Every work, ranked.
    pub fn all() -> Self {
        Self::default()
    }

    /// The single highest-voted work across all categories.
    pub fn winner() -> Self {
        Self::all().with_limit(1)
    }

    /// At most [`TOP_TEN_LIMIT`] works from `category`.
    pub fn top_ten(category: &str) -> Self {
        Self::display_by_votes(category).with_limit(TOP_TEN_LIMIT)
    }

    /// Every work in `category`, ranked.
    pub fn display_by_votes(category: &str) -> Self {
        Self::all().in_category(category)
    }

    pub fn in_category(mut self, category: &str) -> Self {
        self.category = Some(normalize_category(category));
        self
    }

    /// Cap the result size. Negative limits are clamped to zero.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit.max(0));
        self
    }
}
