//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Optional category filter (`?category=`).
#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    pub category: Option<String>,
}

/// Required category (`?category=`). A missing parameter is rejected by the
/// extractor with 400.
#[derive(Debug, Deserialize)]
pub struct CategoryParam {
    pub category: String,
}
