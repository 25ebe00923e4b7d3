//! Work entity model and DTOs.

use ranker_core::types::{DbId, Timestamp};
use ranker_core::validation::not_blank;
use ranker_core::work::normalize_category;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A work row from the `works` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Work {
    pub id: DbId,
    pub category: String,
    pub title: String,
    pub creator: String,
    pub publication_year: i32,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A work together with the number of votes it has received.
///
/// Produced by the ranking queries. Serializes flat, with `vote_count`
/// alongside the work's own fields.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct RankedWork {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub work: Work,
    pub vote_count: i64,
}

/// DTO for creating a new work.
///
/// Every field is optional at the type level so a missing value surfaces as
/// a `"can't be blank"` field error rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateWork {
    #[validate(
        required(message = "can't be blank"),
        custom(function = "not_blank")
    )]
    pub category: Option<String>,
    #[validate(
        required(message = "can't be blank"),
        custom(function = "not_blank")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "can't be blank"),
        custom(function = "not_blank")
    )]
    pub creator: Option<String>,
    #[validate(required(message = "can't be blank"))]
    pub publication_year: Option<i32>,
    #[validate(
        required(message = "can't be blank"),
        custom(function = "not_blank")
    )]
    pub description: Option<String>,
}

/// DTO for updating an existing work. All fields are optional; `None` keeps
/// the stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWork {
    pub category: Option<String>,
    pub title: Option<String>,
    pub creator: Option<String>,
    pub publication_year: Option<i32>,
    pub description: Option<String>,
}

/// Column values of a [`CreateWork`] whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkValues<'a> {
    /// Already normalized.
    pub category: String,
    pub title: &'a str,
    pub creator: &'a str,
    pub publication_year: i32,
    pub description: &'a str,
}

impl CreateWork {
    /// Extract column values, or `None` if any required field is missing.
    pub fn values(&self) -> Option<WorkValues<'_>> {
        Some(WorkValues {
            category: normalize_category(self.category.as_deref()?),
            title: self.title.as_deref()?,
            creator: self.creator.as_deref()?,
            publication_year: self.publication_year?,
            description: self.description.as_deref()?,
        })
    }
}

impl From<&Work> for CreateWork {
    fn from(work: &Work) -> Self {
        Self {
            category: Some(work.category.clone()),
            title: Some(work.title.clone()),
            creator: Some(work.creator.clone()),
            publication_year: Some(work.publication_year),
            description: Some(work.description.clone()),
        }
    }
}

impl UpdateWork {
    /// The full set of values `work` would have after applying this patch.
    pub fn apply_to(&self, work: &Work) -> CreateWork {
        let current = CreateWork::from(work);
        CreateWork {
            category: self.category.clone().or(current.category),
            title: self.title.clone().or(current.title),
            creator: self.creator.clone().or(current.creator),
            publication_year: self.publication_year.or(current.publication_year),
            description: self.description.clone().or(current.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use ranker_core::validation::{FieldErrors, BLANK};

    use super::*;

    fn new_album() -> CreateWork {
        CreateWork {
            category: Some("album".to_string()),
            title: Some("new album title".to_string()),
            creator: Some("new album creator".to_string()),
            publication_year: Some(2020),
            description: Some("new album description".to_string()),
        }
    }

    fn presence_errors(input: &CreateWork) -> FieldErrors {
        match input.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        }
    }

    fn stored_album() -> Work {
        let now = chrono::Utc::now();
        Work {
            id: 7,
            category: "album".to_string(),
            title: "Kind of Blue".to_string(),
            creator: "Miles Davis".to_string(),
            publication_year: 1959,
            description: "Modal jazz".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn complete_input_has_no_presence_errors() {
        assert!(presence_errors(&new_album()).is_empty());
    }

    #[test]
    fn each_missing_field_reports_blank() {
        let cases: [(&str, fn(&mut CreateWork)); 5] = [
            ("category", |w| w.category = None),
            ("title", |w| w.title = None),
            ("creator", |w| w.creator = None),
            ("publication_year", |w| w.publication_year = None),
            ("description", |w| w.description = None),
        ];

        for (field, clear) in cases {
            let mut input = new_album();
            clear(&mut input);
            let errors = presence_errors(&input);
            assert_eq!(errors.len(), 1, "only {field} should fail");
            assert!(errors.has_message(field, BLANK), "{field}: {errors:?}");
        }
    }

    #[test]
    fn whitespace_only_is_blank() {
        let mut input = new_album();
        input.title = Some("   ".to_string());
        assert!(presence_errors(&input).has_message("title", BLANK));
    }

    #[test]
    fn values_normalize_category() {
        let mut input = new_album();
        input.category = Some(" Album".to_string());
        let values = input.values().unwrap();
        assert_eq!(values.category, "album");
        assert_eq!(values.title, "new album title");
    }

    #[test]
    fn values_none_when_field_missing() {
        let mut input = new_album();
        input.publication_year = None;
        assert!(input.values().is_none());
    }

    #[test]
    fn empty_patch_keeps_stored_values() {
        let work = stored_album();
        let merged = UpdateWork::default().apply_to(&work);
        assert_eq!(merged.title.as_deref(), Some("Kind of Blue"));
        assert_eq!(merged.publication_year, Some(1959));
    }

    #[test]
    fn patch_overrides_only_given_fields() {
        let work = stored_album();
        let patch = UpdateWork {
            category: Some("book".to_string()),
            ..Default::default()
        };
        let merged = patch.apply_to(&work);
        assert_eq!(merged.category.as_deref(), Some("book"));
        assert_eq!(merged.creator.as_deref(), Some("Miles Davis"));
    }

    #[test]
    fn blank_patch_value_fails_presence() {
        let work = stored_album();
        let patch = UpdateWork {
            creator: Some(String::new()),
            ..Default::default()
        };
        assert!(presence_errors(&patch.apply_to(&work)).has_message("creator", BLANK));
    }
}
