//! Work catalog constants and helpers.

/// Categories shown on the landing page overview, in display order.
///
/// Works are not restricted to these; any non-blank category is accepted.
pub const KNOWN_CATEGORIES: [&str; 3] = ["album", "book", "movie"];

/// Canonical form of a category name: trimmed and lowercased.
///
/// Applied on write and on every category-filtered query so `"Album"` and
/// `"album "` land in the same partition.
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_category("  Album "), "album");
        assert_eq!(normalize_category("book"), "book");
    }

    #[test]
    fn normalize_keeps_inner_spaces() {
        assert_eq!(normalize_category("Short Story"), "short story");
    }

    #[test]
    fn known_categories_are_normalized() {
        for category in KNOWN_CATEGORIES {
            assert_eq!(normalize_category(category), category);
        }
    }
}
