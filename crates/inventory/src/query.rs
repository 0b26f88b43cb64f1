//! Listing filters.

use serde::{Deserialize, Serialize};

/// Optional filters for listing items. Both combine with logical AND.
///
/// - `category`: exact, case-sensitive match against the stored category.
/// - `search`: substring of name or description, ASCII case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl ItemFilter {
    /// No filtering: every item.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            category: non_blank(category),
            search: non_blank(search),
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(Some(category.into()));
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = non_blank(Some(term.into()));
        self
    }
}

// Blank filter values mean "no filter", matching how form inputs arrive.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
