//! Blog search and category filtering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A blog card as shown on the listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BlogPost {
    /// Post title.
    pub title: String,
    /// Teaser text under the title.
    pub excerpt: String,
    /// Category slug, e.g. `"essays"`.
    pub category: String,
}

/// Which categories are visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category.
    #[default]
    All,
    /// Exactly one category slug.
    Only(String),
}

impl CategoryFilter {
    /// Parse a category button value; `"all"` selects everything.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Whether `category` passes the filter.
    pub fn allows(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

impl BlogPost {
    /// Case-insensitive substring match on title or excerpt.
    ///
    /// `needle` must already be lowercase.
    fn matches_search(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.excerpt.to_lowercase().contains(needle)
    }
}

/// Posts that match both the search term and the category, in input order.
///
/// An empty search term matches every post.
#[tracing::instrument(level = "debug", skip(posts), fields(posts = posts.len()))]
pub fn filter_posts<'a>(
    posts: &'a [BlogPost],
    search: &str,
    category: &CategoryFilter,
) -> Vec<&'a BlogPost> {
    let needle = search.to_lowercase();
    posts
        .iter()
        .filter(|post| post.matches_search(&needle) && category.allows(&post.category))
        .collect()
}
