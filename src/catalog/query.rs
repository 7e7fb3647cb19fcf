//! Search, filter and sort over a blog list

use crate::types::{BlogSummary, Category};
use std::cmp::Ordering;
use std::str::FromStr;

/// Listing order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first
    #[default]
    Newest,
    /// Oldest first
    Oldest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!("unknown sort order '{other}' (expected newest or oldest)")),
        }
    }
}

/// Filter and ordering for a blog listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogQuery {
    /// Case-insensitive text matched against title, content and author
    pub search: Option<String>,
    /// Only blogs in this category (`None` = all)
    pub category: Option<Category>,
    /// Ordering by date
    pub sort: SortOrder,
}

impl BlogQuery {
    /// Whether a blog passes the search and category filters
    pub fn matches(&self, blog: &BlogSummary) -> bool {
        let matches_category = self
            .category
            .is_none_or(|c| blog.category.eq_ignore_ascii_case(c.as_str()));

        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                [
                    Some(blog.title.as_str()),
                    blog.content.as_deref(),
                    Some(blog.author_name.as_str()),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term))
            }
        };

        matches_category && matches_search
    }

    /// Matching blogs in the requested order
    ///
    /// Blogs without any date sort after dated ones in both orders.
    pub fn apply<'a>(&self, blogs: &'a [BlogSummary]) -> Vec<&'a BlogSummary> {
        let mut matched: Vec<&BlogSummary> = blogs.iter().filter(|b| self.matches(b)).collect();
        matched.sort_by(|a, b| match (a.sort_date(), b.sort_date()) {
            (Some(da), Some(db)) => match self.sort {
                SortOrder::Newest => db.cmp(&da),
                SortOrder::Oldest => da.cmp(&db),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        matched
    }
}

/// Distinct categories with their blog counts, in first-seen order
pub fn category_counts(blogs: &[BlogSummary]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for blog in blogs {
        match counts.iter_mut().find(|(name, _)| *name == blog.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((blog.category.clone(), 1)),
        }
    }
    counts
}
