//! Dashboard aggregation

use crate::types::{BlogStatus, BlogSummary};

/// Words read per minute when estimating read time
const WORDS_PER_MINUTE: u64 = 200;

/// Count and share of one status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusShare {
    /// Blogs in this status
    pub count: usize,
    /// Share of all blogs, 0-100
    pub percent: f64,
}

/// Submission counts per status
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    /// All submissions
    pub total: usize,
    /// Live blogs
    pub published: StatusShare,
    /// Under review
    pub pending: StatusShare,
    /// Failed review
    pub rejected: StatusShare,
}

impl DashboardStats {
    /// Aggregate a fetched list
    #[allow(clippy::cast_precision_loss)]
    pub fn from_blogs(blogs: &[BlogSummary]) -> Self {
        let total = blogs.len();
        let share = |status: BlogStatus| {
            let count = blogs.iter().filter(|b| b.status == status).count();
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            StatusShare { count, percent }
        };

        Self {
            total,
            published: share(BlogStatus::Published),
            pending: share(BlogStatus::Pending),
            rejected: share(BlogStatus::Rejected),
        }
    }
}

/// Estimated minutes to read a blog
pub const fn read_time_minutes(word_count: u64) -> u64 {
    word_count.div_ceil(WORDS_PER_MINUTE)
}
