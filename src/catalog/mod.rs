//! Listing and dashboard operations
//!
//! Everything here works on snapshots fetched through the gateway. Nothing
//! is cached or written back; each view fetches its own list.

mod query;
mod stats;

pub use query::{BlogQuery, SortOrder, category_counts};
pub use stats::{DashboardStats, StatusShare, read_time_minutes};
