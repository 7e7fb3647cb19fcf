//! CLI commands
//!
//! Command implementations for the `blogcheck` binary.

mod dashboard;
mod list;
mod progress;
mod style;
mod submit;
mod view;

pub use dashboard::run_dashboard;
pub use list::run_list;
pub use submit::{SubmitForm, run_submit};
pub use view::run_view;
