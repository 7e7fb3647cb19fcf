//! Three-stage submission workflow
//!
//! Drives a draft from submission to publication:
//! 1. Submit - fill in the form, upload the document for analysis
//! 2. Review - simulated checks over the server's results (`review-gate` builds)
//! 3. Publish - the blog is live; the workflow resets itself after a dwell time

mod guard;
mod machine;
mod progress;
mod review;

pub use guard::{check_publish, check_review, outcome_fault};
pub use machine::{SessionSnapshot, Workflow, WorkflowTiming};
pub use progress::{NoopProgress, ProgressCallback};
pub use review::{ReviewCheck, ReviewDelays, run_review};

use std::fmt;

/// Workflow stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    /// Filling in the form and uploading
    #[default]
    Submit,
    /// Checks running over the analysis
    Review,
    /// Blog is live (or the review result is shown)
    Publish,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submit => write!(f, "Submit"),
            Self::Review => write!(f, "Review"),
            Self::Publish => write!(f, "Publish"),
        }
    }
}
