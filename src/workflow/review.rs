//! Simulated review stage
//!
//! The server has already computed the word count and plagiarism flag; the
//! review stage only replays them as two timed checks.

use crate::types::{MIN_WORD_COUNT, ReviewOutcome};
use crate::workflow::ProgressCallback;
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;

/// Delay before each simulated check resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewDelays {
    /// Word-count check
    pub word_count: Duration,
    /// Plagiarism check
    pub plagiarism: Duration,
}

impl Default for ReviewDelays {
    fn default() -> Self {
        Self {
            word_count: Duration::from_secs(2),
            plagiarism: Duration::from_secs(3),
        }
    }
}

/// One of the review checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewCheck {
    /// Minimum word count
    WordCount,
    /// Originality
    Plagiarism,
}

impl fmt::Display for ReviewCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WordCount => write!(f, "Word count check"),
            Self::Plagiarism => write!(f, "Plagiarism check"),
        }
    }
}

/// Run both checks concurrently and combine them once both resolved
pub async fn run_review(
    word_count: u64,
    is_plagiarized: bool,
    delays: ReviewDelays,
    progress: &dyn ProgressCallback,
) -> ReviewOutcome {
    let word_count_check = async {
        sleep(delays.word_count).await;
        let passed = word_count >= MIN_WORD_COUNT;
        progress.on_check(ReviewCheck::WordCount, passed).await;
        passed
    };
    let plagiarism_check = async {
        sleep(delays.plagiarism).await;
        let passed = !is_plagiarized;
        progress.on_check(ReviewCheck::Plagiarism, passed).await;
        passed
    };

    let (word_count_passed, plagiarism_passed) = tokio::join!(word_count_check, plagiarism_check);

    ReviewOutcome {
        passed: word_count_passed && plagiarism_passed,
        word_count_passed,
        plagiarism_passed,
    }
}
