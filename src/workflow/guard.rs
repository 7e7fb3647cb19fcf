//! Transition guards
//!
//! Pure checks over the draft. Checks run in a fixed order so the same
//! draft always produces the same fault.

use crate::draft::Draft;
use crate::error::{Result, StateFault, ValidationFault};
use crate::types::{MIN_WORD_COUNT, ReviewOutcome};

/// Checks shared by every transition out of Submit
fn check_ready(draft: &Draft, upload_pending: bool) -> Result<()> {
    let missing = draft.missing_fields();
    if !missing.is_empty() {
        return Err(ValidationFault::MissingFields(missing).into());
    }
    if draft.file.is_none() {
        return Err(ValidationFault::MissingFile.into());
    }
    if upload_pending {
        return Err(StateFault::UploadInProgress.into());
    }
    Ok(())
}

/// Guard for Submit → Publish
pub fn check_publish(draft: &Draft, upload_pending: bool) -> Result<()> {
    check_ready(draft, upload_pending)?;

    let analysis = draft.analysis().ok_or(StateFault::NotAnalyzed)?;
    if analysis.word_count < MIN_WORD_COUNT {
        return Err(ValidationFault::TooShort {
            word_count: analysis.word_count,
            minimum: MIN_WORD_COUNT,
        }
        .into());
    }
    if analysis.is_plagiarized {
        return Err(ValidationFault::Plagiarized.into());
    }
    if draft.public_url.is_none() {
        return Err(StateFault::NotPublished.into());
    }
    Ok(())
}

/// Guard for Submit → Review
pub fn check_review(draft: &Draft, upload_pending: bool) -> Result<()> {
    check_ready(draft, upload_pending)?;
    if draft.blog_id.is_none() {
        return Err(StateFault::NotAnalyzed.into());
    }
    Ok(())
}

/// Why a review failed, if it did
pub fn outcome_fault(outcome: &ReviewOutcome, word_count: u64) -> Option<ValidationFault> {
    if !outcome.word_count_passed {
        Some(ValidationFault::TooShort {
            word_count,
            minimum: MIN_WORD_COUNT,
        })
    } else if !outcome.plagiarism_passed {
        Some(ValidationFault::Plagiarized)
    } else {
        None
    }
}
