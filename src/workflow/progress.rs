//! Progress callback trait for interface-agnostic updates
//!
//! This trait allows different front ends (CLI, web server, etc.) to follow
//! the workflow as it moves between stages.

use crate::error::Error;
use crate::types::{DocumentFile, UploadResult};
use crate::workflow::{ReviewCheck, WorkflowState};
use async_trait::async_trait;

/// Progress callback trait
///
/// Implement this trait to receive progress updates from a [`Workflow`].
/// - CLI implementations can print to terminal
/// - Web servers can send SSE or WebSocket messages
///
/// [`Workflow`]: crate::workflow::Workflow
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called after the workflow enters a new stage
    async fn on_state(&self, state: WorkflowState);

    /// Called when a document starts uploading
    async fn on_upload_started(&self, file: &DocumentFile);

    /// Called when the server returned its analysis
    async fn on_upload_finished(&self, result: &UploadResult);

    /// Called when one of the simulated review checks resolves
    async fn on_check(&self, check: ReviewCheck, passed: bool);

    /// Called when the blog is live
    async fn on_published(&self, url: &str);

    /// Called when the workflow cleared the draft after publishing
    async fn on_reset(&self);

    /// Called when a fault is surfaced to the user
    async fn on_error(&self, error: &Error);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_state(&self, _state: WorkflowState) {}
    async fn on_upload_started(&self, _file: &DocumentFile) {}
    async fn on_upload_finished(&self, _result: &UploadResult) {}
    async fn on_check(&self, _check: ReviewCheck, _passed: bool) {}
    async fn on_published(&self, _url: &str) {}
    async fn on_reset(&self) {}
    async fn on_error(&self, _error: &Error) {}
}
