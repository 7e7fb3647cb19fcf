//! CLI progress callback with styled output and an upload spinner

use crate::cli::style::{Stream, Stylize, check, cross, hyperlink_url, spinner_style};
use anstream::println;
use async_trait::async_trait;
use blogcheck::error::Error;
use blogcheck::types::{DocumentFile, UploadResult};
use blogcheck::workflow::{ProgressCallback, ReviewCheck, WorkflowState};
use indicatif::ProgressBar;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Prints workflow progress to stdout
///
/// A spinner runs while the document uploads; faults only stop it, the
/// caller prints the message.
#[derive(Default)]
pub struct CliProgress {
    spinner: Mutex<Option<ProgressBar>>,
}

impl CliProgress {
    /// Create a progress printer with no spinner running
    pub const fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn start_spinner(&self, message: String) {
        let bar = ProgressBar::new_spinner();
        bar.set_style(spinner_style());
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(80));
        if let Some(old) = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(bar)
        {
            old.finish_and_clear();
        }
    }

    fn stop_spinner(&self) {
        if let Some(bar) = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            bar.finish_and_clear();
        }
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_state(&self, state: WorkflowState) {
        if state == WorkflowState::Review {
            println!("{}...", "Reviewing".emphasis());
        }
    }

    async fn on_upload_started(&self, file: &DocumentFile) {
        self.start_spinner(format!("Uploading {}...", file.file_name.accent()));
    }

    async fn on_upload_finished(&self, result: &UploadResult) {
        self.stop_spinner();
        println!("{} Uploaded {}", check(), result.blog_id.muted());
    }

    async fn on_check(&self, check_kind: ReviewCheck, passed: bool) {
        if passed {
            println!("  {} {}", check(), check_kind);
        } else {
            println!("  {} {}", cross().for_stdout(), check_kind.to_string().error().for_stdout());
        }
    }

    async fn on_published(&self, url: &str) {
        println!("{} Published", check());
        if !url.is_empty() {
            println!("  {}", hyperlink_url(Stream::Stdout, url));
        }
    }

    async fn on_reset(&self) {}

    async fn on_error(&self, _error: &Error) {
        self.stop_spinner();
    }
}
