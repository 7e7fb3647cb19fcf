//! Mock review service for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use blogcheck::error::{Error, Result, StateFault, TransportFault};
use blogcheck::gateway::BlogGateway;
use blogcheck::types::{BlogSummary, DocumentFile, SubmissionMetadata, UploadResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Call record for `upload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCall {
    pub file_name: String,
    pub metadata: SubmissionMetadata,
}

/// Injected failure
#[derive(Debug, Clone)]
enum Failure {
    Server { status: u16, message: Option<String> },
    Connect(String),
}

impl Failure {
    fn to_error(&self) -> Error {
        match self {
            Self::Server { status, message } => Error::Server {
                status: *status,
                message: message.clone(),
            },
            Self::Connect(msg) => TransportFault::Connect(msg.clone()).into(),
        }
    }
}

/// In-memory review service
///
/// Features:
/// - Configurable analysis returned by `upload`
/// - Call tracking for verification
/// - Error injection for failure path testing
/// - A gate that holds uploads open until released, and a hang mode
pub struct MockGateway {
    upload_response: Mutex<UploadResult>,
    publish_url: Mutex<String>,
    published: Mutex<Vec<BlogSummary>>,
    all: Mutex<Vec<BlogSummary>>,
    // Call tracking
    upload_calls: Mutex<Vec<UploadCall>>,
    publish_calls: Mutex<Vec<String>>,
    // Error injection
    error_on_upload: Mutex<Option<Failure>>,
    error_on_publish: Mutex<Option<Failure>>,
    upload_gate: Mutex<Option<Arc<Notify>>>,
    hang_uploads: AtomicBool,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::with_upload(crate::common::fixtures::make_analysis(950, false))
    }
}

impl MockGateway {
    /// Create a mock whose uploads return `result`
    pub fn with_upload(result: UploadResult) -> Self {
        Self {
            upload_response: Mutex::new(result),
            publish_url: Mutex::new("https://blogs.example.com/posts/blog-1".to_string()),
            published: Mutex::new(Vec::new()),
            all: Mutex::new(Vec::new()),
            upload_calls: Mutex::new(Vec::new()),
            publish_calls: Mutex::new(Vec::new()),
            error_on_upload: Mutex::new(None),
            error_on_publish: Mutex::new(None),
            upload_gate: Mutex::new(None),
            hang_uploads: AtomicBool::new(false),
        }
    }

    // === Response configuration ===

    /// Set what the next uploads return
    pub fn set_upload_response(&self, result: UploadResult) {
        *self.upload_response.lock().unwrap() = result;
    }

    /// Set the lists returned by `list_published` and `list_all`
    pub fn set_blogs(&self, published: Vec<BlogSummary>, all: Vec<BlogSummary>) {
        *self.published.lock().unwrap() = published;
        *self.all.lock().unwrap() = all;
    }

    // === Error injection methods ===

    /// Make `upload` answer with a non-success status
    pub fn fail_upload(&self, status: u16, message: Option<&str>) {
        *self.error_on_upload.lock().unwrap() = Some(Failure::Server {
            status,
            message: message.map(ToString::to_string),
        });
    }

    /// Make `upload` fail before reaching the service
    pub fn fail_upload_connect(&self, msg: &str) {
        *self.error_on_upload.lock().unwrap() = Some(Failure::Connect(msg.to_string()));
    }

    /// Make `publish` answer with a non-success status
    pub fn fail_publish(&self, status: u16, message: Option<&str>) {
        *self.error_on_publish.lock().unwrap() = Some(Failure::Server {
            status,
            message: message.map(ToString::to_string),
        });
    }

    /// Remove every injected failure
    pub fn clear_failures(&self) {
        *self.error_on_upload.lock().unwrap() = None;
        *self.error_on_publish.lock().unwrap() = None;
    }

    /// Hold every upload open until the returned handle is notified
    pub fn hold_uploads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.upload_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Let later uploads through without waiting on a gate
    pub fn release_uploads(&self) {
        *self.upload_gate.lock().unwrap() = None;
    }

    /// Make uploads never complete
    pub fn hang_uploads(&self) {
        self.hang_uploads.store(true, Ordering::SeqCst);
    }

    // === Call verification methods ===

    /// Get all `upload` calls
    pub fn get_upload_calls(&self) -> Vec<UploadCall> {
        self.upload_calls.lock().unwrap().clone()
    }

    /// Get all blog ids passed to `publish`
    pub fn get_publish_calls(&self) -> Vec<String> {
        self.publish_calls.lock().unwrap().clone()
    }

    /// Yield until `count` uploads have reached the mock
    pub async fn wait_for_uploads(&self, count: usize) {
        while self.upload_calls.lock().unwrap().len() < count {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl BlogGateway for MockGateway {
    async fn upload(
        &self,
        file: &DocumentFile,
        metadata: &SubmissionMetadata,
    ) -> Result<UploadResult> {
        self.upload_calls.lock().unwrap().push(UploadCall {
            file_name: file.file_name.clone(),
            metadata: metadata.clone(),
        });

        if self.hang_uploads.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }

        let gate = self.upload_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let failure = self.error_on_upload.lock().unwrap().clone();
        if let Some(failure) = failure {
            return Err(failure.to_error());
        }

        Ok(self.upload_response.lock().unwrap().clone())
    }

    async fn publish(&self, blog_id: &str) -> Result<String> {
        if blog_id.is_empty() {
            return Err(StateFault::MissingBlogId.into());
        }
        self.publish_calls.lock().unwrap().push(blog_id.to_string());

        let failure = self.error_on_publish.lock().unwrap().clone();
        if let Some(failure) = failure {
            return Err(failure.to_error());
        }

        Ok(self.publish_url.lock().unwrap().clone())
    }

    async fn list_published(&self) -> Result<Vec<BlogSummary>> {
        Ok(self.published.lock().unwrap().clone())
    }

    async fn list_all(&self) -> Result<Vec<BlogSummary>> {
        Ok(self.all.lock().unwrap().clone())
    }

    async fn get_blog(&self, id: &str) -> Result<BlogSummary> {
        self.all
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| Error::BlogNotFound(id.to_string()))
    }
}
