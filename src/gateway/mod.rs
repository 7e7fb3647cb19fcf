//! Gateway to the blog service
//!
//! The only bridge between the client and the backend. Analysis, persistence
//! and publication all happen on the other side of this trait.

mod factory;
mod http;

pub use factory::create_gateway;
pub use http::HttpGateway;

use crate::error::Result;
use crate::types::{BlogSummary, DocumentFile, SubmissionMetadata, UploadResult};
use async_trait::async_trait;

/// Blog service operations
///
/// Abstracts the HTTP backend so the workflow can run against an in-memory
/// fake in tests.
#[async_trait]
pub trait BlogGateway: Send + Sync {
    /// Upload a document with its metadata for analysis
    async fn upload(
        &self,
        file: &DocumentFile,
        metadata: &SubmissionMetadata,
    ) -> Result<UploadResult>;

    /// Publish an analyzed blog, returning its public URL
    async fn publish(&self, blog_id: &str) -> Result<String>;

    /// Blogs that are live
    async fn list_published(&self) -> Result<Vec<BlogSummary>>;

    /// Blogs in every status
    async fn list_all(&self) -> Result<Vec<BlogSummary>>;

    /// A single blog with its full content
    async fn get_blog(&self, id: &str) -> Result<BlogSummary>;
}
