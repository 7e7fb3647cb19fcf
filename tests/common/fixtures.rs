//! Test data factories for blogcheck types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use blogcheck::draft::FieldUpdate;
use blogcheck::types::{BlogStatus, BlogSummary, Category, DocumentFile, UploadResult};
use blogcheck::workflow::Workflow;
use chrono::{TimeZone, Utc};

/// Blog id returned by the default analysis
pub const BLOG_ID: &str = "blog-1";

/// Public URL returned by the default analysis
pub const PUBLIC_URL: &str = "https://blogs.example.com/posts/blog-1";

/// Server analysis for a document that the server already published
pub fn make_analysis(word_count: u64, is_plagiarized: bool) -> UploadResult {
    UploadResult {
        word_count,
        is_plagiarized,
        blog_id: BLOG_ID.to_string(),
        public_url: Some(PUBLIC_URL.to_string()),
    }
}

/// Server analysis with no public URL yet
pub fn make_unpublished_analysis(word_count: u64, is_plagiarized: bool) -> UploadResult {
    UploadResult {
        public_url: None,
        ..make_analysis(word_count, is_plagiarized)
    }
}

/// A small .docx document
pub fn make_document(name: &str) -> DocumentFile {
    DocumentFile::new(name, b"PK\x03\x04 fake docx body".to_vec())
}

/// Fill every form field and select a document
pub fn fill_form(workflow: &Workflow) {
    workflow
        .set_field(FieldUpdate::FullName("Ada Lovelace".to_string()))
        .unwrap();
    workflow
        .set_field(FieldUpdate::Email("ada@example.com".to_string()))
        .unwrap();
    workflow
        .set_field(FieldUpdate::Category(Some(Category::Technology)))
        .unwrap();
    workflow
        .set_field(FieldUpdate::Title("Notes on the Analytical Engine".to_string()))
        .unwrap();
    workflow
        .set_field(FieldUpdate::File(Some(make_document("engine.docx"))))
        .unwrap();
}

/// A blog summary as returned by the listing endpoints
pub fn make_blog(id: &str, title: &str, category: &str, status: BlogStatus, day: u32) -> BlogSummary {
    BlogSummary {
        id: id.to_string(),
        title: title.to_string(),
        author_name: "Ada Lovelace".to_string(),
        category: category.to_string(),
        published_at: Some(Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap()),
        created_at: None,
        status,
        word_count: 1_200,
        content: None,
        public_url: None,
    }
}
