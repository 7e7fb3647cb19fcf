//! Submission draft store
//!
//! Single source of truth for the in-flight submission. Setters accept any
//! value; constraints are enforced when the workflow tries to move on.

use crate::types::{Category, DocumentFile, SubmissionMetadata, UploadResult};

/// One user edit to the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Author's full name
    FullName(String),
    /// Author's email address
    Email(String),
    /// Blog category (`None` clears the selection)
    Category(Option<Category>),
    /// Blog title
    Title(String),
    /// Selected document (`None` clears the selection)
    File(Option<DocumentFile>),
}

/// Server analysis, only available once an upload succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis<'a> {
    /// Words counted by the server
    pub word_count: u64,
    /// Plagiarism flag
    pub is_plagiarized: bool,
    /// Server-assigned identifier
    pub blog_id: &'a str,
}

/// In-progress submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Author's full name
    pub full_name: String,
    /// Author's email address
    pub email: String,
    /// Blog category
    pub category: Option<Category>,
    /// Blog title
    pub title: String,
    /// Selected document
    pub file: Option<DocumentFile>,
    /// Words counted by the server (0 = unknown)
    pub word_count: u64,
    /// Plagiarism flag (false = unknown until `blog_id` is set)
    pub is_plagiarized: bool,
    /// Server-assigned identifier
    pub blog_id: Option<String>,
    /// Public URL once live
    pub public_url: Option<String>,
}

impl Draft {
    /// Apply a user edit
    ///
    /// Choosing a different document drops results computed for the old one.
    pub fn set_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::FullName(v) => self.full_name = v,
            FieldUpdate::Email(v) => self.email = v,
            FieldUpdate::Category(v) => self.category = v,
            FieldUpdate::Title(v) => self.title = v,
            FieldUpdate::File(file) => {
                if file != self.file {
                    self.clear_results();
                }
                self.file = file;
            }
        }
    }

    /// Merge the server's analysis into the draft
    pub fn apply_upload_result(&mut self, result: &UploadResult) {
        self.word_count = result.word_count;
        self.is_plagiarized = result.is_plagiarized;
        self.blog_id = Some(result.blog_id.clone());
        self.public_url.clone_from(&result.public_url);
    }

    /// Record the URL returned by a separate publish call
    pub fn apply_published_url(&mut self, url: String) {
        self.public_url = Some(url);
    }

    /// Clear every field to its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Required text fields that are still empty, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.full_name.trim().is_empty() {
            missing.push("full name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        missing
    }

    /// Metadata for an upload, if every text field is filled in
    pub fn metadata(&self) -> Option<SubmissionMetadata> {
        if !self.missing_fields().is_empty() {
            return None;
        }
        Some(SubmissionMetadata {
            author_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            category: self.category?,
            title: self.title.trim().to_string(),
        })
    }

    /// Server analysis, `None` until an upload succeeded
    pub fn analysis(&self) -> Option<Analysis<'_>> {
        self.blog_id.as_deref().map(|blog_id| Analysis {
            word_count: self.word_count,
            is_plagiarized: self.is_plagiarized,
            blog_id,
        })
    }

    /// Whether every field is at its default
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn clear_results(&mut self) {
        self.word_count = 0;
        self.is_plagiarized = false;
        self.blog_id = None;
        self.public_url = None;
    }
}
