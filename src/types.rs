//! Core types for blogcheck

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Minimum number of words a blog needs to be accepted
pub const MIN_WORD_COUNT: u64 = 800;

/// Blog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Technology
    Technology,
    /// Business
    Business,
    /// Lifestyle
    Lifestyle,
    /// Health
    Health,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Self; 4] = [
        Self::Technology,
        Self::Business,
        Self::Lifestyle,
        Self::Health,
    ];

    /// Wire name of the category
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Business => "business",
            Self::Lifestyle => "lifestyle",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                format!("unknown category '{s}' (expected technology, business, lifestyle or health)")
            })
    }
}

/// Review status of a blog on the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    /// Live and publicly reachable
    Published,
    /// Still under review
    Pending,
    /// Failed review
    Rejected,
}

impl fmt::Display for BlogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Pending => write!(f, "pending"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// A document selected for upload
///
/// The client never looks inside the bytes; format checks, word counting
/// and plagiarism scoring all happen on the server.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// File name sent with the multipart part
    pub file_name: String,
    /// MIME type sent with the multipart part
    pub content_type: String,
    /// Raw document bytes
    pub bytes: Vec<u8>,
}

impl DocumentFile {
    /// Wrap in-memory bytes, inferring the content type from the file name
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a document from disk
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "document".to_string(), |n| n.to_string_lossy().into_owned());
        Ok(Self::new(file_name, bytes))
    }

    /// Size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the document is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Bytes are omitted so debug logs stay readable.
impl fmt::Debug for DocumentFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());
    match ext.as_deref() {
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("doc") => "application/msword",
        _ => "application/octet-stream",
    }
}

/// Text fields sent alongside the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionMetadata {
    /// Author's full name
    pub author_name: String,
    /// Author's email address
    pub email: String,
    /// Blog category
    pub category: Category,
    /// Blog title
    pub title: String,
}

/// Analysis returned by the server for an uploaded document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Words counted by the server
    pub word_count: u64,
    /// Whether the plagiarism check flagged the document
    pub is_plagiarized: bool,
    /// Server-assigned identifier
    pub blog_id: String,
    /// Public URL, present when the server already published the blog
    pub public_url: Option<String>,
}

/// Result of the simulated review stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// Both checks passed (cleared again if publishing then failed)
    pub passed: bool,
    /// Word count met the minimum
    pub word_count_passed: bool,
    /// No plagiarism detected
    pub plagiarism_passed: bool,
}

/// Read-only projection of a blog tracked by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogSummary {
    /// Server identifier (string or numeric on the wire)
    #[serde(alias = "_id", deserialize_with = "deserialize_id")]
    pub id: String,
    /// Blog title
    pub title: String,
    /// Author's name
    #[serde(default)]
    pub author_name: String,
    /// Category name as stored by the server
    #[serde(default)]
    pub category: String,
    /// When the blog went live
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    /// When the blog was submitted
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Review status
    pub status: BlogStatus,
    /// Words counted by the server
    #[serde(default)]
    pub word_count: u64,
    /// Full text, only present on detail responses and some listings
    #[serde(default)]
    pub content: Option<String>,
    /// Public URL once live
    #[serde(default, alias = "publishedUrl")]
    pub public_url: Option<String>,
}

impl BlogSummary {
    /// Date used for ordering: publication date, else submission date
    pub fn sort_date(&self) -> Option<DateTime<Utc>> {
        self.published_at.or(self.created_at)
    }
}

/// Identifier as text, accepting the numeric ids some backends emit
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_string(&value).ok_or_else(|| de::Error::custom(format!("invalid blog id: {value}")))
}
