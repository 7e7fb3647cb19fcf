//! HTTP gateway implementation

use crate::config::ClientConfig;
use crate::error::{Error, Result, StateFault};
use crate::gateway::BlogGateway;
use crate::types::{BlogSummary, DocumentFile, SubmissionMetadata, UploadResult, id_string};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Blog service client using reqwest
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    word_count: Option<u64>,
    is_plagiarized: Option<bool>,
    blog_id: Option<Value>,
    published_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    published_url: Option<String>,
}

impl HttpGateway {
    /// Create a new gateway for the configured service
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_list(&self, path: &str) -> Result<Vec<BlogSummary>> {
        let url = self.api_url(path);
        debug!(%url, "fetching blog list");
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }
}

#[async_trait]
impl BlogGateway for HttpGateway {
    async fn upload(
        &self,
        file: &DocumentFile,
        metadata: &SubmissionMetadata,
    ) -> Result<UploadResult> {
        let url = self.api_url("/submit");
        debug!(%url, file = %file.file_name, bytes = file.len(), "uploading document");

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| Error::Internal(format!("Invalid content type: {e}")))?;

        let form = Form::new()
            .part("file", part)
            .text("authorName", metadata.author_name.clone())
            .text("email", metadata.email.clone())
            .text("category", metadata.category.as_str())
            .text("title", metadata.title.clone());

        let response = self.client.post(&url).multipart(form).send().await?;
        let body: SubmitResponse = read_json(response).await?;

        let word_count = body
            .word_count
            .ok_or_else(|| missing_field("wordCount"))?;
        let is_plagiarized = body
            .is_plagiarized
            .ok_or_else(|| missing_field("isPlagiarized"))?;
        let blog_id = body
            .blog_id
            .as_ref()
            .and_then(id_string)
            .ok_or_else(|| missing_field("blogId"))?;

        Ok(UploadResult {
            word_count,
            is_plagiarized,
            blog_id,
            public_url: body.published_url.filter(|u| !u.is_empty()),
        })
    }

    async fn publish(&self, blog_id: &str) -> Result<String> {
        if blog_id.trim().is_empty() {
            return Err(StateFault::MissingBlogId.into());
        }

        let url = self.api_url(&format!("/{}/publish", urlencoding::encode(blog_id)));
        debug!(%url, "publishing blog");

        let response = self.client.post(&url).send().await?;
        let body: PublishResponse = read_json(response).await?;
        body.published_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| missing_field("publishedUrl"))
    }

    async fn list_published(&self) -> Result<Vec<BlogSummary>> {
        self.get_list("/published").await
    }

    async fn list_all(&self) -> Result<Vec<BlogSummary>> {
        self.get_list("/all").await
    }

    async fn get_blog(&self, id: &str) -> Result<BlogSummary> {
        let url = self.api_url(&format!("/{}", urlencoding::encode(id)));
        debug!(%url, "fetching blog");

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::BlogNotFound(id.to_string()));
        }
        read_json(response).await
    }
}

/// Decode a 200 response, or turn anything else into a server fault
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().to_string();
    let body = response.bytes().await?;

    if status != StatusCode::OK {
        let message = extract_message(&body)
            .or_else(|| status.canonical_reason().map(ToString::to_string));
        warn!(%url, status = status.as_u16(), ?message, "request failed");
        return Err(Error::Server {
            status: status.as_u16(),
            message,
        });
    }

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::MalformedResponse("empty response body".to_string()));
    }

    Ok(serde_json::from_slice(&body)?)
}

/// Best-effort message from a JSON error body (`message`, then `error`)
fn extract_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"].iter().find_map(|key| match value.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    })
}

fn missing_field(field: &str) -> Error {
    Error::MalformedResponse(format!("missing field `{field}`"))
}
