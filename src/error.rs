//! Error types for blogcheck
//!
//! Every fault is caught where it happens and turned into one of these
//! variants. [`Error::user_message`] renders the inline text a front end
//! shows next to the control that failed.

use crate::workflow::WorkflowState;
use thiserror::Error;

/// Message shown when the server gave no usable explanation
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit blog. Please try again.";

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Client-side check failed, no network call made
    Validation,
    /// Network unreachable, timeout, aborted request
    Transport,
    /// Non-success status or malformed body
    Server,
    /// Operation attempted out of sequence
    State,
    /// Configuration, IO and internal errors
    Other,
}

/// Input problems detected before anything is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFault {
    /// One or more required text fields are empty
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// No document selected
    #[error("Please select a blog document to upload")]
    MissingFile,

    /// Document is below the minimum word count
    #[error("Your blog has {word_count} words; at least {minimum} are required")]
    TooShort {
        /// Words counted by the server
        word_count: u64,
        /// Required minimum
        minimum: u64,
    },

    /// Server flagged the document as plagiarized
    #[error("Plagiarism was detected in your content. Please submit original work")]
    Plagiarized,
}

/// Failures below the HTTP status layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportFault {
    /// The call did not finish in time
    #[error("The request timed out. Please check your connection and try again")]
    Timeout,

    /// The server could not be reached
    #[error("Could not reach the server: {0}")]
    Connect(String),

    /// The request failed or was aborted mid-flight
    #[error("Request failed: {0}")]
    Request(String),
}

/// Operations attempted out of sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateFault {
    /// An upload for this draft is still outstanding
    #[error("An upload is already in progress")]
    UploadInProgress,

    /// The document has not been analyzed yet
    #[error("Upload your document before submitting")]
    NotAnalyzed,

    /// The server analyzed the document but did not publish it
    #[error("The server did not publish this submission")]
    NotPublished,

    /// Publication requested without a blog id
    #[error("Cannot publish before a successful upload")]
    MissingBlogId,

    /// The draft was reset or abandoned while a call was in flight
    #[error("The submission was reset before the server responded")]
    DraftReset,

    /// The workflow is in a different stage
    #[error("Expected the {expected} stage but the workflow is in {actual}")]
    WrongState {
        /// Stage the operation needs
        expected: WorkflowState,
        /// Stage the workflow is in
        actual: WorkflowState,
    },
}

/// Main error type
#[derive(Debug, Error)]
pub enum Error {
    /// Client-side validation failure
    #[error(transparent)]
    Validation(#[from] ValidationFault),

    /// Network-level failure
    #[error(transparent)]
    Transport(#[from] TransportFault),

    /// Non-success response from the service
    #[error("Server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server {
        /// HTTP status code
        status: u16,
        /// Message extracted from the body, or the status text
        message: Option<String>,
    },

    /// Response body missing an expected field or not valid JSON
    #[error("Malformed server response: {0}")]
    MalformedResponse(String),

    /// Blog does not exist
    #[error("Blog not found: {0}")]
    BlogNotFound(String),

    /// Out-of-sequence operation
    #[error(transparent)]
    State(#[from] StateFault),

    /// Bad or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Classify this error
    pub const fn kind(&self) -> FaultKind {
        match self {
            Self::Validation(_) => FaultKind::Validation,
            Self::Transport(_) => FaultKind::Transport,
            Self::Server { .. } | Self::MalformedResponse(_) | Self::BlogNotFound(_) => {
                FaultKind::Server
            }
            Self::State(_) => FaultKind::State,
            Self::Config(_) | Self::Io(_) | Self::Internal(_) => FaultKind::Other,
        }
    }

    /// Text to present inline next to the failing control
    pub fn user_message(&self) -> String {
        match self {
            Self::Server {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => format!("{msg}. {GENERIC_FAILURE_MESSAGE}"),
            Self::Server { .. } | Self::MalformedResponse(_) => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(TransportFault::Timeout)
        } else if err.is_connect() {
            Self::Transport(TransportFault::Connect(err.to_string()))
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                message: status.canonical_reason().map(ToString::to_string),
            }
        } else {
            Self::Transport(TransportFault::Request(err.to_string()))
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_message_lists_fields() {
        let err = Error::from(ValidationFault::MissingFields(vec!["email", "title"]));
        assert_eq!(err.kind(), FaultKind::Validation);
        assert_eq!(
            err.user_message(),
            "Please fill in all required fields: email, title"
        );
    }

    #[test]
    fn test_server_message_keeps_extracted_text() {
        let err = Error::Server {
            status: 400,
            message: Some("Only .doc or .docx files are accepted".to_string()),
        };
        assert_eq!(err.kind(), FaultKind::Server);
        assert!(err.user_message().starts_with("Only .doc or .docx files are accepted"));
        assert!(err.user_message().ends_with(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn test_server_without_message_uses_fallback() {
        let err = Error::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);

        let err = Error::MalformedResponse("missing field `blogId`".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn test_state_fault_kind() {
        let err = Error::from(StateFault::UploadInProgress);
        assert_eq!(err.kind(), FaultKind::State);
        assert_eq!(err.user_message(), "An upload is already in progress");
    }

    #[test]
    fn test_timeout_is_transport() {
        let err = Error::from(TransportFault::Timeout);
        assert_eq!(err.kind(), FaultKind::Transport);
    }
}
