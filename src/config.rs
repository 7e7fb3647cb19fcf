//! Client configuration
//!
//! Read once at start-up and injected into the gateway and workflow.
//! Library code never touches the environment on its own.

use crate::error::{Error, Result};
use crate::workflow::{ReviewDelays, WorkflowTiming};
use std::time::Duration;
use url::Url;

/// Environment variable holding the service base URL
pub const API_URL_VAR: &str = "BLOGCHECK_API_URL";
/// Environment variable overriding the request timeout (seconds)
pub const TIMEOUT_VAR: &str = "BLOGCHECK_TIMEOUT_SECS";
/// Environment variable overriding the Publish dwell time (seconds)
pub const RESET_VAR: &str = "BLOGCHECK_RESET_SECS";

/// Default bound on every network call
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Default time the Publish stage stays visible before the workflow resets
pub const DEFAULT_RESET_SECS: u64 = 5;

/// Configuration for talking to the blog service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the blog endpoints (e.g. `https://host/api/blogs`)
    pub api_base_url: Url,
    /// Timeout applied to every request, including uploads
    pub request_timeout: Duration,
    /// Dwell time in the Publish stage before the automatic reset
    pub reset_delay: Duration,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the base URL
    pub fn new(api_base_url: &str) -> Result<Self> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            reset_delay: Duration::from_secs(DEFAULT_RESET_SECS),
        })
    }

    /// Load from process environment
    ///
    /// `api_url_override` (e.g. from a command-line flag) wins over
    /// `BLOGCHECK_API_URL`.
    pub fn from_env(api_url_override: Option<&str>) -> Result<Self> {
        Self::from_lookup(api_url_override, |key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(api_url_override: Option<&str>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match api_url_override {
            Some(url) => url.to_string(),
            None => lookup(API_URL_VAR).ok_or_else(|| {
                Error::Config(format!("No API URL configured. Set {API_URL_VAR} or pass --api-url"))
            })?,
        };

        let mut config = Self::new(&base)?;
        if let Some(secs) = parse_secs(&lookup, TIMEOUT_VAR)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_secs(&lookup, RESET_VAR)? {
            config.reset_delay = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Workflow timing derived from this configuration
    pub fn workflow_timing(&self) -> WorkflowTiming {
        WorkflowTiming {
            upload_timeout: self.request_timeout,
            reset_delay: self.reset_delay,
            review: ReviewDelays::default(),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::Config(format!("Invalid API URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "Invalid API URL '{raw}': unsupported scheme '{other}'"
        ))),
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| {
            v.trim()
                .parse::<u64>()
                .map_err(|_| Error::Config(format!("{key} must be a whole number of seconds, got '{v}'")))
        })
        .transpose()
}
