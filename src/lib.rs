//! blogcheck - blog submission, review and publication
//!
//! Client library for a blog-review service: authors upload a document with
//! some metadata, the service counts words and checks originality, and
//! blogs that pass are published at a public URL.
//!
//! # Architecture
//!
//! - [`draft`] - the in-progress submission
//! - [`workflow`] - Submit → (Review) → Publish state machine
//! - [`gateway`] - HTTP client for the review service
//! - [`catalog`] - search, sort and dashboard figures over fetched lists
//! - [`config`] - endpoint and timing configuration
//!
//! # Example
//!
//! ```ignore
//! use blogcheck::config::ClientConfig;
//! use blogcheck::draft::FieldUpdate;
//! use blogcheck::gateway::create_gateway;
//! use blogcheck::workflow::Workflow;
//!
//! let config = ClientConfig::from_env(None)?;
//! let workflow = Workflow::new(create_gateway(&config)?, config.workflow_timing());
//! workflow.set_field(FieldUpdate::Title("Hello".into()))?;
//! // ...remaining fields...
//! workflow.upload().await?;
//! workflow.confirm().await?;
//! ```

pub mod catalog;
pub mod config;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod types;
pub mod workflow;

pub use error::{Error, Result};
