//! Gateway factory
//!
//! Creates the gateway the binary talks to.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::gateway::{BlogGateway, HttpGateway};
use std::sync::Arc;

/// Create a gateway from configuration
pub fn create_gateway(config: &ClientConfig) -> Result<Arc<dyn BlogGateway>> {
    Ok(Arc::new(HttpGateway::new(config)?))
}
