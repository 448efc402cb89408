//! Remote data source adapter for the SportsData.io NFL API.
//!
//! [`Transport`] is the single outbound seam: it turns an endpoint path into a
//! raw response body. [`HttpTransport`] is the production implementation
//! (rate limited, size capped); tests substitute their own. [`SportsDataClient`]
//! layers typed decoding on top of any transport.

pub mod client;
pub mod endpoints;
pub mod http;

use async_trait::async_trait;
use thiserror::Error;

pub use client::SportsDataClient;
pub use endpoints::Endpoint;
pub use http::HttpTransport;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("transport error calling {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    #[error("upstream returned HTTP {status} for {endpoint}")]
    UpstreamStatus { endpoint: String, status: u16 },

    #[error("failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    #[error("response from {endpoint} exceeds {limit} bytes")]
    PayloadTooLarge { endpoint: String, limit: usize },
}

impl SourceError {
    pub fn endpoint(&self) -> &str {
        match self {
            SourceError::Transport { endpoint, .. }
            | SourceError::UpstreamStatus { endpoint, .. }
            | SourceError::Decode { endpoint, .. }
            | SourceError::PayloadTooLarge { endpoint, .. } => endpoint,
        }
    }
}

/// Performs one outbound GET for an endpoint path (e.g. `/scores/json/TeamsBasic`)
/// and returns the raw body. Implementations never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Vec<u8>, SourceError>;
}
