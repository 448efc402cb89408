use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use crate::config::SportsDataConfig;
use crate::source::{SourceError, Transport};

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const USER_AGENT: &str = concat!("gridiron-sync/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed transport. All callers sharing one instance are serialized
/// through its limiter: at most one request starts per configured delay.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    limiter: Option<Arc<Limiter>>,
    max_response_bytes: usize,
}

impl HttpTransport {
    pub fn new(config: &SportsDataConfig, api_key: SecretString) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            limiter: create_rate_limiter(config.call_delay()),
            max_response_bytes: config.max_response_bytes,
        })
    }

    async fn rate_limit(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }

    async fn read_body(
        &self,
        path: &str,
        mut response: reqwest::Response,
    ) -> Result<Vec<u8>, SourceError> {
        let limit = self.max_response_bytes;
        let too_large = || SourceError::PayloadTooLarge {
            endpoint: path.to_string(),
            limit,
        };

        if response.content_length().is_some_and(|len| len as usize > limit) {
            return Err(too_large());
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| SourceError::Transport {
            endpoint: path.to_string(),
            message: e.without_url().to_string(),
        })? {
            if body.len() + chunk.len() > limit {
                return Err(too_large());
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self), fields(endpoint = %path))]
    async fn get(&self, path: &str) -> Result<Vec<u8>, SourceError> {
        self.rate_limit().await;

        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Calling SportsData API");

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| SourceError::Transport {
                endpoint: path.to_string(),
                // the URL carries the api key
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UpstreamStatus {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        self.read_body(path, response).await
    }
}

fn create_rate_limiter(delay: Duration) -> Option<Arc<Limiter>> {
    Quota::with_period(delay).map(|quota| Arc::new(RateLimiter::direct(quota)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_disables_limiter() {
        assert!(create_rate_limiter(Duration::ZERO).is_none());
        assert!(create_rate_limiter(Duration::from_millis(50)).is_some());
    }
}
