//! Bearer-token guard for the admin routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use tracing::warn;

use crate::api::error::ApiError;
use crate::api::AppState;

type HmacSha256 = Hmac<Sha256>;

const FINGERPRINT_KEY: &[u8] = b"gridiron-sync admin token";

/// Holds an HMAC fingerprint of the configured admin token so presented
/// tokens are compared in constant time. Without a configured token every
/// request is rejected.
#[derive(Clone)]
pub struct AdminAuth {
    fingerprint: Option<Vec<u8>>,
}

impl AdminAuth {
    pub fn new(token: Option<&SecretString>) -> Self {
        Self {
            fingerprint: token.map(|t| fingerprint_mac(t.expose_secret()).finalize().into_bytes().to_vec()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.fingerprint.is_some()
    }

    pub fn verify(&self, candidate: &str) -> bool {
        match &self.fingerprint {
            Some(expected) => fingerprint_mac(candidate).verify_slice(expected).is_ok(),
            None => false,
        }
    }
}

fn fingerprint_mac(token: &str) -> HmacSha256 {
    let mut mac = match HmacSha256::new_from_slice(FINGERPRINT_KEY) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    };
    mac.update(token.as_bytes());
    mac
}

pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.admin.is_enabled() {
        warn!("Admin request rejected: no admin token configured");
        return Err(ApiError::Unauthorized("admin access is not configured"));
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized("Authorization header required"))?;

    let token = header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::Unauthorized(
            "Authorization header must be in format: Bearer {token}",
        ))?;

    if !state.admin.verify(token) {
        warn!("Admin request rejected: invalid token");
        return Err(ApiError::Unauthorized("invalid token"));
    }

    Ok(next.run(request).await)
}
