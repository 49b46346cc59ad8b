// Shared transport configuration for building the hub's reqwest::Client.
//
// Every hub request carries the shared secret as a `SECRET` header, so the
// header is baked into the client as a default rather than added per call.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Header the hub reads the shared secret from (`SECRET` on the wire;
/// header names are case-insensitive and `http` stores them lowercase).
pub const SECRET_HEADER: &str = "secret";

/// Hubs answer slowly while they rebuild their domain document; anything
/// beyond a few seconds means the hub is unreachable.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("wiser/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` that authenticates every request with
    /// `secret`. A missing secret sends no `SECRET` header at all.
    pub fn build_client(&self, secret: Option<&SecretString>) -> Result<reqwest::Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json;charset=UTF-8"),
        );

        if let Some(secret) = secret {
            let mut value = HeaderValue::from_str(secret.expose_secret())
                .map_err(|e| Error::InvalidSecret(e.to_string()))?;
            value.set_sensitive(true);
            headers.insert(HeaderName::from_static(SECRET_HEADER), value);
        }

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
