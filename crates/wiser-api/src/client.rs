// Hub HTTP client
//
// Wraps `reqwest::Client` with hub URL construction, response classification
// and the cached domain document. Setter endpoints live in `commands.rs` as
// inherent methods to keep this module focused on transport mechanics.

use std::time::Duration;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{HubDomain, Room, System};
use crate::transport::TransportConfig;

/// Raw HTTP client for a single heat hub.
///
/// Holds the last successfully fetched [`HubDomain`]. Reads from the cache
/// never touch the network; only [`refresh_data`](Self::refresh_data)
/// replaces it, and a failed refresh leaves the previous document in place.
pub struct WiserClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    domain: Option<HubDomain>,
}

impl WiserClient {
    /// Create a client for the hub at `host` (an address such as
    /// `192.168.1.20` or `wiserheat.local:80`).
    pub fn new(
        host: &str,
        secret: Option<&SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("http://{}/", host.trim_end_matches('/')))?;
        let http = transport.build_client(secret)?;
        Ok(Self {
            http,
            base_url,
            timeout: transport.timeout,
            domain: None,
        })
    }

    /// The hub base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Cached reads ─────────────────────────────────────────────────

    /// The domain document from the last successful refresh.
    pub fn domain(&self) -> Option<&HubDomain> {
        self.domain.as_ref()
    }

    /// Rooms in hub order. Empty until the first successful refresh.
    pub fn rooms(&self) -> &[Room] {
        self.domain.as_ref().map_or(&[], |d| d.room.as_slice())
    }

    pub fn room(&self, id: u32) -> Option<&Room> {
        self.domain.as_ref()?.room(id)
    }

    pub fn system(&self) -> Option<&System> {
        self.domain.as_ref()?.system.as_ref()
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Re-fetch the whole domain document.
    ///
    /// `GET /data/domain/`
    pub async fn refresh_data(&mut self) -> Result<&HubDomain, Error> {
        let url = self.domain_url("")?;
        let domain: HubDomain = self.get(url).await?;
        debug!(
            rooms = domain.room.len(),
            devices = domain.device.len(),
            "hub domain refreshed"
        );
        Ok(self.domain.insert(domain))
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/data/domain/{path}`.
    pub(crate) fn domain_url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join("data/domain/")?.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await.map_err(|e| self.map_send_error(e))?;
        let body = self.read_body(resp).await?;

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }

    /// Send a PATCH with a JSON body. The hub echoes the patched entity,
    /// which we don't need -- only the status matters.
    pub(crate) async fn patch(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("PATCH {}", url);
        let resp = self
            .http
            .patch(url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let body = self.read_body(resp).await?;
        trace!(len = body.len(), "PATCH acknowledged");
        Ok(())
    }

    /// Check the status and read the full body.
    async fn read_body(&self, resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Hub {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        resp.text().await.map_err(|e| self.map_send_error(e))
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}
