use thiserror::Error;

/// Top-level error type for the `wiser-api` crate.
///
/// Covers every failure mode of the hub's local API: transport, timeouts,
/// malformed payloads, and HTTP-level rejections. `wiser-core` decides which
/// of these are recoverable and maps the rest into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Authentication ──────────────────────────────────────────────
    /// The hub rejected the shared secret.
    #[error("Hub rejected the shared secret (HTTP 401)")]
    Unauthorized,

    /// The shared secret cannot be sent as an HTTP header.
    #[error("Invalid shared secret: {0}")]
    InvalidSecret(String),

    // ── Hub ─────────────────────────────────────────────────────────
    /// Non-success HTTP status from the hub.
    #[error("Hub error (HTTP {status}): {message}")]
    Hub { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Requests ────────────────────────────────────────────────────
    /// A setter argument the hub would reject (e.g. out-of-range setpoint).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Returns `true` for failures that a later refresh can be expected to
    /// clear on its own: timeouts and payloads that were not the JSON we
    /// expected (the hub answers with partial documents while it updates).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_decode(),
            Self::Timeout { .. } | Self::Deserialization { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn timeouts_and_bad_payloads_are_transient() {
        assert!(Error::Timeout { timeout_secs: 5 }.is_transient());
        assert!(
            Error::Deserialization {
                message: "expected value".into(),
                body: "<html>".into(),
            }
            .is_transient()
        );
    }

    #[test]
    fn rejections_are_not_transient() {
        assert!(!Error::Unauthorized.is_transient());
        assert!(!Error::InvalidArgument("SetPoint 99".into()).is_transient());
        assert!(
            !Error::Hub {
                status: 500,
                message: "boom".into(),
            }
            .is_transient()
        );
    }
}
