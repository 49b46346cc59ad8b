// ── Core error types ──
//
// User-facing errors from wiser-core. Consumers never see reqwest errors
// or JSON parse failures directly; `From<wiser_api::Error>` translates
// transport-layer errors into domain variants.

use thiserror::Error;

use crate::model::RoomId;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Lifecycle ────────────────────────────────────────────────────
    #[error("Hub client not initialized -- call connect() first")]
    NotConnected,

    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to hub at {host}: {reason}")]
    ConnectionFailed { host: String, reason: String },

    #[error("Hub rejected the shared secret")]
    Unauthorized,

    #[error("Hub did not answer within {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Room not found: {room}")]
    RoomNotFound { room: RoomId },

    #[error("Hub sent an unexpected payload: {message}")]
    MalformedPayload { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Hub error (HTTP {status}): {message}")]
    Hub { status: u16, message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<wiser_api::Error> for CoreError {
    fn from(err: wiser_api::Error) -> Self {
        match err {
            wiser_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_decode() {
                    CoreError::MalformedPayload {
                        message: e.to_string(),
                    }
                } else {
                    CoreError::ConnectionFailed {
                        host: e
                            .url()
                            .and_then(|u| u.host_str().map(str::to_owned))
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                }
            }
            wiser_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid hub address: {e}"),
            },
            wiser_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            wiser_api::Error::Unauthorized => CoreError::Unauthorized,
            wiser_api::Error::InvalidSecret(reason) => CoreError::Config {
                message: format!("Invalid shared secret: {reason}"),
            },
            wiser_api::Error::Hub { status, message } => CoreError::Hub { status, message },
            wiser_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedPayload { message }
            }
            wiser_api::Error::InvalidArgument(message) => CoreError::ValidationFailed { message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn api_errors_map_to_domain_variants() {
        let err = CoreError::from(wiser_api::Error::Timeout { timeout_secs: 5 });
        assert!(matches!(err, CoreError::Timeout { timeout_secs: 5 }));

        let err = CoreError::from(wiser_api::Error::InvalidArgument("SetPoint 99".into()));
        assert!(matches!(err, CoreError::ValidationFailed { .. }));

        let err = CoreError::from(wiser_api::Error::Unauthorized);
        assert!(matches!(err, CoreError::Unauthorized));
    }
}
