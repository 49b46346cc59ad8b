//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use wiser_config::ConfigError;
use wiser_core::{CoreError, RoomId};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to hub at {host}")]
    #[diagnostic(
        code(wiser::connection_failed),
        help(
            "Check that the hub is powered and on the network.\n\
             Host: {host}\n\
             Try: wiser --host <address> status"
        )
    )]
    ConnectionFailed {
        host: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{title}: {message}")]
    #[diagnostic(
        code(wiser::fetch_failed),
        help(
            "The hub did not return usable data. Fix the address or network, \
             then run the command again."
        )
    )]
    FetchFailed { title: String, message: String },

    #[error("Hub did not answer within {seconds}s")]
    #[diagnostic(
        code(wiser::timeout),
        help("Increase the timeout with --timeout or check the hub's network connection.")
    )]
    Timeout { seconds: u64 },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Hub rejected the secret")]
    #[diagnostic(
        code(wiser::auth_failed),
        help(
            "Check the hub secret.\n\
             Set it with --secret or WISER_SECRET, or store it with:\n\
             wiser --host <address> --secret <secret> config init --keyring"
        )
    )]
    AuthFailed,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Room {room} not found")]
    #[diagnostic(code(wiser::not_found), help("Run: wiser rooms to see available rooms"))]
    RoomNotFound { room: RoomId },

    // ── Hub ──────────────────────────────────────────────────────────
    #[error("Hub error (HTTP {status}): {message}")]
    #[diagnostic(code(wiser::hub_error))]
    Hub { status: u16, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(wiser::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("No hub host configured")]
    #[diagnostic(
        code(wiser::no_host),
        help(
            "Pass --host <address>, set WISER_HOST, or create a config with:\n\
             wiser --host <address> config init\n\
             Expected at: {path}"
        )
    )]
    NoHost { path: String },

    #[error("Config file already exists at {path}")]
    #[diagnostic(code(wiser::config_exists), help("Use --force to overwrite it."))]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(wiser::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(wiser::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::FetchFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed => exit_code::AUTH,
            Self::RoomNotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NoHost { .. } | Self::ConfigExists { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { host, reason } => CliError::ConnectionFailed {
                host,
                source: reason.into(),
            },

            CoreError::NotConnected => CliError::ConnectionFailed {
                host: "(not connected)".into(),
                source: "Hub client was never initialized".into(),
            },

            CoreError::Unauthorized => CliError::AuthFailed,

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::RoomNotFound { room } => CliError::RoomNotFound { room },

            CoreError::MalformedPayload { message } => CliError::FetchFailed {
                title: "Unexpected hub payload".into(),
                message,
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Hub { status, message } => CliError::Hub { status, message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingHost { path } => CliError::NoHost { path },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiser_core::{CoreError, RoomId};

    use super::{CliError, exit_code};

    #[test]
    fn core_errors_get_distinct_exit_codes() {
        let cases = [
            (CoreError::Unauthorized, exit_code::AUTH),
            (CoreError::Timeout { timeout_secs: 5 }, exit_code::TIMEOUT),
            (CoreError::RoomNotFound { room: RoomId(9) }, exit_code::NOT_FOUND),
            (
                CoreError::ValidationFailed {
                    message: "SetPoint 99".into(),
                },
                exit_code::USAGE,
            ),
            (
                CoreError::Hub {
                    status: 500,
                    message: String::new(),
                },
                exit_code::GENERAL,
            ),
        ];
        for (core, code) in cases {
            assert_eq!(CliError::from(core).exit_code(), code);
        }
    }
}
