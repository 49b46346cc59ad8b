// ── Runtime hub configuration ──
//
// Describes *how* to reach the hub and the tuning the coordinator applies.
// Never touches disk: the CLI (via wiser-config) builds a `HubSettings`
// and hands it in.

use std::time::Duration;

use secrecy::SecretString;

pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(300);
pub const DEFAULT_MINIMUM_TEMPERATURE: f64 = -5.0;
pub const DEFAULT_BOOST_TEMPERATURE: f64 = 20.0;
pub const DEFAULT_BOOST_MINUTES: u32 = 30;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for a single hub.
#[derive(Debug, Clone)]
pub struct HubSettings {
    /// Hub address, e.g. `192.168.1.20`.
    pub host: String,
    /// Shared secret sent with every request.
    pub secret: Option<SecretString>,
    /// Minimum time between two full refreshes.
    pub scan_interval: Duration,
    /// Readings below this floor are treated as sensor glitches.
    pub minimum_temperature: f64,
    /// Setpoint used when a room is switched to boost.
    pub boost_temperature: f64,
    /// How long a boost lasts.
    pub boost_minutes: u32,
    /// Per-request timeout handed to the HTTP client.
    pub timeout: Duration,
}

impl HubSettings {
    /// Settings for `host` with every tunable at its default.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            secret: None,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            minimum_temperature: DEFAULT_MINIMUM_TEMPERATURE,
            boost_temperature: DEFAULT_BOOST_TEMPERATURE,
            boost_minutes: DEFAULT_BOOST_MINUTES,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_secret(mut self, secret: SecretString) -> Self {
        self.secret = Some(secret);
        self
    }

    pub fn with_scan_interval(mut self, scan_interval: Duration) -> Self {
        self.scan_interval = scan_interval;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
