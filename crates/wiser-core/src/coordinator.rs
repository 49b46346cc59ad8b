// ── Hub access coordinator ──
//
// One shared object per hub. Serializes every read and write behind a
// single async mutex, throttles full refreshes to the scan interval, lets
// writers force the next refresh through the throttle, and turns transient
// hub failures into a `Failed` outcome plus an operator notification.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info};

use wiser_api::transport::TransportConfig;
use wiser_api::{HomeAwayMode, RoomMode, WiserClient};

use crate::config::HubSettings;
use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};
use crate::error::CoreError;
use crate::hub::HubClient;
use crate::model::{RoomId, RoomSnapshot, SystemSnapshot};

// ── Observable states ────────────────────────────────────────────

/// Result of a [`refresh`](HubCoordinator::refresh) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The hub was queried and the cache replaced.
    Refreshed,
    /// Throttled: the last refresh is recent enough and nothing forced one.
    Skipped,
    /// The hub timed out or sent an unusable payload. Cached data is stale
    /// but still served; the next call retries.
    Failed,
}

impl RefreshOutcome {
    /// `true` only when fresh data was fetched.
    pub fn is_refreshed(self) -> bool {
        self == Self::Refreshed
    }
}

/// Whether a hub client has been attached yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Uninitialized,
    Ready,
}

/// Whether the next refresh would hit the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    Throttled,
    Due,
}

// ── HubCoordinator ───────────────────────────────────────────────

/// Shared access point to one hub.
///
/// Cheaply cloneable via `Arc`; hand a clone to every consumer. Created
/// without a client: call [`connect`](Self::connect) (or
/// [`attach`](Self::attach)) before using hub operations.
pub struct HubCoordinator<C = WiserClient> {
    inner: Arc<CoordinatorInner<C>>,
}

struct CoordinatorInner<C> {
    settings: HubSettings,
    diagnostics: Arc<dyn DiagnosticSink>,
    state: Mutex<HubState<C>>,
}

/// Everything the lock protects. The client lives here too so that no
/// hub interaction can run outside the lock.
struct HubState<C> {
    client: Option<C>,
    last_refresh: Option<Instant>,
    last_refreshed_at: Option<DateTime<Utc>>,
    force: bool,
}

impl<C> HubState<C> {
    fn cadence(&self, now: Instant, interval: Duration) -> Cadence {
        if self.force {
            return Cadence::Due;
        }
        match self.last_refresh {
            Some(last) if now.saturating_duration_since(last) < interval => Cadence::Throttled,
            _ => Cadence::Due,
        }
    }

    fn mark_forced(&mut self) {
        self.force = true;
        debug!("next refresh will bypass the scan interval");
    }
}

impl<C> Clone for HubCoordinator<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> fmt::Debug for HubCoordinator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubCoordinator")
            .field("host", &self.inner.settings.host)
            .field("scan_interval", &self.inner.settings.scan_interval)
            .finish_non_exhaustive()
    }
}

impl HubCoordinator<WiserClient> {
    /// Build the HTTP client from the settings.
    ///
    /// No request is made here; an unreachable hub shows up on the first
    /// refresh. Fails only for an unusable host or secret.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let settings = &self.inner.settings;
        let transport = TransportConfig::default().with_timeout(settings.timeout);
        let client = WiserClient::new(&settings.host, settings.secret.as_ref(), &transport)?;
        debug!(base_url = %client.base_url(), "hub client created");
        self.attach(client).await;
        Ok(())
    }
}

impl<C: HubClient> HubCoordinator<C> {
    /// Create a coordinator. Does NOT build a client.
    pub fn new(settings: HubSettings, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            inner: Arc::new(CoordinatorInner {
                settings,
                diagnostics,
                state: Mutex::new(HubState {
                    client: None,
                    last_refresh: None,
                    last_refreshed_at: None,
                    force: false,
                }),
            }),
        }
    }

    /// Install a hub client, replacing any previous one. The cache of the
    /// new client decides what reads return, so the next refresh is due.
    pub async fn attach(&self, client: C) {
        let mut state = self.inner.state.lock().await;
        state.client = Some(client);
        state.last_refresh = None;
        state.last_refreshed_at = None;
        state.force = false;
        info!(host = %self.inner.settings.host, "hub client ready");
    }

    pub fn settings(&self) -> &HubSettings {
        &self.inner.settings
    }

    // ── Refresh ──────────────────────────────────────────────────

    /// Refresh the hub data if the scan interval has elapsed or a refresh
    /// was forced.
    ///
    /// Timeouts and unusable payloads are absorbed: they are logged, raise
    /// one diagnostic, leave the last-refresh time untouched and return
    /// [`RefreshOutcome::Failed`]. Every other failure is returned as an
    /// error.
    pub async fn refresh(&self) -> Result<RefreshOutcome, CoreError> {
        let mut state = self.inner.state.lock().await;
        let interval = self.inner.settings.scan_interval;

        if state.cadence(Instant::now(), interval) == Cadence::Throttled {
            debug!("refresh skipped, scan interval not yet elapsed");
            return Ok(RefreshOutcome::Skipped);
        }

        let forced = state.force;
        let client = state.client.as_mut().ok_or(CoreError::NotConnected)?;

        info!(forced, "scan interval exceeded, updating hub data");
        match client.refresh_data().await {
            Ok(()) => {
                state.last_refresh = Some(Instant::now());
                state.last_refreshed_at = Some(Utc::now());
                state.force = false;
                debug!("hub data refreshed");
                Ok(RefreshOutcome::Refreshed)
            }
            Err(err) if err.is_transient() => {
                error!(error = %err, "failed to fetch hub data");
                self.inner
                    .diagnostics
                    .report(&DiagnosticEvent::fetch_failed(&err));
                Ok(RefreshOutcome::Failed)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Make the next [`refresh`](Self::refresh) hit the hub regardless of
    /// elapsed time.
    pub async fn force_next_refresh(&self) {
        self.inner.state.lock().await.mark_forced();
    }

    // ── Cached reads ─────────────────────────────────────────────

    /// A room as of the last successful refresh. Never touches the network.
    pub async fn get_room_data(&self, room: RoomId) -> Option<RoomSnapshot> {
        let state = self.inner.state.lock().await;
        state.client.as_ref()?.room(room)
    }

    /// All rooms as of the last successful refresh, in hub order.
    pub async fn rooms(&self) -> Vec<RoomSnapshot> {
        let state = self.inner.state.lock().await;
        state
            .client
            .as_ref()
            .map(HubClient::rooms)
            .unwrap_or_default()
    }

    pub async fn system_data(&self) -> Option<SystemSnapshot> {
        let state = self.inner.state.lock().await;
        state.client.as_ref()?.system()
    }

    /// Floor below which a reported temperature is a sensor glitch.
    /// Consumers clamp; the coordinator passes readings through unmodified.
    pub fn minimum_plausible_temperature(&self) -> f64 {
        self.inner.settings.minimum_temperature
    }

    // ── Writes ───────────────────────────────────────────────────
    //
    // Every write marks the next refresh forced before returning, whether
    // the hub accepted it or not.

    pub async fn set_room_target_temperature(
        &self,
        room: RoomId,
        celsius: f64,
    ) -> Result<(), CoreError> {
        info!(%room, celsius, "setting room temperature");
        let mut state = self.inner.state.lock().await;
        let result = match state.client.as_mut() {
            Some(client) => client
                .set_room_temperature(room, celsius)
                .await
                .map_err(CoreError::from),
            None => Err(CoreError::NotConnected),
        };
        state.mark_forced();
        result
    }

    /// Switch a room's mode. Boost uses the configured boost temperature
    /// and duration.
    pub async fn set_room_mode(&self, room: RoomId, mode: RoomMode) -> Result<(), CoreError> {
        let settings = &self.inner.settings;
        info!(%room, %mode, "setting room mode");
        let mut state = self.inner.state.lock().await;
        let result = match state.client.as_mut() {
            Some(client) => client
                .set_room_mode(
                    room,
                    mode,
                    settings.boost_temperature,
                    settings.boost_minutes,
                )
                .await
                .map_err(CoreError::from),
            None => Err(CoreError::NotConnected),
        };
        state.mark_forced();
        result
    }

    pub async fn set_away_mode(
        &self,
        is_away: bool,
        away_temperature: f64,
    ) -> Result<(), CoreError> {
        let mode = HomeAwayMode::from_away(is_away);
        info!(%mode, away_temperature, "setting home/away mode");
        let mut state = self.inner.state.lock().await;
        let result = match state.client.as_mut() {
            Some(client) => client
                .set_home_away_mode(mode, away_temperature)
                .await
                .map_err(CoreError::from),
            None => Err(CoreError::NotConnected),
        };
        state.mark_forced();
        result
    }

    // ── Introspection ────────────────────────────────────────────

    pub async fn client_state(&self) -> ClientState {
        if self.inner.state.lock().await.client.is_some() {
            ClientState::Ready
        } else {
            ClientState::Uninitialized
        }
    }

    pub async fn cadence(&self) -> Cadence {
        let state = self.inner.state.lock().await;
        state.cadence(Instant::now(), self.inner.settings.scan_interval)
    }

    /// Monotonic time of the last successful refresh.
    pub async fn last_refresh(&self) -> Option<Instant> {
        self.inner.state.lock().await.last_refresh
    }

    /// Wall-clock time of the last successful refresh, for display.
    pub async fn last_refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.inner.state.lock().await.last_refreshed_at
    }
}
