// wiser-core: Hub access coordinator between wiser-api and consumers (CLI).

pub mod config;
pub mod coordinator;
pub mod diagnostics;
pub mod entity;
pub mod error;
pub mod hub;
pub mod model;

mod convert;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::HubSettings;
pub use coordinator::{Cadence, ClientState, HubCoordinator, RefreshOutcome};
pub use diagnostics::{
    DiagnosticEvent, DiagnosticSink, NotificationBoard, TracingDiagnostics, NOTIFICATION_ID,
};
pub use error::CoreError;
pub use hub::HubClient;

pub use model::{
    Battery, HomeAwayMode, RoomId, RoomMode, RoomSnapshot, SetpointOrigin, SystemSnapshot,
};
