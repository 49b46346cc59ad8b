// ── Domain model ──
//
// Snapshots of hub state as consumers see them. Built from the hub
// client's cache on every read; nothing here is mutated in place.

pub mod room;
pub mod system;

pub use room::{Battery, RoomId, RoomSnapshot, SetpointOrigin, from_tenths};
pub use system::SystemSnapshot;

// Hub-level enums are shared with the client crate unchanged.
pub use wiser_api::{HomeAwayMode, RoomMode};
