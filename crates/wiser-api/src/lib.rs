// wiser-api: Async Rust client for the Wiser heat hub's local JSON API

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod commands;

pub use client::WiserClient;
pub use commands::{HomeAwayMode, RoomMode};
pub use error::Error;
pub use models::{Device, HubDomain, Room, RoomStat, SmartValve, System};
pub use transport::TransportConfig;
