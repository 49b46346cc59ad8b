// ── Hub client seam ──
//
// The coordinator talks to the hub through `HubClient` so the throttle,
// locking and failure handling can run against a scripted client in tests.
// `WiserClient` is the production implementation.

use std::future::Future;

use wiser_api::{Error, HomeAwayMode, RoomMode, WiserClient};

use crate::convert::{room_snapshot, room_snapshots};
use crate::model::{RoomId, RoomSnapshot, SystemSnapshot};

/// Operations the coordinator needs from a hub client.
///
/// Reads are served from the client's own cache of the last successful
/// `refresh_data`; only the async methods touch the network.
pub trait HubClient: Send + 'static {
    /// Re-fetch everything the hub knows. A failure must leave the
    /// previous cache intact.
    fn refresh_data(&mut self) -> impl Future<Output = Result<(), Error>> + Send;

    /// All rooms, in hub order. Empty before the first successful refresh.
    fn rooms(&self) -> Vec<RoomSnapshot>;

    fn room(&self, id: RoomId) -> Option<RoomSnapshot>;

    fn system(&self) -> Option<SystemSnapshot>;

    fn set_room_temperature(
        &mut self,
        room: RoomId,
        celsius: f64,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn set_room_mode(
        &mut self,
        room: RoomId,
        mode: RoomMode,
        boost_celsius: f64,
        boost_minutes: u32,
    ) -> impl Future<Output = Result<(), Error>> + Send;

    fn set_home_away_mode(
        &mut self,
        mode: HomeAwayMode,
        away_celsius: f64,
    ) -> impl Future<Output = Result<(), Error>> + Send;
}

impl HubClient for WiserClient {
    async fn refresh_data(&mut self) -> Result<(), Error> {
        WiserClient::refresh_data(self).await.map(|_| ())
    }

    fn rooms(&self) -> Vec<RoomSnapshot> {
        self.domain().map(room_snapshots).unwrap_or_default()
    }

    fn room(&self, id: RoomId) -> Option<RoomSnapshot> {
        let domain = self.domain()?;
        domain.room(id.get()).map(|room| room_snapshot(domain, room))
    }

    fn system(&self) -> Option<SystemSnapshot> {
        WiserClient::system(self).map(SystemSnapshot::from)
    }

    async fn set_room_temperature(&mut self, room: RoomId, celsius: f64) -> Result<(), Error> {
        WiserClient::set_room_temperature(self, room.get(), celsius).await
    }

    async fn set_room_mode(
        &mut self,
        room: RoomId,
        mode: RoomMode,
        boost_celsius: f64,
        boost_minutes: u32,
    ) -> Result<(), Error> {
        WiserClient::set_room_mode(self, room.get(), mode, boost_celsius, boost_minutes).await
    }

    async fn set_home_away_mode(
        &mut self,
        mode: HomeAwayMode,
        away_celsius: f64,
    ) -> Result<(), Error> {
        WiserClient::set_home_away_mode(self, mode, away_celsius).await
    }
}
