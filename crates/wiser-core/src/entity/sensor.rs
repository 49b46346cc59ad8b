// Battery sensor for the device that reports a room's temperature.

use serde::Serialize;

use crate::coordinator::HubCoordinator;
use crate::hub::HubClient;
use crate::model::RoomId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryState {
    pub name: String,
    pub level: Option<String>,
    /// Volts.
    pub voltage: Option<f64>,
}

pub struct RoomBatterySensor<C: HubClient> {
    coordinator: HubCoordinator<C>,
    room: RoomId,
}

impl<C: HubClient> RoomBatterySensor<C> {
    pub fn new(coordinator: HubCoordinator<C>, room: RoomId) -> Self {
        Self { coordinator, room }
    }

    pub fn room_id(&self) -> RoomId {
        self.room
    }

    pub fn unique_id(&self) -> String {
        format!("wiser-room-{}-battery", self.room)
    }

    /// `None` when the room is gone or its sensor is mains powered.
    pub async fn state(&self) -> Option<BatteryState> {
        let room = self.coordinator.get_room_data(self.room).await?;
        let battery = room.battery?;
        Some(BatteryState {
            name: format!("Wiser {} Battery", room.name),
            voltage: battery.voltage(),
            level: battery.level,
        })
    }
}
