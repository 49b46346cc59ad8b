// ── Entity adapters ──
//
// Per-capability views over the coordinator: a climate entity per room, a
// battery sensor per room with a battery-powered sensor, and one away-mode
// switch for the house. Each holds a coordinator clone and reads through
// it; none caches hub data of its own.

pub mod climate;
pub mod sensor;
pub mod switch;

pub use climate::{ClimateAttributes, ClimateRoom, ClimateState, HvacMode, PresetMode};
pub use sensor::{BatteryState, RoomBatterySensor};
pub use switch::AwayModeSwitch;

use crate::coordinator::HubCoordinator;
use crate::error::CoreError;
use crate::hub::HubClient;

/// Refresh (subject to the scan interval) and build one climate entity per
/// room the hub reports.
pub async fn climate_rooms<C: HubClient>(
    coordinator: &HubCoordinator<C>,
) -> Result<Vec<ClimateRoom<C>>, CoreError> {
    coordinator.refresh().await?;
    Ok(coordinator
        .rooms()
        .await
        .into_iter()
        .map(|room| ClimateRoom::new(coordinator.clone(), room.id))
        .collect())
}

/// One battery sensor per room whose sensor reports a battery.
pub async fn battery_sensors<C: HubClient>(
    coordinator: &HubCoordinator<C>,
) -> Result<Vec<RoomBatterySensor<C>>, CoreError> {
    coordinator.refresh().await?;
    Ok(coordinator
        .rooms()
        .await
        .into_iter()
        .filter(|room| room.battery.is_some())
        .map(|room| RoomBatterySensor::new(coordinator.clone(), room.id))
        .collect())
}
