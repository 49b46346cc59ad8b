// Climate entity for a single room.

use serde::Serialize;
use strum::{Display, EnumString};

use crate::coordinator::{HubCoordinator, RefreshOutcome};
use crate::error::CoreError;
use crate::hub::HubClient;
use crate::model::{RoomId, RoomMode, RoomSnapshot, SetpointOrigin, from_tenths};

pub const TEMPERATURE_UNIT: &str = "°C";
pub const ICON: &str = "mdi:oil-temperature";

/// Operating mode as a climate entity presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Following the schedule.
    Auto,
    /// Holding a manual setpoint.
    HeatCool,
}

pub const SUPPORTED_HVAC_MODES: [HvacMode; 2] = [HvacMode::Auto, HvacMode::HeatCool];

/// What is currently driving the room's setpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum PresetMode {
    Schedule,
    Boost,
    Override,
    Manual,
}

pub const SUPPORTED_PRESETS: [PresetMode; 2] = [PresetMode::Schedule, PresetMode::Boost];

impl From<&SetpointOrigin> for PresetMode {
    fn from(origin: &SetpointOrigin) -> Self {
        match origin {
            SetpointOrigin::FromBoost => Self::Boost,
            SetpointOrigin::FromManualOverride => Self::Override,
            SetpointOrigin::FromManualMode => Self::Manual,
            SetpointOrigin::FromSchedule | SetpointOrigin::Other(_) => Self::Schedule,
        }
    }
}

/// Extra state shown alongside the temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateAttributes {
    pub percentage_demand: Option<i32>,
    pub control_output_state: Option<String>,
    pub setpoint_origin: String,
    pub heating_rate: Option<i32>,
    pub window_state: Option<String>,
    pub window_detection_active: bool,
    pub away_mode_suppressed: bool,
}

/// Everything a host needs to render a room's climate entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    pub name: String,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub hvac_mode: HvacMode,
    pub preset_mode: PresetMode,
    pub attributes: ClimateAttributes,
}

impl ClimateState {
    /// Build the entity state from a room snapshot. Readings below `floor`
    /// are reported as `floor`: the hub sends huge negative values when a
    /// sensor drops off the network.
    pub fn from_snapshot(room: &RoomSnapshot, floor: f64) -> Self {
        let current_temperature = room
            .calculated_temperature
            .map(|tenths| from_tenths(tenths).max(floor));

        let hvac_mode = if room.manual_mode {
            HvacMode::HeatCool
        } else {
            HvacMode::Auto
        };

        Self {
            name: format!("Wiser {}", room.name),
            current_temperature,
            target_temperature: room.set_point_celsius(),
            hvac_mode,
            preset_mode: PresetMode::from(&room.setpoint_origin),
            attributes: ClimateAttributes {
                percentage_demand: room.percentage_demand,
                control_output_state: room.control_output_state.clone(),
                setpoint_origin: room.setpoint_origin.to_string(),
                heating_rate: room.heating_rate,
                window_state: room.window_state.clone(),
                window_detection_active: room.window_detection_active,
                away_mode_suppressed: room.away_mode_suppressed,
            },
        }
    }
}

/// Climate entity bound to one room.
pub struct ClimateRoom<C: HubClient> {
    coordinator: HubCoordinator<C>,
    room: RoomId,
}

impl<C: HubClient> ClimateRoom<C> {
    pub fn new(coordinator: HubCoordinator<C>, room: RoomId) -> Self {
        Self { coordinator, room }
    }

    pub fn room_id(&self) -> RoomId {
        self.room
    }

    pub fn unique_id(&self) -> String {
        format!("wiser-room-{}", self.room)
    }

    /// Current state from cached data; `None` if the hub no longer
    /// reports this room.
    pub async fn state(&self) -> Option<ClimateState> {
        let floor = self.coordinator.minimum_plausible_temperature();
        self.coordinator
            .get_room_data(self.room)
            .await
            .map(|room| ClimateState::from_snapshot(&room, floor))
    }

    /// Polling hook.
    pub async fn update(&self) -> Result<RefreshOutcome, CoreError> {
        self.coordinator.refresh().await
    }

    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<(), CoreError> {
        let room_mode = match mode {
            HvacMode::HeatCool => RoomMode::Manual,
            HvacMode::Auto => RoomMode::Auto,
        };
        self.coordinator.set_room_mode(self.room, room_mode).await
    }

    pub async fn set_preset_mode(&self, preset: PresetMode) -> Result<(), CoreError> {
        let room_mode = match preset {
            PresetMode::Schedule => RoomMode::Auto,
            PresetMode::Override | PresetMode::Manual => RoomMode::Manual,
            PresetMode::Boost => RoomMode::Boost,
        };
        self.coordinator.set_room_mode(self.room, room_mode).await
    }

    /// Set the target temperature. Returns `false` without contacting the
    /// hub when no temperature was given.
    pub async fn set_temperature(&self, celsius: Option<f64>) -> Result<bool, CoreError> {
        let Some(celsius) = celsius else {
            return Ok(false);
        };
        self.coordinator
            .set_room_target_temperature(self.room, celsius)
            .await?;
        Ok(true)
    }
}
