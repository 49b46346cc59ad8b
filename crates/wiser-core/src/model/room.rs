use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use wiser_api::RoomMode;

/// Convert the hub's tenths fixed point (degrees, volts) to a float.
pub fn from_tenths(tenths: i32) -> f64 {
    f64::from(tenths) / 10.0
}

// ── RoomId ──────────────────────────────────────────────────────────

/// Hub-assigned room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl RoomId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u32> for RoomId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

// ── SetpointOrigin ──────────────────────────────────────────────────

/// Which mechanism last set a room's target temperature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SetpointOrigin {
    #[default]
    FromSchedule,
    FromBoost,
    FromManualOverride,
    FromManualMode,
    /// Origins added by newer firmware (`FromAwayMode`, `FromEcoIQ`, ...).
    Other(String),
}

impl SetpointOrigin {
    pub fn as_str(&self) -> &str {
        match self {
            Self::FromSchedule => "FromSchedule",
            Self::FromBoost => "FromBoost",
            Self::FromManualOverride => "FromManualOverride",
            Self::FromManualMode => "FromManualMode",
            Self::Other(raw) => raw,
        }
    }
}

impl From<&str> for SetpointOrigin {
    fn from(raw: &str) -> Self {
        match raw {
            "FromSchedule" => Self::FromSchedule,
            "FromBoost" => Self::FromBoost,
            "FromManualOverride" => Self::FromManualOverride,
            "FromManualMode" => Self::FromManualMode,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for SetpointOrigin {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

impl From<SetpointOrigin> for String {
    fn from(origin: SetpointOrigin) -> Self {
        origin.as_str().to_owned()
    }
}

impl fmt::Display for SetpointOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Battery ─────────────────────────────────────────────────────────

/// Battery of the device reporting for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Battery {
    /// `Normal`, `TwoThirds`, `OneThird`, `Low`, ...
    pub level: Option<String>,
    /// Tenths of a volt.
    pub voltage_tenths: Option<i32>,
}

impl Battery {
    pub fn voltage(&self) -> Option<f64> {
        self.voltage_tenths.map(from_tenths)
    }
}

// ── RoomSnapshot ────────────────────────────────────────────────────

/// Read-only view of one heating zone as of the last successful refresh.
///
/// Temperatures are kept in the hub's tenths; the `*_celsius` helpers
/// convert for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    pub name: String,
    /// Display mode, with Boost and Off inferred from the setpoint.
    pub mode: RoomMode,
    /// The hub's own `Mode` field is `Manual`. Stays set while a manual
    /// room is boosted or switched off.
    pub manual_mode: bool,
    pub calculated_temperature: Option<i32>,
    pub current_set_point: Option<i32>,
    pub setpoint_origin: SetpointOrigin,
    pub percentage_demand: Option<i32>,
    pub control_output_state: Option<String>,
    pub window_state: Option<String>,
    pub window_detection_active: bool,
    pub away_mode_suppressed: bool,
    pub heating_rate: Option<i32>,
    pub battery: Option<Battery>,
}

impl RoomSnapshot {
    pub fn calculated_celsius(&self) -> Option<f64> {
        self.calculated_temperature.map(from_tenths)
    }

    pub fn set_point_celsius(&self) -> Option<f64> {
        self.current_set_point.map(from_tenths)
    }

    /// `true` while the room's heating output is on.
    pub fn is_heating(&self) -> bool {
        self.control_output_state.as_deref() == Some("On")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{RoomId, RoomMode, RoomSnapshot, SetpointOrigin};

    #[test]
    fn unknown_origins_round_trip_verbatim() {
        let origin = SetpointOrigin::from("FromEcoIQ");
        assert_eq!(origin, SetpointOrigin::Other("FromEcoIQ".into()));
        assert_eq!(origin.to_string(), "FromEcoIQ");

        let json = serde_json::to_string(&SetpointOrigin::FromBoost).unwrap();
        assert_eq!(json, "\"FromBoost\"");
    }

    #[test]
    fn heating_follows_control_output() {
        let mut room = RoomSnapshot {
            id: RoomId(1),
            name: "Lounge".into(),
            mode: RoomMode::Auto,
            manual_mode: false,
            calculated_temperature: Some(195),
            current_set_point: Some(210),
            setpoint_origin: SetpointOrigin::FromSchedule,
            percentage_demand: Some(60),
            control_output_state: Some("On".into()),
            window_state: None,
            window_detection_active: false,
            away_mode_suppressed: false,
            heating_rate: None,
            battery: None,
        };
        assert!(room.is_heating());

        room.control_output_state = Some("Off".into());
        assert!(!room.is_heating());
    }

    #[test]
    fn room_ids_parse_from_cli_input() {
        assert_eq!(" 7 ".parse::<RoomId>().unwrap(), RoomId(7));
        assert!("lounge".parse::<RoomId>().is_err());
    }
}
