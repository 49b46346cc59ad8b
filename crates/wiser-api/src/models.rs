// Hub domain document types
//
// `GET /data/domain/` returns one JSON object holding every entity the hub
// knows about. Keys are PascalCase except for `id`. Fields use
// `#[serde(default)]` liberally because firmware versions differ in which
// fields they send.

use serde::{Deserialize, Serialize};

// ── Domain document ─────────────────────────────────────────────────

/// The full `/data/domain/` document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HubDomain {
    #[serde(default)]
    pub system: Option<System>,
    #[serde(default)]
    pub room: Vec<Room>,
    #[serde(default)]
    pub device: Vec<Device>,
    #[serde(default)]
    pub room_stat: Vec<RoomStat>,
    #[serde(default)]
    pub smart_valve: Vec<SmartValve>,
    /// Catch-all for sections we don't model (schedules, zigbee, cloud...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HubDomain {
    pub fn room(&self, id: u32) -> Option<&Room> {
        self.room.iter().find(|r| r.id == id)
    }

    pub fn device(&self, id: u32) -> Option<&Device> {
        self.device.iter().find(|d| d.id == id)
    }

    /// The battery-powered device reporting for a room: its room
    /// thermostat if it has one, otherwise its first radiator valve.
    pub fn sensor_device_for(&self, room: &Room) -> Option<&Device> {
        room.room_stat_id
            .and_then(|id| self.device(id))
            .or_else(|| room.smart_valve_ids.first().and_then(|&id| self.device(id)))
    }
}

// ── System ──────────────────────────────────────────────────────────

/// Hub-wide settings and state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct System {
    /// `"Away"` while the whole house is in away mode.
    #[serde(default)]
    pub override_type: Option<String>,
    /// Away-mode setpoint in tenths of a degree.
    #[serde(default)]
    pub away_mode_set_point_limit: Option<i32>,
    #[serde(default)]
    pub away_mode_affects_hot_water: Option<bool>,
    #[serde(default)]
    pub active_system_version: Option<String>,
    #[serde(default)]
    pub heating_button_override_state: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Room ────────────────────────────────────────────────────────────

/// A heating zone. Temperatures are in tenths of a degree Celsius.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Room {
    #[serde(rename = "id")]
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    /// `"Auto"` or `"Manual"`.
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub calculated_temperature: Option<i32>,
    #[serde(default)]
    pub current_set_point: Option<i32>,
    /// `FromSchedule`, `FromBoost`, `FromManualOverride`, `FromManualMode`, ...
    #[serde(default)]
    pub setpoint_origin: Option<String>,
    #[serde(default)]
    pub percentage_demand: Option<i32>,
    /// `"On"` / `"Off"`.
    #[serde(default)]
    pub control_output_state: Option<String>,
    #[serde(default)]
    pub window_state: Option<String>,
    #[serde(default)]
    pub window_detection_active: Option<bool>,
    #[serde(default)]
    pub away_mode_suppressed: Option<bool>,
    #[serde(default)]
    pub heating_rate: Option<i32>,
    #[serde(default)]
    pub room_stat_id: Option<u32>,
    #[serde(default)]
    pub smart_valve_ids: Vec<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Devices ─────────────────────────────────────────────────────────

/// A paired device (room thermostat, radiator valve, the hub itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Device {
    #[serde(rename = "id")]
    pub id: u32,
    #[serde(default)]
    pub product_type: Option<String>,
    /// `Normal`, `TwoThirds`, `OneThird`, `Low`, ...
    #[serde(default)]
    pub battery_level: Option<String>,
    /// Tenths of a volt.
    #[serde(default)]
    pub battery_voltage: Option<i32>,
    #[serde(default)]
    pub displayed_signal_strength: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Live readings of a room thermostat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoomStat {
    #[serde(rename = "id")]
    pub id: u32,
    #[serde(default)]
    pub set_point: Option<i32>,
    #[serde(default)]
    pub measured_temperature: Option<i32>,
    #[serde(default)]
    pub measured_humidity: Option<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Live readings of a radiator valve.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SmartValve {
    #[serde(rename = "id")]
    pub id: u32,
    #[serde(default)]
    pub set_point: Option<i32>,
    #[serde(default)]
    pub measured_temperature: Option<i32>,
    #[serde(default)]
    pub percentage_demand: Option<i32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::HubDomain;

    fn domain() -> HubDomain {
        serde_json::from_value(json!({
            "System": { "OverrideType": "Away", "AwayModeSetPointLimit": 100 },
            "Room": [
                { "id": 1, "Name": "Lounge", "RoomStatId": 30 },
                { "id": 2, "Name": "Study", "SmartValveIds": [40, 41] },
                { "id": 3, "Name": "Hall" }
            ],
            "Device": [
                { "id": 30, "ProductType": "RoomStat", "BatteryLevel": "Normal" },
                { "id": 40, "ProductType": "iTRV", "BatteryLevel": "Low", "BatteryVoltage": 24 }
            ],
            "Schedule": [ { "id": 1 } ]
        }))
        .unwrap()
    }

    #[test]
    fn parses_sections_and_keeps_unknown_ones() {
        let domain = domain();
        assert_eq!(domain.room.len(), 3);
        assert_eq!(domain.device.len(), 2);
        assert!(domain.extra.contains_key("Schedule"));
        assert_eq!(
            domain.system.unwrap().override_type.as_deref(),
            Some("Away")
        );
    }

    #[test]
    fn sensor_device_prefers_room_stat_then_first_valve() {
        let domain = domain();

        let lounge = domain.room(1).unwrap();
        assert_eq!(domain.sensor_device_for(lounge).unwrap().id, 30);

        let study = domain.room(2).unwrap();
        assert_eq!(domain.sensor_device_for(study).unwrap().id, 40);

        let hall = domain.room(3).unwrap();
        assert!(domain.sensor_device_for(hall).is_none());
    }

    #[test]
    fn empty_document_is_valid() {
        let domain: HubDomain = serde_json::from_str("{}").unwrap();
        assert!(domain.room.is_empty());
        assert!(domain.system.is_none());
    }
}
