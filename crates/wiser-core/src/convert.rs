// ── API-to-domain type conversions ──
//
// Bridges raw `wiser_api` domain-document types into `wiser_core::model`
// snapshots. Rooms need the whole document because their battery lives on
// a separate device record.

use wiser_api::{HubDomain, Room, RoomMode, System};

use crate::model::{Battery, RoomId, RoomSnapshot, SetpointOrigin, SystemSnapshot};

/// Setpoint the hub reports for a room whose heating is switched off.
const OFF_SET_POINT_TENTHS: i32 = -200;

/// Derive the consumer-facing mode. The hub only knows Auto and Manual;
/// Boost and Off are inferred from the setpoint origin and value.
fn derive_mode(room: &Room, origin: &SetpointOrigin) -> RoomMode {
    if room.current_set_point == Some(OFF_SET_POINT_TENTHS) {
        RoomMode::Off
    } else if *origin == SetpointOrigin::FromBoost {
        RoomMode::Boost
    } else if room.mode.as_deref() == Some("Manual") {
        RoomMode::Manual
    } else {
        RoomMode::Auto
    }
}

pub(crate) fn room_snapshot(domain: &HubDomain, room: &Room) -> RoomSnapshot {
    let setpoint_origin = room
        .setpoint_origin
        .as_deref()
        .map(SetpointOrigin::from)
        .unwrap_or_default();

    let battery = domain.sensor_device_for(room).map(|device| Battery {
        level: device.battery_level.clone(),
        voltage_tenths: device.battery_voltage,
    });

    RoomSnapshot {
        id: RoomId(room.id),
        name: room
            .name
            .clone()
            .unwrap_or_else(|| format!("Room {}", room.id)),
        mode: derive_mode(room, &setpoint_origin),
        manual_mode: room.mode.as_deref() == Some("Manual"),
        calculated_temperature: room.calculated_temperature,
        current_set_point: room.current_set_point,
        setpoint_origin,
        percentage_demand: room.percentage_demand,
        control_output_state: room.control_output_state.clone(),
        window_state: room.window_state.clone(),
        window_detection_active: room.window_detection_active.unwrap_or(false),
        away_mode_suppressed: room.away_mode_suppressed.unwrap_or(false),
        heating_rate: room.heating_rate,
        battery,
    }
}

pub(crate) fn room_snapshots(domain: &HubDomain) -> Vec<RoomSnapshot> {
    domain
        .room
        .iter()
        .map(|room| room_snapshot(domain, room))
        .collect()
}

impl From<&System> for SystemSnapshot {
    fn from(system: &System) -> Self {
        Self {
            away: system.override_type.as_deref() == Some("Away"),
            away_set_point_limit: system.away_mode_set_point_limit,
            firmware_version: system.active_system_version.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiser_api::{HubDomain, RoomMode};

    use super::{room_snapshot, room_snapshots};
    use crate::entity::{ClimateState, HvacMode};
    use crate::model::{Battery, RoomId, SetpointOrigin, SystemSnapshot};

    fn domain() -> HubDomain {
        serde_json::from_value(json!({
            "System": {
                "OverrideType": "Away",
                "AwayModeSetPointLimit": 100,
                "ActiveSystemVersion": "3.8.1"
            },
            "Room": [
                {
                    "id": 1, "Name": "Lounge", "Mode": "Auto",
                    "CalculatedTemperature": 201, "CurrentSetPoint": 200,
                    "SetpointOrigin": "FromSchedule", "PercentageDemand": 0,
                    "ControlOutputState": "Off", "WindowDetectionActive": true,
                    "RoomStatId": 30
                },
                { "id": 2, "Mode": "Auto", "CurrentSetPoint": 210, "SetpointOrigin": "FromBoost" },
                { "id": 3, "Name": "Hall", "Mode": "Manual", "CurrentSetPoint": -200 },
                { "id": 4, "Name": "Study", "Mode": "Manual", "CurrentSetPoint": 190,
                  "SetpointOrigin": "FromManualMode" }
            ],
            "Device": [ { "id": 30, "BatteryLevel": "TwoThirds", "BatteryVoltage": 29 } ]
        }))
        .unwrap()
    }

    #[test]
    fn room_fields_carry_over() {
        let domain = domain();
        let lounge = room_snapshot(&domain, domain.room(1).unwrap());

        assert_eq!(lounge.id, RoomId(1));
        assert_eq!(lounge.name, "Lounge");
        assert_eq!(lounge.mode, RoomMode::Auto);
        assert_eq!(lounge.calculated_temperature, Some(201));
        assert_eq!(lounge.setpoint_origin, SetpointOrigin::FromSchedule);
        assert!(lounge.window_detection_active);
        assert!(!lounge.away_mode_suppressed);
        assert_eq!(
            lounge.battery,
            Some(Battery {
                level: Some("TwoThirds".into()),
                voltage_tenths: Some(29),
            })
        );
    }

    #[test]
    fn boost_and_off_are_derived() {
        let rooms = room_snapshots(&domain());
        let modes: Vec<_> = rooms.iter().map(|r| r.mode).collect();
        assert_eq!(
            modes,
            vec![RoomMode::Auto, RoomMode::Boost, RoomMode::Off, RoomMode::Manual]
        );
        let manual: Vec<_> = rooms.iter().map(|r| r.manual_mode).collect();
        assert_eq!(manual, vec![false, false, true, true]);
        assert_eq!(rooms[1].name, "Room 2");
        assert!(rooms[2].battery.is_none());
    }

    #[test]
    fn boosted_or_off_manual_rooms_stay_heat_cool() {
        let domain: HubDomain = serde_json::from_value(json!({
            "Room": [
                { "id": 7, "Mode": "Manual", "CurrentSetPoint": 210,
                  "SetpointOrigin": "FromBoost" },
                { "id": 8, "Mode": "Manual", "CurrentSetPoint": -200 },
                { "id": 9, "Mode": "Auto", "CurrentSetPoint": 210,
                  "SetpointOrigin": "FromBoost" }
            ]
        }))
        .unwrap();

        let modes: Vec<_> = room_snapshots(&domain)
            .iter()
            .map(|room| (room.mode, ClimateState::from_snapshot(room, -5.0).hvac_mode))
            .collect();
        assert_eq!(
            modes,
            vec![
                (RoomMode::Boost, HvacMode::HeatCool),
                (RoomMode::Off, HvacMode::HeatCool),
                (RoomMode::Boost, HvacMode::Auto),
            ]
        );
    }

    #[test]
    fn system_away_comes_from_override_type() {
        let domain = domain();
        let system = SystemSnapshot::from(domain.system.as_ref().unwrap());
        assert!(system.away);
        assert_eq!(system.away_set_point_limit, Some(100));
        assert_eq!(system.firmware_version.as_deref(), Some("3.8.1"));
    }
}
