//! Read-only room and hub status commands.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tabled::Tabled;

use wiser_core::entity::{BatteryState, ClimateState, battery_sensors};
use wiser_core::model::from_tenths;
use wiser_core::{RoomId, RoomSnapshot};

use super::Session;
use crate::error::CliError;
use crate::output::{self, celsius, or_dash};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RoomRow {
    #[tabled(rename = "ID")]
    id: RoomId,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Temp")]
    temperature: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Demand")]
    demand: String,
    #[tabled(rename = "Heating")]
    heating: &'static str,
    #[tabled(rename = "Battery")]
    battery: String,
}

fn room_row(room: &RoomSnapshot, floor: f64) -> RoomRow {
    let state = ClimateState::from_snapshot(room, floor);
    RoomRow {
        id: room.id,
        name: room.name.clone(),
        mode: room.mode.to_string(),
        temperature: celsius(state.current_temperature),
        target: celsius(state.target_temperature),
        origin: room.setpoint_origin.to_string(),
        demand: room
            .percentage_demand
            .map_or_else(|| "-".into(), |d| format!("{d}%")),
        heating: if room.is_heating() { "on" } else { "off" },
        battery: or_dash(room.battery.as_ref().and_then(|b| b.level.as_deref())),
    }
}

// ── Detail view ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct RoomDetail {
    room: RoomSnapshot,
    climate: ClimateState,
}

fn detail(d: &RoomDetail) -> String {
    let c = &d.climate;
    let a = &c.attributes;
    let mut out = String::new();
    let _ = writeln!(out, "{} (room {})", c.name, d.room.id);
    let _ = writeln!(out, "  Temperature:   {}", celsius(c.current_temperature));
    let _ = writeln!(out, "  Target:        {}", celsius(c.target_temperature));
    let _ = writeln!(out, "  Mode:          {} ({} / {})", d.room.mode, c.hvac_mode, c.preset_mode);
    let _ = writeln!(out, "  Origin:        {}", a.setpoint_origin);
    let _ = writeln!(out, "  Demand:        {}", or_dash(a.percentage_demand));
    let _ = writeln!(out, "  Output:        {}", or_dash(a.control_output_state.as_deref()));
    let _ = writeln!(out, "  Heating rate:  {}", or_dash(a.heating_rate));
    let _ = writeln!(out, "  Window:        {}", or_dash(a.window_state.as_deref()));
    let _ = writeln!(out, "  Window detect: {}", a.window_detection_active);
    let _ = writeln!(out, "  Away exempt:   {}", a.away_mode_suppressed);
    if let Some(battery) = &d.room.battery {
        let _ = write!(
            out,
            "  Battery:       {} ({})",
            or_dash(battery.level.as_deref()),
            battery
                .voltage()
                .map_or_else(|| "-".into(), |v| format!("{v:.1} V"))
        );
    }
    out.trim_end().to_owned()
}

// ── Status view ─────────────────────────────────────────────────────

#[derive(Serialize)]
struct HubStatus {
    host: String,
    firmware_version: Option<String>,
    away: Option<bool>,
    away_temperature: Option<f64>,
    rooms: usize,
    last_refreshed_at: Option<DateTime<Utc>>,
}

fn status_detail(s: &HubStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hub:          {}", s.host);
    let _ = writeln!(out, "Firmware:     {}", or_dash(s.firmware_version.as_deref()));
    let away = s.away.map(|a| if a { "on" } else { "off" });
    let _ = writeln!(out, "Away mode:    {}", or_dash(away));
    let _ = writeln!(out, "Away setback: {}", celsius(s.away_temperature));
    let _ = writeln!(out, "Rooms:        {}", s.rooms);
    let _ = write!(
        out,
        "Refreshed:    {}",
        or_dash(s.last_refreshed_at.map(|t| t.format("%Y-%m-%d %H:%M:%S UTC")))
    );
    out
}

// ── Battery view ────────────────────────────────────────────────────

#[derive(Serialize)]
struct BatteryEntry {
    room: RoomId,
    unique_id: String,
    #[serde(flatten)]
    state: BatteryState,
}

#[derive(Tabled)]
struct BatteryRow {
    #[tabled(rename = "Room")]
    room: RoomId,
    #[tabled(rename = "Sensor")]
    name: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Voltage")]
    voltage: String,
}

fn battery_row(entry: &BatteryEntry) -> BatteryRow {
    BatteryRow {
        room: entry.room,
        name: entry.state.name.clone(),
        level: or_dash(entry.state.level.as_deref()),
        voltage: entry
            .state
            .voltage
            .map_or_else(|| "-".into(), |v| format!("{v:.1} V")),
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(session: &Session) -> Result<(), CliError> {
    session.refresh().await?;
    let rooms = session.coordinator.rooms().await;
    print_rooms(session, &rooms)
}

/// Print a room list in the session's output format.
pub fn print_rooms(session: &Session, rooms: &[RoomSnapshot]) -> Result<(), CliError> {
    let floor = session.coordinator.minimum_plausible_temperature();
    let out = output::render_list(
        session.output,
        rooms,
        |r| room_row(r, floor),
        |r| r.id.to_string(),
    )?;
    output::print_output(&out, session.quiet);
    Ok(())
}

pub async fn show(session: &Session, room: RoomId) -> Result<(), CliError> {
    session.refresh().await?;
    print_room(session, session.room(room).await?)
}

/// Print one room in the session's output format.
pub fn print_room(session: &Session, room: RoomSnapshot) -> Result<(), CliError> {
    let floor = session.coordinator.minimum_plausible_temperature();
    let climate = ClimateState::from_snapshot(&room, floor);
    let out = output::render_single(
        session.output,
        &RoomDetail { room, climate },
        detail,
        |d| d.room.id.to_string(),
    )?;
    output::print_output(&out, session.quiet);
    Ok(())
}

pub async fn batteries(session: &Session) -> Result<(), CliError> {
    session.refresh().await?;

    let mut entries = Vec::new();
    for sensor in battery_sensors(&session.coordinator).await? {
        if let Some(state) = sensor.state().await {
            entries.push(BatteryEntry {
                room: sensor.room_id(),
                unique_id: sensor.unique_id(),
                state,
            });
        }
    }

    let out = output::render_list(session.output, &entries, battery_row, |e| {
        e.unique_id.clone()
    })?;
    output::print_output(&out, session.quiet);
    Ok(())
}

pub async fn status(session: &Session) -> Result<(), CliError> {
    session.refresh().await?;
    print_status(session).await
}

pub async fn print_status(session: &Session) -> Result<(), CliError> {
    let coordinator = &session.coordinator;
    let system = coordinator.system_data().await;
    let status = HubStatus {
        host: coordinator.settings().host.clone(),
        firmware_version: system.as_ref().and_then(|s| s.firmware_version.clone()),
        away: system.as_ref().map(|s| s.away),
        away_temperature: system
            .as_ref()
            .and_then(|s| s.away_set_point_limit)
            .map(from_tenths),
        rooms: coordinator.rooms().await.len(),
        last_refreshed_at: coordinator.last_refreshed_at().await,
    };
    let out = output::render_single(session.output, &status, status_detail, |s| {
        s.host.clone()
    })?;
    output::print_output(&out, session.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use wiser_core::{Battery, RoomId, RoomMode, RoomSnapshot, SetpointOrigin};

    use super::room_row;

    fn room(output: Option<&str>) -> RoomSnapshot {
        RoomSnapshot {
            id: RoomId(3),
            name: "Hall".into(),
            mode: RoomMode::Boost,
            manual_mode: true,
            calculated_temperature: Some(-30000),
            current_set_point: Some(210),
            setpoint_origin: SetpointOrigin::FromBoost,
            percentage_demand: Some(100),
            control_output_state: output.map(Into::into),
            window_state: None,
            window_detection_active: false,
            away_mode_suppressed: false,
            heating_rate: None,
            battery: Some(Battery {
                level: Some("Low".into()),
                voltage_tenths: Some(24),
            }),
        }
    }

    #[test]
    fn row_shows_heating_output_and_clamped_temperature() {
        let row = room_row(&room(Some("On")), -5.0);
        assert_eq!(row.heating, "on");
        assert_eq!(row.temperature, "-5.0 °C");
        assert_eq!(row.target, "21.0 °C");
        assert_eq!(row.mode, "boost");
        assert_eq!(row.demand, "100%");
        assert_eq!(row.battery, "Low");

        assert_eq!(room_row(&room(Some("Off")), -5.0).heating, "off");
        assert_eq!(room_row(&room(None), -5.0).heating, "off");
    }
}
