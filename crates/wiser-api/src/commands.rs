// Hub setter endpoints
//
// Room and system overrides via `PATCH /data/domain/Room/{id}` and
// `PATCH /data/domain/System/`. Temperatures are accepted in degrees Celsius
// and sent in the hub's tenths-of-a-degree fixed point.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{Display, EnumString};
use tracing::debug;

use crate::client::WiserClient;
use crate::error::Error;

/// Lowest setpoint the hub accepts for heating.
pub const MIN_SETPOINT_CELSIUS: f64 = 5.0;
/// Highest setpoint the hub accepts.
pub const MAX_SETPOINT_CELSIUS: f64 = 30.0;
/// Sentinel setpoint that turns a room's heating off.
pub const OFF_SETPOINT_CELSIUS: f64 = -20.0;

/// Room operating mode as understood by the hub.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RoomMode {
    /// Follow the room's schedule.
    Auto,
    /// Hold a fixed setpoint indefinitely.
    Manual,
    /// Temporary manual override for a fixed duration.
    Boost,
    /// Manual mode at the "off" setpoint.
    Off,
}

/// Whole-house away state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeAwayMode {
    Home,
    Away,
}

impl HomeAwayMode {
    pub fn from_away(away: bool) -> Self {
        if away { Self::Away } else { Self::Home }
    }
}

/// Convert degrees to the hub's tenths, rejecting setpoints it won't accept.
pub(crate) fn setpoint_tenths(celsius: f64) -> Result<i32, Error> {
    let in_range = (MIN_SETPOINT_CELSIUS..=MAX_SETPOINT_CELSIUS).contains(&celsius);
    #[allow(clippy::float_cmp)]
    let is_off = celsius == OFF_SETPOINT_CELSIUS;
    if !in_range && !is_off {
        return Err(Error::InvalidArgument(format!(
            "setpoint {celsius} is outside {MIN_SETPOINT_CELSIUS}..={MAX_SETPOINT_CELSIUS} \
             and is not the off setpoint ({OFF_SETPOINT_CELSIUS})"
        )));
    }
    #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
    Ok((celsius * 10.0).round() as i32)
}

fn cancel_override() -> Value {
    json!({
        "RequestOverride": {
            "Type": "None",
            "Originator": "App",
            "DurationMinutes": 0,
            "SetPoint": 0,
        }
    })
}

impl WiserClient {
    /// Override a room's setpoint until the next schedule change.
    ///
    /// `PATCH /data/domain/Room/{id}`
    pub async fn set_room_temperature(&self, room_id: u32, celsius: f64) -> Result<(), Error> {
        let set_point = setpoint_tenths(celsius)?;
        let url = self.domain_url(&format!("Room/{room_id}"))?;
        debug!(room_id, set_point, "setting room temperature");
        self.patch(
            url,
            &json!({
                "RequestOverride": {
                    "Type": "Manual",
                    "SetPoint": set_point,
                }
            }),
        )
        .await
    }

    /// Switch a room's mode.
    ///
    /// `boost_celsius` and `boost_minutes` are only used for
    /// [`RoomMode::Boost`]. Auto and Manual also cancel any running override
    /// so the room immediately follows its new mode.
    pub async fn set_room_mode(
        &self,
        room_id: u32,
        mode: RoomMode,
        boost_celsius: f64,
        boost_minutes: u32,
    ) -> Result<(), Error> {
        let url = self.domain_url(&format!("Room/{room_id}"))?;
        debug!(room_id, %mode, "setting room mode");

        match mode {
            RoomMode::Auto => {
                self.patch(url.clone(), &json!({ "Mode": "Auto" })).await?;
                self.patch(url, &cancel_override()).await
            }
            RoomMode::Manual => {
                self.patch(url.clone(), &json!({ "Mode": "Manual" })).await?;
                self.patch(url, &cancel_override()).await
            }
            RoomMode::Boost => {
                let set_point = setpoint_tenths(boost_celsius)?;
                self.patch(
                    url,
                    &json!({
                        "RequestOverride": {
                            "Type": "Manual",
                            "Originator": "App",
                            "DurationMinutes": boost_minutes,
                            "SetPoint": set_point,
                        }
                    }),
                )
                .await
            }
            RoomMode::Off => {
                let set_point = setpoint_tenths(OFF_SETPOINT_CELSIUS)?;
                self.patch(url.clone(), &json!({ "Mode": "Manual" })).await?;
                self.patch(
                    url,
                    &json!({
                        "RequestOverride": {
                            "Type": "Manual",
                            "SetPoint": set_point,
                        }
                    }),
                )
                .await
            }
        }
    }

    /// Put the whole house in or out of away mode.
    ///
    /// `PATCH /data/domain/System/`
    pub async fn set_home_away_mode(
        &self,
        mode: HomeAwayMode,
        away_celsius: f64,
    ) -> Result<(), Error> {
        let url = self.domain_url("System/")?;
        debug!(%mode, away_celsius, "setting home/away mode");

        let request = match mode {
            HomeAwayMode::Away => {
                let set_point = setpoint_tenths(away_celsius)?;
                json!({ "Type": 2, "SetPoint": set_point })
            }
            HomeAwayMode::Home => json!({ "Type": 0, "SetPoint": 0 }),
        };
        self.patch(url, &json!({ "RequestOverride": request })).await
    }
}
