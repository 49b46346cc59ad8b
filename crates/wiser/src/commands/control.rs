//! Write commands: room temperature, room mode, away mode.
//!
//! Each write is checked against fresh data first (so an unknown room is
//! reported as such rather than as a hub error), then sent, then the
//! forced refresh shows the result.

use tracing::info;

use wiser_core::entity::AwayModeSwitch;
use wiser_core::{RoomId, RoomMode};

use super::{Session, rooms};
use crate::cli::{AwayArgs, Switch};
use crate::error::CliError;

pub async fn set_temperature(
    session: &Session,
    room: RoomId,
    temperature: f64,
) -> Result<(), CliError> {
    session.refresh().await?;
    session.room(room).await?;

    session
        .coordinator
        .set_room_target_temperature(room, temperature)
        .await?;
    info!(%room, temperature, "room temperature set");

    session.refresh().await?;
    rooms::print_room(session, session.room(room).await?)
}

pub async fn set_mode(session: &Session, room: RoomId, mode: RoomMode) -> Result<(), CliError> {
    session.refresh().await?;
    session.room(room).await?;

    session.coordinator.set_room_mode(room, mode).await?;
    info!(%room, %mode, "room mode set");

    session.refresh().await?;
    rooms::print_room(session, session.room(room).await?)
}

pub async fn away(session: &Session, args: AwayArgs) -> Result<(), CliError> {
    let away_temperature = args.temperature.unwrap_or(session.away_temperature);
    let switch = AwayModeSwitch::new(session.coordinator.clone(), away_temperature);

    match args.state {
        Switch::On => switch.turn_on().await?,
        Switch::Off => switch.turn_off().await?,
    }
    info!(state = ?args.state, away_temperature, "away mode set");

    session.refresh().await?;
    rooms::print_status(session).await
}
