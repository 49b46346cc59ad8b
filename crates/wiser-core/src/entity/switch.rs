// Whole-house away-mode switch.

use crate::coordinator::HubCoordinator;
use crate::error::CoreError;
use crate::hub::HubClient;

pub struct AwayModeSwitch<C: HubClient> {
    coordinator: HubCoordinator<C>,
    away_temperature: f64,
}

impl<C: HubClient> AwayModeSwitch<C> {
    pub const NAME: &'static str = "Wiser Away Mode";

    /// `away_temperature` is the setpoint every room drops to while away.
    pub fn new(coordinator: HubCoordinator<C>, away_temperature: f64) -> Self {
        Self {
            coordinator,
            away_temperature,
        }
    }

    pub fn away_temperature(&self) -> f64 {
        self.away_temperature
    }

    /// `None` until the first successful refresh.
    pub async fn is_on(&self) -> Option<bool> {
        self.coordinator.system_data().await.map(|system| system.away)
    }

    pub async fn turn_on(&self) -> Result<(), CoreError> {
        self.coordinator
            .set_away_mode(true, self.away_temperature)
            .await
    }

    pub async fn turn_off(&self) -> Result<(), CoreError> {
        self.coordinator
            .set_away_mode(false, self.away_temperature)
            .await
    }
}
