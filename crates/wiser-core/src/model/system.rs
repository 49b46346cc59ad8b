use serde::{Deserialize, Serialize};

/// Hub-wide state relevant to consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemSnapshot {
    /// Whole house is in away mode.
    pub away: bool,
    /// Away-mode setpoint in tenths of a degree.
    pub away_set_point_limit: Option<i32>,
    pub firmware_version: Option<String>,
}
