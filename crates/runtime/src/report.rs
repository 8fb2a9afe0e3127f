//! Serializable session summaries.

use combat_core::TeamId;
use serde::Serialize;

/// Score and survivors of one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub team: TeamId,
    /// Deaths suffered by this team's combatants.
    pub score: i32,
    pub alive: usize,
}

impl TeamStanding {
    pub fn new(team: TeamId) -> Self {
        Self {
            team,
            score: 0,
            alive: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub clock: f64,
    pub teams: Vec<TeamStanding>,
    pub projectiles_in_flight: usize,
}
