use glam::Vec3;

use crate::combat::DamageEvent;
use crate::state::{ActorId, TeamId};

/// Routes damage to whatever actor was struck.
pub trait DamageSink {
    /// True if `actor` has health and reacts to damage.
    fn is_combatant(&self, actor: ActorId) -> bool;

    /// Applies `event` to `target`. Returns the damage actually applied
    /// (0 for non-combatants and the already dead).
    fn apply_damage_to(&mut self, target: ActorId, event: DamageEvent) -> f32;
}

/// Perception noise for AI awareness.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Noise {
    pub location: Vec3,
    pub loudness: f32,
    pub range: f32,
    pub tag: String,
    pub instigator: Option<ActorId>,
}

pub trait NoiseEmitter {
    fn emit_noise(&mut self, noise: Noise);
}

/// Receives kill credit.
pub trait ScoreSink {
    fn increment_score(&mut self, team: TeamId);
}
