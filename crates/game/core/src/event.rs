//! Outbound notifications for presentation layers and hooks.
//!
//! The core never calls into UI code. HUD updates, death and hit hooks are
//! published as [`CombatEvent`]s and drained later by whoever renders them.

use glam::Vec3;
use strum::IntoStaticStr;

use crate::env::Noise;
use crate::state::{ActorId, TeamId, WeaponHandle};

/// Something observable happened inside the combat core.
#[derive(Clone, Debug, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// Life fraction changed, already clamped to `[0, 1]`.
    LifeChanged { actor: ActorId, fraction: f32 },

    /// Ammo counter for the HUD. `(0, 0)` clears the counter.
    AmmoUpdated {
        actor: ActorId,
        magazine_size: u32,
        current_ammo: u32,
    },

    WeaponActivated { actor: ActorId, weapon: WeaponHandle },

    WeaponDeactivated { actor: ActorId, weapon: WeaponHandle },

    /// A combatant entered the Dead state.
    Died {
        actor: ActorId,
        team: TeamId,
        killer: Option<ActorId>,
    },

    /// A dead combatant was torn down; upstream should spawn a replacement.
    RespawnRequested { actor: ActorId, team: TeamId },

    /// A perception noise was emitted.
    NoiseEmitted(Noise),

    /// A projectile resolved its first collision.
    ProjectileHit {
        projectile: ActorId,
        struck: Option<ActorId>,
        location: Vec3,
        exploded: bool,
    },

    ProjectileDestroyed { projectile: ActorId },
}

impl CombatEvent {
    /// Returns the snake_case name of this event (for logging).
    pub fn as_snake_case(&self) -> &'static str {
        self.into()
    }

    /// The actor this event is primarily about.
    pub fn subject(&self) -> ActorId {
        match self {
            Self::LifeChanged { actor, .. }
            | Self::AmmoUpdated { actor, .. }
            | Self::WeaponActivated { actor, .. }
            | Self::WeaponDeactivated { actor, .. }
            | Self::Died { actor, .. }
            | Self::RespawnRequested { actor, .. } => *actor,
            Self::NoiseEmitted(noise) => noise.instigator.unwrap_or(ActorId::WORLD),
            Self::ProjectileHit { projectile, .. } | Self::ProjectileDestroyed { projectile } => {
                *projectile
            }
        }
    }
}

/// Sink for outbound combat events.
pub trait Presentation {
    fn publish(&mut self, event: CombatEvent);
}

/// FIFO event queue drained by the presentation layer.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<CombatEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events published so far, oldest first.
    pub fn as_slice(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Removes and returns every queued event.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Puts `events` back ahead of anything queued since they were drained.
    pub fn requeue_front(&mut self, mut events: Vec<CombatEvent>) {
        events.append(&mut self.events);
        self.events = events;
    }
}

impl Presentation for EventQueue {
    fn publish(&mut self, event: CombatEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destroyed(id: u32) -> CombatEvent {
        CombatEvent::ProjectileDestroyed {
            projectile: ActorId(id),
        }
    }

    #[test]
    fn requeued_events_come_before_newer_ones() {
        let mut queue = EventQueue::new();
        queue.publish(destroyed(1));
        queue.publish(destroyed(2));
        let mut drained = queue.drain().into_iter();
        drained.next();

        queue.publish(destroyed(3));
        queue.requeue_front(drained.collect());

        assert_eq!(queue.as_slice(), &[destroyed(2), destroyed(3)]);
    }
}
