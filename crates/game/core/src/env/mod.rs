//! Traits describing the host the combat core runs inside.
//!
//! The core calls out through these collaborators instead of reaching for
//! engine singletons. Weapon actors, the physics scene, damage routing,
//! perception noise and scorekeeping are all injected by the caller. The
//! [`HitEnv`] aggregate bundles what projectile resolution needs so a single
//! `&mut dyn HitEnv` can be threaded through without hard coupling to
//! concrete implementations.
mod scene;
mod sinks;
mod weapons;

pub use scene::{ObjectCategories, Overlap, PhysicsScene};
pub use sinks::{DamageSink, Noise, NoiseEmitter, ScoreSink};
pub use weapons::{AmmoCount, WeaponRack, WeaponSpawner, WeaponSpec};

use crate::event::Presentation;
use crate::timer::TimerService;

/// Everything a projectile touches while resolving a hit.
pub trait HitEnv: PhysicsScene + DamageSink + NoiseEmitter + Presentation + TimerService {}

impl<T> HitEnv for T where
    T: PhysicsScene + DamageSink + NoiseEmitter + Presentation + TimerService + ?Sized
{
}
