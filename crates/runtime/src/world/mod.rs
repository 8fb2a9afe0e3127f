//! In-process implementations of the combat collaborators.
//!
//! - [`SceneWorld`]: sphere-based traces, sweeps and overlaps
//! - [`WeaponRegistry`]: weapon spawning and trigger state from a catalog
//! - [`LifecycleView`] and [`HitView`]: borrow adapters handed to the core

mod scene;
mod views;
mod weapons;

pub use scene::{BodyShape, ComponentShape, SceneWorld, SweepHit};
pub use views::{HitView, LifecycleView};
pub use weapons::{WeaponActor, WeaponRegistry};
