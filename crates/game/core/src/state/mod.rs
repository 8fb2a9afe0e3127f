//! Identifiers and small value types shared by every combat component.
//!
//! The core never owns engine objects. Actors, components and weapons are
//! referred to by opaque handles handed out by the host, and all state that
//! the core does own (combatants, inventories, projectiles, scores) stores
//! those handles rather than references.
mod common;

pub use common::{ActorId, ComponentId, TeamId, WeaponHandle, WeaponKind};
