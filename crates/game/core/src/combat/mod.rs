//! Health, damage and death.
//!
//! A [`Combatant`] is plain data composed of health, team and a
//! [`WeaponInventory`](crate::WeaponInventory). Behaviour is exposed through
//! two capability traits:
//!
//! - [`Damageable`]: anything that can take damage and die
//! - [`WeaponHolder`]: anything that carries and aims weapons
//!
//! # Lifecycle
//!
//! ```text
//! Alive ──hp <= 0──▶ Dead ──respawn scheduled──▶ PendingRespawn ──timer──▶ Removed
//!   ▲                                                  │
//!   └──────────────────────── reset ◀──────────────────┘
//! ```
//!
//! The Dead transition is atomic from the caller's point of view: weapon
//! deactivation, score credit, input lockout, HUD reset, the death event and
//! the respawn timer all happen inside the same [`apply_damage`] call.

mod damage;
mod lifecycle;

#[cfg(test)]
pub(crate) mod testing;

pub use damage::{DamageEvent, DamageType, Damageable, apply_damage};
pub use lifecycle::{Combatant, LifeState, LifecycleEnv, WeaponHolder};
