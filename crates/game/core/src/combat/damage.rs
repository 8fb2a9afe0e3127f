//! Damage application.

use strum::{Display, IntoStaticStr};
use tracing::trace;

use super::{Combatant, LifecycleEnv};
use crate::event::CombatEvent;
use crate::state::{ActorId, TeamId};

/// Damage category carried with every hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageType {
    #[default]
    Generic,
    /// Direct projectile impact.
    Ballistic,
    /// Area damage from an exploding projectile.
    Explosive,
}

/// A single application of damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageEvent {
    pub amount: f32,
    /// Actor credited with the damage (the shooter).
    pub instigator: Option<ActorId>,
    /// Actor that delivered the damage (the projectile).
    pub source: Option<ActorId>,
    pub damage_type: DamageType,
}

impl DamageEvent {
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            instigator: None,
            source: None,
            damage_type: DamageType::Generic,
        }
    }

    pub fn with_instigator(mut self, instigator: Option<ActorId>) -> Self {
        self.instigator = instigator;
        self
    }

    pub fn with_source(mut self, source: ActorId) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }
}

/// Capability of taking damage.
pub trait Damageable {
    fn team(&self) -> TeamId;

    fn is_alive(&self) -> bool;

    /// Remaining health as a fraction of maximum, clamped to `[0, 1]`.
    fn life_fraction(&self) -> f32;

    /// Applies damage and returns the amount applied.
    fn take_damage(&mut self, event: &DamageEvent, env: &mut dyn LifecycleEnv) -> f32;
}

/// Subtracts `event.amount` from the target's health.
///
/// Returns 0 and leaves the target untouched if it is already dead. HP may
/// go negative internally; observers only ever see the clamped fraction. A
/// hit that depletes health runs the whole Dead transition before the life
/// fraction is published.
pub fn apply_damage(target: &mut Combatant, event: &DamageEvent, env: &mut dyn LifecycleEnv) -> f32 {
    if target.current_hp() <= 0.0 || !event.amount.is_finite() {
        return 0.0;
    }

    let before = target.current_hp();
    let unclamped = before - event.amount;
    let hp = unclamped.min(target.max_hp());
    target.set_current_hp(hp);

    // Healing past max_hp only counts up to the cap.
    let applied = if unclamped > hp { before - hp } else { event.amount };

    trace!(
        target: "combat_core::damage",
        actor = %target.id(),
        amount = event.amount,
        damage_type = %event.damage_type,
        hp,
        "damage applied"
    );

    if hp <= 0.0 {
        target.die(event.instigator, env);
    }

    env.publish(CombatEvent::LifeChanged {
        actor: target.id(),
        fraction: target.life_fraction(),
    });

    applied
}
