//! Event hook system for session orchestration.
//!
//! Hooks react to [`CombatEvent`](combat_core::CombatEvent)s published by the combat core. Each hook
//! inspects one event at a time and may return [`HookCommand`]s that the
//! session executes before the tick ends. Commands can publish further events,
//! which are fed back through the hooks until nothing new happens or the pass
//! limit is reached.
//!
//! # Architecture
//!
//! - Hooks are registered in the [`SessionBuilder`](crate::SessionBuilder) and sorted by priority
//! - Events are drained from the queue at the end of every tick and evaluated in order
//! - Hook failures are handled according to [`HookCriticality`]

mod context;
mod kill_feed;
mod registry;
mod respawn;

pub use context::HookContext;
pub use kill_feed::KillFeedHook;
pub use registry::HookRegistry;
pub use respawn::RespawnHook;

use combat_core::{ActorId, TeamId, WeaponKind};
use thiserror::Error;

/// Defines the criticality level of a hook for error handling.
///
/// - Critical hooks must succeed or the tick fails
/// - Important hooks log errors but allow continuation
/// - Optional hooks can fail silently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Hook failure fails the whole tick.
    Critical,

    /// Hook failure is logged as an error; remaining hooks still run.
    ///
    /// This is the default level.
    Important,

    /// Hook failure is logged at debug level and otherwise ignored.
    Optional,
}

/// Work a hook asks the session to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum HookCommand {
    /// Spawn a fresh combatant for `team` at its spawn point.
    SpawnCombatant { team: TeamId },

    /// Give `actor` a weapon of `kind`.
    GrantWeapon { actor: ActorId, kind: WeaponKind },
}

#[derive(Debug, Error, PartialEq)]
#[error("hook '{hook}' failed: {reason}")]
pub struct HookError {
    pub hook: &'static str,
    pub reason: String,
}

impl HookError {
    pub fn new(hook: &'static str, reason: impl Into<String>) -> Self {
        Self {
            hook,
            reason: reason.into(),
        }
    }
}

/// Reaction to combat events.
///
/// # Execution Order
///
/// Hooks are sorted by priority (lower values execute first):
/// - Negative priorities: bookkeeping that other hooks depend on
/// - Zero: default priority for most hooks
/// - Positive priorities: optional or cosmetic hooks
pub trait CombatHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging and debugging).
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Whether this hook cares about the event in `ctx`.
    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool;

    /// Reacts to the event. Only called when [`should_trigger`](Self::should_trigger) returned true.
    fn run(&self, ctx: &HookContext<'_>) -> Result<Vec<HookCommand>, HookError>;
}
