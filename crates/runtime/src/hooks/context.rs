//! Execution context provided to hooks during evaluation.

use combat_core::{CombatEvent, TeamScoreTable};

/// Read-only view of the session handed to each hook.
pub struct HookContext<'a> {
    /// The event being dispatched.
    pub event: &'a CombatEvent,

    /// Scores after the event was applied.
    pub scores: &'a TeamScoreTable,

    /// Session clock in seconds.
    pub clock: f64,
}
