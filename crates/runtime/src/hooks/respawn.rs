//! Hook that replaces torn-down combatants.

use combat_core::CombatEvent;

use super::{CombatHook, HookCommand, HookContext, HookCriticality, HookError};

/// Spawns a replacement whenever a dead combatant's respawn timer expires.
///
/// The combat core only tears the dead combatant down; deciding that a new
/// one should appear is left to this hook so hosts can swap in their own
/// respawn rules.
#[derive(Debug, Clone, Copy)]
pub struct RespawnHook;

impl CombatHook for RespawnHook {
    fn name(&self) -> &'static str {
        "respawn"
    }

    fn priority(&self) -> i32 {
        -10
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Critical
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        matches!(ctx.event, CombatEvent::RespawnRequested { .. })
    }

    fn run(&self, ctx: &HookContext<'_>) -> Result<Vec<HookCommand>, HookError> {
        match ctx.event {
            CombatEvent::RespawnRequested { team, .. } => {
                Ok(vec![HookCommand::SpawnCombatant { team: *team }])
            }
            other => Err(HookError::new(
                self.name(),
                format!("unexpected event {}", other.as_snake_case()),
            )),
        }
    }
}
