//! Hook that reports deaths.

use combat_core::CombatEvent;
use tracing::info;

use super::{CombatHook, HookCommand, HookContext, HookCriticality, HookError};

#[derive(Debug, Clone, Copy)]
pub struct KillFeedHook;

impl CombatHook for KillFeedHook {
    fn name(&self) -> &'static str {
        "kill_feed"
    }

    fn priority(&self) -> i32 {
        50
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn should_trigger(&self, ctx: &HookContext<'_>) -> bool {
        matches!(ctx.event, CombatEvent::Died { .. })
    }

    fn run(&self, ctx: &HookContext<'_>) -> Result<Vec<HookCommand>, HookError> {
        if let CombatEvent::Died { actor, team, killer } = ctx.event {
            info!(
                target: "runtime::kill_feed",
                victim = %actor,
                team = %team,
                killer = ?killer,
                team_score = ctx.scores.score(*team),
                clock = ctx.clock,
                "kill"
            );
        }
        Ok(Vec::new())
    }
}
