//! Hook registry for dispatching combat events to hooks.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use super::{CombatHook, HookCommand, HookContext, HookCriticality, HookError};

/// Registry that manages and executes event hooks.
///
/// Hooks run in priority order (lower first). Hooks can also be looked up by
/// name for debugging and tests.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn CombatHook>]>,
    lookup_table: HashMap<&'static str, Arc<dyn CombatHook>>,
}

impl HookRegistry {
    /// Creates a registry. Hooks are sorted by priority; equal priorities keep
    /// registration order.
    pub fn new(mut hooks: Vec<Arc<dyn CombatHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());

        let lookup_table = hooks.iter().map(|h| (h.name(), Arc::clone(h))).collect();

        Self {
            hooks: hooks.into(),
            lookup_table,
        }
    }

    /// Creates a registry with the default set of hooks.
    ///
    /// Default hooks include:
    /// - RespawnHook: spawns a replacement for torn-down combatants
    /// - KillFeedHook: logs every death
    pub fn default_hooks() -> Self {
        use super::{KillFeedHook, RespawnHook};

        Self::new(vec![
            Arc::new(RespawnHook) as Arc<dyn CombatHook>,
            Arc::new(KillFeedHook) as Arc<dyn CombatHook>,
        ])
    }

    /// A registry without hooks.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Returns this registry with `hook` added.
    pub fn with_hook(self, hook: Arc<dyn CombatHook>) -> Self {
        let mut hooks: Vec<_> = self.hooks.iter().cloned().collect();
        hooks.push(hook);
        Self::new(hooks)
    }

    /// Runs every triggered hook against the event in `ctx`.
    ///
    /// # Error Handling
    ///
    /// Hook errors are handled based on criticality level:
    /// - `Critical`: Returns error immediately
    /// - `Important`: Logs error and continues to next hook (default)
    /// - `Optional`: Logs at debug level and continues silently
    pub fn execute_hooks(&self, ctx: &HookContext<'_>) -> Result<Vec<HookCommand>, HookError> {
        let mut commands = Vec::new();

        for hook in self.hooks.iter() {
            if !hook.should_trigger(ctx) {
                continue;
            }

            debug!(
                target: "runtime::hooks",
                hook = hook.name(),
                event = ctx.event.as_snake_case(),
                "running hook"
            );

            match hook.run(ctx) {
                Ok(produced) => commands.extend(produced),
                Err(e) => self.handle_hook_error(hook.as_ref(), e)?,
            }
        }

        Ok(commands)
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn CombatHook>> {
        self.lookup_table.get(name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities in execution order.
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }

    /// Returns Ok(()) for Important/Optional hooks, Err for Critical hooks.
    fn handle_hook_error(&self, hook: &dyn CombatHook, error: HookError) -> Result<(), HookError> {
        match hook.criticality() {
            HookCriticality::Critical => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "critical",
                    error = %error,
                    "Critical hook failed, aborting tick"
                );
                Err(error)
            }
            HookCriticality::Important => {
                error!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "important",
                    error = %error,
                    "Hook failed, continuing"
                );
                Ok(())
            }
            HookCriticality::Optional => {
                debug!(
                    target: "runtime::hooks",
                    hook = hook.name(),
                    criticality = "optional",
                    error = %error,
                    "Optional hook failed"
                );
                Ok(())
            }
        }
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.hooks()).finish()
    }
}

#[cfg(test)]
mod tests {
    use combat_core::{ActorId, CombatEvent, TeamId, TeamScoreTable};

    use super::*;

    struct Failing {
        name: &'static str,
        priority: i32,
        criticality: HookCriticality,
    }

    impl CombatHook for Failing {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn criticality(&self) -> HookCriticality {
            self.criticality
        }

        fn should_trigger(&self, _ctx: &HookContext<'_>) -> bool {
            true
        }

        fn run(&self, _ctx: &HookContext<'_>) -> Result<Vec<HookCommand>, HookError> {
            Err(HookError::new(self.name, "boom"))
        }
    }

    fn failing(name: &'static str, priority: i32, criticality: HookCriticality) -> Arc<dyn CombatHook> {
        Arc::new(Failing {
            name,
            priority,
            criticality,
        })
    }

    fn respawn_event() -> CombatEvent {
        CombatEvent::RespawnRequested {
            actor: ActorId(4),
            team: TeamId(2),
        }
    }

    #[test]
    fn default_hooks_run_in_priority_order() {
        let registry = HookRegistry::default();
        let order: Vec<_> = registry.hooks().collect();
        assert_eq!(order, vec![("respawn", -10), ("kill_feed", 50)]);
        assert!(registry.find("kill_feed").is_some());
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn respawn_request_produces_spawn_command() {
        let scores = TeamScoreTable::new();
        let event = respawn_event();
        let ctx = HookContext {
            event: &event,
            scores: &scores,
            clock: 0.0,
        };

        let commands = HookRegistry::default().execute_hooks(&ctx).unwrap();

        assert_eq!(commands, vec![HookCommand::SpawnCombatant { team: TeamId(2) }]);
    }

    #[test]
    fn non_critical_failures_are_absorbed() {
        let registry = HookRegistry::default()
            .with_hook(failing("cosmetic", 0, HookCriticality::Optional))
            .with_hook(failing("stats", 0, HookCriticality::Important));
        let scores = TeamScoreTable::new();
        let event = respawn_event();
        let ctx = HookContext {
            event: &event,
            scores: &scores,
            clock: 0.0,
        };

        let commands = registry.execute_hooks(&ctx).unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn critical_failure_aborts() {
        let registry = HookRegistry::empty().with_hook(failing("ledger", 0, HookCriticality::Critical));
        let scores = TeamScoreTable::new();
        let event = respawn_event();
        let ctx = HookContext {
            event: &event,
            scores: &scores,
            clock: 0.0,
        };

        assert_eq!(
            registry.execute_hooks(&ctx),
            Err(HookError::new("ledger", "boom"))
        );
    }
}
