//! Engine-independent combat rules for a first-person shooter.
//!
//! `combat-core` owns the state machines that decide what happens when a
//! projectile connects, a combatant runs out of health or a player cycles
//! weapons. Everything the rules need from a host (spatial queries, timers,
//! weapon actors, HUD) is reached through the collaborator traits in [`env`],
//! so the same code runs inside an engine or under a manual clock in tests.
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod event;
pub mod inventory;
pub mod projectile;
pub mod score;
pub mod state;
pub mod timer;

pub use combat::{
    Combatant, DamageEvent, DamageType, Damageable, LifeState, LifecycleEnv, WeaponHolder,
    apply_damage,
};
pub use config::CombatConfig;
pub use env::{
    AmmoCount, DamageSink, HitEnv, Noise, NoiseEmitter, ObjectCategories, Overlap, PhysicsScene,
    ScoreSink, WeaponRack, WeaponSpawner, WeaponSpec,
};
pub use error::{CombatError, ConfigError, ErrorSeverity};
pub use event::{CombatEvent, EventQueue, Presentation};
pub use inventory::{OwnedWeapon, WeaponInventory};
pub use projectile::{HitEvent, HitOutcome, NoiseParams, ProjectileParams, ProjectilePhase, ProjectileState};
pub use score::TeamScoreTable;
pub use state::{ActorId, ComponentId, TeamId, WeaponHandle, WeaponKind};
pub use timer::{FiredTimer, ManualTimers, TimerCallback, TimerHandle, TimerService};
