//! Runtime orchestration for the combat core.
//!
//! This crate supplies in-process implementations of every collaborator the
//! combat core needs and drives them from a single tick loop. Consumers build
//! a [`Session`], feed it input and drain the resulting events.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the tick loop and builder
//! - [`world`] implements the scene, weapons and borrow views
//! - [`hooks`] reacts to combat events with follow-up commands
//! - [`api`] and [`report`] expose the types downstream clients interact with
pub mod api;
pub mod hooks;
pub mod report;
pub mod session;
pub mod world;

pub use api::{Result, RuntimeError};
pub use hooks::{
    CombatHook, HookCommand, HookContext, HookCriticality, HookError, HookRegistry, KillFeedHook,
    RespawnHook,
};
pub use report::{SessionReport, TeamStanding};
pub use session::{ProjectileSpawn, Session, SessionBuilder, SessionConfig, TickReport};
pub use world::{BodyShape, ComponentShape, SceneWorld, SweepHit, WeaponActor, WeaponRegistry};
