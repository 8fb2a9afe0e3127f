//! Unified error types surfaced by the session API.
//!
//! Gameplay no-ops (damage to the dead, switching with one weapon) are not
//! errors. These variants cover callers addressing things that do not exist
//! and hooks that must not fail.

use combat_core::{ActorId, CombatError, ConfigError, ErrorSeverity, WeaponKind};
use thiserror::Error;

use crate::hooks::HookError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error, PartialEq)]
pub enum RuntimeError {
    #[error("no combatant with id {0}")]
    UnknownCombatant(ActorId),

    #[error("no projectile with id {0}")]
    UnknownProjectile(ActorId),

    #[error("weapon kind '{0}' is not in the catalog")]
    UnknownWeaponKind(WeaponKind),

    #[error("combatant {0} has no active weapon")]
    NoActiveWeapon(ActorId),

    #[error("invalid combat config")]
    InvalidConfig(#[from] ConfigError),

    #[error("critical hook failed")]
    CriticalHook(#[from] HookError),
}

impl CombatError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownCombatant(_) | Self::UnknownProjectile(_) | Self::NoActiveWeapon(_) => {
                ErrorSeverity::Recoverable
            }
            Self::UnknownWeaponKind(_) | Self::InvalidConfig(_) => ErrorSeverity::Validation,
            Self::CriticalHook(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCombatant(_) => "RUNTIME_UNKNOWN_COMBATANT",
            Self::UnknownProjectile(_) => "RUNTIME_UNKNOWN_PROJECTILE",
            Self::UnknownWeaponKind(_) => "RUNTIME_UNKNOWN_WEAPON_KIND",
            Self::NoActiveWeapon(_) => "RUNTIME_NO_ACTIVE_WEAPON",
            Self::InvalidConfig(_) => "RUNTIME_INVALID_CONFIG",
            Self::CriticalHook(_) => "RUNTIME_CRITICAL_HOOK",
        }
    }
}
