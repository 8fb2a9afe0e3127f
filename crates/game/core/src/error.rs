//! Common error infrastructure for combat-core.
//!
//! Gameplay operations never fail: damage to the dead, switching with a
//! single weapon or a second hit on the same projectile are guarded no-ops.
//! Errors exist only for surfaces where a caller hands the core bad input up
//! front, such as tuning values that make no physical sense.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller may retry with different input
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistency, indicates a bug
/// - **Fatal**: the session cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat errors.
///
/// Use `#[derive(thiserror::Error)]` for Display/Error and classify severity
/// by recoverability, not impact.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code for logs and reports.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Invalid tuning values rejected by [`crate::CombatConfig::validate`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("max_hp must be positive and finite, got {0}")]
    InvalidMaxHp(f32),

    #[error("respawn_delay must be within [{min}, {max}] seconds, got {value}")]
    RespawnDelayOutOfRange { value: f32, min: f32, max: f32 },

    #[error("max_aim_distance must be within [0, {max}], got {value}")]
    AimDistanceOutOfRange { value: f32, max: f32 },

    #[error("projectile parameter '{field}' must be non-negative and finite, got {value}")]
    NegativeProjectileParam { field: &'static str, value: f32 },
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMaxHp(_) => "CONFIG_INVALID_MAX_HP",
            Self::RespawnDelayOutOfRange { .. } => "CONFIG_RESPAWN_DELAY_OUT_OF_RANGE",
            Self::AimDistanceOutOfRange { .. } => "CONFIG_AIM_DISTANCE_OUT_OF_RANGE",
            Self::NegativeProjectileParam { .. } => "CONFIG_NEGATIVE_PROJECTILE_PARAM",
        }
    }
}
