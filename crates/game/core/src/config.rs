use crate::error::ConfigError;
use crate::projectile::ProjectileParams;

/// Combat tuning parameters supplied at load time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Health a combatant spawns with.
    pub max_hp: f32,
    /// Seconds between death and teardown of the dead combatant.
    pub respawn_delay: f32,
    /// Length of the aim trace used to find the weapon target location.
    pub max_aim_distance: f32,
    /// Projectile parameters used when a weapon template does not override them.
    pub projectile: ProjectileParams,
}

impl CombatConfig {
    pub const DEFAULT_MAX_HP: f32 = 500.0;
    pub const DEFAULT_RESPAWN_DELAY: f32 = 5.0;
    pub const DEFAULT_MAX_AIM_DISTANCE: f32 = 10_000.0;

    pub const MIN_RESPAWN_DELAY: f32 = 0.0;
    pub const MAX_RESPAWN_DELAY: f32 = 10.0;
    pub const MAX_AIM_DISTANCE_LIMIT: f32 = 100_000.0;

    pub fn new() -> Self {
        Self {
            max_hp: Self::DEFAULT_MAX_HP,
            respawn_delay: Self::DEFAULT_RESPAWN_DELAY,
            max_aim_distance: Self::DEFAULT_MAX_AIM_DISTANCE,
            projectile: ProjectileParams::default(),
        }
    }

    pub fn with_max_hp(mut self, max_hp: f32) -> Self {
        self.max_hp = max_hp;
        self
    }

    pub fn with_respawn_delay(mut self, respawn_delay: f32) -> Self {
        self.respawn_delay = respawn_delay;
        self
    }

    /// Rejects values the combat rules cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_hp.is_finite() && self.max_hp > 0.0) {
            return Err(ConfigError::InvalidMaxHp(self.max_hp));
        }

        if !(Self::MIN_RESPAWN_DELAY..=Self::MAX_RESPAWN_DELAY).contains(&self.respawn_delay) {
            return Err(ConfigError::RespawnDelayOutOfRange {
                value: self.respawn_delay,
                min: Self::MIN_RESPAWN_DELAY,
                max: Self::MAX_RESPAWN_DELAY,
            });
        }

        if !(0.0..=Self::MAX_AIM_DISTANCE_LIMIT).contains(&self.max_aim_distance) {
            return Err(ConfigError::AimDistanceOutOfRange {
                value: self.max_aim_distance,
                max: Self::MAX_AIM_DISTANCE_LIMIT,
            });
        }

        self.projectile.validate()
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CombatConfig::default();
        assert_eq!(config.max_hp, 500.0);
        assert_eq!(config.respawn_delay, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_respawn_delay_outside_range() {
        let config = CombatConfig::default().with_respawn_delay(12.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RespawnDelayOutOfRange { value, .. }) if value == 12.0
        ));

        let config = CombatConfig::default().with_respawn_delay(0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_max_hp() {
        let config = CombatConfig::default().with_max_hp(0.0);
        assert_eq!(config.validate(), Err(ConfigError::InvalidMaxHp(0.0)));

        let config = CombatConfig::default().with_max_hp(f32::NAN);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMaxHp(_))));
    }

    #[test]
    fn rejects_negative_projectile_radius() {
        let mut config = CombatConfig::default();
        config.projectile.explosion_radius = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NegativeProjectileParam {
                field: "explosion_radius",
                ..
            })
        ));
    }
}
