//! Combat tuning loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`CombatConfig`] from a TOML file.
    ///
    /// Missing keys fall back to their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate a [`CombatConfig`] from TOML text.
    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;

        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid combat config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let config = ConfigLoader::parse("max_hp = 250.0\n").unwrap();

        assert_eq!(config.max_hp, 250.0);
        assert_eq!(config.respawn_delay, 5.0);
        assert_eq!(config.max_aim_distance, 10_000.0);
        assert_eq!(config.projectile.damage, 25.0);
    }

    #[test]
    fn reads_nested_projectile_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
respawn_delay = 2.5

[projectile]
damage = 80.0
explode_on_hit = true

[projectile.noise]
tag = "Rocket"
"#
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.respawn_delay, 2.5);
        assert_eq!(config.projectile.damage, 80.0);
        assert!(config.projectile.explode_on_hit);
        assert_eq!(config.projectile.noise.tag, "Rocket");
        assert_eq!(config.projectile.noise.range, 3_000.0);
    }

    #[test]
    fn rejects_out_of_range_respawn_delay() {
        let err = ConfigLoader::parse("respawn_delay = 12.0\n").unwrap_err();
        assert!(err.to_string().contains("Invalid combat config"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigLoader::load(&dir.path().join("combat.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
