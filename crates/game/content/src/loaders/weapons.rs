//! Weapon catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{ProjectileParams, WeaponKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Static description of a weapon kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponTemplate {
    pub kind: WeaponKind,
    /// Inventory ordering key, ascending.
    pub slot_priority: i32,
    pub magazine_size: u32,
    /// Initial projectile speed in units per second.
    #[serde(default = "default_muzzle_speed")]
    pub muzzle_speed: f32,
    /// Seconds between shots while the trigger is held.
    #[serde(default = "default_refire_interval")]
    pub refire_interval: f32,
    /// Projectile fired by this weapon. Missing fields use defaults.
    #[serde(default)]
    pub projectile: ProjectileParams,
}

fn default_muzzle_speed() -> f32 {
    WeaponTemplate::DEFAULT_MUZZLE_SPEED
}

fn default_refire_interval() -> f32 {
    WeaponTemplate::DEFAULT_REFIRE_INTERVAL
}

impl WeaponTemplate {
    pub const DEFAULT_MUZZLE_SPEED: f32 = 3_000.0;
    pub const DEFAULT_REFIRE_INTERVAL: f32 = 0.25;

    pub fn new(kind: impl Into<WeaponKind>, slot_priority: i32, magazine_size: u32) -> Self {
        Self {
            kind: kind.into(),
            slot_priority,
            magazine_size,
            muzzle_speed: Self::DEFAULT_MUZZLE_SPEED,
            refire_interval: Self::DEFAULT_REFIRE_INTERVAL,
            projectile: ProjectileParams::default(),
        }
    }

    pub fn with_projectile(mut self, projectile: ProjectileParams) -> Self {
        self.projectile = projectile;
        self
    }
}

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponTemplate>,
}

impl WeaponCatalog {
    pub fn new(weapons: Vec<WeaponTemplate>) -> Self {
        Self { weapons }
    }

    pub fn get(&self, kind: &WeaponKind) -> Option<&WeaponTemplate> {
        self.weapons.iter().find(|template| &template.kind == kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = &WeaponKind> {
        self.weapons.iter().map(|template| &template.kind)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

/// Loader for weapon catalogs from RON files.
pub struct WeaponCatalogLoader;

impl WeaponCatalogLoader {
    /// Load a weapon catalog from a RON file.
    ///
    /// Fails on duplicate kinds and on invalid projectile parameters.
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let catalog: WeaponCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for template in &catalog.weapons {
            if !seen.insert(&template.kind) {
                anyhow::bail!("Duplicate weapon kind '{}' in catalog", template.kind);
            }
            if !(template.muzzle_speed.is_finite() && template.muzzle_speed > 0.0) {
                anyhow::bail!("Weapon '{}' needs a positive muzzle_speed", template.kind);
            }
            if !(template.refire_interval.is_finite() && template.refire_interval >= 0.0) {
                anyhow::bail!("Weapon '{}' has a negative refire_interval", template.kind);
            }
            template
                .projectile
                .validate()
                .map_err(|e| anyhow::anyhow!("Invalid projectile for '{}': {}", template.kind, e))?;
        }

        Ok(catalog)
    }
}
