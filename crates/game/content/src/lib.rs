//! Data-driven combat content and loaders.
//!
//! This crate provides loaders for RON/TOML data files:
//! - Combat tuning (data-driven via TOML)
//! - Weapon catalogs (data-driven via RON)
//!
//! Content is consumed by the runtime when spawning combatants, weapons and
//! projectiles. It never appears in combat state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, WeaponCatalog, WeaponCatalogLoader, WeaponTemplate};
