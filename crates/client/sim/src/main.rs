//! Headless skirmish simulator.
//!
//! Loads combat content from disk, spawns two teams facing each other and
//! lets every combatant shoot at the nearest living enemy. Prints the final
//! standings as JSON on stdout.
mod config;
mod script;

use anyhow::{Context, Result};
use combat_content::{ConfigLoader, ContentFactory, WeaponCatalog, WeaponCatalogLoader};
use combat_core::CombatConfig;
use runtime::Session;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::SimConfig;
use script::Skirmish;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let config = SimConfig::from_env();
    let (combat, catalog) = load_content(&config)?;

    let loadout: Vec<_> = catalog.kinds().cloned().collect();
    tracing::info!(
        weapons = catalog.len(),
        team_size = config.team_size,
        ticks = config.ticks,
        "starting skirmish"
    );

    let session = Session::builder()
        .combat_config(combat)
        .catalog(catalog)
        .loadout(loadout)
        .build()?;

    let mut skirmish = Skirmish::new(session, &config)?;
    skirmish.run(config.ticks, config.tick_seconds)?;

    let report = skirmish.session().report();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Reads tuning and weapons, preferring explicit file paths over the data directory.
fn load_content(config: &SimConfig) -> Result<(CombatConfig, WeaponCatalog)> {
    let factory = ContentFactory::new(config.data_dir.clone());

    let combat = match &config.config_path {
        Some(path) => ConfigLoader::load(path),
        None => factory.load_config(),
    }
    .context("loading combat config")?;

    let catalog = match &config.catalog_path {
        Some(path) => WeaponCatalogLoader::load(path),
        None => factory.load_weapons(),
    }
    .context("loading weapon catalog")?;

    Ok((combat, catalog))
}

/// Logs go to stderr so stdout stays machine readable.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
