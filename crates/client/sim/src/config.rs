//! Simulator configuration read from the environment.
use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory holding `combat.toml` and `weapons.ron`.
    pub data_dir: PathBuf,
    /// Overrides `combat.toml` inside `data_dir`.
    pub config_path: Option<PathBuf>,
    /// Overrides `weapons.ron` inside `data_dir`.
    pub catalog_path: Option<PathBuf>,
    pub ticks: u32,
    pub tick_seconds: f32,
    pub team_size: u32,
    /// Ticks between scripted weapon switches; 0 disables switching.
    pub switch_every: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            config_path: None,
            catalog_path: None,
            ticks: 1_800,
            tick_seconds: 1.0 / 60.0,
            team_size: 2,
            switch_every: 240,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: `data`)
    /// - `COMBAT_CONFIG` - Path to a combat tuning TOML file
    /// - `WEAPON_CATALOG` - Path to a weapon catalog RON file
    /// - `SIM_TICKS` - Number of ticks to run (default: 1800)
    /// - `SIM_TICK_SECONDS` - Seconds per tick (default: 1/60)
    /// - `SIM_TEAMS` - Combatants per team (default: 2)
    /// - `SIM_SWITCH_EVERY` - Ticks between weapon switches (default: 240)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("COMBAT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.config_path = env::var("COMBAT_CONFIG").ok().map(PathBuf::from);
        config.catalog_path = env::var("WEAPON_CATALOG").ok().map(PathBuf::from);

        if let Some(ticks) = read_env::<u32>("SIM_TICKS") {
            config.ticks = ticks;
        }
        if let Some(seconds) = read_env::<f32>("SIM_TICK_SECONDS") {
            config.tick_seconds = seconds.max(0.0);
        }
        if let Some(size) = read_env::<u32>("SIM_TEAMS") {
            config.team_size = size.max(1);
        }
        if let Some(every) = read_env::<u32>("SIM_SWITCH_EVERY") {
            config.switch_every = every;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
