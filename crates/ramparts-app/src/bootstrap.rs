//! Process setup: tracing and configuration.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use ramparts_sim::SimConfig;

/// Names a JSON file with `SimConfig` overrides.
pub const CONFIG_ENV_VAR: &str = "RAMPARTS_CONFIG";
/// Directory for save slots and the leaderboard.
pub const DATA_DIR_ENV_VAR: &str = "RAMPARTS_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "ramparts-data";

/// Install the fmt subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

/// Config from the file named by `RAMPARTS_CONFIG`, or defaults.
pub fn load_config() -> SimConfig {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => load_config_file(Path::new(&path)),
        None => SimConfig::default(),
    }
}

/// Parse a config file. Unreadable or invalid files log a warning and
/// yield defaults.
pub fn load_config_file(path: &Path) -> SimConfig {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "config file unreadable, using defaults");
            return SimConfig::default();
        }
    };
    match SimConfig::from_json(&json) {
        Ok(config) => {
            tracing::info!(path = %path.display(), seed = config.seed, "config loaded");
            config
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "config file invalid, using defaults");
            SimConfig::default()
        }
    }
}

pub fn data_dir() -> PathBuf {
    std::env::var_os(DATA_DIR_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}
