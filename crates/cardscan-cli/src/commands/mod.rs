//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod extract;
pub mod prepare;

use std::path::{Path, PathBuf};

use cardscan_core::CardscanConfig;
use tracing::debug;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cardscan")
        .join("config.json")
}

/// Load the configuration named on the command line, else the user
/// configuration if one exists, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CardscanConfig> {
    if let Some(path) = config_path {
        let path = Path::new(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(CardscanConfig::from_file(path)?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Loading configuration from {}", path.display());
        Ok(CardscanConfig::from_file(&path)?)
    } else {
        Ok(CardscanConfig::default())
    }
}
