//! `bumblebee config` - headless config inspection and setup

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{ConfigState, ConfigStore, GlobalConfig};
use crate::error::{BumblebeeError, ConfigError};
use crate::ui;

/// Print the config location and stored infra path
pub fn show(config_file: Option<PathBuf>) -> Result<()> {
    let store = ConfigStore::from_override(config_file).map_err(BumblebeeError::from)?;
    let state = store.load_or_init().map_err(BumblebeeError::from)?;

    println!("{} {}", "Config file:".bold(), store.location().display());
    match state {
        ConfigState::Loaded(config) => {
            println!("{} {}", "Infra path: ".bold(), config.infra.path);
        }
        ConfigState::NeedsSetup => {
            ui::print_warning("Infra path not set. Run `bumblebee config set-path <path>`");
        }
    }
    Ok(())
}

/// Store the infra path without prompting
pub fn set_path(config_file: Option<PathBuf>, path: String) -> Result<()> {
    let path = path.trim();
    if path.is_empty() {
        return Err(BumblebeeError::from(ConfigError::EmptyInfraPath).into());
    }

    let store = ConfigStore::from_override(config_file).map_err(BumblebeeError::from)?;
    store
        .save(&GlobalConfig::with_infra_path(path))
        .map_err(BumblebeeError::from)?;

    ui::print_success(&format!("Infra path set to {}", path));
    Ok(())
}
