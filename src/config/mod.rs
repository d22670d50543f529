//! Configuration management for clicktrader.

mod settings;

pub use settings::{
    PathsConfig, RecorderConfig, RedundancyConfig, Settings, TargetConfig, TimingProfile,
};

use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the append-only operation log.
pub const LOG_FILE_NAME: &str = "trading_bot.log";

/// Get the configuration directory path.
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "clicktrader", "clicktrader")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| Error::config("Could not determine config directory"))
}
