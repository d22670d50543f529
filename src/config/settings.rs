//! Configuration settings for clicktrader.

use crate::error::{Error, Result};
use crate::events::Key;
use crate::pacing::PauseRange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix, e.g. `CLICKTRADER_TIMING__STEP_SETTLE__MAX_SECS`.
const ENV_PREFIX: &str = "CLICKTRADER";

/// Main settings struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File locations.
    pub paths: PathsConfig,
    /// Settle and pacing ranges.
    pub timing: TimingProfile,
    /// Redundant click counts.
    pub redundancy: RedundancyConfig,
    /// Target application.
    pub target: TargetConfig,
    /// Position recorder behavior.
    pub recorder: RecorderConfig,
}

impl Settings {
    /// Load settings from a TOML file layered under `CLICKTRADER_*` environment variables.
    ///
    /// A missing file is not an error; every field has a default.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.unwrap_or_else(default_path);

        let settings: Self = ::config::Config::builder()
            .add_source(
                ::config::File::from(config_path.as_path())
                    .format(::config::FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| Error::config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to file.
    pub fn save(&self, path: Option<PathBuf>) -> Result<PathBuf> {
        let config_path = path.unwrap_or_else(default_path);

        if let Some(parent) = config_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    /// Reject settings the sequencer cannot run with.
    pub fn validate(&self) -> Result<()> {
        for (name, range) in self.timing.named() {
            range
                .check()
                .map_err(|reason| Error::config(format!("timing.{name}: {reason}")))?;
        }

        if self.redundancy.trade_type_clicks == 0 {
            return Err(Error::config("redundancy.trade_type_clicks must be at least 1"));
        }
        if self.redundancy.order_type_clicks == 0 {
            return Err(Error::config("redundancy.order_type_clicks must be at least 1"));
        }
        if self.recorder.poll_interval_ms == 0 {
            return Err(Error::config("recorder.poll_interval_ms must be at least 1"));
        }
        if Key::from_binding(&self.recorder.skip_key).is_none() {
            return Err(Error::config(format!(
                "recorder.skip_key '{}' is not a recognized key",
                self.recorder.skip_key
            )));
        }

        Ok(())
    }
}

fn default_path() -> PathBuf {
    super::config_dir()
        .map(|p| p.join("clicktrader.toml"))
        .unwrap_or_else(|_| PathBuf::from("clicktrader.toml"))
}

/// File locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Recorded coordinate store (JSON).
    pub positions_file: PathBuf,
    /// Directory holding `trading_bot.log`.
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            positions_file: PathBuf::from("click_positions.json"),
            log_dir: PathBuf::from("."),
        }
    }
}

/// Pause ranges used by the sequencer, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingProfile {
    /// After the pointer arrives, before clicking.
    pub pointer_settle: PauseRange,
    /// Between redundant clicks at one position.
    pub click_gap: PauseRange,
    /// After the last click at a position.
    pub click_settle: PauseRange,
    /// After requesting focus of the target window.
    pub focus_settle: PauseRange,
    /// Between typed characters.
    pub keystroke: PauseRange,
    /// Around the confirm key after typing.
    pub type_settle: PauseRange,
    /// After most steps.
    pub step_settle: PauseRange,
    /// While the venue resolves a ticker. The slowest wait in a trade.
    pub ticker_resolve: PauseRange,
    /// While the limit price field appears.
    pub limit_reveal: PauseRange,
    /// Around limit price entry.
    pub price_field: PauseRange,
}

impl Default for TimingProfile {
    fn default() -> Self {
        Self {
            pointer_settle: PauseRange::between(0.05, 0.10),
            click_gap: PauseRange::between(0.01, 0.05),
            click_settle: PauseRange::between(0.20, 0.30),
            focus_settle: PauseRange::between(0.05, 0.10),
            keystroke: PauseRange::between(0.02, 0.05),
            type_settle: PauseRange::between(0.05, 0.15),
            step_settle: PauseRange::between(0.30, 0.60),
            ticker_resolve: PauseRange::between(0.50, 1.00),
            limit_reveal: PauseRange::between(0.60, 0.80),
            price_field: PauseRange::between(0.25, 0.40),
        }
    }
}

impl TimingProfile {
    /// Every range with its settings key.
    pub fn named(&self) -> [(&'static str, PauseRange); 10] {
        [
            ("pointer_settle", self.pointer_settle),
            ("click_gap", self.click_gap),
            ("click_settle", self.click_settle),
            ("focus_settle", self.focus_settle),
            ("keystroke", self.keystroke),
            ("type_settle", self.type_settle),
            ("step_settle", self.step_settle),
            ("ticker_resolve", self.ticker_resolve),
            ("limit_reveal", self.limit_reveal),
            ("price_field", self.price_field),
        ]
    }

    /// A profile with every pause set to zero.
    #[cfg(test)]
    pub fn instant() -> Self {
        let zero = PauseRange::between(0.0, 0.0);
        Self {
            pointer_settle: zero,
            click_gap: zero,
            click_settle: zero,
            focus_settle: zero,
            keystroke: zero,
            type_settle: zero,
            step_settle: zero,
            ticker_resolve: zero,
            limit_reveal: zero,
            price_field: zero,
        }
    }
}

/// How many times the known-unreliable controls are clicked.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedundancyConfig {
    /// Clicks on the stocks/options toggle, delivered at one pointer position.
    pub trade_type_clicks: u32,
    /// Separate move-and-click passes over the market/limit option.
    pub order_type_clicks: u32,
}

impl Default for RedundancyConfig {
    fn default() -> Self {
        Self {
            trade_type_clicks: 2,
            order_type_clicks: 3,
        }
    }
}

/// Target application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Window to bring forward before typing.
    pub window_name: String,
    /// Request focus of `window_name` before typing. Failure is ignored.
    pub focus_before_typing: bool,
    /// Interpolation steps for smooth pointer movement (1 = jump).
    pub smooth_move_steps: u32,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            window_name: "Fidelity Active Trader Pro".to_string(),
            focus_before_typing: true,
            smooth_move_steps: 12,
        }
    }
}

/// Position recorder settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Key that skips the current prompt (e.g. "Esc", "F2").
    pub skip_key: String,
    /// Sleep between listener polls.
    pub poll_interval_ms: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            skip_key: "Esc".to_string(),
            poll_interval_ms: 50,
        }
    }
}
