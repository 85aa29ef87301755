// Author: Dustin Pilgrim
// License: MIT

pub mod parser;

use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Result, WrapErr};
use rune_cfg::RuneConfig;

use crate::cli::Args;
use crate::core::config::TrackerConfig;
use crate::log::LogLevel;

pub const DEFAULT_BRIDGE_NAME: &str = "com.github.syrkuit.ktt";
pub const DEFAULT_BRIDGE_PATH: &str = "/KTT";
pub const DEFAULT_SCREENSAVER_SERVICE: &str = "org.freedesktop.ScreenSaver";
pub const DEFAULT_SCREENSAVER_PATH: &str = "/org/freedesktop/ScreenSaver";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_prefix: PathBuf,
    pub verbose: bool,

    pub bridge_name: String,
    pub bridge_path: String,

    pub screensaver_service: String,
    pub screensaver_path: String,

    pub tracker: TrackerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_prefix: default_log_prefix(),
            verbose: false,
            bridge_name: DEFAULT_BRIDGE_NAME.to_string(),
            bridge_path: DEFAULT_BRIDGE_PATH.to_string(),
            screensaver_service: DEFAULT_SCREENSAVER_SERVICE.to_string(),
            screensaver_path: DEFAULT_SCREENSAVER_PATH.to_string(),
            tracker: TrackerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(prefix) = &args.log_prefix {
            self.log_prefix = prefix.clone();
        }
        if args.verbose {
            self.verbose = true;
        }
    }

    pub fn log_level(&self) -> LogLevel {
        if self.verbose { LogLevel::Debug } else { LogLevel::Info }
    }

    pub fn heartbeat(&self) -> Duration {
        self.tracker.heartbeat
    }
}

fn default_log_prefix() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join(".focustrack")
}

/// `$XDG_CONFIG_HOME/focustrack/focustrack.rune`
pub fn resolve_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("focustrack").join("focustrack.rune"))
}

/// Load settings from `explicit` (must exist) or the default location (optional).
pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(p) => {
            if !p.exists() {
                eyre::bail!("config file {} does not exist", p.display());
            }
            p.to_path_buf()
        }
        None => match resolve_default_config_path() {
            Some(p) if p.exists() => p,
            _ => return Ok(AppConfig::default()),
        },
    };

    let config = RuneConfig::from_file(&path)
        .map_err(|e| eyre::eyre!("{e}"))
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    parser::parse_app_config(&config)
}

/// Resolve the effective configuration for this run.
pub fn load_for(args: &Args) -> Result<AppConfig> {
    let mut cfg = load(args.config.as_deref())?;
    cfg.apply_args(args);
    Ok(cfg)
}
