// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use rune_cfg::RuneConfig;

use super::AppConfig;

/// Parses the `focustrack` block of a RuneConfig, falling back to defaults per key
pub fn parse_app_config(config: &RuneConfig) -> Result<AppConfig> {
    let mut cfg = AppConfig::default();

    if let Ok(prefix) = config
        .get::<String>("focustrack.log_prefix")
        .or_else(|_| config.get::<String>("focustrack.log-prefix"))
    {
        let prefix = prefix.trim();
        if !prefix.is_empty() {
            cfg.log_prefix = expand_home(prefix);
        }
    }

    if let Ok(verbose) = config.get::<bool>("focustrack.verbose") {
        cfg.verbose = verbose;
    }

    if let Ok(name) = config
        .get::<String>("focustrack.bridge_name")
        .or_else(|_| config.get::<String>("focustrack.bridge-name"))
    {
        cfg.bridge_name = name;
    }

    if let Ok(path) = config
        .get::<String>("focustrack.bridge_path")
        .or_else(|_| config.get::<String>("focustrack.bridge-path"))
    {
        cfg.bridge_path = path;
    }

    if let Ok(service) = config
        .get::<String>("focustrack.screensaver_service")
        .or_else(|_| config.get::<String>("focustrack.screensaver-service"))
    {
        cfg.screensaver_service = service;
    }

    if let Ok(path) = config
        .get::<String>("focustrack.screensaver_path")
        .or_else(|_| config.get::<String>("focustrack.screensaver-path"))
    {
        cfg.screensaver_path = path;
    }

    if let Ok(ms) = config
        .get::<u64>("focustrack.heartbeat_ms")
        .or_else(|_| config.get::<u64>("focustrack.heartbeat-ms"))
    {
        if ms == 0 {
            eyre::bail!("focustrack.heartbeat_ms must be greater than zero");
        }
        cfg.tracker.heartbeat = Duration::from_millis(ms);
    }

    if let Ok(ms) = config
        .get::<u64>("focustrack.nap_threshold_ms")
        .or_else(|_| config.get::<u64>("focustrack.nap-threshold-ms"))
    {
        cfg.tracker.nap_threshold = Duration::from_millis(ms);
    }

    if let Ok(secs) = config
        .get::<u64>("focustrack.focus_info_seconds")
        .or_else(|_| config.get::<u64>("focustrack.focus-info-seconds"))
    {
        cfg.tracker.focus_info_threshold = Duration::from_secs(secs);
    }

    Ok(cfg)
}

/// Expand a leading `~/` against the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
