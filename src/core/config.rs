// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

pub const DEFAULT_HEARTBEAT: Duration = Duration::from_millis(500);
pub const DEFAULT_NAP_THRESHOLD: Duration = Duration::from_secs(1);
pub const DEFAULT_FOCUS_INFO_THRESHOLD: Duration = Duration::from_secs(2);

/// Timing knobs the tracker consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Period of the self-driven heartbeat.
    pub heartbeat: Duration,

    /// A heartbeat arriving later than this after the previous one is a nap.
    pub nap_threshold: Duration,

    /// Focus sessions at least this long are logged at info, shorter ones at debug.
    pub focus_info_threshold: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            heartbeat: DEFAULT_HEARTBEAT,
            nap_threshold: DEFAULT_NAP_THRESHOLD,
            focus_info_threshold: DEFAULT_FOCUS_INFO_THRESHOLD,
        }
    }
}
