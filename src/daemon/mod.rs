// Author: Dustin Pilgrim
// License: MIT

mod actions;
mod run;

use std::sync::Arc;

use crate::core::tracker::Tracker;
use crate::log::LogSink;
use crate::services::{
    EventSink,
    network::NetworkMonitor,
    screensaver::ScreenSaverMonitor,
};

/// Owns the tracker and the provider handles its follow-up queries run against.
pub struct Daemon {
    tracker: Tracker,

    network: Option<NetworkMonitor>,
    screensaver: Option<ScreenSaverMonitor>,

    events: Arc<dyn EventSink>,
    log: Arc<dyn LogSink>,
}

impl Daemon {
    pub fn new(
        tracker: Tracker,
        network: Option<NetworkMonitor>,
        screensaver: Option<ScreenSaverMonitor>,
        events: Arc<dyn EventSink>,
        log: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            tracker,
            network,
            screensaver,
            events,
            log,
        }
    }

    #[cfg(test)]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
}
