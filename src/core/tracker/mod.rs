// Author: Dustin Pilgrim
// License: MIT

mod engine;

use std::sync::Arc;

use crate::core::{
    action::Action,
    config::TrackerConfig,
    state::TrackerState,
    utils,
};
use crate::log::{LogLevel, LogSink};

/// The activity state machine.
///
/// Owns every piece of mutable tracking state and is driven exclusively by
/// [`Tracker::handle_event`]; whoever holds it must feed events one at a time.
pub struct Tracker {
    cfg: TrackerConfig,
    state: TrackerState,
    sink: Arc<dyn LogSink>,
}

impl Tracker {
    pub fn new(cfg: TrackerConfig, sink: Arc<dyn LogSink>, now_ms: u64) -> Self {
        Self {
            cfg,
            state: TrackerState::new(now_ms),
            sink,
        }
    }

    /// Work to kick off right after construction.
    pub fn startup(&self) -> Vec<Action> {
        vec![Action::QueryNetwork]
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    fn log(&self, level: LogLevel, now_ms: u64, message: &str) {
        self.sink.write(level, utils::local_time(now_ms), message);
    }
}
