// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use crate::core::focus::FocusKey;

/// Last connectivity report seen by the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkState {
    /// Nothing reported yet; the first report always differs from this.
    Unknown,
    Disconnected,
    Connected(String),
}

impl NetworkState {
    pub fn from_report(name: Option<String>) -> Self {
        match name {
            Some(name) => NetworkState::Connected(name),
            None => NetworkState::Disconnected,
        }
    }
}

impl fmt::Display for NetworkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkState::Unknown => write!(f, "unknown"),
            NetworkState::Disconnected => write!(f, "none"),
            NetworkState::Connected(name) => write!(f, "{name}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusSession {
    pub key: FocusKey,
    pub started_ms: u64,
}

#[derive(Debug, Clone)]
pub struct TrackerState {
    // Focus track
    session: Option<FocusSession>,

    // Idle track
    locked: bool,
    active_since_ms: u64,

    // Daily totals (seconds). Can go negative, see `subtract_idle`.
    idle_total_secs: f64,

    // Network track
    network: NetworkState,

    // Heartbeat
    last_heartbeat_ms: u64,
}

impl TrackerState {
    pub fn new(now_ms: u64) -> Self {
        Self {
            session: None,
            locked: false,
            active_since_ms: now_ms,
            idle_total_secs: 0.0,
            network: NetworkState::Unknown,
            last_heartbeat_ms: now_ms,
        }
    }

    // ---------------- focus ----------------

    pub fn session(&self) -> Option<&FocusSession> {
        self.session.as_ref()
    }

    pub fn current_focus(&self) -> Option<&FocusKey> {
        self.session().map(|s| &s.key)
    }

    /// Swap in a new session, handing back the one it replaces.
    pub fn replace_session(&mut self, next: Option<FocusSession>) -> Option<FocusSession> {
        std::mem::replace(&mut self.session, next)
    }

    // ---------------- idle ----------------

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn active_since_ms(&self) -> u64 {
        self.active_since_ms
    }

    pub fn set_active_since_ms(&mut self, ms: u64) {
        self.active_since_ms = ms;
    }

    // ---------------- totals ----------------

    pub fn idle_total_secs(&self) -> f64 {
        self.idle_total_secs
    }

    pub fn add_to_total(&mut self, secs: f64) {
        self.idle_total_secs += secs;
    }

    /// Remove whole seconds of reported idle time from the running total.
    ///
    /// The total was already credited with the whole active period at lock
    /// time, so this may drive it below zero.
    pub fn subtract_idle(&mut self, idle_ms: u64) {
        self.idle_total_secs -= (idle_ms / 1000) as f64;
    }

    pub fn reset_total(&mut self) {
        self.idle_total_secs = 0.0;
    }

    // ---------------- network ----------------

    pub fn network(&self) -> &NetworkState {
        &self.network
    }

    pub fn set_network(&mut self, network: NetworkState) {
        self.network = network;
    }

    // ---------------- heartbeat ----------------

    pub fn last_heartbeat_ms(&self) -> u64 {
        self.last_heartbeat_ms
    }

    pub fn set_last_heartbeat_ms(&mut self, ms: u64) {
        self.last_heartbeat_ms = ms;
    }
}
