// Author: Dustin Pilgrim
// License: MIT

/// Inbound bridge operations, one variant per exported method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    Log {
        message: String,
    },

    ScreenConfiguration {
        screens: i32,
        width: i32,
        height: i32,
    },

    Focus {
        desktop: i32,
        title: String,
    },

    /// Upstream emits this too often to be trusted; accepted and ignored.
    FocusLost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Heartbeat {
        now_ms: u64,
    },

    Bridge {
        call: BridgeCall,
        now_ms: u64,
    },

    ScreenSaverChanged {
        active: bool,
        now_ms: u64,
    },

    /// Result of the idle-time query issued when the screen locked.
    IdleTimeQueried {
        idle_ms: Option<u64>,
        now_ms: u64,
    },

    NetworkChanged {
        name: Option<String>,
        now_ms: u64,
    },
}

impl Event {
    pub fn now_ms(&self) -> u64 {
        match self {
            Event::Heartbeat { now_ms }
            | Event::Bridge { now_ms, .. }
            | Event::ScreenSaverChanged { now_ms, .. }
            | Event::IdleTimeQueried { now_ms, .. }
            | Event::NetworkChanged { now_ms, .. } => *now_ms,
        }
    }
}
