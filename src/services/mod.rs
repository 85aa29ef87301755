// Author: Dustin Pilgrim
// License: MIT

pub mod bridge;
pub mod error;
pub mod network;
pub mod screensaver;
pub mod ticker;

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::core::events::Event;
use crate::log::LogSink;
use crate::swarn;

/// Sink for pushing events into the tracker loop.
pub trait EventSink: Send + Sync + 'static {
    fn push(&self, ev: Event);
}

/// Queue-backed sink; a full or closed queue drops the event instead of blocking.
pub struct MpscEventSink {
    tx: mpsc::Sender<Event>,
    log: Arc<dyn LogSink>,
}

impl MpscEventSink {
    pub fn new(tx: mpsc::Sender<Event>, log: Arc<dyn LogSink>) -> Self {
        Self { tx, log }
    }
}

impl EventSink for MpscEventSink {
    fn push(&self, ev: Event) {
        match self.tx.try_send(ev) {
            Ok(()) => {}
            Err(TrySendError::Full(ev)) => {
                swarn!(self.log, "event queue full, dropped {ev:?}");
            }
            // loop is gone; nothing left to record the event
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::{LogLevel, MemoryLog};

    #[test]
    fn test_full_queue_warns_and_drops() {
        let log = Arc::new(MemoryLog::default());
        let (tx, mut rx) = mpsc::channel(1);
        let sink = MpscEventSink::new(tx, log.clone());

        sink.push(Event::Heartbeat { now_ms: 1 });
        sink.push(Event::ScreenSaverChanged { active: true, now_ms: 2 });

        assert_eq!(rx.try_recv().ok(), Some(Event::Heartbeat { now_ms: 1 }));
        assert!(rx.try_recv().is_err());

        let records = log.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].0, LogLevel::Warn);
        assert!(records[0].1.starts_with("event queue full, dropped ScreenSaverChanged"));
    }

    #[test]
    fn test_closed_queue_drops_quietly() {
        let log = Arc::new(MemoryLog::default());
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        MpscEventSink::new(tx, log.clone()).push(Event::Heartbeat { now_ms: 1 });

        assert!(log.records().is_empty());
    }
}
