// Author: Dustin Pilgrim
// License: MIT

use tokio::sync::{mpsc, watch};

use crate::core::events::Event;
use crate::sinfo;

use super::Daemon;

impl Daemon {
    /// Drain events one at a time until shutdown or until every producer is gone.
    pub async fn run(&mut self, mut rx: mpsc::Receiver<Event>, mut shutdown: watch::Receiver<bool>) {
        for action in self.tracker.startup() {
            self.exec_action(action);
        }

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        sinfo!(self.log, "stopping (shutdown requested)");
                        break;
                    }
                }

                maybe = rx.recv() => {
                    let Some(event) = maybe else {
                        sinfo!(self.log, "stopping (event channel closed)");
                        break;
                    };

                    for action in self.tracker.handle_event(event) {
                        self.exec_action(action);
                    }
                }
            }
        }

        sinfo!(
            self.log,
            "stopping total={:.0}",
            self.tracker.state().idle_total_secs()
        );
        self.log.flush();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::{mpsc, watch};

    use crate::core::config::TrackerConfig;
    use crate::core::events::{BridgeCall, Event};
    use crate::core::tracker::Tracker;
    use crate::daemon::Daemon;
    use crate::log::{LogLevel, MemoryLog};
    use crate::services::MpscEventSink;

    const T0: u64 = 1_718_445_600_000;

    fn focus(title: &str, now_ms: u64) -> Event {
        Event::Bridge {
            call: BridgeCall::Focus { desktop: 1, title: title.to_string() },
            now_ms,
        }
    }

    #[tokio::test]
    async fn test_processes_queue_in_order_and_answers_queries() {
        let log = Arc::new(MemoryLog::default());
        let (tx, rx) = mpsc::channel(16);
        let (replies_tx, mut replies_rx) = mpsc::channel(16);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut daemon = Daemon::new(
            Tracker::new(TrackerConfig::default(), log.clone(), T0),
            None,
            None,
            Arc::new(MpscEventSink::new(replies_tx, log.clone())),
            log.clone(),
        );

        tx.send(focus("Kate", T0)).await.unwrap();
        tx.send(focus("Kate", T0 + 1_000)).await.unwrap();
        tx.send(focus("Konsole", T0 + 5_000)).await.unwrap();
        tx.send(Event::ScreenSaverChanged { active: true, now_ms: T0 + 8_000 }).await.unwrap();
        drop(tx);

        daemon.run(rx, shutdown_rx).await;

        let records = log.records();
        assert!(records.contains(&(
            LogLevel::Debug,
            "network: no connectivity provider, reporting none".to_string()
        )));
        assert!(records.contains(&(
            LogLevel::Debug,
            "idle: no idle provider, skipping query".to_string()
        )));

        let messages: Vec<String> = records
            .into_iter()
            .filter(|(level, _)| *level != LogLevel::Debug)
            .map(|(_, m)| m)
            .collect();
        assert_eq!(messages[0], "focus: 5 1 Kate");
        assert_eq!(messages[1], "focus: 3 1 Konsole");
        assert_eq!(messages[2], "screensaver=true total=8");
        assert_eq!(messages.last().unwrap(), "stopping total=8");

        // Without a connectivity provider the startup query reads as "no network".
        match replies_rx.try_recv() {
            Ok(Event::NetworkChanged { name, .. }) => assert_eq!(name, None),
            other => panic!("unexpected reply {other:?}"),
        }
        // Without an idle provider the lock-time query is skipped.
        assert!(replies_rx.try_recv().is_err());
        assert!(daemon.tracker().state().is_locked());
    }

    #[tokio::test]
    async fn test_stops_on_shutdown() {
        let log = Arc::new(MemoryLog::default());
        let (tx, rx) = mpsc::channel::<Event>(16);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let mut daemon = Daemon::new(
            Tracker::new(TrackerConfig::default(), log.clone(), T0),
            None,
            None,
            Arc::new(MpscEventSink::new(tx.clone(), log.clone())),
            log.clone(),
        );

        shutdown_tx.send(true).unwrap();
        daemon.run(rx, shutdown_rx).await;

        assert!(log.messages().contains(&"stopping (shutdown requested)".to_string()));
    }
}
