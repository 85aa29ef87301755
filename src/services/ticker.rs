// Author: Dustin Pilgrim
// License: MIT

use crate::core::events::Event;
use crate::core::utils::now_ms;

use tokio::sync::mpsc::Sender;
use tokio::time::{sleep, Duration};

/// Heartbeat: one tick right away, then one per `period`.
///
/// The loop is independent of how the tracker handles a tick, so a tick can
/// never stop the next one from being scheduled.
pub async fn run_ticker(tx: Sender<Event>, period: Duration) {
    loop {
        // If the daemon is gone, stop.
        if tx.send(Event::Heartbeat { now_ms: now_ms() }).await.is_err() {
            break;
        }

        sleep(period).await;
    }
}
