// Author: Dustin Pilgrim
// License: MIT

use crate::core::{action::Action, events::Event, utils::now_ms};
use crate::sdebug;

use super::Daemon;

impl Daemon {
    /// Run a provider query off the loop; its answer comes back as a new event.
    pub(super) fn exec_action(&self, action: Action) {
        let events = self.events.clone();

        match action {
            Action::QueryNetwork => {
                let Some(network) = self.network.clone() else {
                    sdebug!(self.log, "network: no connectivity provider, reporting none");
                    events.push(Event::NetworkChanged { name: None, now_ms: now_ms() });
                    return;
                };

                tokio::spawn(async move {
                    let name = network.active_connection().await;
                    events.push(Event::NetworkChanged { name, now_ms: now_ms() });
                });
            }

            Action::QueryIdleTime => {
                let Some(screensaver) = self.screensaver.clone() else {
                    sdebug!(self.log, "idle: no idle provider, skipping query");
                    return;
                };

                tokio::spawn(async move {
                    let idle_ms = screensaver.idle_time().await;
                    events.push(Event::IdleTimeQueried { idle_ms, now_ms: now_ms() });
                });
            }
        }
    }
}
