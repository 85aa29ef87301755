// Author: Dustin Pilgrim
// License: MIT

use crate::core::{
    action::Action,
    events::{BridgeCall, Event},
    focus::{self, FocusKey},
    state::{FocusSession, NetworkState},
    utils,
};
use crate::log::LogLevel;

use super::Tracker;

impl Tracker {
    pub fn handle_event(&mut self, event: Event) -> Vec<Action> {
        let now_ms = event.now_ms();
        let mut out = Vec::new();

        match event {
            Event::Heartbeat { .. } => self.heartbeat(now_ms),

            Event::Bridge { call, .. } => self.dispatch_bridge(call, now_ms),

            Event::ScreenSaverChanged { active, .. } => {
                out.extend(self.screensaver_changed(active, now_ms));
            }

            Event::IdleTimeQueried { idle_ms, .. } => self.idle_time_reported(idle_ms, now_ms),

            Event::NetworkChanged { name, .. } => self.network_changed(name, now_ms),
        }

        out
    }

    fn dispatch_bridge(&mut self, call: BridgeCall, now_ms: u64) {
        match call {
            BridgeCall::Log { message } => self.log(LogLevel::Info, now_ms, &message),

            BridgeCall::ScreenConfiguration { screens, width, height } => {
                self.log(
                    LogLevel::Info,
                    now_ms,
                    &format!("screen configuration: {screens} {width}x{height}"),
                );
            }

            BridgeCall::Focus { desktop, title } => {
                let key = focus::normalize(desktop, &title);
                self.focus_changed(Some(key), now_ms);
            }

            BridgeCall::FocusLost => {}
        }
    }

    /// Close the running session (if any) and start tracking `key`.
    ///
    /// Repeating the current key is a no-op so the session clock keeps running.
    pub fn focus_changed(&mut self, key: Option<FocusKey>, now_ms: u64) {
        if self.state.current_focus() == key.as_ref() {
            return;
        }

        let next = key.map(|key| FocusSession { key, started_ms: now_ms });

        if let Some(prev) = self.state.replace_session(next) {
            let duration = utils::elapsed_secs(prev.started_ms, now_ms);
            let level = if duration >= self.cfg.focus_info_threshold.as_secs_f64() {
                LogLevel::Info
            } else {
                LogLevel::Debug
            };

            self.log(level, now_ms, &format!("focus: {:.0} {}", duration, prev.key));
        }
    }

    fn screensaver_changed(&mut self, active: bool, now_ms: u64) -> Vec<Action> {
        let mut out = Vec::new();

        self.state.set_locked(active);

        if active {
            self.focus_changed(None, now_ms);
            self.state
                .add_to_total(utils::elapsed_secs(self.state.active_since_ms(), now_ms));
            out.push(Action::QueryIdleTime);
        } else {
            self.state.set_active_since_ms(now_ms);
        }

        self.log(
            LogLevel::Info,
            now_ms,
            &format!("screensaver={} total={:.0}", active, self.state.idle_total_secs()),
        );

        out
    }

    fn idle_time_reported(&mut self, idle_ms: Option<u64>, now_ms: u64) {
        let Some(idle_ms) = idle_ms.filter(|ms| *ms > 0) else {
            return;
        };

        self.state.subtract_idle(idle_ms);
        self.log(
            LogLevel::Info,
            now_ms,
            &format!(
                "idle for {:.0}s, total={:.0}",
                idle_ms as f64 / 1000.0,
                self.state.idle_total_secs()
            ),
        );
    }

    fn network_changed(&mut self, name: Option<String>, now_ms: u64) {
        let next = NetworkState::from_report(name);
        if *self.state.network() == next {
            return;
        }

        self.log(LogLevel::Info, now_ms, &format!("network: {next}"));
        self.state.set_network(next);
    }

    fn heartbeat(&mut self, now_ms: u64) {
        let last_ms = self.state.last_heartbeat_ms();
        let elapsed = utils::elapsed_secs(last_ms, now_ms);

        if elapsed > self.cfg.nap_threshold.as_secs_f64() {
            self.log(LogLevel::Info, now_ms, &format!("took a {:.0}s nap", elapsed));
        }

        if utils::local_day(last_ms) != utils::local_day(now_ms) {
            self.log(LogLevel::Info, now_ms, "new day, resetting total time");
            self.state.reset_total();
        }

        self.state.set_last_heartbeat_ms(now_ms);
    }
}
