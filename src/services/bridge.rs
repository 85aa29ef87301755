// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use zbus::{Connection, interface};

use crate::core::events::{BridgeCall, Event};
use crate::core::utils::now_ms;
use crate::services::{EventSink, error::ProviderError};

/// Inbound endpoint the window-manager script calls into.
///
/// Every method is fire-and-forget: the call is queued for the tracker and
/// nothing is ever reported back to the caller.
pub struct FocusBridge {
    events: Arc<dyn EventSink>,
}

impl FocusBridge {
    pub fn new(events: Arc<dyn EventSink>) -> Self {
        Self { events }
    }

    fn forward(&self, call: BridgeCall) {
        self.events.push(Event::Bridge { call, now_ms: now_ms() });
    }
}

#[interface(name = "com.github.syrkuit.ktt")]
impl FocusBridge {
    fn log(&self, message: String) {
        self.forward(BridgeCall::Log { message });
    }

    fn screen_configuration(&self, screens: i32, width: i32, height: i32) {
        self.forward(BridgeCall::ScreenConfiguration { screens, width, height });
    }

    fn focus(&self, desktop: i32, title: String) {
        self.forward(BridgeCall::Focus { desktop, title });
    }

    fn focus_lost(&self) {
        self.forward(BridgeCall::FocusLost);
    }
}

/// Connect to the session bus, export the bridge at `path` and claim `name`.
pub async fn serve(
    events: Arc<dyn EventSink>,
    name: &str,
    path: &str,
) -> Result<Connection, ProviderError> {
    let conn = zbus::connection::Builder::session()?
        .name(name.to_string())?
        .serve_at(path.to_string(), FocusBridge::new(events))?
        .build()
        .await?;

    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<Event>>,
    }

    impl EventSink for Recorder {
        fn push(&self, ev: Event) {
            self.events.lock().unwrap().push(ev);
        }
    }

    #[test]
    fn test_interface_matches_default_bus_name() {
        use zbus::object_server::Interface;

        assert_eq!(FocusBridge::name().as_str(), crate::config::DEFAULT_BRIDGE_NAME);
        assert_eq!(FocusBridge::name().as_str(), "com.github.syrkuit.ktt");
    }

    #[test]
    fn test_each_method_queues_its_call() {
        let recorder = Arc::new(Recorder::default());
        let bridge = FocusBridge::new(recorder.clone());

        bridge.log("hello".to_string());
        bridge.screen_configuration(1, 1920, 1080);
        bridge.focus(2, "Kate".to_string());
        bridge.focus_lost();

        let calls: Vec<BridgeCall> = recorder
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|ev| match ev {
                Event::Bridge { call, .. } => call.clone(),
                other => panic!("unexpected event {other:?}"),
            })
            .collect();

        assert_eq!(
            calls,
            vec![
                BridgeCall::Log { message: "hello".to_string() },
                BridgeCall::ScreenConfiguration { screens: 1, width: 1920, height: 1080 },
                BridgeCall::Focus { desktop: 2, title: "Kate".to_string() },
                BridgeCall::FocusLost,
            ]
        );
    }
}
