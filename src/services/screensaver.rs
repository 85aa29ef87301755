// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use futures::StreamExt;
use zbus::{Connection, Proxy};

use crate::core::events::Event;
use crate::core::utils::now_ms;
use crate::log::LogSink;
use crate::services::{EventSink, error::ProviderError};
use crate::{sinfo, swarn};

const SCREENSAVER_IFACE: &str = "org.freedesktop.ScreenSaver";

/// Idle monitor backed by the session's ScreenSaver service.
#[derive(Clone)]
pub struct ScreenSaverMonitor {
    conn: Connection,
    service: String,
    path: String,
    log: Arc<dyn LogSink>,
}

impl ScreenSaverMonitor {
    pub fn new(conn: Connection, service: &str, path: &str, log: Arc<dyn LogSink>) -> Self {
        Self {
            conn,
            service: service.to_string(),
            path: path.to_string(),
            log,
        }
    }

    async fn proxy(&self) -> zbus::Result<Proxy<'static>> {
        Proxy::new(
            &self.conn,
            self.service.clone(),
            self.path.clone(),
            SCREENSAVER_IFACE,
        )
        .await
    }

    /// Session idle time in milliseconds.
    pub async fn try_idle_time(&self) -> Result<u64, ProviderError> {
        let proxy = self.proxy().await?;
        let idle_ms: u32 = proxy.call("GetSessionIdleTime", &()).await?;
        Ok(u64::from(idle_ms))
    }

    /// Like [`Self::try_idle_time`], but a failure is logged and yields nothing.
    pub async fn idle_time(&self) -> Option<u64> {
        match self.try_idle_time().await {
            Ok(ms) => Some(ms),
            Err(e) => {
                swarn!(self.log, "failed to get idle time: {e}");
                None
            }
        }
    }

    /// Subscribe to `ActiveChanged` and forward lock engage/release to `events`.
    pub async fn spawn_listener(&self, events: Arc<dyn EventSink>) -> Result<(), ProviderError> {
        let proxy = self.proxy().await?;
        let mut stream = proxy.receive_signal("ActiveChanged").await?;
        sinfo!(self.log, "screensaver: listening on {} {}", self.service, self.path);

        let log = self.log.clone();
        tokio::spawn(async move {
            while let Some(sig) = stream.next().await {
                let active: bool = match sig.body().deserialize() {
                    Ok(v) => v,
                    Err(e) => {
                        swarn!(log, "screensaver: failed to parse ActiveChanged: {e}");
                        continue;
                    }
                };

                events.push(Event::ScreenSaverChanged { active, now_ms: now_ms() });
            }
        });

        Ok(())
    }
}
