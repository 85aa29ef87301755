// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use futures::StreamExt;
use zbus::{Connection, Proxy};
use zvariant::OwnedObjectPath;

use crate::core::events::Event;
use crate::core::utils::now_ms;
use crate::log::LogSink;
use crate::services::{EventSink, error::ProviderError};
use crate::{sdebug, sinfo, swarn};

const NM_SERVICE: &str = "org.freedesktop.NetworkManager";
const NM_PATH: &str = "/org/freedesktop/NetworkManager";
const NM_IFACE: &str = "org.freedesktop.NetworkManager";
const NM_ACTIVE_IFACE: &str = "org.freedesktop.NetworkManager.Connection.Active";

// NMState: https://networkmanager.dev/docs/api/latest/nm-dbus-types.html#NMState
pub const NM_STATE_CONNECTED_SITE: u32 = 60;
pub const NM_STATE_CONNECTED_GLOBAL: u32 = 70;

/// States in which a default route exists and a refresh query is worthwhile.
pub fn is_connected_state(state: u32) -> bool {
    matches!(state, NM_STATE_CONNECTED_SITE | NM_STATE_CONNECTED_GLOBAL)
}

/// Connectivity monitor backed by NetworkManager on the system bus.
#[derive(Clone)]
pub struct NetworkMonitor {
    conn: Connection,
    log: Arc<dyn LogSink>,
}

impl NetworkMonitor {
    pub async fn connect(log: Arc<dyn LogSink>) -> Result<Self, ProviderError> {
        let conn = Connection::system().await?;
        Ok(Self { conn, log })
    }

    async fn manager(&self) -> zbus::Result<Proxy<'static>> {
        Proxy::new(&self.conn, NM_SERVICE, NM_PATH, NM_IFACE).await
    }

    /// Display name of the first active connection carrying a default route.
    pub async fn try_active_connection(&self) -> Result<Option<String>, ProviderError> {
        let nm = self.manager().await?;
        let active: Vec<OwnedObjectPath> = nm.get_property("ActiveConnections").await?;

        for path in active {
            let conn = Proxy::new(&self.conn, NM_SERVICE, path, NM_ACTIVE_IFACE).await?;

            let default = conn.get_property::<bool>("Default").await?
                || conn.get_property::<bool>("Default6").await?;
            if !default {
                continue;
            }

            return Ok(Some(conn.get_property::<String>("Id").await?));
        }

        Ok(None)
    }

    /// Like [`Self::try_active_connection`], but a failure is logged and reads as "no network".
    pub async fn active_connection(&self) -> Option<String> {
        match self.try_active_connection().await {
            Ok(name) => name,
            Err(e) => {
                swarn!(self.log, "failed to get active connections: {e}");
                None
            }
        }
    }

    /// Subscribe to `StateChanged` and forward connectivity changes to `events`.
    ///
    /// Connected states trigger a refresh query off the listener task; every
    /// other state is reported as "no network" straight away.
    pub async fn spawn_listener(&self, events: Arc<dyn EventSink>) -> Result<(), ProviderError> {
        let nm = self.manager().await?;
        let mut stream = nm.receive_signal("StateChanged").await?;
        sinfo!(self.log, "network: listening for NetworkManager state changes");

        let monitor = self.clone();
        tokio::spawn(async move {
            while let Some(sig) = stream.next().await {
                let state: u32 = match sig.body().deserialize() {
                    Ok(v) => v,
                    Err(e) => {
                        swarn!(monitor.log, "network: failed to parse StateChanged: {e}");
                        continue;
                    }
                };

                sdebug!(monitor.log, "network: state {state}");

                if is_connected_state(state) {
                    let monitor = monitor.clone();
                    let events = events.clone();
                    tokio::spawn(async move {
                        let name = monitor.active_connection().await;
                        events.push(Event::NetworkChanged { name, now_ms: now_ms() });
                    });
                } else {
                    events.push(Event::NetworkChanged { name: None, now_ms: now_ms() });
                }
            }
        });

        Ok(())
    }
}
