// Author: Dustin Pilgrim
// License: MIT

use std::sync::Arc;

use chrono::Local;
use eyre::{Result, WrapErr};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::{mpsc, watch};

use crate::cli::Args;
use crate::core::{events::Event, tracker::Tracker, utils::now_ms};
use crate::daemon::Daemon;
use crate::log::{DatedLog, LogSink};
use crate::services::{
    EventSink, MpscEventSink, bridge,
    network::NetworkMonitor,
    screensaver::ScreenSaverMonitor,
    ticker,
};
use crate::{serror, sinfo, swarn};

pub async fn run(args: Args) -> Result<()> {
    let cfg = crate::config::load_for(&args)?;

    let dated = DatedLog::new(&cfg.log_prefix, cfg.log_level()).with_echo(cfg.verbose);
    println!("writing to {}", dated.path_for(Local::now().date_naive()).display());

    let log: Arc<dyn LogSink> = Arc::new(dated);
    sinfo!(log, "starting");

    let (tx, rx) = mpsc::channel::<Event>(256);
    let events: Arc<dyn EventSink> = Arc::new(MpscEventSink::new(tx.clone(), log.clone()));

    // connectivity (system bus); tracking goes on without it
    let network = match NetworkMonitor::connect(log.clone()).await {
        Ok(monitor) => {
            if let Err(e) = monitor.spawn_listener(events.clone()).await {
                swarn!(log, "network: listener unavailable: {e}");
            }
            Some(monitor)
        }
        Err(e) => {
            swarn!(log, "network: could not connect to system bus: {e}");
            None
        }
    };

    // focus bridge (session bus); without it no focus events can ever arrive
    let session = match bridge::serve(events.clone(), &cfg.bridge_name, &cfg.bridge_path).await {
        Ok(conn) => conn,
        Err(e) => {
            serror!(log, "bridge: failed to export {}: {e}", cfg.bridge_name);
            log.flush();
            return Err(eyre::Report::new(e)
                .wrap_err(format!("failed to export focus bridge as {}", cfg.bridge_name)));
        }
    };
    sinfo!(log, "bridge: serving {} at {}", cfg.bridge_name, cfg.bridge_path);

    let screensaver = ScreenSaverMonitor::new(
        session.clone(),
        &cfg.screensaver_service,
        &cfg.screensaver_path,
        log.clone(),
    );
    if let Err(e) = screensaver.spawn_listener(events.clone()).await {
        swarn!(log, "screensaver: listener unavailable: {e}");
    }

    tokio::spawn(ticker::run_ticker(tx.clone(), cfg.heartbeat()));
    drop(tx);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    spawn_signal_watcher(shutdown_tx, log.clone())?;

    let tracker = Tracker::new(cfg.tracker.clone(), log.clone(), now_ms());
    let mut daemon = Daemon::new(tracker, network, Some(screensaver), events, log.clone());

    daemon.run(rx, shutdown_rx).await;

    drop(session);
    Ok(())
}

fn spawn_signal_watcher(shutdown_tx: watch::Sender<bool>, log: Arc<dyn LogSink>) -> Result<()> {
    let mut term = signal(SignalKind::terminate()).wrap_err("failed to install SIGTERM handler")?;

    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => sinfo!(log, "received Ctrl+C, shutting down"),
            _ = term.recv() => sinfo!(log, "received SIGTERM, shutting down"),
        }

        let _ = shutdown_tx.send(true);
    });

    Ok(())
}
