use std::{path::Path, sync::Arc};

use anyhow::Result;
use engine::TrackingEngine;
use events::TrackerEvent;
use shortcuts::ShortcutListener;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};

use crate::{
    config::Config,
    storage::json_store::JsonFileStore,
    utils::clock::DefaultClock,
    window_api::{process::SysinfoProcessResolver, GenericForegroundInspector},
};

pub mod control;
pub mod engine;
pub mod events;
pub mod privacy;
pub mod shortcuts;
pub mod shutdown;
pub mod state;

/// Represents the starting point for tracking. Runs until stopped by a shortcut or Ctrl-C and
/// hands every notification to `on_event`.
pub async fn start_tracker(
    app_dir: &Path,
    config: &Config,
    on_event: impl FnMut(TrackerEvent),
) -> Result<()> {
    let inspector = GenericForegroundInspector::new()?;
    let data_file = config.data_file(app_dir);
    info!("Tracking into {data_file:?}");

    let (engine, events) = TrackingEngine::new(
        Box::new(inspector),
        Box::new(SysinfoProcessResolver::new()),
        Arc::new(JsonFileStore::new(data_file, Box::new(DefaultClock))),
        Arc::new(DefaultClock),
        config.engine_settings(),
    )
    .await;

    let handle = engine.handle();
    ShortcutListener::new(handle.clone(), &config.shortcuts).spawn();
    tokio::spawn(shutdown::detect_shutdown(handle));

    run_with_consumer(engine, events, on_event)
        .await
        .inspect_err(|e| error!("Tracking ended with an error {e:?}"))
}

/// Drives the engine while delivering its notifications. Events produced by the final save are
/// delivered before returning.
async fn run_with_consumer(
    engine: TrackingEngine,
    mut events: UnboundedReceiver<TrackerEvent>,
    mut on_event: impl FnMut(TrackerEvent),
) -> Result<()> {
    let mut tracking = engine.start();
    let result = loop {
        tokio::select! {
            biased;
            Some(event) = events.recv() => on_event(event),
            joined = &mut tracking => break joined,
        }
    };
    while let Ok(event) = events.try_recv() {
        on_event(event);
    }
    result?
}
