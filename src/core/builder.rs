use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tracing::info;

use super::Tracker;
use crate::CounterStore;
use crate::Error;
use crate::GameEvent;
use crate::PlayerConsole;
use crate::Result;
use crate::Settings;
use crate::TaskDispatcher;

/// Wires the tracker loop, its channels, and the counter store.
///
/// Returns a [`TrackerHandle`] for the engine-facing side plus the
/// [`Tracker`] loop for the caller's runtime to drive.
pub struct TrackerBuilder {
    settings: Settings,
    console: Arc<dyn PlayerConsole>,
    shutdown_signal: watch::Receiver<()>,
}

impl TrackerBuilder {
    pub fn new(
        settings: Settings,
        console: Arc<dyn PlayerConsole>,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        Self {
            settings,
            console,
            shutdown_signal,
        }
    }

    /// Must be called within a tokio runtime: schema creation is dispatched
    /// to a background worker so startup never blocks on storage I/O.
    pub fn build(self) -> (TrackerHandle, Tracker) {
        let (event_tx, event_rx) = mpsc::channel(self.settings.tracker.event_queue_capacity);
        let (main_tx, main_rx) = mpsc::unbounded_channel();

        let dispatcher = TaskDispatcher::new(main_tx);
        let store = CounterStore::new(&self.settings.storage);

        {
            let store = store.clone();
            dispatcher.run_background("ensure_schema", move || {
                store.ensure_schema()?;
                info!("counter database schema ensured.");
                Ok(())
            });
        }

        let tracker = Tracker::new(
            self.console,
            store,
            dispatcher,
            &self.settings.tracker,
            event_rx,
            main_rx,
            self.shutdown_signal,
        );

        (TrackerHandle { event_tx }, tracker)
    }
}

/// Engine-facing submission side of the tracker.
#[derive(Debug, Clone)]
pub struct TrackerHandle {
    event_tx: mpsc::Sender<GameEvent>,
}

impl TrackerHandle {
    /// Submit an engine event without blocking the caller. Engine hooks must
    /// return quickly, so a full queue rejects the event instead of waiting.
    pub fn try_submit(&self, event: GameEvent) -> Result<()> {
        self.event_tx
            .try_send(event)
            .map_err(|e| Error::SubmissionFailed(e.to_string()))
    }

    /// Submit an engine event, waiting for queue capacity.
    pub async fn submit(&self, event: GameEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .await
            .map_err(|e| Error::SubmissionFailed(e.to_string()))
    }
}
