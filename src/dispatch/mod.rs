//! Hand-off between concurrent storage workers and the single-threaded
//! tracker loop.
//!
//! Storage I/O runs on blocking workers with no ordering guarantee across
//! submissions. Anything that touches user-facing state is queued back to
//! the tracker loop, FIFO per submitting task.


use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;
use tracing::warn;

use crate::PlayerConsole;
use crate::Result;

/// Work scheduled back onto the tracker loop.
///
/// Must capture plain data (a resolved count, a player id), never a live
/// entity handle; the target's liveness is re-checked against the console
/// when the task runs.
pub type MainTask = Box<dyn FnOnce(&dyn PlayerConsole) + Send>;

#[derive(Debug, Clone)]
pub struct TaskDispatcher {
    main_tx: mpsc::UnboundedSender<MainTask>,
}

impl TaskDispatcher {
    pub(crate) fn new(main_tx: mpsc::UnboundedSender<MainTask>) -> Self {
        Self { main_tx }
    }

    /// Submit blocking storage work to a background worker.
    ///
    /// Failures are logged and swallowed here so nothing from the
    /// persistence path can reach the event-handling path.
    pub fn run_background<F>(&self, label: &'static str, work: F) -> JoinHandle<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            if let Err(e) = work() {
                error!("background task {label} failed: {e}");
            }
        })
    }

    /// Schedule a callback for the next turn of the tracker loop. FIFO
    /// relative to other callbacks queued by the same background task.
    pub fn run_on_main(&self, task: MainTask) {
        if self.main_tx.send(task).is_err() {
            warn!("tracker loop is gone; dropping main-context task");
        }
    }
}
