use tracing::info;

use crate::CounterStore;
use crate::TaskDispatcher;

/// Tracks the active map and evicts bot counters left over from previous
/// maps.
///
/// Single-writer: mutated only from the tracker loop. Starts as `Unknown`
/// (no map) and is overwritten once per map-start signal; the engine
/// guarantees consecutive maps differ, which is not re-validated here.
#[derive(Debug, Default)]
pub struct MapLifecycle {
    active_map: Option<String>,
}

impl MapLifecycle {
    pub fn new() -> Self {
        Self { active_map: None }
    }

    /// The map bot counters are currently scoped to. `None` until the first
    /// map-start signal after startup.
    pub fn active_map(&self) -> Option<&str> {
        self.active_map.as_deref()
    }

    /// Record a map transition, then schedule eviction of bot counters that
    /// no longer match the active map.
    ///
    /// Eviction is best-effort: on failure, stale counters persist until the
    /// next transition's attempt. Listings are always filtered by the active
    /// map, so the cost is storage growth, not correctness.
    pub fn on_map_start(
        &mut self,
        map_name: String,
        store: &CounterStore,
        dispatcher: &TaskDispatcher,
    ) {
        info!("map started: {map_name}");
        self.active_map = Some(map_name.clone());

        let store = store.clone();
        dispatcher.run_background("evict_stale_bot_counters", move || {
            let removed = store.delete_bot_counters(&map_name)?;
            if removed > 0 {
                info!("evicted {removed} bot counters from previous maps");
            }
            Ok(())
        });
    }
}
