use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

use crate::PlayerId;

/// Per-player debounce gate for menu opens.
///
/// Main-context only, so plain map state with no locking. Entries are never
/// evicted; concurrent player counts are bounded by the server, which keeps
/// session-lifetime growth acceptable.
#[derive(Debug)]
pub struct MenuThrottle {
    cooldown: Duration,
    last_open: HashMap<PlayerId, Instant>,
}

impl MenuThrottle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_open: HashMap::new(),
        }
    }

    /// Accept the attempt and record `now`, or reject it without mutating
    /// state while the previous accepted attempt is still inside the
    /// cooldown window.
    pub fn try_acquire(&mut self, player_id: PlayerId, now: Instant) -> bool {
        if let Some(last) = self.last_open.get(&player_id) {
            if now.duration_since(*last) < self.cooldown {
                return false;
            }
        }
        self.last_open.insert(player_id, now);
        true
    }
}
