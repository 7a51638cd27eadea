//! Shared helpers for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use crate::EntitySnapshot;
use crate::PlayerConsole;
use crate::PlayerId;

pub fn player(slot: u32, player_id: Option<PlayerId>, name: &str) -> EntitySnapshot {
    EntitySnapshot {
        slot,
        valid: true,
        is_bot: false,
        player_id,
        display_name: name.to_string(),
    }
}

pub fn bot(slot: u32, name: &str) -> EntitySnapshot {
    EntitySnapshot {
        slot,
        valid: true,
        is_bot: true,
        player_id: None,
        display_name: name.to_string(),
    }
}

/// Poll `cond` until it holds or a 2s deadline passes.
pub async fn wait_until<F>(what: &str, cond: F)
where F: Fn() -> bool {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {what}");
}

/// Console double recording every print and menu open.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    connected: Mutex<HashSet<PlayerId>>,
    lines: Mutex<Vec<(PlayerId, String)>>,
    menus: Mutex<Vec<(PlayerId, String, Vec<String>)>>,
}

impl RecordingConsole {
    pub fn with_connected(ids: &[PlayerId]) -> Self {
        Self {
            connected: Mutex::new(ids.iter().copied().collect()),
            ..Default::default()
        }
    }

    pub fn lines(&self) -> Vec<(PlayerId, String)> {
        self.lines.lock().unwrap().clone()
    }

    pub fn menus(&self) -> Vec<(PlayerId, String, Vec<String>)> {
        self.menus.lock().unwrap().clone()
    }
}

impl PlayerConsole for RecordingConsole {
    fn is_connected(&self, player_id: PlayerId) -> bool {
        self.connected.lock().unwrap().contains(&player_id)
    }

    fn print_to_chat(&self, player_id: PlayerId, line: &str) {
        self.lines.lock().unwrap().push((player_id, line.to_string()));
    }

    fn open_menu(&self, player_id: PlayerId, title: &str, options: &[String]) {
        self.menus
            .lock()
            .unwrap()
            .push((player_id, title.to_string(), options.to_vec()));
    }
}
