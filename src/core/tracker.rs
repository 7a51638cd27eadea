use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio::sync::watch;
use tracing::debug;
use tracing::info;
use tracing::warn;

use super::attribute_kill;
use super::KillAttribution;
use super::MapLifecycle;
use super::MenuThrottle;
use crate::CounterStore;
use crate::EntitySnapshot;
use crate::Error;
use crate::GameEvent;
use crate::MainTask;
use crate::PlayerConsole;
use crate::PlayerId;
use crate::Result;
use crate::TaskDispatcher;
use crate::TrackerConfig;

pub const MENU_TITLE: &str = "Main Menu";
pub const MENU_OPTION_SHOW_KILLS: &str = "Show My Kills";

/// The single-threaded main loop.
///
/// Owns everything a background worker must never touch: the output
/// console, the active-map state, and the menu cooldown map. Event handlers
/// return quickly; storage access always goes through the dispatcher.
pub struct Tracker {
    console: Arc<dyn PlayerConsole>,
    store: CounterStore,
    dispatcher: TaskDispatcher,
    map_lifecycle: MapLifecycle,
    menu_throttle: MenuThrottle,
    menu_trigger: String,

    // Engine events and completed background work
    event_rx: mpsc::Receiver<GameEvent>,
    main_rx: mpsc::UnboundedReceiver<MainTask>,

    // Shutdown signal
    shutdown_signal: watch::Receiver<()>,
}

impl Tracker {
    pub(crate) fn new(
        console: Arc<dyn PlayerConsole>,
        store: CounterStore,
        dispatcher: TaskDispatcher,
        config: &TrackerConfig,
        event_rx: mpsc::Receiver<GameEvent>,
        main_rx: mpsc::UnboundedReceiver<MainTask>,
        shutdown_signal: watch::Receiver<()>,
    ) -> Self {
        Self {
            console,
            store,
            dispatcher,
            map_lifecycle: MapLifecycle::new(),
            menu_throttle: MenuThrottle::new(Duration::from_millis(config.menu_cooldown_ms)),
            menu_trigger: config.menu_trigger.clone(),
            event_rx,
            main_rx,
            shutdown_signal,
        }
    }

    /// Drive the loop until the shutdown signal fires or the event source
    /// closes.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                // Use biased to ensure branch order
                biased;
                // P0: shutdown received;
                _ = self.shutdown_signal.changed() => {
                    warn!("[Tracker] shutdown signal received.");
                    return Ok(());
                }
                // P1: completed background work reporting back
                Some(task) = self.main_rx.recv() => {
                    task(self.console.as_ref());
                }
                // P2: engine events
                maybe_event = self.event_rx.recv() => {
                    match maybe_event {
                        Some(event) => self.handle_event(event),
                        None => {
                            info!("[Tracker] event source closed.");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Kill { attacker, victim } => self.on_kill(&attacker, &victim),
            GameEvent::Connect {
                player_id,
                display_name,
            } => self.on_connect(player_id, display_name),
            GameEvent::MapStart { map_name } => {
                self.map_lifecycle
                    .on_map_start(map_name, &self.store, &self.dispatcher)
            }
            GameEvent::Chat { sender, text } => self.on_chat(&sender, &text),
            GameEvent::MenuSelect { sender, option } => self.on_menu_select(&sender, &option),
        }
    }

    fn on_kill(&self, attacker: &EntitySnapshot, victim: &EntitySnapshot) {
        let attribution =
            match attribute_kill(attacker, victim, self.map_lifecycle.active_map()) {
                Ok(Some(attribution)) => attribution,
                Ok(None) => return,
                Err(e) => {
                    // Dropped by design, see aggregator
                    debug!("{e}: attacker {:?}", attacker.display_name);
                    return;
                }
            };

        let store = self.store.clone();
        match attribution {
            KillAttribution::Player {
                player_id,
                display_name,
            } => {
                self.dispatcher.run_background("upsert_player_kill", move || {
                    let kills = store.upsert_player_kill(player_id, &display_name)?;
                    debug!("player {player_id} now at {kills} kills");
                    Ok(())
                });
            }
            KillAttribution::Bot { bot_name, map_name } => {
                self.dispatcher.run_background("upsert_bot_kill", move || {
                    let kills = store.upsert_bot_kill(&bot_name, &map_name)?;
                    debug!("bot {bot_name:?} now at {kills} kills on {map_name}");
                    Ok(())
                });
            }
        }
    }

    /// Connect events create the row with a zero count and never overwrite
    /// an existing kill count.
    fn on_connect(&self, player_id: PlayerId, display_name: String) {
        let store = self.store.clone();
        self.dispatcher.run_background("ensure_player_exists", move || {
            store.ensure_player_exists(player_id, &display_name)
        });
    }

    fn on_chat(&mut self, sender: &EntitySnapshot, text: &str) {
        if !sender.valid || sender.is_bot {
            return;
        }
        if !text.trim().eq_ignore_ascii_case(&self.menu_trigger) {
            return;
        }
        let Some(player_id) = sender.player_id else {
            debug!(
                "ignoring menu trigger from unauthenticated sender {:?}",
                sender.display_name
            );
            return;
        };

        if !self.menu_throttle.try_acquire(player_id, Instant::now()) {
            debug!("menu open throttled for player {player_id}");
            return;
        }

        self.console.open_menu(
            player_id,
            MENU_TITLE,
            &[MENU_OPTION_SHOW_KILLS.to_string()],
        );
    }

    fn on_menu_select(&self, sender: &EntitySnapshot, option: &str) {
        if !sender.valid {
            return;
        }
        let Some(player_id) = sender.player_id else {
            return;
        };

        match option {
            MENU_OPTION_SHOW_KILLS => self.show_player_kills(player_id),
            other => warn!("unhandled menu option {other:?} selected by player {player_id}"),
        }
    }

    /// Read path: fetch the count on a worker, report back on the tracker
    /// loop. The callback captures the resolved count only and re-checks
    /// that the player is still connected before printing; a disconnected
    /// target makes it a no-op.
    fn show_player_kills(&self, player_id: PlayerId) {
        let store = self.store.clone();
        let dispatcher = self.dispatcher.clone();
        self.dispatcher.run_background("show_player_kills", move || {
            match store.player_kills(player_id) {
                Ok(kills) => {
                    dispatcher.run_on_main(Box::new(move |console| {
                        if let Err(e) =
                            deliver_line(console, player_id, &format!("Your kills: {kills}"))
                        {
                            debug!("kill readout for player {player_id} dropped: {e}");
                        }
                    }));
                    Ok(())
                }
                Err(e) => {
                    dispatcher.run_on_main(Box::new(move |console| {
                        let _ = deliver_line(
                            console,
                            player_id,
                            "Sorry, there was an error retrieving your kills.",
                        );
                    }));
                    Err(e)
                }
            }
        });
    }
}

/// Print one line to a player, re-validating liveness first. The target may
/// have disconnected between dispatch and completion of the background work
/// that produced `line`.
fn deliver_line(
    console: &dyn PlayerConsole,
    player_id: PlayerId,
    line: &str,
) -> Result<()> {
    if !console.is_connected(player_id) {
        return Err(Error::StaleHandle);
    }
    console.print_to_chat(player_id, line);
    Ok(())
}
