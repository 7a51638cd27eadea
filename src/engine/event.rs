/// Stable 64-bit platform identifier for a human player. Globally unique,
/// assigned by the platform, never reused.
pub type PlayerId = u64;

/// Point-in-time view of an engine entity as carried by a notification.
///
/// Entity slots are engine-internal and may be reused across connections, so
/// they are only meaningful within the event that carried them. `player_id`
/// is the one identity that survives the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySnapshot {
    /// Engine slot index
    pub slot: u32,

    /// Whether the engine still considered the entity alive at dispatch.
    /// Events can arrive with stale references.
    pub valid: bool,

    pub is_bot: bool,

    /// Stable platform identifier. Absent for bots and for unauthenticated
    /// sessions.
    pub player_id: Option<PlayerId>,

    /// Last-seen display name
    pub display_name: String,
}

/// Notifications consumed from the engine's event dispatch.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// `attacker` killed `victim`
    Kill {
        attacker: EntitySnapshot,
        victim: EntitySnapshot,
    },

    /// A player finished connecting
    Connect {
        player_id: PlayerId,
        display_name: String,
    },

    /// A new map finished loading
    MapStart { map_name: String },

    /// Raw chat line from an entity
    Chat { sender: EntitySnapshot, text: String },

    /// An option of a previously opened menu was selected
    MenuSelect {
        sender: EntitySnapshot,
        option: String,
    },
}
