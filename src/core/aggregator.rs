//! Attribution rules for raw kill events.
//!
//! Pure decision logic: the tracker loop feeds it the event plus the active
//! map and dispatches the resulting upsert to a background worker.

use crate::EntitySnapshot;
use crate::Error;
use crate::PlayerId;
use crate::Result;

/// Which counter family a kill event lands in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillAttribution {
    Player {
        player_id: PlayerId,
        display_name: String,
    },
    Bot {
        bot_name: String,
        map_name: String,
    },
}

/// Decide which counter to update for `attacker` killing `victim`.
///
/// `Ok(None)` means the event is silently ignored (self-kills, attackers
/// the engine no longer considers valid). `Err(AttributionUnresolved)`
/// means the event carried a real kill that cannot be attributed: a bot
/// kill while the map is unknown, or a human attacker without a resolvable
/// stable identifier. Both are dropped and never retro-attributed once the
/// missing context appears.
pub fn attribute_kill(
    attacker: &EntitySnapshot,
    victim: &EntitySnapshot,
    active_map: Option<&str>,
) -> Result<Option<KillAttribution>> {
    if attacker.slot == victim.slot {
        return Ok(None);
    }

    if !attacker.valid {
        return Ok(None);
    }

    if attacker.is_bot {
        let Some(map) = active_map else {
            return Err(Error::AttributionUnresolved("active map unknown"));
        };
        return Ok(Some(KillAttribution::Bot {
            bot_name: attacker.display_name.clone(),
            map_name: map.to_string(),
        }));
    }

    match attacker.player_id {
        Some(player_id) => Ok(Some(KillAttribution::Player {
            player_id,
            display_name: attacker.display_name.clone(),
        })),
        None => Err(Error::AttributionUnresolved("no stable player identifier")),
    }
}
