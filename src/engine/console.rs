use crate::PlayerId;

#[cfg(test)]
use mockall::automock;

/// Output surface owned by the single-threaded tracker loop.
///
/// Implementations wrap the engine's chat and menu facilities. Every method
/// is only ever invoked from the tracker loop, never from a background
/// worker.
#[cfg_attr(test, automock)]
pub trait PlayerConsole: Send + Sync + 'static {
    /// Whether the player is still connected. Main-context callbacks check
    /// this before printing, since the target may have disconnected while a
    /// background task was in flight.
    fn is_connected(&self, player_id: PlayerId) -> bool;

    /// Print one line to the player's chat
    fn print_to_chat(&self, player_id: PlayerId, line: &str);

    /// Open a transient menu with labeled options
    fn open_menu(&self, player_id: PlayerId, title: &str, options: &[String]);
}
