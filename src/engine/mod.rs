//! Boundary types for the excluded collaborators: the game engine's event
//! dispatch (input side) and the chat/menu output surface.

mod console;
mod event;

pub use console::*;
pub use event::*;
