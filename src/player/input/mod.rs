//! Input handling for the trial player.
//!
//! Translates terminal events into playback control roles or control
//! flow signals; the main loop owns dispatching them.

mod keyboard;

pub use keyboard::{handle_key_event, KeyAction};

use crossterm::event::Event;

use crate::player::state::InputResult;

/// Translate any terminal event into a player action.
pub fn handle_event(event: &Event) -> KeyAction {
    match event {
        Event::Key(key) => handle_key_event(*key),
        // Resize repaints naturally on the next tick; everything else
        // (focus, mouse) is ignored.
        _ => KeyAction::Flow(InputResult::Continue),
    }
}
