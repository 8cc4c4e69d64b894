//! Keyboard input handling for the trial player.
//!
//! Maps key presses onto playback control roles. The handler itself
//! never touches playback state; it only translates keys, and the main
//! loop feeds the resulting role through the command dispatcher.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::player::dispatch::ControlRole;
use crate::player::state::InputResult;

/// What a key press resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed this role to the command dispatcher
    Control(ControlRole),
    /// Plain control-flow signal for the main loop
    Flow(InputResult),
}

/// Translate a key event into a player action.
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match key.code {
        // === Quit ===
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Flow(InputResult::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Flow(InputResult::Quit)
        }

        // === Playback controls ===
        KeyCode::Char(' ') => KeyAction::Control(ControlRole::TogglePlay),

        // === Seeking ===
        KeyCode::Char('[') => KeyAction::Control(ControlRole::JumpBack),
        KeyCode::Char(']') => KeyAction::Control(ControlRole::JumpForward),
        KeyCode::Char('<') | KeyCode::PageUp => KeyAction::Control(ControlRole::Backward10),
        KeyCode::Char('>') | KeyCode::PageDown => KeyAction::Control(ControlRole::Forward10),
        KeyCode::Char(',') | KeyCode::Left => KeyAction::Control(ControlRole::FrameBack),
        KeyCode::Char('.') | KeyCode::Right => KeyAction::Control(ControlRole::FrameForward),

        // === Display ===
        KeyCode::Char('s') => KeyAction::Control(ControlRole::SaveSnapshot),
        KeyCode::Char('d') => KeyAction::Control(ControlRole::ToggleDetachedView),

        _ => KeyAction::Flow(InputResult::Continue),
    }
}
