//! Player state management
//!
//! Contains the central `PlaybackState` struct owned by the playback
//! clock, as well as shared types used across player modules.

use std::time::Instant;

/// Result of processing an input event.
///
/// Returned by input handlers to signal control flow decisions to the
/// main loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Continue normal playback/rendering
    Continue,
    /// Exit the player normally
    Quit,
}

/// The only mutable state in the playback engine.
///
/// Owned exclusively by [`crate::player::PlaybackClock`]; every other
/// component only reads frame data derived from it. That single-writer
/// discipline is what keeps playback race-free without locks.
///
/// Invariants:
/// - `frame_index` is always in `[0, frame_count - 1]`
/// - `timer` is `Some` iff `paused == false`
#[derive(Debug, Clone, Copy)]
pub struct PlaybackState {
    /// Whether playback is paused
    pub paused: bool,
    /// Current frame index into the trial dataset
    pub frame_index: usize,
    /// Deadline of the next scheduled tick; `None` while paused
    pub timer: Option<Instant>,
}

impl PlaybackState {
    /// Fresh state: frame 0, paused, no timer armed.
    pub fn new() -> Self {
        Self {
            paused: true,
            frame_index: 0,
            timer: None,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
