//! Interactive terminal run loop for the trial player.
//!
//! Single-threaded and cooperative: the loop blocks on terminal input
//! with a timeout derived from the clock's next tick deadline, so input
//! handling and the periodic tick can never overlap. Playback starts
//! automatically, exactly like the report page does.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::terminal;
use tracing::debug;

use crate::player::clock::PlaybackClock;
use crate::player::dispatch::{self, ControlRole};
use crate::player::input::{self, KeyAction};
use crate::player::render::{RenderSink, TerminalSink};
use crate::player::state::InputResult;
use crate::trial::TrialDataset;

/// Outcome of a play session.
#[derive(Debug)]
pub enum PlaybackResult {
    /// The user quit normally
    Finished,
}

/// Load a trial file and run the interactive player on it.
///
/// # Errors
/// Returns an error when the dataset fails validation or the terminal
/// cannot be set up.
pub fn play_trial(path: &Path) -> Result<PlaybackResult> {
    let dataset = TrialDataset::load(path)
        .with_context(|| format!("Failed to load trial {}", path.display()))?;

    let snapshot_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let mut sink = TerminalSink::new(&dataset, snapshot_dir)?;

    setup_terminal()?;
    let result = run_loop(&dataset, &mut sink);
    restore_terminal()?;
    result
}

fn setup_terminal() -> Result<()> {
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    // Alternate screen + hidden cursor, restored on exit
    write!(stdout, "\x1b[?1049h\x1b[?25l\x1b[2J")?;
    stdout.flush()?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "\x1b[?25h\x1b[?1049l")?;
    stdout.flush()?;
    terminal::disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

fn run_loop(dataset: &TrialDataset, sink: &mut TerminalSink) -> Result<PlaybackResult> {
    let mut clock = PlaybackClock::new(dataset);
    sink.init_scene(clock.scene())?;

    // Auto-start playback; the toggle also forces the first paint.
    dispatch::dispatch_role(ControlRole::TogglePlay, &mut clock, sink)?;

    loop {
        if event::poll(clock.poll_timeout())? {
            match input::handle_event(&event::read()?) {
                KeyAction::Flow(InputResult::Quit) => {
                    debug!("player quit requested");
                    return Ok(PlaybackResult::Finished);
                }
                KeyAction::Flow(InputResult::Continue) => {}
                KeyAction::Control(role) => {
                    dispatch::dispatch_role(role, &mut clock, sink)?;
                }
            }
        }

        if clock.tick_due() {
            clock.tick(sink)?;
        }
    }
}
