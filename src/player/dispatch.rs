//! Command dispatcher: symbolic control roles onto clock transitions.
//!
//! Every playback control carries a role token (the same tokens the
//! report UI uses on its buttons). The dispatcher resolves each role to
//! a play/pause toggle, a frame-index delta or a sink delegation. Jump
//! distances are derived from the dataset (a fraction of the total frame
//! count, or half a motion cycle) so the same control scheme works at
//! any sampling resolution.

use anyhow::Result;
use tracing::warn;

use crate::player::clock::PlaybackClock;
use crate::player::render::RenderSink;

/// The fixed alphabet of playback control roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRole {
    TogglePlay,
    /// Half a motion cycle backward
    JumpBack,
    /// Half a motion cycle forward
    JumpForward,
    /// A tenth of the trial backward
    Backward10,
    /// A tenth of the trial forward
    Forward10,
    FrameBack,
    FrameForward,
    SaveSnapshot,
    /// Display-layout toggle only; never moves the frame pointer
    ToggleDetachedView,
}

impl ControlRole {
    /// Parse a role token. Unknown tokens yield `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "toggle-play" => Some(Self::TogglePlay),
            "jump-back" => Some(Self::JumpBack),
            "jump-forward" => Some(Self::JumpForward),
            "backward-10" => Some(Self::Backward10),
            "forward-10" => Some(Self::Forward10),
            "frame-back" => Some(Self::FrameBack),
            "frame-forward" => Some(Self::FrameForward),
            "save-snapshot" => Some(Self::SaveSnapshot),
            "pop-out" | "toggle-detached-view" => Some(Self::ToggleDetachedView),
            _ => None,
        }
    }
}

/// Frame delta for a half-cycle jump: `max(1, round(0.5 * steps_per_cycle))`.
pub fn half_cycle_step(steps_per_cycle: usize) -> isize {
    ((0.5 * steps_per_cycle as f64).round() as isize).max(1)
}

/// Frame delta for a decade jump: `max(1, floor(0.1 * count))`.
///
/// An older variant used the raw 10% without the floor to one frame;
/// the floored form is canonical here so short trials still move.
pub fn decade_step(count: usize) -> isize {
    ((0.1 * count as f64).floor() as isize).max(1)
}

/// Dispatch one role token against the clock.
///
/// Unrecognized tokens are reported to the diagnostic log and ignored;
/// they are never an error.
///
/// # Errors
/// Propagates render sink failures from the resulting transition.
pub fn dispatch(token: &str, clock: &mut PlaybackClock, sink: &mut dyn RenderSink) -> Result<()> {
    let Some(role) = ControlRole::parse(token) else {
        warn!(role = token, "unrecognized playback control role");
        return Ok(());
    };
    dispatch_role(role, clock, sink)
}

/// Dispatch an already-parsed control role.
///
/// # Errors
/// Propagates render sink failures from the resulting transition.
pub fn dispatch_role(
    role: ControlRole,
    clock: &mut PlaybackClock,
    sink: &mut dyn RenderSink,
) -> Result<()> {
    match role {
        ControlRole::TogglePlay => clock.toggle_play(sink),
        ControlRole::JumpBack => clock.seek(-half_cycle_step(clock.steps_per_cycle()), sink),
        ControlRole::JumpForward => clock.seek(half_cycle_step(clock.steps_per_cycle()), sink),
        ControlRole::Backward10 => clock.seek(-decade_step(clock.frame_count()), sink),
        ControlRole::Forward10 => clock.seek(decade_step(clock.frame_count()), sink),
        ControlRole::FrameBack => clock.seek(-1, sink),
        ControlRole::FrameForward => clock.seek(1, sink),
        ControlRole::SaveSnapshot => {
            let view = clock.current_view();
            let path = sink.export_snapshot(&view, clock.scene())?;
            tracing::info!(path = %path.display(), "snapshot exported");
            Ok(())
        }
        ControlRole::ToggleDetachedView => {
            sink.toggle_detached();
            Ok(())
        }
    }
}
