//! The playback clock: the single owner of all mutable playback state.
//!
//! The clock advances the frame pointer on a fixed 100ms interval while
//! playing, maps seek requests onto clamped index transitions, and drives
//! the render sink from one authoritative frame index. All mutation
//! happens synchronously inside a command handler or inside the periodic
//! tick, never both at once: the cooperative main loop guarantees the
//! two cannot overlap, and `set_paused` always cancels the old timer
//! before flipping the flag and arming a new one.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::player::render::{FrameView, RenderSink, SceneView, StatusReport};
use crate::player::state::PlaybackState;
use crate::trial::TrialDataset;

/// Fixed tick period of the free-running animation.
pub const TICK_PERIOD: Duration = Duration::from_millis(100);

/// Owns the frame pointer and the pause/timer pair for one trial.
///
/// Every other component reads frame data derived from this state but
/// never mutates it. If a tick handler ever takes longer than the 100ms
/// period, frames visibly skip; that is accepted degradation, not a
/// correctness bug.
pub struct PlaybackClock<'a> {
    dataset: &'a TrialDataset,
    scene: SceneView,
    state: PlaybackState,
}

impl<'a> PlaybackClock<'a> {
    /// Create a clock for a validated dataset: frame 0, paused, no timer.
    pub fn new(dataset: &'a TrialDataset) -> Self {
        Self {
            dataset,
            scene: SceneView::compose(dataset),
            state: PlaybackState::new(),
        }
    }

    pub fn paused(&self) -> bool {
        self.state.paused
    }

    pub fn frame_index(&self) -> usize {
        self.state.frame_index
    }

    pub fn frame_count(&self) -> usize {
        self.dataset.frame_count()
    }

    pub fn steps_per_cycle(&self) -> usize {
        self.dataset.time.steps_per_cycle
    }

    pub fn scene(&self) -> &SceneView {
        &self.scene
    }

    /// The render view for the frame the clock currently points at.
    pub fn current_view(&self) -> FrameView {
        FrameView::compose(self.dataset, self.state.frame_index, self.state.paused)
    }

    /// Push the current frame through the sink: status first, then paint.
    /// Never moves the frame pointer.
    fn render_frame(&self, sink: &mut dyn RenderSink) -> Result<()> {
        let frame = self.dataset.frame(self.state.frame_index);
        sink.update_status(&StatusReport::compose(
            self.dataset,
            frame,
            self.state.paused,
        ))?;
        sink.paint(&self.current_view())
    }

    /// The per-interval action, also used to paint a frame on demand.
    ///
    /// Renders the current frame, then advances the pointer by one frame
    /// (wrapping to 0 at the end) only while playing. While paused this
    /// is a pure repaint.
    ///
    /// # Errors
    /// Propagates render sink failures.
    pub fn tick(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        self.render_frame(sink)?;

        if self.state.paused {
            return Ok(());
        }

        self.state.frame_index += 1;
        if self.state.frame_index >= self.dataset.frame_count() {
            self.state.frame_index = 0;
        }
        self.state.timer = Some(Instant::now() + TICK_PERIOD);
        Ok(())
    }

    /// Transition between playing and paused.
    ///
    /// Ordering is fixed: cancel the old timer, flip the flag, then arm
    /// a fresh timer only when now playing. A synchronous repaint follows
    /// so the displayed frame (and the `--` status placeholders) match
    /// the new state immediately.
    ///
    /// # Errors
    /// Propagates render sink failures.
    pub fn set_paused(&mut self, value: bool, sink: &mut dyn RenderSink) -> Result<()> {
        self.state.timer = None;
        self.state.paused = value;
        if !value {
            self.state.timer = Some(Instant::now() + TICK_PERIOD);
        }
        self.render_frame(sink)
    }

    /// Flip the play/pause state.
    ///
    /// # Errors
    /// Propagates render sink failures.
    pub fn toggle_play(&mut self, sink: &mut dyn RenderSink) -> Result<()> {
        self.set_paused(!self.state.paused, sink)
    }

    /// Move the frame pointer by `delta`, saturating at both ends.
    ///
    /// Manual seeks never wrap, unlike free-running playback. While
    /// paused the seek repaints immediately; while playing only the
    /// status overlays refresh and the next timer tick catches up,
    /// which avoids double-advancing the pointer.
    ///
    /// # Errors
    /// Propagates render sink failures.
    pub fn seek(&mut self, delta: isize, sink: &mut dyn RenderSink) -> Result<()> {
        let max = (self.dataset.frame_count() - 1) as isize;
        let target = (self.state.frame_index as isize + delta).clamp(0, max);
        self.state.frame_index = target as usize;

        let frame = self.dataset.frame(self.state.frame_index);
        sink.update_status(&StatusReport::compose(
            self.dataset,
            frame,
            self.state.paused,
        ))?;

        if self.state.paused {
            // Repaint without advancing; the paused tick short-circuits.
            sink.paint(&self.current_view())?;
        }
        Ok(())
    }

    /// Whether the next scheduled tick deadline has passed.
    pub fn tick_due(&self) -> bool {
        match self.state.timer {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// How long the main loop may block waiting for input.
    ///
    /// While playing this is the time remaining until the next tick;
    /// while paused there is no deadline and a full period is fine.
    pub fn poll_timeout(&self) -> Duration {
        match self.state.timer {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => TICK_PERIOD,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_sink {
    use std::path::PathBuf;

    use anyhow::Result;

    use crate::player::render::{FrameView, RenderSink, SceneView, StatusReport};

    /// Records every call the engine makes, for headless assertions.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        pub painted: Vec<FrameView>,
        pub statuses: Vec<StatusReport>,
        pub scenes: usize,
        pub snapshots: usize,
        pub detached_toggles: usize,
    }

    impl RenderSink for RecordingSink {
        fn init_scene(&mut self, _scene: &SceneView) -> Result<()> {
            self.scenes += 1;
            Ok(())
        }

        fn update_status(&mut self, status: &StatusReport) -> Result<()> {
            self.statuses.push(status.clone());
            Ok(())
        }

        fn paint(&mut self, view: &FrameView) -> Result<()> {
            self.painted.push(view.clone());
            Ok(())
        }

        fn export_snapshot(&mut self, _view: &FrameView, _scene: &SceneView) -> Result<PathBuf> {
            self.snapshots += 1;
            Ok(PathBuf::from("snapshot.svg"))
        }

        fn toggle_detached(&mut self) {
            self.detached_toggles += 1;
        }
    }
}
