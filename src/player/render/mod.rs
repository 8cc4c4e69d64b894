//! Rendering for the trial player.
//!
//! The playback engine itself never draws anything: it composes plain
//! data views ([`FrameView`], [`StatusReport`], [`SceneView`]) and hands
//! them to a [`RenderSink`]. The terminal sink in this crate is one
//! implementation; tests drive the engine with recording doubles instead,
//! so every state-machine property is checkable headless.

pub mod geometry;
pub mod status;
pub mod svg;
pub mod terminal;

use std::path::PathBuf;

use anyhow::Result;

pub use geometry::{CouplerView, FrameView, LinkView, PinView, RenderPoint, SceneView};
pub use status::{MarkerStatus, StatusReport};
pub use terminal::TerminalSink;

/// The view-update boundary the playback engine drives.
///
/// The engine calls into the sink once per resolved frame and knows
/// nothing about the rendering target's representation.
pub trait RenderSink {
    /// Receive the static scene geometry once, before playback begins.
    ///
    /// # Errors
    /// Propagates failures from the underlying render target.
    fn init_scene(&mut self, scene: &SceneView) -> Result<()>;

    /// Update the textual status overlays.
    ///
    /// # Errors
    /// Propagates failures from the underlying render target.
    fn update_status(&mut self, status: &StatusReport) -> Result<()>;

    /// Paint one resolved frame.
    ///
    /// # Errors
    /// Propagates failures from the underlying render target.
    fn paint(&mut self, view: &FrameView) -> Result<()>;

    /// Export the current frame as a standalone snapshot file.
    ///
    /// # Errors
    /// Returns an error if the snapshot cannot be written.
    fn export_snapshot(&mut self, view: &FrameView, scene: &SceneView) -> Result<PathBuf>;

    /// Toggle the detached display layout. Never affects the frame index.
    fn toggle_detached(&mut self);
}
