//! Trial playback engine
//!
//! Renders a precomputed gait-simulation trial as a scrubbable animation
//! synchronized with numeric readouts.
//!
//! # Architecture
//!
//! - `state`: the `PlaybackState` struct and shared player types
//! - `clock`: the playback clock owning the frame pointer and timer
//! - `dispatch`: symbolic control roles resolved to clock transitions
//! - `input/`: keyboard mapping onto control roles
//! - `render/`: the `RenderSink` boundary, geometry projection, status
//!   formatting, the terminal sink and SVG snapshot export
//! - `native`: the interactive cooperative run loop
//!
//! The state machine is pure: it calls the sink with plain data and
//! never renders anything itself, so every playback property is testable
//! without a terminal present.

pub mod clock;
pub mod dispatch;
pub mod input;
mod native;
pub mod render;
pub mod state;

pub use clock::{PlaybackClock, TICK_PERIOD};
pub use dispatch::{dispatch, ControlRole};
pub use native::{play_trial, PlaybackResult};
pub use state::{InputResult, PlaybackState};
