//! gaitview - terminal playback viewer for precomputed gait simulation
//! trials.
//!
//! A trial dataset holds the marker trajectories of a four-limbed
//! mechanism over a repeating motion cycle, precomputed by the upstream
//! simulation. This crate loads such a dataset and plays it back as an
//! interactive, scrubbable animation with synchronized numeric readouts.

pub mod error;
pub mod player;
pub mod trial;

pub use error::DatasetError;
pub use player::{play_trial, PlaybackResult};
pub use trial::TrialDataset;
