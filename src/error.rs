//! Dataset loading errors.

/// Errors raised while loading or validating a trial dataset.
///
/// All of these are fatal at initialization time; nothing in the playback
/// engine itself produces errors once a dataset has been accepted.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read trial file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse trial JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Trial dataset contains no frames")]
    Empty,

    #[error("Declared frame count {declared} does not match {actual} frames present")]
    FrameCountMismatch { declared: usize, actual: usize },

    #[error("Expected exactly 4 {what} entries, found {count}")]
    MarkerCount { what: &'static str, count: usize },

    #[error("Frame {index} carries {count} marker positions instead of 4")]
    FrameShape { index: usize, count: usize },

    #[error("Invalid time metadata: {0}")]
    BadTimeMeta(&'static str),
}
