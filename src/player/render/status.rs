//! Status formatter for the marker readout boxes.
//!
//! While paused every marker shows its measured position as
//! `value ± uncertainty` (two decimals) and its MOVING/FIXED annotation.
//! While playing all fields collapse to `--`: at animation speed the
//! render latency makes any displayed precision meaningless, so numeric
//! values must never be shown while frames are advancing.

use crate::trial::{FrameRecord, MarkerSample, TrialDataset};

/// Placeholder shown for every field while playback is running.
pub const RUNNING_PLACEHOLDER: &str = "--";

/// Formatted readout for one marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStatus {
    pub marker_id: String,
    pub x: String,
    pub y: String,
    pub mode: String,
}

/// The full status panel contents for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub paused: bool,
    pub markers: Vec<MarkerStatus>,
}

/// Round to two decimal places the way the readouts display them.
fn round2(value: f64) -> f64 {
    (100.0 * value).round() / 100.0
}

/// Format a measurement as `value ± uncertainty`, two decimals each.
pub fn display_number(value: f64, uncertainty: f64) -> String {
    format!("{:.2} ± {:.2}", round2(value), round2(uncertainty))
}

/// Format one coordinate field, honoring the running placeholder.
pub fn format_measurement(value: f64, uncertainty: f64, paused: bool) -> String {
    if paused {
        display_number(value, uncertainty)
    } else {
        RUNNING_PLACEHOLDER.to_string()
    }
}

fn marker_status(marker_id: &str, sample: &MarkerSample, paused: bool) -> MarkerStatus {
    let mode = if paused {
        sample.f.label().to_string()
    } else {
        RUNNING_PLACEHOLDER.to_string()
    };

    MarkerStatus {
        marker_id: marker_id.to_string(),
        x: format_measurement(sample.x.value, sample.x.uncertainty, paused),
        y: format_measurement(sample.y.value, sample.y.uncertainty, paused),
        mode,
    }
}

impl StatusReport {
    /// Build the status panel for the given frame.
    pub fn compose(dataset: &TrialDataset, frame: &FrameRecord, paused: bool) -> Self {
        let markers = dataset
            .marker_ids
            .iter()
            .zip(frame.positions.iter())
            .map(|(marker_id, sample)| marker_status(marker_id, sample, paused))
            .collect();

        Self { paused, markers }
    }
}
