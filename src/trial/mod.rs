//! Trial dataset model and loading
//!
//! A trial dataset is the precomputed output of one gait simulation run:
//! a fixed-length sequence of animation frames (marker and coupler
//! positions over a repeating motion cycle) plus timing metadata and the
//! per-limb duty-cycle segments used for the static timeline.
//!
//! The dataset is parsed once at startup and is immutable afterwards.
//! The playback engine only ever reads from it.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DatasetError;

/// Number of tracked limb contact points (left/right x pes/manus).
pub const MARKER_COUNT: usize = 4;

/// One measured quantity along a single axis.
///
/// Serialized upstream as a 3-element array `[value, uncertainty, raw]`
/// where `raw` is the unscaled render-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 3]")]
pub struct Coord {
    /// Measured value in simulation units
    pub value: f64,
    /// One-sigma uncertainty on the value
    pub uncertainty: f64,
    /// Raw coordinate used for rendering (pre-scale)
    pub raw: f64,
}

impl From<[f64; 3]> for Coord {
    fn from(v: [f64; 3]) -> Self {
        Self {
            value: v[0],
            uncertainty: v[1],
            raw: v[2],
        }
    }
}

/// A derived geometric point (coupler, midpoint, support box corner).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TrackPoint {
    pub x: Coord,
    pub y: Coord,
}

/// Per-frame annotation for a marker: is the limb planted or in motion?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Annotation {
    #[serde(rename = "M")]
    Moving,
    #[serde(rename = "F")]
    Fixed,
}

impl Annotation {
    /// Human-readable label shown in the status boxes.
    pub fn label(self) -> &'static str {
        match self {
            Annotation::Moving => "MOVING",
            Annotation::Fixed => "FIXED",
        }
    }
}

/// One marker sample: position, uncertainty and motion annotation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MarkerSample {
    pub x: Coord,
    pub y: Coord,
    /// Motion annotation (serialized as `"M"` / `"F"`)
    pub f: Annotation,
}

/// One discrete time-sampled snapshot of the mechanism.
#[derive(Debug, Clone, Deserialize)]
pub struct FrameRecord {
    /// Cycle-fractional simulation time (2.35 = cycle 2, 35% phase)
    pub time: f64,
    /// Same decomposition measured against the support phase
    pub support_time: f64,
    /// Marker samples, ordered to match `TrialDataset::marker_ids`
    pub positions: Vec<MarkerSample>,
    pub rear_coupler: TrackPoint,
    pub forward_coupler: TrackPoint,
    pub midpoint: TrackPoint,
    /// Support polygon over the planted rear limbs (may be absent)
    #[serde(default)]
    pub rear_support_box: Vec<TrackPoint>,
    /// Support polygon over the planted forward limbs (may be absent)
    #[serde(default)]
    pub forward_support_box: Vec<TrackPoint>,
}

/// Timing metadata for the trial.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeMeta {
    /// Total frame count. Always >= 1 after validation.
    pub count: usize,
    /// Number of frames spanning one motion cycle
    pub steps_per_cycle: usize,
    /// Per-frame progress percentage (0-100), used by external charting
    #[serde(default)]
    pub progress: Vec<f64>,
}

/// A contiguous run of frames during which one limb keeps the same
/// annotation. Only used for the static duty-cycle timeline.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CycleSegment {
    /// Width of the run in frames
    pub steps: usize,
    /// Annotation shared by every frame in the run
    pub f: Annotation,
}

/// A complete, immutable trial dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct TrialDataset {
    /// Trial name, used for display and snapshot filenames
    #[serde(default)]
    pub name: String,
    /// Data-space to render-space scale factor
    pub scale: f64,
    /// Ordered list of the four marker identifiers
    #[serde(rename = "markerIds")]
    pub marker_ids: Vec<String>,
    pub time: TimeMeta,
    pub frames: Vec<FrameRecord>,
    /// Duty-cycle segments keyed by marker id
    #[serde(default)]
    pub cycles: BTreeMap<String, Vec<CycleSegment>>,
}

impl TrialDataset {
    /// Load and validate a trial dataset from a JSON file.
    ///
    /// # Errors
    /// Returns a `DatasetError` if the file cannot be read, is not valid
    /// JSON, or fails any of the structural checks in [`validate`].
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parse and validate a trial dataset from a JSON string.
    ///
    /// # Errors
    /// Returns a `DatasetError` on parse failure or structural violation.
    pub fn from_json(raw: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(raw)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Check the structural invariants the playback engine relies on.
    ///
    /// These are fatal preconditions: the engine refuses to start on a
    /// malformed dataset rather than entering an undefined playback state.
    ///
    /// # Errors
    /// Returns the first violated invariant as a `DatasetError`.
    pub fn validate(&self) -> Result<(), DatasetError> {
        if self.time.count == 0 || self.frames.is_empty() {
            return Err(DatasetError::Empty);
        }
        if self.frames.len() != self.time.count {
            return Err(DatasetError::FrameCountMismatch {
                declared: self.time.count,
                actual: self.frames.len(),
            });
        }
        if self.time.steps_per_cycle == 0 {
            return Err(DatasetError::BadTimeMeta(
                "steps_per_cycle must be at least 1",
            ));
        }
        if !self.time.progress.is_empty() && self.time.progress.len() != self.time.count {
            return Err(DatasetError::BadTimeMeta(
                "progress vector length must match frame count",
            ));
        }
        if self.marker_ids.len() != MARKER_COUNT {
            return Err(DatasetError::MarkerCount {
                what: "markerIds",
                count: self.marker_ids.len(),
            });
        }
        for (index, frame) in self.frames.iter().enumerate() {
            if frame.positions.len() != MARKER_COUNT {
                return Err(DatasetError::FrameShape {
                    index,
                    count: frame.positions.len(),
                });
            }
        }
        Ok(())
    }

    /// Total number of frames. Guaranteed >= 1 after validation.
    pub fn frame_count(&self) -> usize {
        self.time.count
    }

    /// The frame record at `index`, which must already be in range.
    ///
    /// The playback clock only produces clamped/wrapped indices, so this
    /// is a plain slice access behind a checked API.
    pub fn frame(&self, index: usize) -> &FrameRecord {
        &self.frames[index]
    }
}

#[cfg(test)]
pub(crate) mod test_data {
    use super::*;

    /// Build a coordinate where value, uncertainty and raw are all given.
    pub fn coord(value: f64, uncertainty: f64, raw: f64) -> Coord {
        Coord {
            value,
            uncertainty,
            raw,
        }
    }

    pub fn point(x: f64, y: f64) -> TrackPoint {
        TrackPoint {
            x: coord(x, 0.01, x),
            y: coord(y, 0.01, y),
        }
    }

    pub fn marker(x: f64, y: f64, f: Annotation) -> MarkerSample {
        MarkerSample {
            x: coord(x, 0.01, x),
            y: coord(y, 0.01, y),
            f,
        }
    }

    /// A synthetic dataset with `count` frames and a given cycle length.
    pub fn dataset(count: usize, steps_per_cycle: usize) -> TrialDataset {
        let frames = (0..count)
            .map(|i| {
                let t = i as f64 / steps_per_cycle.max(1) as f64;
                FrameRecord {
                    time: t,
                    support_time: t,
                    positions: vec![
                        marker(0.0 + i as f64, 1.0, Annotation::Fixed),
                        marker(1.0 + i as f64, 1.0, Annotation::Moving),
                        marker(2.0 + i as f64, -1.0, Annotation::Fixed),
                        marker(3.0 + i as f64, -1.0, Annotation::Moving),
                    ],
                    rear_coupler: point(0.5 + i as f64, 0.0),
                    forward_coupler: point(2.5 + i as f64, 0.0),
                    midpoint: point(1.5 + i as f64, 0.0),
                    rear_support_box: vec![],
                    forward_support_box: vec![],
                }
            })
            .collect();

        TrialDataset {
            name: "synthetic".to_string(),
            scale: 10.0,
            marker_ids: vec![
                "left_pes".to_string(),
                "right_pes".to_string(),
                "left_manus".to_string(),
                "right_manus".to_string(),
            ],
            time: TimeMeta {
                count,
                steps_per_cycle,
                progress: Vec::new(),
            },
            frames,
            cycles: BTreeMap::new(),
        }
    }
}
