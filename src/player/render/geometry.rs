//! Frame-to-geometry projection.
//!
//! Maps a dataset frame into render-space quantities: scaled marker pins,
//! coupling linkage endpoints, support polygons, activity scalars and the
//! progress/cycle/phase readouts. Everything here is pure data; drawing
//! it is the render sink's business.

use crate::trial::{Annotation, FrameRecord, TrackPoint, TrialDataset};

/// Uncertainty-to-activity gain. An uncertainty of 0.2 or more saturates
/// the activity scalar at 1.0.
const ACTIVITY_GAIN: f64 = 5.0;

/// A point in render space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPoint {
    pub x: f64,
    pub y: f64,
}

/// A marker pin: projected position plus its motion annotation.
#[derive(Debug, Clone, Copy)]
pub struct PinView {
    pub position: RenderPoint,
    pub annotation: Annotation,
}

/// A line segment in render space.
#[derive(Debug, Clone, Copy)]
pub struct LinkView {
    pub from: RenderPoint,
    pub to: RenderPoint,
}

/// A derived point whose color encodes measurement uncertainty.
///
/// `activity` is in `[0, 1]`; 0 means a confident neutral rendering and
/// 1 means fully alert. The sink decides the actual colors.
#[derive(Debug, Clone, Copy)]
pub struct CouplerView {
    pub position: RenderPoint,
    pub activity: f64,
}

/// Everything the render sink needs to paint one frame.
#[derive(Debug, Clone)]
pub struct FrameView {
    pub frame_index: usize,
    pub paused: bool,
    /// Playback progress in percent, `[0, 100]`
    pub progress: f64,
    /// Whole motion cycles completed at this frame
    pub cycle: i64,
    /// Rounded percent phase within the current cycle, `[0, 100]`
    pub phase: i64,
    /// The four marker pins, in `marker_ids` order
    pub pins: Vec<PinView>,
    /// Linkage lines from each marker to its coupler, in pin order
    pub linkages: Vec<LinkView>,
    /// The rear-to-forward coupling length line
    pub coupling: LinkView,
    pub rear_coupler: CouplerView,
    pub forward_coupler: CouplerView,
    pub midpoint: CouplerView,
    pub rear_support_box: Vec<RenderPoint>,
    pub forward_support_box: Vec<RenderPoint>,
}

/// Static geometry composed once at startup and handed to the sink
/// before playback begins.
#[derive(Debug, Clone)]
pub struct SceneView {
    /// Trial name for titles and snapshot filenames
    pub name: String,
    /// The midpoint path across the whole trial (dashed midline)
    pub midline: Vec<RenderPoint>,
    /// Per-limb duty-cycle timeline rows
    pub timeline: Vec<TimelineRow>,
}

/// One limb's row in the static duty-cycle timeline.
#[derive(Debug, Clone)]
pub struct TimelineRow {
    pub marker_id: String,
    /// Segments as (width percent of the whole trial, annotation)
    pub segments: Vec<(f64, Annotation)>,
}

/// Project a derived point into render space.
///
/// The y sign flip accounts for the inversion between the data
/// coordinate system (y up) and render space (y down). It must be
/// applied to every geometric quantity, pins and polygons included.
pub fn project(scale: f64, point: &TrackPoint) -> RenderPoint {
    RenderPoint {
        x: scale * point.x.raw,
        y: -scale * point.y.raw,
    }
}

/// Activity scalar for a derived point: uncertainty mapped onto `[0, 1]`.
pub fn activity(point: &TrackPoint) -> f64 {
    (ACTIVITY_GAIN * point.x.uncertainty.max(point.y.uncertainty)).clamp(0.0, 1.0)
}

/// Playback progress in percent for `frame_index` of `count` frames.
///
/// A single-frame trial is always at 100% rather than dividing by zero.
pub fn progress_percent(frame_index: usize, count: usize) -> f64 {
    if count <= 1 {
        100.0
    } else {
        100.0 * frame_index as f64 / (count - 1) as f64
    }
}

/// Decompose cycle-fractional time into (whole cycles, rounded % phase).
pub fn cycle_phase(time: f64) -> (i64, i64) {
    let cycle = time.floor();
    let phase = (100.0 * (time - cycle)).round();
    (cycle as i64, phase as i64)
}

/// Format a phase percentage zero-padded to two digits, e.g. `"05%"`.
pub fn phase_label(phase: i64) -> String {
    format!("{:02}%", phase)
}

impl FrameView {
    /// Compose the render view for one frame of the trial.
    pub fn compose(dataset: &TrialDataset, frame_index: usize, paused: bool) -> Self {
        let scale = dataset.scale;
        let frame = dataset.frame(frame_index);
        let (cycle, phase) = cycle_phase(frame.time);

        let pins: Vec<PinView> = frame
            .positions
            .iter()
            .map(|sample| PinView {
                position: RenderPoint {
                    x: scale * sample.x.raw,
                    y: -scale * sample.y.raw,
                },
                annotation: sample.f,
            })
            .collect();

        let rear = project(scale, &frame.rear_coupler);
        let forward = project(scale, &frame.forward_coupler);

        // Pes markers couple to the rear point, manus markers to the
        // forward point; marker_ids order is pes pair then manus pair.
        let linkages = pins
            .iter()
            .enumerate()
            .map(|(i, pin)| LinkView {
                from: pin.position,
                to: if i < 2 { rear } else { forward },
            })
            .collect();

        Self {
            frame_index,
            paused,
            progress: progress_percent(frame_index, dataset.frame_count()),
            cycle,
            phase,
            pins,
            linkages,
            coupling: LinkView {
                from: rear,
                to: forward,
            },
            rear_coupler: CouplerView {
                position: rear,
                activity: activity(&frame.rear_coupler),
            },
            forward_coupler: CouplerView {
                position: forward,
                activity: activity(&frame.forward_coupler),
            },
            midpoint: CouplerView {
                position: project(scale, &frame.midpoint),
                activity: activity(&frame.midpoint),
            },
            rear_support_box: project_polygon(scale, &frame.rear_support_box),
            forward_support_box: project_polygon(scale, &frame.forward_support_box),
        }
    }
}

fn project_polygon(scale: f64, corners: &[TrackPoint]) -> Vec<RenderPoint> {
    corners.iter().map(|p| project(scale, p)).collect()
}

impl SceneView {
    /// Compose the static scene: midline path and duty-cycle timeline.
    pub fn compose(dataset: &TrialDataset) -> Self {
        let midline = dataset
            .frames
            .iter()
            .map(|frame: &FrameRecord| project(dataset.scale, &frame.midpoint))
            .collect();

        let count = dataset.frame_count() as f64;
        let timeline = dataset
            .cycles
            .iter()
            .map(|(marker_id, segments)| TimelineRow {
                marker_id: marker_id.clone(),
                segments: segments
                    .iter()
                    .map(|segment| (100.0 * segment.steps as f64 / count, segment.f))
                    .collect(),
            })
            .collect();

        Self {
            name: dataset.name.clone(),
            midline,
            timeline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::test_data;
    use crate::trial::{Coord, CycleSegment};

    fn track_point(x: f64, y: f64, unc: f64) -> TrackPoint {
        TrackPoint {
            x: Coord {
                value: x,
                uncertainty: unc,
                raw: x,
            },
            y: Coord {
                value: y,
                uncertainty: unc,
                raw: y,
            },
        }
    }

    #[test]
    fn projection_scales_x_and_flips_y() {
        let p = project(10.0, &track_point(1.5, 2.0, 0.0));
        assert_eq!(p.x, 15.0);
        assert_eq!(p.y, -20.0);
    }

    #[test]
    fn activity_scales_largest_uncertainty() {
        // 5 * 0.1 = 0.5
        assert_eq!(activity(&track_point(0.0, 0.0, 0.1)), 0.5);
    }

    #[test]
    fn activity_uses_max_axis_uncertainty() {
        let point = TrackPoint {
            x: Coord {
                value: 0.0,
                uncertainty: 0.02,
                raw: 0.0,
            },
            y: Coord {
                value: 0.0,
                uncertainty: 0.1,
                raw: 0.0,
            },
        };
        assert_eq!(activity(&point), 0.5);
    }

    #[test]
    fn activity_clamps_to_unit_interval() {
        assert_eq!(activity(&track_point(0.0, 0.0, 3.0)), 1.0);
        assert_eq!(activity(&track_point(0.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn progress_single_frame_is_full_without_divide_by_zero() {
        assert_eq!(progress_percent(0, 1), 100.0);
    }

    #[test]
    fn progress_midpoint() {
        assert_eq!(progress_percent(2, 5), 50.0);
        assert_eq!(progress_percent(0, 5), 0.0);
        assert_eq!(progress_percent(4, 5), 100.0);
    }

    #[test]
    fn cycle_phase_decomposition() {
        assert_eq!(cycle_phase(2.35), (2, 35));
        assert_eq!(cycle_phase(0.0), (0, 0));
        assert_eq!(cycle_phase(3.999), (3, 100));
    }

    #[test]
    fn phase_label_zero_pads() {
        assert_eq!(phase_label(5), "05%");
        assert_eq!(phase_label(35), "35%");
        assert_eq!(phase_label(0), "00%");
    }

    #[test]
    fn compose_builds_four_pins_and_linkages() {
        let dataset = test_data::dataset(4, 4);
        let view = FrameView::compose(&dataset, 1, true);

        assert_eq!(view.pins.len(), 4);
        assert_eq!(view.linkages.len(), 4);
        assert!(view.paused);
        assert_eq!(view.frame_index, 1);

        // Pes linkages end at the rear coupler, manus at the forward one
        let rear = view.rear_coupler.position;
        let forward = view.forward_coupler.position;
        assert_eq!(view.linkages[0].to, rear);
        assert_eq!(view.linkages[1].to, rear);
        assert_eq!(view.linkages[2].to, forward);
        assert_eq!(view.linkages[3].to, forward);

        // Coupling line spans the two couplers
        assert_eq!(view.coupling.from, rear);
        assert_eq!(view.coupling.to, forward);
    }

    #[test]
    fn compose_applies_sign_flip_to_pins() {
        let dataset = test_data::dataset(2, 4);
        let view = FrameView::compose(&dataset, 0, true);

        // test_data markers sit at y = 1.0 / -1.0 with scale 10
        assert_eq!(view.pins[0].position.y, -10.0);
        assert_eq!(view.pins[2].position.y, 10.0);
    }

    #[test]
    fn scene_midline_covers_every_frame() {
        let dataset = test_data::dataset(6, 4);
        let scene = SceneView::compose(&dataset);
        assert_eq!(scene.midline.len(), 6);
    }

    #[test]
    fn scene_timeline_widths_are_percentages() {
        let mut dataset = test_data::dataset(10, 4);
        dataset.cycles.insert(
            "left_pes".to_string(),
            vec![
                CycleSegment {
                    steps: 4,
                    f: Annotation::Fixed,
                },
                CycleSegment {
                    steps: 6,
                    f: Annotation::Moving,
                },
            ],
        );

        let scene = SceneView::compose(&dataset);
        assert_eq!(scene.timeline.len(), 1);
        let row = &scene.timeline[0];
        assert_eq!(row.segments[0], (40.0, Annotation::Fixed));
        assert_eq!(row.segments[1], (60.0, Annotation::Moving));
    }
}
