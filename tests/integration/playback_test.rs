//! Headless end-to-end playback tests: a real trial fixture driven
//! through the engine with a recording sink instead of a terminal.

use std::path::PathBuf;

use anyhow::Result;

use gaitview::player::render::{
    FrameView, RenderSink, SceneView, StatusReport,
};
use gaitview::player::{dispatch, PlaybackClock};
use gaitview::trial::TrialDataset;

use super::helpers::fixture_contents;

#[derive(Default)]
struct CaptureSink {
    painted_frames: Vec<usize>,
    last_status: Option<StatusReport>,
    snapshots: usize,
}

impl RenderSink for CaptureSink {
    fn init_scene(&mut self, _scene: &SceneView) -> Result<()> {
        Ok(())
    }

    fn update_status(&mut self, status: &StatusReport) -> Result<()> {
        self.last_status = Some(status.clone());
        Ok(())
    }

    fn paint(&mut self, view: &FrameView) -> Result<()> {
        self.painted_frames.push(view.frame_index);
        Ok(())
    }

    fn export_snapshot(&mut self, _view: &FrameView, _scene: &SceneView) -> Result<PathBuf> {
        self.snapshots += 1;
        Ok(PathBuf::from("unused.svg"))
    }

    fn toggle_detached(&mut self) {}
}

fn load_sample() -> TrialDataset {
    TrialDataset::from_json(&fixture_contents("sample_trial.json")).unwrap()
}

#[test]
fn full_play_cycle_wraps_around_the_trial() {
    let dataset = load_sample();
    let mut clock = PlaybackClock::new(&dataset);
    let mut sink = CaptureSink::default();

    dispatch("toggle-play", &mut clock, &mut sink).unwrap();
    for _ in 0..5 {
        clock.tick(&mut sink).unwrap();
    }

    // 5 frames: ticks visit 0..4 then wrap back to 0
    assert_eq!(clock.frame_index(), 0);
    assert_eq!(sink.painted_frames, vec![0, 0, 1, 2, 3, 4]);
}

#[test]
fn scrubbing_while_paused_shows_numeric_status() {
    let dataset = load_sample();
    let mut clock = PlaybackClock::new(&dataset);
    let mut sink = CaptureSink::default();

    dispatch("frame-forward", &mut clock, &mut sink).unwrap();
    dispatch("frame-forward", &mut clock, &mut sink).unwrap();

    assert_eq!(clock.frame_index(), 2);
    let status = sink.last_status.as_ref().unwrap();
    assert!(status.paused);
    assert_eq!(status.markers[0].x, "0.20 ± 0.01");
    assert_eq!(status.markers[0].mode, "FIXED");
}

#[test]
fn status_collapses_while_playing() {
    let dataset = load_sample();
    let mut clock = PlaybackClock::new(&dataset);
    let mut sink = CaptureSink::default();

    dispatch("toggle-play", &mut clock, &mut sink).unwrap();

    let status = sink.last_status.as_ref().unwrap();
    assert!(!status.paused);
    for marker in &status.markers {
        assert_eq!(marker.x, "--");
        assert_eq!(marker.y, "--");
        assert_eq!(marker.mode, "--");
    }
}

#[test]
fn half_cycle_jump_on_the_sample_trial() {
    let dataset = load_sample();
    let mut clock = PlaybackClock::new(&dataset);
    let mut sink = CaptureSink::default();

    // steps_per_cycle = 4, so a jump is max(1, round(2)) = 2 frames
    dispatch("jump-forward", &mut clock, &mut sink).unwrap();
    assert_eq!(clock.frame_index(), 2);
    dispatch("jump-back", &mut clock, &mut sink).unwrap();
    assert_eq!(clock.frame_index(), 0);
}

#[test]
fn snapshot_role_reaches_the_sink() {
    let dataset = load_sample();
    let mut clock = PlaybackClock::new(&dataset);
    let mut sink = CaptureSink::default();

    dispatch("save-snapshot", &mut clock, &mut sink).unwrap();
    assert_eq!(sink.snapshots, 1);
    assert_eq!(clock.frame_index(), 0);
}
