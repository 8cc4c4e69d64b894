//! SVG snapshot export.
//!
//! Serializes the currently displayed frame to a standalone SVG file so
//! a paused pose can be dropped into a paper or a slide. The filename
//! carries the trial name plus the cycle/phase stamp, e.g.
//! `trial-a_C2p35.svg`.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::geometry::{FrameView, RenderPoint, SceneView};
use crate::trial::Annotation;

/// Pin radius in SVG units, matching the report's marker dots.
const PIN_RADIUS: f64 = 4.0;

/// SVG fill colors per limb slot, in marker order.
pub const LIMB_COLORS: [&str; 4] = ["DodgerBlue", "DarkOrange", "DarkOliveGreen", "DarkOrchid"];

/// Snapshot filename for a frame: `{name}_C{cycle}p{phase}.svg`.
///
/// Whitespace in the trial name is dash-folded to keep the name
/// shell-friendly.
pub fn snapshot_filename(name: &str, cycle: i64, phase: i64) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();
    let stem = if stem.is_empty() { "trial" } else { &stem };
    format!("{}_C{}p{:02}.svg", stem, cycle, phase)
}

fn path_data(points: &[RenderPoint]) -> String {
    let mut data = String::new();
    for (i, p) in points.iter().enumerate() {
        let op = if i == 0 { 'M' } else { 'L' };
        let _ = write!(data, "{}{:.2},{:.2} ", op, p.x, p.y);
    }
    data.trim_end().to_string()
}

fn line_element(from: RenderPoint, to: RenderPoint) -> String {
    format!(
        r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="rgba(0,0,0,0.25)" stroke-width="2"/>"#,
        from.x, from.y, to.x, to.y
    )
}

fn circle_element(at: RenderPoint, fill: &str, class: &str) -> String {
    format!(
        r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" class="{}"/>"#,
        at.x, at.y, PIN_RADIUS, fill, class
    )
}

/// Grey-to-alert color for a coupler, by its activity scalar.
fn coupler_fill(activity: f64) -> String {
    let t = activity.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + t * (b - a)).round() as u8;
    format!("rgb({},{},{})", lerp(100.0, 220.0), lerp(100.0, 50.0), lerp(100.0, 47.0))
}

/// Render the frame to an SVG document string.
pub fn render_document(view: &FrameView, scene: &SceneView) -> String {
    let mut all_points: Vec<RenderPoint> = scene.midline.clone();
    all_points.extend(view.pins.iter().map(|p| p.position));
    all_points.push(view.rear_coupler.position);
    all_points.push(view.forward_coupler.position);

    let pad = 10.0 + PIN_RADIUS;
    let min_x = all_points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min) - pad;
    let min_y = all_points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min) - pad;
    let max_x = all_points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max) + pad;
    let max_y = all_points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max) + pad;

    let mut doc = String::with_capacity(2048);
    let _ = writeln!(
        doc,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{:.2} {:.2} {:.2} {:.2}">"#,
        min_x,
        min_y,
        max_x - min_x,
        max_y - min_y
    );
    let _ = writeln!(doc, "  <title>{} C{}p{:02}</title>", scene.name, view.cycle, view.phase);

    if scene.midline.len() > 1 {
        let _ = writeln!(
            doc,
            r#"  <path d="{}" fill="none" stroke="rgba(0,0,0,0.1)" stroke-width="2" stroke-dasharray="2,2"/>"#,
            path_data(&scene.midline)
        );
    }

    for polygon in [&view.rear_support_box, &view.forward_support_box] {
        if polygon.len() > 2 {
            let _ = writeln!(
                doc,
                r#"  <path d="{} Z" fill="rgba(0,0,0,0.05)" stroke="rgba(0,0,0,0.2)" stroke-width="1"/>"#,
                path_data(polygon)
            );
        }
    }

    for link in &view.linkages {
        let _ = writeln!(doc, "{}", line_element(link.from, link.to));
    }
    let _ = writeln!(doc, "{}", line_element(view.coupling.from, view.coupling.to));

    for coupler in [&view.rear_coupler, &view.forward_coupler, &view.midpoint] {
        let _ = writeln!(
            doc,
            "{}",
            circle_element(coupler.position, &coupler_fill(coupler.activity), "coupler")
        );
    }

    for (pin, color) in view.pins.iter().zip(LIMB_COLORS) {
        let class = match pin.annotation {
            Annotation::Moving => "MOVING",
            Annotation::Fixed => "FIXED",
        };
        let _ = writeln!(doc, "{}", circle_element(pin.position, color, class));
    }

    doc.push_str("</svg>\n");
    doc
}

/// Write the frame snapshot into `dir`, returning the file path.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_snapshot(dir: &Path, view: &FrameView, scene: &SceneView) -> Result<PathBuf> {
    let path = dir.join(snapshot_filename(&scene.name, view.cycle, view.phase));
    let doc = render_document(view, scene);
    fs::write(&path, doc).with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    Ok(path)
}
