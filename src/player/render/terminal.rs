//! Terminal rendering sink.
//!
//! Draws the trial onto a character canvas: the dashed midline, support
//! polygons, coupling linkages, the four limb pins in their trial colors
//! and the couplers tinted by measurement uncertainty. Below the canvas
//! sit the progress bar, the static duty-cycle timeline, the marker
//! status boxes and a controls hint bar. Output is hand-built ANSI
//! written to stdout in full rows to minimize syscalls.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;

use super::geometry::{FrameView, RenderPoint, SceneView};
use super::status::StatusReport;
use super::{svg, RenderSink};
use crate::trial::{Annotation, TrialDataset};

/// Truecolor per limb slot, matching the report colors
/// (DodgerBlue, DarkOrange, DarkOliveGreen, DarkOrchid).
const LIMB_RGB: [(u8, u8, u8); 4] = [(30, 144, 255), (255, 140, 0), (85, 107, 47), (153, 50, 204)];

/// Neutral and alert endpoints of the coupler activity gradient.
const NEUTRAL_RGB: (u8, u8, u8) = (100, 100, 100);
const ALERT_RGB: (u8, u8, u8) = (220, 50, 47);

const RESET: &str = "\x1b[0m";
const DARK_GREY: &str = "\x1b[90m";
const WHITE: &str = "\x1b[97m";
const CYAN: &str = "\x1b[36m";

/// Rows of chrome below the canvas: progress, 4 timeline rows,
/// 4 status rows, controls bar.
const CHROME_ROWS: u16 = 10;
/// Title bar above the canvas.
const HEADER_ROWS: u16 = 1;

fn fg(rgb: (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m", rgb.0, rgb.1, rgb.2)
}

/// Lerp the neutral-to-alert gradient by an activity scalar.
fn activity_rgb(activity: f64) -> (u8, u8, u8) {
    let t = activity.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (f64::from(a) + t * (f64::from(b) - f64::from(a))).round() as u8;
    (
        lerp(NEUTRAL_RGB.0, ALERT_RGB.0),
        lerp(NEUTRAL_RGB.1, ALERT_RGB.1),
        lerp(NEUTRAL_RGB.2, ALERT_RGB.2),
    )
}

/// Render-space bounding box of everything the trial will ever draw.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Scan the whole dataset once so the camera never moves mid-trial.
    fn of_dataset(dataset: &TrialDataset) -> Self {
        let scale = dataset.scale;
        let mut bounds = Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };

        let mut take = |x: f64, y: f64| {
            let (px, py) = (scale * x, -scale * y);
            bounds.min_x = bounds.min_x.min(px);
            bounds.min_y = bounds.min_y.min(py);
            bounds.max_x = bounds.max_x.max(px);
            bounds.max_y = bounds.max_y.max(py);
        };

        for frame in &dataset.frames {
            for sample in &frame.positions {
                take(sample.x.raw, sample.y.raw);
            }
            for point in [&frame.rear_coupler, &frame.forward_coupler, &frame.midpoint] {
                take(point.x.raw, point.y.raw);
            }
            for corner in frame
                .rear_support_box
                .iter()
                .chain(frame.forward_support_box.iter())
            {
                take(corner.x.raw, corner.y.raw);
            }
        }
        bounds
    }

    /// Map a render point onto canvas cell coordinates.
    fn to_cell(&self, point: RenderPoint, cols: usize, rows: usize) -> (usize, usize) {
        let span_x = self.max_x - self.min_x;
        let span_y = self.max_y - self.min_y;

        let col = if span_x > 0.0 {
            ((point.x - self.min_x) / span_x * (cols - 1) as f64).round() as usize
        } else {
            cols / 2
        };
        let row = if span_y > 0.0 {
            ((point.y - self.min_y) / span_y * (rows - 1) as f64).round() as usize
        } else {
            rows / 2
        };
        (col.min(cols - 1), row.min(rows - 1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    color: Option<(u8, u8, u8)>,
}

const EMPTY_CELL: Cell = Cell {
    ch: ' ',
    color: None,
};

/// A plain character grid the frame geometry is plotted onto.
struct Canvas {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![EMPTY_CELL; cols * rows],
        }
    }

    fn set(&mut self, col: usize, row: usize, ch: char, color: Option<(u8, u8, u8)>) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = Cell { ch, color };
        }
    }

    /// Plot a straight segment between two cells (Bresenham).
    fn line(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
        ch: char,
        color: Option<(u8, u8, u8)>,
    ) {
        let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
        let (x1, y1) = (to.0 as isize, to.1 as isize);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x0 as usize, y0 as usize, ch, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Render one canvas row as an ANSI string.
    fn row_string(&self, row: usize) -> String {
        let mut out = String::with_capacity(self.cols * 4);
        let mut current: Option<(u8, u8, u8)> = None;

        for col in 0..self.cols {
            let cell = self.cells[row * self.cols + col];
            if cell.color != current {
                out.push_str(RESET);
                if let Some(rgb) = cell.color {
                    out.push_str(&fg(rgb));
                }
                current = cell.color;
            }
            out.push(cell.ch);
        }
        out.push_str(RESET);
        out
    }
}

/// Build the progress bar row: bar, percent, cycle and phase readouts.
fn progress_row(width: usize, view: &FrameView) -> String {
    let label = format!(
        " {:>3.0}%  C{} {:02}% ",
        view.progress, view.cycle, view.phase
    );
    let bar_width = width.saturating_sub(label.len() + 2).max(4);
    let filled = (bar_width as f64 * view.progress / 100.0).round() as usize;

    let mut out = String::with_capacity(width * 4);
    out.push(' ');
    out.push_str("\x1b[32m");
    for i in 0..bar_width {
        if i < filled {
            out.push('━');
        } else if i == filled {
            out.push_str(WHITE);
            out.push('⏺');
            out.push_str(DARK_GREY);
        } else {
            out.push('─');
        }
    }
    out.push_str(WHITE);
    out.push_str(&label);
    out.push_str(RESET);
    out
}

/// Build one duty-cycle timeline row for a limb.
fn timeline_row(width: usize, label: &str, segments: &[(f64, Annotation)], rgb: (u8, u8, u8)) -> String {
    let bar_width = width.saturating_sub(14).max(4);
    let mut out = String::with_capacity(width * 4);
    out.push_str(DARK_GREY);
    out.push_str(&format!(" {:<12}", label));

    let mut drawn = 0usize;
    for (pct, annotation) in segments {
        let cells = ((pct / 100.0) * bar_width as f64).round() as usize;
        let cells = cells.min(bar_width - drawn.min(bar_width));
        match annotation {
            Annotation::Moving => out.push_str(&fg(rgb)),
            Annotation::Fixed => out.push_str(DARK_GREY),
        }
        for _ in 0..cells {
            out.push('█');
        }
        drawn += cells;
    }
    out.push_str(DARK_GREY);
    for _ in drawn..bar_width {
        out.push('░');
    }
    out.push_str(RESET);
    out
}

/// Build one marker status row.
fn status_row(status: &super::MarkerStatus) -> String {
    format!(
        " {}{:<12}{}x: {:<14} y: {:<14} {}{}{}",
        CYAN, status.marker_id, WHITE, status.x, status.y, DARK_GREY, status.mode, RESET
    )
}

/// The stdout-backed render sink used by the interactive player.
pub struct TerminalSink {
    term_cols: u16,
    term_rows: u16,
    bounds: Bounds,
    detached: bool,
    scene: Option<SceneView>,
    snapshot_dir: PathBuf,
}

impl TerminalSink {
    /// Create a sink sized to the current terminal.
    ///
    /// # Errors
    /// Fails when the terminal size cannot be queried.
    pub fn new(dataset: &TrialDataset, snapshot_dir: PathBuf) -> Result<Self> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok(Self::with_dimensions(dataset, snapshot_dir, cols, rows))
    }

    /// Create a sink with explicit terminal dimensions.
    pub fn with_dimensions(
        dataset: &TrialDataset,
        snapshot_dir: PathBuf,
        term_cols: u16,
        term_rows: u16,
    ) -> Self {
        Self {
            term_cols: term_cols.max(40),
            term_rows: term_rows.max(HEADER_ROWS + CHROME_ROWS + 4),
            bounds: Bounds::of_dataset(dataset),
            detached: false,
            scene: None,
            snapshot_dir,
        }
    }

    fn canvas_rows(&self) -> usize {
        (self.term_rows - HEADER_ROWS - CHROME_ROWS) as usize
    }

    fn canvas_cols(&self) -> usize {
        self.term_cols as usize
    }

    /// Plot the frame geometry onto a fresh canvas.
    fn compose_canvas(&self, view: &FrameView) -> Canvas {
        let (cols, rows) = (self.canvas_cols(), self.canvas_rows());
        let mut canvas = Canvas::new(cols, rows);
        let cell = |p: RenderPoint| self.bounds.to_cell(p, cols, rows);

        if let Some(scene) = &self.scene {
            for point in &scene.midline {
                let (c, r) = cell(*point);
                canvas.set(c, r, '·', Some((60, 60, 60)));
            }
        }

        for polygon in [&view.rear_support_box, &view.forward_support_box] {
            if polygon.len() > 1 {
                for pair in polygon.windows(2) {
                    canvas.line(cell(pair[0]), cell(pair[1]), '░', Some((70, 70, 70)));
                }
                canvas.line(
                    cell(polygon[polygon.len() - 1]),
                    cell(polygon[0]),
                    '░',
                    Some((70, 70, 70)),
                );
            }
        }

        for link in &view.linkages {
            canvas.line(cell(link.from), cell(link.to), '∙', Some((130, 130, 130)));
        }
        canvas.line(
            cell(view.coupling.from),
            cell(view.coupling.to),
            '∙',
            Some((130, 130, 130)),
        );

        for coupler in [&view.rear_coupler, &view.forward_coupler, &view.midpoint] {
            let (c, r) = cell(coupler.position);
            canvas.set(c, r, '◆', Some(activity_rgb(coupler.activity)));
        }

        for (pin, rgb) in view.pins.iter().zip(LIMB_RGB) {
            let (c, r) = cell(pin.position);
            canvas.set(c, r, '●', Some(rgb));
        }

        canvas
    }

    fn header_row(&self, view: &FrameView) -> String {
        let name = self
            .scene
            .as_ref()
            .map(|s| s.name.as_str())
            .unwrap_or("trial");
        let state = if view.paused { "⏸" } else { "▶" };
        format!(
            " {}{}{} {}  {}frame {}{}",
            WHITE, state, RESET, name, DARK_GREY, view.frame_index, RESET
        )
    }

    fn controls_row(&self) -> String {
        format!(
            "{} space:play/pause  [ ]:half-cycle  < >:10%  , .:frame  s:snapshot  d:detach  q:quit{}",
            DARK_GREY, RESET
        )
    }

    /// Rows (0-based) of the four status boxes.
    fn status_first_row(&self) -> u16 {
        self.term_rows - 5
    }
}

impl RenderSink for TerminalSink {
    fn init_scene(&mut self, scene: &SceneView) -> Result<()> {
        self.scene = Some(scene.clone());
        Ok(())
    }

    fn update_status(&mut self, status: &StatusReport) -> Result<()> {
        if self.detached {
            return Ok(());
        }

        let mut out = String::with_capacity(512);
        for (i, marker) in status.markers.iter().enumerate() {
            out.push_str(&format!(
                "\x1b[{};1H\x1b[2K",
                self.status_first_row() + i as u16 + 1
            ));
            out.push_str(&status_row(marker));
        }

        let mut stdout = io::stdout();
        write!(stdout, "{}", out)?;
        stdout.flush()?;
        Ok(())
    }

    fn paint(&mut self, view: &FrameView) -> Result<()> {
        let width = self.term_cols as usize;
        let canvas = self.compose_canvas(view);

        let mut out = String::with_capacity(width * self.term_rows as usize * 2);
        out.push_str("\x1b[H");

        out.push_str(&self.header_row(view));
        out.push_str("\x1b[K\r\n");

        for row in 0..canvas.rows {
            out.push_str(&canvas.row_string(row));
            out.push_str("\x1b[K\r\n");
        }

        out.push_str(&progress_row(width, view));
        out.push_str("\x1b[K\r\n");

        let empty_timeline: Vec<super::geometry::TimelineRow> = Vec::new();
        let rows = self
            .scene
            .as_ref()
            .map(|s| &s.timeline)
            .unwrap_or(&empty_timeline);
        for slot in 0..4 {
            if let Some(row) = rows.get(slot) {
                let rgb = LIMB_RGB[slot.min(LIMB_RGB.len() - 1)];
                out.push_str(&timeline_row(width, &row.marker_id, &row.segments, rgb));
            }
            out.push_str("\x1b[K\r\n");
        }

        // Status rows are owned by update_status; skip past them.
        out.push_str(&format!("\x1b[{};1H", self.term_rows));
        out.push_str(&self.controls_row());
        out.push_str("\x1b[K");

        let mut stdout = io::stdout();
        write!(stdout, "{}", out)?;
        stdout.flush()?;
        Ok(())
    }

    fn export_snapshot(&mut self, view: &FrameView, scene: &SceneView) -> Result<PathBuf> {
        svg::write_snapshot(&self.snapshot_dir, view, scene)
    }

    fn toggle_detached(&mut self) {
        self.detached = !self.detached;
    }
}
