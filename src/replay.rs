//! Headless replay of scripted gestures.
//!
//! A script is JSON: a canvas size and a list of steps.
//!
//! ```json
//! {
//!   "canvas": { "width": 600, "height": 600 },
//!   "steps": [
//!     { "begin": { "x": 100, "y": 300 } },
//!     { "move": { "dx": 0, "dy": -120, "x": 100, "y": 180 } },
//!     { "end": { "at": 0.0 } },
//!     { "advance": { "from": 0.0, "seconds": 1.0, "fps": 60 } }
//!   ]
//! }
//! ```
//!
//! Each step produces one JSON line describing the controller afterwards.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vello::kurbo::{Point, Size, Vec2};

use crate::curve::PathCommand;
use crate::percent::PercentPair;
use crate::state_machine::scale_sm::{LiquidScale, Phase};
use crate::tokens::ScaleTokens;

/// Upper bound on ticks generated by a single `advance` step.
const MAX_ADVANCE_TICKS: usize = 100_000;

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub canvas: CanvasSpec,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CanvasSpec {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Begin { x: f64, y: f64 },
    Move { dx: f64, dy: f64, x: f64, y: f64 },
    End { at: f64 },
    Tick { at: f64 },
    Advance {
        from: f64,
        seconds: f64,
        #[serde(default = "default_fps")]
        fps: f64,
    },
    Resize { width: f64, height: f64 },
}

fn default_fps() -> f64 {
    60.0
}

#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub step: usize,
    pub phase: Phase,
    pub percent: PercentPair,
    pub left: [f64; 2],
    pub center: [f64; 2],
    pub right: [f64; 2],
    pub midpoint: [f64; 2],
    pub path: Vec<PathOp>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathOp {
    Move { x: f64, y: f64 },
    Quad { cx: f64, cy: f64, x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Close,
}

impl From<&PathCommand> for PathOp {
    fn from(command: &PathCommand) -> Self {
        match *command {
            PathCommand::MoveTo(p) => PathOp::Move { x: p.x, y: p.y },
            PathCommand::QuadTo { control, to } => PathOp::Quad {
                cx: control.x,
                cy: control.y,
                x: to.x,
                y: to.y,
            },
            PathCommand::LineTo(p) => PathOp::Line { x: p.x, y: p.y },
            PathCommand::Close => PathOp::Close,
        }
    }
}

fn xy(p: Point) -> [f64; 2] {
    [p.x, p.y]
}

fn snapshot(step: usize, scale: &LiquidScale) -> Frame {
    let points = scale.points();
    Frame {
        step,
        phase: scale.phase(),
        percent: scale.percent(),
        left: xy(points.left),
        center: xy(points.center),
        right: xy(points.right),
        midpoint: xy(scale.midpoint()),
        path: scale.curve_path().commands.iter().map(PathOp::from).collect(),
    }
}

/// Run every step of `script` and collect a frame after each.
pub fn run(script: &ReplayScript, tokens: &ScaleTokens) -> Vec<Frame> {
    let canvas = Size::new(script.canvas.width, script.canvas.height);
    let mut scale = LiquidScale::new(canvas, tokens);
    let mut frames = Vec::with_capacity(script.steps.len());

    for (i, step) in script.steps.iter().enumerate() {
        match *step {
            Step::Begin { x, y } => scale.drag_begin(Point::new(x, y)),
            Step::Move { dx, dy, x, y } => scale.drag_update(Vec2::new(dx, dy), Point::new(x, y)),
            Step::End { at } => scale.drag_end(at),
            Step::Tick { at } => scale.tick(at),
            Step::Advance { from, seconds, fps } => advance(&mut scale, from, seconds, fps),
            Step::Resize { width, height } => scale.resize(Size::new(width, height)),
        }
        frames.push(snapshot(i, &scale));
    }
    frames
}

fn advance(scale: &mut LiquidScale, from: f64, seconds: f64, fps: f64) {
    if !(fps.is_finite() && fps > 0.0 && seconds.is_finite() && seconds > 0.0) {
        scale.tick(from + seconds.max(0.0));
        return;
    }
    let ticks = ((seconds * fps).ceil() as usize).clamp(1, MAX_ADVANCE_TICKS);
    for k in 1..=ticks {
        let at = from + (k as f64 / fps).min(seconds);
        scale.tick(at);
        if scale.refresh_paused() {
            break;
        }
    }
}

pub fn parse_script(json: &str) -> Result<ReplayScript> {
    serde_json::from_str(json).context("invalid replay script")
}

pub fn write_frames<W: Write>(frames: &[Frame], out: &mut W) -> Result<()> {
    for frame in frames {
        serde_json::to_writer(&mut *out, frame)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Read a script from `path`, run it, and write JSON lines to `out`.
pub fn run_file<W: Write>(path: &Path, tokens: &ScaleTokens, out: &mut W) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading replay script {}", path.display()))?;
    let script = parse_script(&json)?;
    tracing::info!(target: "gesture", steps = script.steps.len(), "replaying script");
    write_frames(&run(&script, tokens), out)
}
