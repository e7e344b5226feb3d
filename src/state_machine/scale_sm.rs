//! Curve controller state machine.
//!
//! Hierarchy:
//! ```text
//! Screen (superstate: Resized, Reconfigure)
//!    ├── Idle      [entry: pause refresh, unlock input]
//!    ├── Dragging  { session }
//!    └── Settling  { animation }  [entry: unpause refresh, lock input]
//! ```
//!
//! Drag input is only accepted from `Idle`. Once released, the spring owns
//! the edge points until it finishes; begins, moves and ends arriving in
//! the meantime are dropped.

use statig::prelude::*;
use tracing::{debug, info, warn};
use vello::kurbo::{Point, Size, Vec2};

use crate::curve::{self, ControlPoints, CurvePath, clamp_axis};
use crate::gesture::{PanEvent, PanPhase};
use crate::percent::{DragDirection, PercentPair};
use crate::spring::Spring;
use crate::tokens::{CenterXMode, GestureTokens, ScaleTokens, SettleTarget};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events dispatched to the curve controller. Times are seconds on a
/// monotonic clock chosen by the host.
#[derive(Debug, Clone)]
pub enum ScaleEvent {
    DragBegan { pointer: Point },
    DragMoved { delta: Vec2, pointer: Point },
    DragEnded { now: f64 },
    Tick { now: f64 },
    Resized { canvas: Size },
    Reconfigure { gesture: GestureTokens, spring: Spring },
}

// ---------------------------------------------------------------------------
// State-local data
// ---------------------------------------------------------------------------

/// Lives exactly as long as one drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub origin: Point,
    pub last_pointer: Point,
    pub last_translation: Vec2,
    pub updates: u32,
}

impl DragSession {
    fn new(origin: Point) -> Self {
        Self {
            origin,
            last_pointer: origin,
            last_translation: Vec2::ZERO,
            updates: 0,
        }
    }
}

/// Edge points springing toward a common y.
#[derive(Debug, Clone, PartialEq)]
pub struct SettleAnimation {
    pub started_at: f64,
    pub from_left: f64,
    pub from_right: f64,
    pub target: f64,
    pub spring: Spring,
}

// ---------------------------------------------------------------------------
// Shared storage
// ---------------------------------------------------------------------------

pub struct CurveController {
    pub canvas: Size,
    pub points: ControlPoints,
    pub midpoint: Point,
    pub percent: PercentPair,
    pub direction: DragDirection,
    pub gesture: GestureTokens,
    pub spring: Spring,
    /// Per-frame refresh driver; only runs while settling.
    pub refresh_paused: bool,
    pub input_locked: bool,
}

impl CurveController {
    pub fn new(canvas: Size, tokens: &ScaleTokens) -> Self {
        let mut controller = Self {
            canvas: Size::ZERO,
            points: ControlPoints::resting(Size::ZERO),
            midpoint: Point::ZERO,
            percent: PercentPair::new(50, 50),
            direction: DragDirection::Up,
            gesture: tokens.gesture.clone(),
            spring: tokens.spring.spring(),
            refresh_paused: true,
            input_locked: false,
        };
        controller.relayout(canvas);
        controller
    }

    fn relayout(&mut self, canvas: Size) {
        self.canvas = sanitize_size(canvas);
        self.points = ControlPoints::resting(self.canvas);
        self.direction = DragDirection::Up;
        self.midpoint = self.points.midpoint();
        if let Some(percent) =
            PercentPair::from_midpoint(self.midpoint.y, self.canvas.height, self.direction)
        {
            self.percent = percent;
        }
    }

    fn apply_drag(&mut self, session: &mut DragSession, delta: Vec2, pointer: Point) {
        session.updates += 1;
        session.last_pointer = pointer;
        session.last_translation = delta;

        if !delta.is_finite() || !pointer.is_finite() {
            warn!(target: "gesture", ?delta, ?pointer, "non-finite drag input dropped");
            return;
        }
        if self.gesture.ignore_outside_canvas && !(0.0..=self.canvas.height).contains(&pointer.y) {
            debug!(target: "gesture", y = pointer.y, "pointer outside canvas, update ignored");
            return;
        }

        let size = self.gesture.control_point_size.max(0.0);
        let max_x = self.canvas.width - size;
        let max_y = self.canvas.height - size;
        let direction = DragDirection::from_delta(delta.y);
        let center = &mut self.points.center;

        center.y = match direction {
            DragDirection::Up => clamp_axis(center.y - delta.y.abs(), max_y),
            DragDirection::Down => clamp_axis(center.y + delta.y.abs(), max_y),
        };
        center.x = match self.gesture.center_x_mode {
            CenterXMode::Delta => clamp_axis(center.x + delta.x, max_x),
            CenterXMode::Pointer => clamp_axis(pointer.x, self.canvas.width),
        };

        debug_assert!(self.points.is_finite());
        self.direction = direction;
        self.midpoint = self.points.midpoint();
        if let Some(percent) =
            PercentPair::from_midpoint(self.midpoint.y, self.canvas.height, direction)
        {
            self.percent = percent;
        }

        debug!(
            target: "gesture",
            center = ?self.points.center,
            midpoint_y = self.midpoint.y,
            top = self.percent.top,
            bottom = self.percent.bottom,
            "drag update"
        );
    }

    fn begin_settle(&self, now: f64) -> SettleAnimation {
        let target = match self.gesture.settle_target {
            SettleTarget::Center => self.points.center.y,
            SettleTarget::Midpoint => self.midpoint.y,
        };
        SettleAnimation {
            started_at: now,
            from_left: self.points.left.y,
            from_right: self.points.right.y,
            target: clamp_axis(target, self.canvas.height),
            spring: self.spring,
        }
    }

    /// Advance the settle animation. Returns `true` once it has finished.
    fn step_settle(&mut self, animation: &SettleAnimation, now: f64) -> bool {
        let elapsed = now - animation.started_at;
        let spring = &animation.spring;
        let height = self.canvas.height;

        if spring.is_finished(elapsed) {
            self.points.left.y = animation.target;
            self.points.right.y = animation.target;
            self.points.center.x = self.canvas.width / 2.0;
            self.midpoint = self.points.midpoint();
            info!(target: "settle", y = animation.target, "settled");
            return true;
        }

        self.points.left.y = clamp_axis(spring.sample(animation.from_left, animation.target, elapsed), height);
        self.points.right.y = clamp_axis(spring.sample(animation.from_right, animation.target, elapsed), height);
        self.midpoint = self.points.midpoint();
        false
    }
}

fn sanitize_size(size: Size) -> Size {
    let dim = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Size::new(dim(size.width), dim(size.height))
}

// ---------------------------------------------------------------------------
// State machine implementation
// ---------------------------------------------------------------------------

#[state_machine(
    initial = "State::idle()",
    state(derive(Debug, Clone, PartialEq))
)]
impl CurveController {
    #[superstate]
    fn screen(&mut self, event: &ScaleEvent) -> Outcome<State> {
        match event {
            ScaleEvent::Resized { canvas } => {
                info!(target: "gesture", width = canvas.width, height = canvas.height, "canvas resized");
                self.relayout(*canvas);
                Transition(State::idle())
            }
            ScaleEvent::Reconfigure { gesture, spring } => {
                self.gesture = gesture.clone();
                self.spring = *spring;
                info!(
                    target: "config",
                    duration = spring.duration(),
                    damping_ratio = spring.damping_ratio(),
                    "controller reconfigured"
                );
                Handled
            }
            _ => Handled,
        }
    }

    /// Resting; waiting for a drag.
    #[state(superstate = "screen", entry_action = "enter_idle")]
    fn idle(&mut self, event: &ScaleEvent) -> Outcome<State> {
        match event {
            ScaleEvent::DragBegan { pointer } => {
                info!(target: "gesture", x = pointer.x, y = pointer.y, "drag began");
                Transition(State::dragging(DragSession::new(*pointer)))
            }
            _ => Super,
        }
    }

    /// The control point follows the pointer.
    #[state(superstate = "screen")]
    fn dragging(&mut self, session: &mut DragSession, event: &ScaleEvent) -> Outcome<State> {
        match event {
            ScaleEvent::DragMoved { delta, pointer } => {
                self.apply_drag(session, *delta, *pointer);
                Handled
            }
            ScaleEvent::DragEnded { now } => {
                let animation = self.begin_settle(*now);
                info!(
                    target: "gesture",
                    updates = session.updates,
                    target_y = animation.target,
                    "drag ended"
                );
                Transition(State::settling(animation))
            }
            ScaleEvent::DragBegan { .. } => Handled,
            _ => Super,
        }
    }

    /// The spring owns the edge points; drag input is locked out.
    #[state(superstate = "screen", entry_action = "enter_settling")]
    fn settling(&mut self, animation: &SettleAnimation, event: &ScaleEvent) -> Outcome<State> {
        match event {
            ScaleEvent::Tick { now } => {
                if self.step_settle(animation, *now) {
                    Transition(State::idle())
                } else {
                    Handled
                }
            }
            ScaleEvent::DragBegan { .. }
            | ScaleEvent::DragMoved { .. }
            | ScaleEvent::DragEnded { .. } => {
                debug!(target: "settle", ?event, "input ignored while settling");
                Handled
            }
            _ => Super,
        }
    }

    #[action]
    fn enter_idle(&mut self) {
        self.refresh_paused = true;
        self.input_locked = false;
    }

    #[action]
    fn enter_settling(&mut self) {
        self.refresh_paused = false;
        self.input_locked = true;
    }
}

// ---------------------------------------------------------------------------
// Host-facing wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Dragging,
    Settling,
}

/// The liquid scale: a curve controller plus the queries a renderer needs.
pub struct LiquidScale {
    machine: StateMachine<CurveController>,
}

impl LiquidScale {
    pub fn new(canvas: Size, tokens: &ScaleTokens) -> Self {
        Self {
            machine: CurveController::new(canvas, tokens).state_machine(),
        }
    }

    fn storage(&self) -> &CurveController {
        &self.machine
    }

    pub fn handle(&mut self, event: &ScaleEvent) {
        self.machine.handle(event);
    }

    pub fn drag_begin(&mut self, pointer: Point) {
        self.handle(&ScaleEvent::DragBegan { pointer });
    }

    pub fn drag_update(&mut self, delta: Vec2, pointer: Point) {
        self.handle(&ScaleEvent::DragMoved { delta, pointer });
    }

    pub fn drag_end(&mut self, now: f64) {
        self.handle(&ScaleEvent::DragEnded { now });
    }

    pub fn tick(&mut self, now: f64) {
        self.handle(&ScaleEvent::Tick { now });
    }

    pub fn resize(&mut self, canvas: Size) {
        self.handle(&ScaleEvent::Resized { canvas });
    }

    pub fn reconfigure(&mut self, tokens: &ScaleTokens) {
        self.handle(&ScaleEvent::Reconfigure {
            gesture: tokens.gesture.clone(),
            spring: tokens.spring.spring(),
        });
    }

    /// Route a recognised pan. The final translation of an `Ended` pan is
    /// applied before the release.
    pub fn handle_pan(&mut self, pan: &PanEvent, now: f64) {
        match pan.phase {
            PanPhase::Began => self.drag_begin(pan.location),
            PanPhase::Changed => self.drag_update(pan.translation, pan.location),
            PanPhase::Ended => {
                self.drag_update(pan.translation, pan.location);
                self.drag_end(now);
            }
        }
    }

    pub fn phase(&self) -> Phase {
        match self.machine.state() {
            State::Idle {} => Phase::Idle,
            State::Dragging { .. } => Phase::Dragging,
            State::Settling { .. } => Phase::Settling,
        }
    }

    pub fn canvas(&self) -> Size {
        self.storage().canvas
    }

    pub fn points(&self) -> ControlPoints {
        self.storage().points
    }

    pub fn midpoint(&self) -> Point {
        self.storage().midpoint
    }

    pub fn percent(&self) -> PercentPair {
        self.storage().percent
    }

    pub fn refresh_paused(&self) -> bool {
        self.storage().refresh_paused
    }

    pub fn accepts_input(&self) -> bool {
        !self.storage().input_locked && self.phase() != Phase::Settling
    }

    pub fn curve_path(&self) -> CurvePath {
        let storage = self.storage();
        curve::compute_curve_path(&storage.points, storage.canvas)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn scale(width: f64, height: f64) -> LiquidScale {
        LiquidScale::new(Size::new(width, height), &ScaleTokens::default())
    }

    fn scale_with(width: f64, height: f64, edit: impl FnOnce(&mut ScaleTokens)) -> LiquidScale {
        let mut tokens = ScaleTokens::default();
        edit(&mut tokens);
        LiquidScale::new(Size::new(width, height), &tokens)
    }

    /// Drag by `delta` in one step, release at `now`, and tick past the end.
    fn drag_and_settle(s: &mut LiquidScale, delta: Vec2, now: f64) {
        let start = Point::new(100.0, s.canvas().height / 2.0);
        s.drag_begin(start);
        s.drag_update(delta, start);
        s.drag_end(now);
        s.tick(now + 10.0);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn resting_scale_reads_fifty_fifty() {
        let s = scale(600.0, 600.0);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.points().left, Point::new(0.0, 300.0));
        assert_eq!(s.points().center, Point::new(0.0, 300.0));
        assert_eq!(s.points().right, Point::new(600.0, 300.0));
        assert!((s.midpoint().y - 300.0).abs() < EPS);
        assert_eq!(s.percent(), PercentPair::new(50, 50));
        assert!(s.refresh_paused());
    }

    #[test]
    fn drag_moves_center_and_updates_percent() {
        let mut s = scale(400.0, 800.0);
        s.drag_begin(Point::new(50.0, 400.0));
        assert_eq!(s.phase(), Phase::Dragging);

        s.drag_update(Vec2::new(30.0, 200.0), Point::new(80.0, 600.0));
        assert_eq!(s.points().center, Point::new(30.0, 600.0));
        // 0.25*400 + 0.5*600 + 0.25*400 = 500 -> 62.5% -> 63
        assert!((s.midpoint().y - 500.0).abs() < EPS);
        assert_eq!(s.percent(), PercentPair::new(63, 37));
    }

    #[test]
    fn center_stays_in_bounds_for_any_drag_sequence() {
        let (w, h) = (360.0, 640.0);
        let mut s = scale(w, h);
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            (seed % 2001) as f64 - 1000.0
        };

        for round in 0..20 {
            s.drag_begin(Point::new(10.0, 10.0));
            for _ in 0..50 {
                let delta = Vec2::new(next() / 3.0, next() / 2.0);
                let pointer = Point::new(next().abs() % w, next().abs() % h);
                s.drag_update(delta, pointer);
                let c = s.points().center;
                assert!((0.0..=h).contains(&c.y), "round {round}: y={}", c.y);
                assert!((0.0..=w).contains(&c.x), "round {round}: x={}", c.x);
                let p = s.percent();
                assert!(p.top <= 100 && p.bottom <= 100);
            }
            s.drag_end(round as f64);
            s.tick(round as f64 + 0.3);
            let pts = s.points();
            assert!((0.0..=h).contains(&pts.left.y));
            assert!((0.0..=h).contains(&pts.right.y));
            s.tick(round as f64 + 1.0);
        }
    }

    #[test]
    fn upward_drag_to_the_top_reads_zero_hundred() {
        let mut s = scale(600.0, 600.0);
        drag_and_settle(&mut s, Vec2::new(0.0, -1000.0), 0.0);
        assert_eq!(s.points().left.y, 0.0);
        assert_eq!(s.points().right.y, 0.0);

        s.drag_begin(Point::new(100.0, 10.0));
        s.drag_update(Vec2::new(0.0, -50.0), Point::new(100.0, 10.0));
        assert_eq!(s.midpoint().y, 0.0);
        assert_eq!(s.percent(), PercentPair::new(0, 100));
    }

    #[test]
    fn downward_drag_to_the_bottom_clamps_both_to_hundred() {
        let mut s = scale(600.0, 600.0);
        drag_and_settle(&mut s, Vec2::new(0.0, 1000.0), 0.0);
        // control point height keeps it one unit above the bottom
        assert_eq!(s.points().left.y, 599.0);

        s.drag_begin(Point::new(100.0, 590.0));
        s.drag_update(Vec2::new(0.0, 40.0), Point::new(100.0, 590.0));
        assert_eq!(s.percent(), PercentPair::new(100, 100));
    }

    #[test]
    fn release_starts_spring_and_unpauses_refresh() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, -200.0), Point::new(10.0, 100.0));
        assert!(s.refresh_paused());

        s.drag_end(1.0);
        assert_eq!(s.phase(), Phase::Settling);
        assert!(!s.refresh_paused());
        assert!(!s.accepts_input());

        s.tick(1.1);
        let mid_left = s.points().left.y;
        assert!(mid_left < 300.0 && mid_left >= 0.0, "left.y mid-spring = {mid_left}");

        s.tick(1.7);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.refresh_paused());
        assert!(s.accepts_input());
        assert_eq!(s.points().left.y, 100.0);
        assert_eq!(s.points().right.y, 100.0);
    }

    #[test]
    fn settle_recenters_control_point() {
        let mut s = scale(500.0, 500.0);
        drag_and_settle(&mut s, Vec2::new(120.0, 10.0), 0.0);
        assert_eq!(s.points().center.x, 250.0);
    }

    #[test]
    fn drag_end_while_settling_is_ignored() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, 150.0), Point::new(10.0, 450.0));
        s.drag_end(0.0);
        s.tick(0.2);
        let before = s.points();

        s.drag_end(0.25);
        s.drag_end(f64::NAN);
        assert_eq!(s.phase(), Phase::Settling);
        assert_eq!(s.points(), before);

        s.tick(0.35);
        assert!(s.points().is_finite());
        s.tick(0.7);
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.points().is_finite());
        assert_eq!(s.points().left.y, 450.0);
    }

    #[test]
    fn drag_begin_while_settling_is_ignored() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, -100.0), Point::new(10.0, 200.0));
        s.drag_end(0.0);

        s.drag_begin(Point::new(10.0, 200.0));
        s.drag_update(Vec2::new(0.0, -100.0), Point::new(10.0, 100.0));
        assert_eq!(s.phase(), Phase::Settling);
        assert_eq!(s.points().center.y, 200.0);
    }

    #[test]
    fn updates_outside_canvas_are_ignored() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(5.0, -40.0), Point::new(10.0, -3.0));
        s.drag_update(Vec2::new(5.0, 40.0), Point::new(10.0, 650.0));
        assert_eq!(s.points().center, Point::new(0.0, 300.0));

        let mut lenient = scale_with(600.0, 600.0, |t| t.gesture.ignore_outside_canvas = false);
        lenient.drag_begin(Point::new(10.0, 300.0));
        lenient.drag_update(Vec2::new(0.0, -40.0), Point::new(10.0, -3.0));
        assert_eq!(lenient.points().center.y, 260.0);
    }

    #[test]
    fn pointer_mode_tracks_pointer_x() {
        let mut s = scale_with(600.0, 600.0, |t| t.gesture.center_x_mode = CenterXMode::Pointer);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(1.0, 0.0), Point::new(420.0, 300.0));
        assert_eq!(s.points().center.x, 420.0);
        s.drag_update(Vec2::new(1.0, 0.0), Point::new(900.0, 300.0));
        assert_eq!(s.points().center.x, 600.0);
    }

    #[test]
    fn midpoint_settle_target() {
        let mut s = scale_with(600.0, 600.0, |t| t.gesture.settle_target = SettleTarget::Midpoint);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, -200.0), Point::new(10.0, 100.0));
        // 0.25*300 + 0.5*100 + 0.25*300
        assert!((s.midpoint().y - 200.0).abs() < EPS);
        s.drag_end(0.0);
        s.tick(1.0);
        assert!((s.points().left.y - 200.0).abs() < EPS);
    }

    #[test]
    fn zero_sized_canvas_does_not_panic() {
        let mut s = scale(0.0, 0.0);
        assert_eq!(s.percent(), PercentPair::new(50, 50));
        s.drag_begin(Point::ZERO);
        s.drag_update(Vec2::new(10.0, -10.0), Point::ZERO);
        s.drag_update(Vec2::new(-10.0, 10.0), Point::ZERO);
        assert_eq!(s.percent(), PercentPair::new(50, 50));
        assert!(s.points().is_finite());
        s.drag_end(0.0);
        s.tick(2.0);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn non_finite_input_is_dropped() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(f64::NAN, f64::INFINITY), Point::new(10.0, 300.0));
        assert_eq!(s.points().center, Point::new(0.0, 300.0));
    }

    #[test]
    fn resize_cancels_settle_and_relayouts() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, 100.0), Point::new(10.0, 400.0));
        s.drag_end(0.0);
        s.tick(0.1);

        s.resize(Size::new(300.0, 800.0));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.refresh_paused());
        assert_eq!(s.points(), ControlPoints::resting(Size::new(300.0, 800.0)));
        assert_eq!(s.percent(), PercentPair::new(50, 50));
    }

    #[test]
    fn resize_to_zero_height_keeps_the_labels() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, -120.0), Point::new(10.0, 180.0));
        assert_eq!(s.percent(), PercentPair::new(40, 60));

        s.resize(Size::new(600.0, 0.0));
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.percent(), PercentPair::new(40, 60));
        assert!(s.points().is_finite());
    }

    #[test]
    fn fresh_drag_after_resize_mid_drag() {
        let mut s = scale(600.0, 600.0);
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, 50.0), Point::new(10.0, 350.0));
        s.resize(Size::new(600.0, 600.0));
        assert_eq!(s.phase(), Phase::Idle);
        assert!(s.accepts_input());

        // The stale pan's remaining events are dropped by the host; a new
        // press starts from the resting layout.
        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(0.0, -60.0), Point::new(10.0, 240.0));
        assert_eq!(s.points().center, Point::new(0.0, 240.0));
        s.drag_end(0.0);
        assert_eq!(s.phase(), Phase::Settling);
    }

    #[test]
    fn reconfigure_takes_effect_on_next_drag() {
        let mut s = scale(600.0, 600.0);
        let mut tokens = ScaleTokens::default();
        tokens.gesture.center_x_mode = CenterXMode::Pointer;
        s.reconfigure(&tokens);

        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::ZERO, Point::new(222.0, 300.0));
        assert_eq!(s.points().center.x, 222.0);
    }

    #[test]
    fn pan_events_drive_the_controller() {
        let mut s = scale(600.0, 600.0);
        let began = PanEvent {
            phase: PanPhase::Began,
            translation: Vec2::ZERO,
            location: Point::new(50.0, 300.0),
        };
        let ended = PanEvent {
            phase: PanPhase::Ended,
            translation: Vec2::new(0.0, -60.0),
            location: Point::new(50.0, 240.0),
        };
        s.handle_pan(&began, 0.0);
        s.handle_pan(&ended, 0.0);
        assert_eq!(s.phase(), Phase::Settling);
        assert_eq!(s.points().center.y, 240.0);
    }

    #[test]
    fn curve_path_follows_state() {
        let mut s = scale(600.0, 600.0);
        let before = s.curve_path();
        assert_eq!(before, s.curve_path());

        s.drag_begin(Point::new(10.0, 300.0));
        s.drag_update(Vec2::new(20.0, 20.0), Point::new(30.0, 320.0));
        let after = s.curve_path();
        assert_ne!(before, after);
        assert_eq!(
            after.commands[1],
            curve::PathCommand::QuadTo {
                control: Point::new(20.0, 320.0),
                to: Point::new(600.0, 300.0),
            }
        );
    }
}
