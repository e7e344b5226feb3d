//! Quadratic curve geometry for the liquid scale.
//!
//! The liquid boundary is a single quadratic Bézier running from the left
//! edge point to the right edge point, with the center point as its control.
//! The filled region is that curve closed through the canvas's bottom-right
//! and bottom-left corners.

use vello::kurbo::{BezPath, Point, Size};

/// Curve parameter at which the midpoint marker is sampled.
pub const MIDPOINT_T: f64 = 0.5;

/// The three control points of the liquid curve, in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoints {
    pub left: Point,
    pub center: Point,
    pub right: Point,
}

impl ControlPoints {
    /// Resting configuration for a canvas: a flat line at half height with
    /// the control point parked on the left edge.
    pub fn resting(canvas: Size) -> Self {
        let mid_y = canvas.height / 2.0;
        Self {
            left: Point::new(0.0, mid_y),
            center: Point::new(0.0, mid_y),
            right: Point::new(canvas.width, mid_y),
        }
    }

    /// Point on the curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> Point {
        quad_point(self.left, self.center, self.right, t)
    }

    /// The midpoint marker, `B(0.5)`.
    pub fn midpoint(&self) -> Point {
        self.point_at(MIDPOINT_T)
    }

    pub fn is_finite(&self) -> bool {
        [self.left, self.center, self.right]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// `(1-t)²·p0 + 2(1-t)t·p1 + t²·p2`
pub fn quad_point(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

/// One drawing command of a [`CurvePath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    QuadTo { control: Point, to: Point },
    LineTo(Point),
    Close,
}

/// Renderer-independent description of the filled liquid region.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurvePath {
    pub commands: Vec<PathCommand>,
}

impl CurvePath {
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => path.move_to(p),
                PathCommand::QuadTo { control, to } => path.quad_to(control, to),
                PathCommand::LineTo(p) => path.line_to(p),
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }
}

/// Build the closed liquid path for `points` on a canvas of `canvas` size.
pub fn compute_curve_path(points: &ControlPoints, canvas: Size) -> CurvePath {
    CurvePath {
        commands: vec![
            PathCommand::MoveTo(points.left),
            PathCommand::QuadTo {
                control: points.center,
                to: points.right,
            },
            PathCommand::LineTo(Point::new(canvas.width, canvas.height)),
            PathCommand::LineTo(Point::new(0.0, canvas.height)),
            PathCommand::Close,
        ],
    }
}

/// Clamp `value` into `[0, max]`, treating a negative `max` as zero.
///
/// `f64::clamp` panics when `min > max`, which a zero-sized canvas with a
/// non-zero control point size would otherwise trigger.
pub fn clamp_axis(value: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.max(0.0).min(max.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vello::kurbo::PathEl;

    const EPS: f64 = 1e-9;

    fn approx(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS
    }

    #[test]
    fn midpoint_of_flat_line() {
        let points = ControlPoints {
            left: Point::new(0.0, 300.0),
            center: Point::new(0.0, 300.0),
            right: Point::new(600.0, 300.0),
        };
        // x: 0.25*0 + 0.5*0 + 0.25*600
        assert!(approx(points.midpoint(), Point::new(150.0, 300.0)));
    }

    #[test]
    fn midpoint_weights_control_by_half() {
        let points = ControlPoints {
            left: Point::new(0.0, 100.0),
            center: Point::new(300.0, 500.0),
            right: Point::new(600.0, 100.0),
        };
        assert!(approx(points.midpoint(), Point::new(300.0, 300.0)));
    }

    #[test]
    fn quad_point_hits_endpoints() {
        let p0 = Point::new(1.0, 2.0);
        let p1 = Point::new(5.0, 9.0);
        let p2 = Point::new(7.0, 3.0);
        assert!(approx(quad_point(p0, p1, p2, 0.0), p0));
        assert!(approx(quad_point(p0, p1, p2, 1.0), p2));
    }

    #[test]
    fn path_shape_for_any_configuration() {
        let canvas = Size::new(400.0, 700.0);
        let configs = [
            ControlPoints::resting(canvas),
            ControlPoints {
                left: Point::new(0.0, 10.0),
                center: Point::new(399.0, 699.0),
                right: Point::new(400.0, 0.0),
            },
        ];
        for points in configs {
            let path = compute_curve_path(&points, canvas);
            assert_eq!(
                path.commands,
                vec![
                    PathCommand::MoveTo(points.left),
                    PathCommand::QuadTo {
                        control: points.center,
                        to: points.right
                    },
                    PathCommand::LineTo(Point::new(400.0, 700.0)),
                    PathCommand::LineTo(Point::new(0.0, 700.0)),
                    PathCommand::Close,
                ]
            );
        }
    }

    #[test]
    fn path_is_idempotent() {
        let canvas = Size::new(320.0, 480.0);
        let points = ControlPoints {
            left: Point::new(0.0, 120.0),
            center: Point::new(88.5, 301.25),
            right: Point::new(320.0, 200.0),
        };
        assert_eq!(
            compute_curve_path(&points, canvas),
            compute_curve_path(&points, canvas)
        );
    }

    #[test]
    fn bez_path_mirrors_commands() {
        let canvas = Size::new(100.0, 100.0);
        let path = compute_curve_path(&ControlPoints::resting(canvas), canvas).to_bez_path();
        let els: Vec<PathEl> = path.elements().to_vec();
        assert_eq!(els.len(), 5);
        assert!(matches!(els[0], PathEl::MoveTo(_)));
        assert!(matches!(els[1], PathEl::QuadTo(_, _)));
        assert!(matches!(els[4], PathEl::ClosePath));
    }

    #[test]
    fn clamp_axis_handles_degenerate_bounds() {
        assert_eq!(clamp_axis(5.0, -1.0), 0.0);
        assert_eq!(clamp_axis(-3.0, 10.0), 0.0);
        assert_eq!(clamp_axis(12.0, 10.0), 10.0);
        assert_eq!(clamp_axis(f64::NAN, 10.0), 0.0);
    }
}
