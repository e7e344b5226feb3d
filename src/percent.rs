//! Percentage labels derived from the curve's midpoint.
//!
//! `p = round(midpoint.y / canvas_height * 100)` feeds both labels. At
//! `p == 100` both labels read 100; at `p == 0` they read 0 / 100. That
//! asymmetry is kept on purpose so the labels match the shipped screen.

use serde::{Deserialize, Serialize};

/// Vertical direction of the most recent drag step.
///
/// A zero vertical delta counts as upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragDirection {
    Up,
    Down,
}

impl DragDirection {
    pub fn from_delta(dy: f64) -> Self {
        if dy <= 0.0 { Self::Up } else { Self::Down }
    }
}

/// `(top, bottom)` label values, each within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PercentPair {
    pub top: u8,
    pub bottom: u8,
}

impl PercentPair {
    pub const fn new(top: u8, bottom: u8) -> Self {
        Self { top, bottom }
    }

    /// Derive the label pair for a midpoint at `midpoint_y` on a canvas of
    /// `canvas_height`. Returns `None` when the height is zero or the ratio
    /// is not finite, in which case the caller keeps its previous pair.
    pub fn from_midpoint(
        midpoint_y: f64,
        canvas_height: f64,
        direction: DragDirection,
    ) -> Option<Self> {
        if canvas_height <= 0.0 {
            return None;
        }
        let ratio = midpoint_y / canvas_height;
        if !ratio.is_finite() {
            return None;
        }
        let p = (ratio * 100.0).round() as i64;

        let (top, bottom) = match direction {
            DragDirection::Down => {
                if p == 100 {
                    (100, 100)
                } else {
                    (p, 100 - p)
                }
            }
            DragDirection::Up => {
                let bottom = if p == 100 { 100 } else { (100 - p).abs() };
                (p.abs(), bottom)
            }
        };

        Some(Self {
            top: clamp_percent(top),
            bottom: clamp_percent(bottom),
        })
    }
}

fn clamp_percent(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_height_is_fifty_fifty() {
        for dir in [DragDirection::Up, DragDirection::Down] {
            assert_eq!(
                PercentPair::from_midpoint(300.0, 600.0, dir),
                Some(PercentPair::new(50, 50))
            );
        }
    }

    #[test]
    fn interior_values_sum_to_hundred() {
        let height = 733.0;
        let mut y = 0.5;
        while y < height {
            for dir in [DragDirection::Up, DragDirection::Down] {
                let pair = PercentPair::from_midpoint(y, height, dir).unwrap();
                let p = (y / height * 100.0).round();
                if p < 100.0 {
                    assert_eq!(
                        pair.top as u16 + pair.bottom as u16,
                        100,
                        "y={y} dir={dir:?} pair={pair:?}"
                    );
                }
            }
            y += 3.7;
        }
    }

    #[test]
    fn bottom_edge_clamps_both_to_hundred() {
        for dir in [DragDirection::Up, DragDirection::Down] {
            assert_eq!(
                PercentPair::from_midpoint(600.0, 600.0, dir),
                Some(PercentPair::new(100, 100))
            );
        }
    }

    #[test]
    fn top_edge_does_not_clamp_symmetrically() {
        assert_eq!(
            PercentPair::from_midpoint(0.0, 600.0, DragDirection::Up),
            Some(PercentPair::new(0, 100))
        );
        assert_eq!(
            PercentPair::from_midpoint(0.0, 600.0, DragDirection::Down),
            Some(PercentPair::new(0, 100))
        );
    }

    #[test]
    fn zero_height_is_skipped() {
        assert_eq!(PercentPair::from_midpoint(10.0, 0.0, DragDirection::Up), None);
        assert_eq!(PercentPair::from_midpoint(f64::NAN, 10.0, DragDirection::Up), None);
    }

    #[test]
    fn values_stay_in_range_past_the_canvas() {
        let pair = PercentPair::from_midpoint(900.0, 600.0, DragDirection::Down).unwrap();
        assert!(pair.top <= 100 && pair.bottom <= 100);
    }

    #[test]
    fn zero_delta_counts_as_up() {
        assert_eq!(DragDirection::from_delta(0.0), DragDirection::Up);
        assert_eq!(DragDirection::from_delta(-2.0), DragDirection::Up);
        assert_eq!(DragDirection::from_delta(0.1), DragDirection::Down);
    }
}
