//! Screen layout: two bars and the canvas between them, plus the ruler.
//!
//! Computed once per window size instead of being held in widget frames.
//! The canvas is the controller's coordinate space; `to_canvas` converts
//! window positions into it.

use vello::kurbo::{Point, Rect, Size, Vec2};

use crate::tokens::ChromeTokens;

/// Vertical padding subtracted from the canvas before spacing ruler ticks.
const RULER_PADDING: f64 = 6.0;
/// Scale-end bars are this fraction of the canvas width.
const SCALE_END_WIDTH_DIVISOR: f64 = 4.2;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenLayout {
    pub window: Size,
    pub top_bar: Rect,
    pub bottom_bar: Rect,
    pub canvas: Rect,
}

impl ScreenLayout {
    pub fn new(window: Size, chrome: &ChromeTokens) -> Self {
        let w = window.width.max(0.0);
        let h = window.height.max(0.0);
        let top = chrome.top_bar_height.max(0.0).min(h);
        let bottom_height = chrome.bottom_bar_height.max(0.0).min(h - top);
        let bottom = h - bottom_height;

        Self {
            window: Size::new(w, h),
            top_bar: Rect::new(0.0, 0.0, w, top),
            bottom_bar: Rect::new(0.0, bottom, w, h),
            canvas: Rect::new(0.0, top, w, bottom),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas.size()
    }

    /// Window position → canvas-local position.
    pub fn to_canvas(&self, window_pos: Point) -> Point {
        window_pos - self.canvas_offset()
    }

    /// Offset to translate canvas-local drawing into window space.
    pub fn canvas_offset(&self) -> Vec2 {
        self.canvas.origin().to_vec2()
    }

    /// Ruler ticks in canvas-local coordinates, evenly spaced from the top.
    pub fn ruler_ticks(&self, chrome: &ChromeTokens) -> Vec<Rect> {
        let size = self.canvas_size();
        let step = (size.height - RULER_PADDING) / (chrome.ruler_ticks as f64 + 1.0);
        if step <= 0.0 {
            return Vec::new();
        }
        let x = size.width - chrome.tick_width - chrome.ruler_inset;
        (1..=chrome.ruler_ticks)
            .map(|i| {
                let y = step * i as f64;
                Rect::new(x, y, x + chrome.tick_width, y + chrome.tick_height)
            })
            .collect()
    }

    /// The begin/end bars bracketing the ruler at the canvas top and bottom.
    pub fn scale_ends(&self, chrome: &ChromeTokens) -> [Rect; 2] {
        let size = self.canvas_size();
        let width = size.width / SCALE_END_WIDTH_DIVISOR;
        let right = size.width - chrome.ruler_inset;
        let left = right - width;
        [
            Rect::new(left, 0.0, right, chrome.tick_height),
            Rect::new(left, size.height - chrome.tick_height, right, size.height),
        ]
    }
}
