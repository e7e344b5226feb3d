//! Scale tokens: every tunable of the liquid scale in one struct.
//!
//! Colours, chrome sizes, gesture behaviour and the settle spring are
//! gathered into `ScaleTokens`, which round-trips through TOML and is
//! threaded through the controller and the renderer. Missing keys fall back
//! to the compiled defaults, so a partial `scale.toml` is always valid.

use serde::{Deserialize, Serialize};
use vello::peniko::Color;

use crate::spring::Spring;

// ---------------------------------------------------------------------------
// ScaleTokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleTokens {
    pub palette: PaletteTokens,
    pub chrome: ChromeTokens,
    pub gesture: GestureTokens,
    pub spring: SpringTokens,
}

// --- Sub-structs ---

/// RGBA colours, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteTokens {
    pub canvas: [f32; 4],
    pub liquid: [f32; 4],
    pub top_bar: [f32; 4],
    pub bottom_bar: [f32; 4],
    pub ruler: [f32; 4],
    pub scale_ends: [f32; 4],
    pub label_top: [f32; 4],
    pub label_bottom: [f32; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChromeTokens {
    pub top_bar_height: f64,
    pub bottom_bar_height: f64,
    pub ruler_inset: f64,
    pub ruler_ticks: usize,
    pub tick_width: f64,
    pub tick_height: f64,
}

/// How the control point's x follows the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenterXMode {
    /// Add the horizontal delta, clamped to the canvas.
    Delta,
    /// Jump to the pointer's x.
    Pointer,
}

/// Which y the edge points settle to after release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleTarget {
    Center,
    Midpoint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureTokens {
    pub control_point_size: f64,
    pub center_x_mode: CenterXMode,
    pub settle_target: SettleTarget,
    pub ignore_outside_canvas: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringTokens {
    pub duration: f64,
    pub damping_ratio: f64,
    pub settle_epsilon: f64,
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

impl Default for ScaleTokens {
    fn default() -> Self {
        Self {
            palette: PaletteTokens::default(),
            chrome: ChromeTokens::default(),
            gesture: GestureTokens::default(),
            spring: SpringTokens::default(),
        }
    }
}

impl Default for PaletteTokens {
    fn default() -> Self {
        Self {
            canvas: [1.0, 1.0, 1.0, 1.0],
            liquid: [1.0, 0.0, 0.0, 1.0],
            top_bar: [1.0, 1.0, 1.0, 1.0],
            bottom_bar: [57.0 / 255.0, 74.0 / 255.0, 124.0 / 255.0, 1.0],
            ruler: [0.0, 1.0, 1.0, 1.0],
            scale_ends: [0.0, 1.0, 1.0, 0.5],
            label_top: [0.0, 0.0, 1.0, 0.7],
            label_bottom: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl Default for ChromeTokens {
    fn default() -> Self {
        Self {
            top_bar_height: 80.0,
            bottom_bar_height: 80.0,
            ruler_inset: 20.0,
            ruler_ticks: 12,
            tick_width: 50.0,
            tick_height: 3.0,
        }
    }
}

impl Default for GestureTokens {
    fn default() -> Self {
        Self {
            control_point_size: 1.0,
            center_x_mode: CenterXMode::Delta,
            settle_target: SettleTarget::Center,
            ignore_outside_canvas: true,
        }
    }
}

impl Default for SpringTokens {
    fn default() -> Self {
        Self {
            duration: 0.7,
            damping_ratio: 0.2,
            settle_epsilon: 0.001,
        }
    }
}

// ---------------------------------------------------------------------------
// Helper methods
// ---------------------------------------------------------------------------

impl PaletteTokens {
    pub fn color(rgba: [f32; 4]) -> Color {
        Color::new(rgba)
    }
}

impl SpringTokens {
    pub fn spring(&self) -> Spring {
        Spring::new(self.duration, self.damping_ratio, self.settle_epsilon)
    }
}

impl ScaleTokens {
    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Deserialize from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_stock_screen() {
        let t = ScaleTokens::default();

        assert!((t.chrome.top_bar_height - 80.0).abs() < f64::EPSILON);
        assert!((t.chrome.bottom_bar_height - 80.0).abs() < f64::EPSILON);
        assert_eq!(t.chrome.ruler_ticks, 12);

        assert!((t.gesture.control_point_size - 1.0).abs() < f64::EPSILON);
        assert_eq!(t.gesture.center_x_mode, CenterXMode::Delta);
        assert_eq!(t.gesture.settle_target, SettleTarget::Center);
        assert!(t.gesture.ignore_outside_canvas);

        assert!((t.spring.duration - 0.7).abs() < f64::EPSILON);
        assert!((t.spring.damping_ratio - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn toml_roundtrip() {
        let defaults = ScaleTokens::default();
        let parsed = ScaleTokens::from_toml(&defaults.to_toml()).expect("roundtrip parse failed");
        assert_eq!(parsed, defaults);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let partial = r#"
[gesture]
center_x_mode = "pointer"
settle_target = "midpoint"

[spring]
damping_ratio = 0.27
"#;
        let tokens = ScaleTokens::from_toml(partial).expect("partial parse failed");
        assert_eq!(tokens.gesture.center_x_mode, CenterXMode::Pointer);
        assert_eq!(tokens.gesture.settle_target, SettleTarget::Midpoint);
        assert!((tokens.spring.damping_ratio - 0.27).abs() < f64::EPSILON);
        // Untouched values
        assert!((tokens.spring.duration - 0.7).abs() < f64::EPSILON);
        assert!(tokens.gesture.ignore_outside_canvas);
        assert_eq!(tokens.palette, PaletteTokens::default());
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let bad = "[gesture]\ncenter_x_mode = \"sideways\"\n";
        assert!(ScaleTokens::from_toml(bad).is_err());
    }

    #[test]
    fn invalid_toml() {
        assert!(ScaleTokens::from_toml("this is not [[ valid toml").is_err());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scale.toml");
        std::fs::write(&path, "[chrome]\ntop_bar_height = 64.0\n").unwrap();

        let tokens = ScaleTokens::load(&path).unwrap();
        assert!((tokens.chrome.top_bar_height - 64.0).abs() < f64::EPSILON);
    }

    #[test]
    fn load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = ScaleTokens::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
