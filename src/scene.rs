//! Scene rendering using vello.
//!
//! Draws the liquid scale screen: canvas, liquid region, ruler, the two
//! percentage labels, and the top/bottom bars. All geometry is in logical
//! pixels; `root` carries the window's scale factor.

use vello::Scene;
use vello::kurbo::{Affine, Circle, Rect, RoundedRect};
use vello::peniko::{Color, Fill};

use crate::layout::ScreenLayout;
use crate::state_machine::scale_sm::{LiquidScale, Phase};
use crate::text::TextRenderer;
use crate::tokens::{PaletteTokens, ScaleTokens};

const LABEL_MARGIN: f64 = 20.0;
const CAPTION_SIZE: f64 = 14.0;
const VALUE_SIZE: f64 = 40.0;
const BAR_TITLE_SIZE: f64 = 16.0;
const TICK_RADIUS: f64 = 2.0;
const MARKER_RADIUS: f64 = 4.0;

const CAPTION_NEED: &str = "POINTS YOU NEED";
const CAPTION_HAVE: &str = "POINTS YOU HAVE";

/// Top-level render function: draws the full screen.
pub fn render_screen(
    scene: &mut Scene,
    root: Affine,
    layout: &ScreenLayout,
    scale: &LiquidScale,
    tokens: &ScaleTokens,
    text: &TextRenderer,
) {
    let palette = &tokens.palette;
    let chrome = &tokens.chrome;
    let canvas_tx = root * Affine::translate(layout.canvas_offset());

    scene.fill(
        Fill::NonZero,
        root,
        PaletteTokens::color(palette.canvas),
        None,
        &layout.canvas,
    );

    let liquid = scale.curve_path().to_bez_path();
    scene.fill(
        Fill::NonZero,
        canvas_tx,
        PaletteTokens::color(palette.liquid),
        None,
        &liquid,
    );

    for tick in layout.ruler_ticks(chrome) {
        fill_rounded(scene, canvas_tx, tick, PaletteTokens::color(palette.ruler));
    }
    for end in layout.scale_ends(chrome) {
        fill_rounded(scene, canvas_tx, end, PaletteTokens::color(palette.scale_ends));
    }

    if scale.phase() == Phase::Dragging {
        let marker = Circle::new(scale.midpoint(), MARKER_RADIUS);
        scene.fill(
            Fill::NonZero,
            canvas_tx,
            PaletteTokens::color(palette.label_top),
            None,
            &marker,
        );
    }

    draw_labels(scene, canvas_tx, layout, scale, tokens, text);
    draw_bars(scene, root, layout, palette, text);
}

fn fill_rounded(scene: &mut Scene, transform: Affine, rect: Rect, color: Color) {
    let shape = RoundedRect::from_rect(rect, TICK_RADIUS);
    scene.fill(Fill::NonZero, transform, color, None, &shape);
}

/// Caption plus value at the top of the canvas, and the mirror pair at the
/// bottom over the liquid.
fn draw_labels(
    scene: &mut Scene,
    canvas_tx: Affine,
    layout: &ScreenLayout,
    scale: &LiquidScale,
    tokens: &ScaleTokens,
    text: &TextRenderer,
) {
    let percent = scale.percent();
    let height = layout.canvas_size().height;
    let top_color = PaletteTokens::color(tokens.palette.label_top);
    let bottom_color = PaletteTokens::color(tokens.palette.label_bottom);

    let caption_y = LABEL_MARGIN + CAPTION_SIZE;
    text.draw(scene, canvas_tx, LABEL_MARGIN, caption_y, CAPTION_NEED, top_color, CAPTION_SIZE);
    text.draw(
        scene,
        canvas_tx,
        LABEL_MARGIN,
        caption_y + VALUE_SIZE + 4.0,
        &format!("{}%", percent.top),
        top_color,
        VALUE_SIZE,
    );

    let value_y = height - LABEL_MARGIN - CAPTION_SIZE - 8.0;
    text.draw(
        scene,
        canvas_tx,
        LABEL_MARGIN,
        value_y,
        &format!("{}%", percent.bottom),
        bottom_color,
        VALUE_SIZE,
    );
    text.draw(
        scene,
        canvas_tx,
        LABEL_MARGIN,
        height - LABEL_MARGIN,
        CAPTION_HAVE,
        bottom_color,
        CAPTION_SIZE,
    );
}

fn draw_bars(
    scene: &mut Scene,
    root: Affine,
    layout: &ScreenLayout,
    palette: &PaletteTokens,
    text: &TextRenderer,
) {
    scene.fill(Fill::NonZero, root, PaletteTokens::color(palette.top_bar), None, &layout.top_bar);
    scene.fill(
        Fill::NonZero,
        root,
        PaletteTokens::color(palette.bottom_bar),
        None,
        &layout.bottom_bar,
    );

    let width = layout.window.width;
    let settings_color = PaletteTokens::color(palette.label_top);
    let light = PaletteTokens::color(palette.label_bottom);

    let settings_w = text.measure("SETTINGS", BAR_TITLE_SIZE);
    text.draw(
        scene,
        root,
        width - LABEL_MARGIN - settings_w,
        layout.top_bar.y1 - 12.0,
        "SETTINGS",
        settings_color,
        BAR_TITLE_SIZE,
    );

    let baseline = layout.bottom_bar.center().y + BAR_TITLE_SIZE / 2.0;
    text.draw(scene, root, LABEL_MARGIN, baseline, "MORE", light, BAR_TITLE_SIZE);
    let stats_w = text.measure("STATS", BAR_TITLE_SIZE);
    text.draw(
        scene,
        root,
        width - LABEL_MARGIN - stats_w,
        baseline,
        "STATS",
        light,
        BAR_TITLE_SIZE,
    );
}
