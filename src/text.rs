//! Label text: a system font through skrifa, or 5×7 block glyphs when no
//! font is installed.

use vello::kurbo::{Affine, Rect};
use vello::peniko::{Color, Fill, FontData};
use vello::{Glyph, Scene};

/// Advance and height of a bitmap glyph cell at 14 px.
const CHAR_W: f64 = 7.0;
const CHAR_H: f64 = 12.0;
const CHAR_GAP: f64 = 1.0;

pub struct TextRenderer {
    font: Option<FontData>,
}

impl TextRenderer {
    /// Font stack: Helvetica > Arial > DejaVu Sans > Liberation Sans.
    pub fn load() -> Self {
        load_system_font(&["Helvetica", "Arial", "DejaVuSans", "LiberationSans-Regular"])
            .map(|font| Self { font: Some(font) })
            .unwrap_or_else(Self::bitmap_only)
    }

    pub fn bitmap_only() -> Self {
        Self { font: None }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Width of `text` at `size` px.
    pub fn measure(&self, text: &str, size: f64) -> f64 {
        match &self.font {
            Some(font) => layout_line(font, text, size as f32, 0.0, 0.0)
                .map(|(_, width)| width)
                .unwrap_or_else(|| bitmap_width(text, size)),
            None => bitmap_width(text, size),
        }
    }

    /// Draw `text` with its baseline starting at `(x, y)`.
    pub fn draw(
        &self,
        scene: &mut Scene,
        transform: Affine,
        x: f64,
        y: f64,
        text: &str,
        color: Color,
        size: f64,
    ) {
        if let Some(font) = &self.font {
            if let Some((glyphs, _)) = layout_line(font, text, size as f32, x, y) {
                scene
                    .draw_glyphs(font)
                    .transform(transform)
                    .font_size(size as f32)
                    .brush(&color)
                    .draw(Fill::NonZero, glyphs.into_iter());
                return;
            }
        }
        draw_bitmap_text(scene, transform, x, y, text, color, size);
    }
}

/// Lay out one line of glyphs; returns the glyphs and the advance width.
fn layout_line(
    font: &FontData,
    text: &str,
    font_size: f32,
    x: f64,
    y: f64,
) -> Option<(Vec<Glyph>, f64)> {
    use skrifa::MetadataProvider;

    let font_ref = skrifa::FontRef::from_index(font.data.as_ref(), font.index).ok()?;
    let charmap = font_ref.charmap();
    let metrics = font_ref.glyph_metrics(
        skrifa::instance::Size::new(font_size),
        skrifa::instance::LocationRef::default(),
    );

    let mut glyphs = Vec::with_capacity(text.len());
    let mut pen = x;
    for ch in text.chars() {
        let gid = charmap.map(ch).unwrap_or_default();
        glyphs.push(Glyph {
            id: gid.to_u32(),
            x: pen as f32,
            y: y as f32,
        });
        pen += metrics.advance_width(gid).unwrap_or(font_size * 0.5) as f64;
    }
    Some((glyphs, pen - x))
}

fn load_system_font(font_names: &[&str]) -> Option<FontData> {
    let dirs = [
        "/System/Library/Fonts/",
        "/System/Library/Fonts/Supplemental/",
        "/Library/Fonts/",
        "/usr/share/fonts/truetype/dejavu/",
        "/usr/share/fonts/truetype/liberation/",
        "/usr/share/fonts/truetype/",
        "/usr/share/fonts/TTF/",
    ];
    let extensions = ["ttf", "otf", "ttc"];

    for name in font_names {
        for dir in &dirs {
            for ext in &extensions {
                let path = format!("{dir}{name}.{ext}");
                if let Ok(data) = std::fs::read(&path) {
                    tracing::info!(target: "render", %path, "loaded label font");
                    return Some(FontData::new(data.into(), 0));
                }
            }
        }
    }
    None
}

// --- Bitmap fallback ---

fn bitmap_width(text: &str, size: f64) -> f64 {
    let scale = size / 14.0;
    text.chars().count() as f64 * (CHAR_W + CHAR_GAP) * scale
}

fn draw_bitmap_text(
    scene: &mut Scene,
    transform: Affine,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
) {
    let scale = size / 14.0;
    let cw = CHAR_W * scale;
    let ch = CHAR_H * scale;
    let px_w = cw / 5.0;
    let px_h = ch / 7.0;

    for (i, c) in text.chars().enumerate() {
        if c == ' ' {
            continue;
        }
        let cx = x + i as f64 * (CHAR_W + CHAR_GAP) * scale;
        let top = y - ch;
        for (row, bits) in glyph_bitmap(c).iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 1 {
                    let px = cx + col as f64 * px_w;
                    let py = top + row as f64 * px_h;
                    let rect = Rect::new(px, py, px + px_w, py + px_h);
                    scene.fill(Fill::NonZero, transform, color, None, &rect);
                }
            }
        }
    }
}

/// 5×7 glyphs for the characters the screen shows; other characters draw
/// as an outlined box.
fn glyph_bitmap(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}
