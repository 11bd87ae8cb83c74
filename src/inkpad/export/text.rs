//! Glyph layout for the text layer of an exported page.

use crate::error::{InkpadError, Result};
use crate::surface::rich_text::TextRun;
use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, GREEK_FONTS, LATIN_FONTS};
use image::{Pixel, Rgba, RgbaImage};
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_FONT_PX: f32 = 16.0;

enum Glyph {
    Outline { id: GlyphId, advance: f32 },
    Bitmap([u8; 8]),
    Missing,
}

/// Lays text runs out top-down from the top-left margin, wrapping at the
/// right margin and on line breaks.
///
/// Glyphs come from the loaded font when it has them and from the built-in
/// 8x8 bitmap set otherwise. A character neither knows is drawn as an empty
/// box, so typed text never disappears from an export. Text past the bottom
/// edge is clipped.
#[derive(Clone)]
pub struct TextPainter {
    font: Option<Arc<FontVec>>,
    px: f32,
}

impl fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextPainter")
            .field("font_loaded", &self.font.is_some())
            .field("px", &self.px)
            .finish()
    }
}

impl Default for TextPainter {
    fn default() -> Self {
        Self::builtin(DEFAULT_FONT_PX)
    }
}

impl TextPainter {
    /// Bitmap glyphs only.
    pub fn builtin(px: f32) -> Self {
        Self { font: None, px }
    }

    /// Load a TrueType or OpenType font.
    pub fn from_font_file(path: &Path, px: f32) -> Result<Self> {
        let data = fs::read(path)?;
        let font = FontVec::try_from_vec(data).map_err(|e| {
            InkpadError::Config(format!("cannot load font {}: {}", path.display(), e))
        })?;
        debug!(font = %path.display(), px, "export font loaded");
        Ok(Self {
            font: Some(Arc::new(font)),
            px,
        })
    }

    pub fn px(&self) -> f32 {
        self.px
    }

    pub fn paint(&self, page: &mut RgbaImage, runs: &[TextRun]) {
        let (width, height) = page.dimensions();
        let margin = (self.px / 2.0).round();
        let line_height = (self.px * 1.5).ceil();
        let right = width as f32 - margin;
        let bottom = height as f32;

        let mut x = margin;
        let mut top = margin;
        for run in runs {
            for c in run.text.chars() {
                if c == '\n' {
                    x = margin;
                    top += line_height;
                    continue;
                }
                let glyph = self.glyph(c);
                let advance = self.advance(&glyph);
                if x + advance > right && x > margin {
                    x = margin;
                    top += line_height;
                }
                if top >= bottom {
                    return;
                }
                if !c.is_whitespace() {
                    self.draw(page, &glyph, x, top, line_height, run.ink);
                }
                x += advance;
            }
        }
    }

    fn bitmap_scale(&self) -> u32 {
        ((self.px / 8.0).floor() as u32).max(1)
    }

    fn glyph(&self, c: char) -> Glyph {
        if let Some(font) = self.font.as_deref() {
            let id = font.glyph_id(c);
            if id.0 != 0 {
                let advance = font.as_scaled(PxScale::from(self.px)).h_advance(id);
                return Glyph::Outline { id, advance };
            }
        }
        BASIC_FONTS
            .get(c)
            .or_else(|| LATIN_FONTS.get(c))
            .or_else(|| GREEK_FONTS.get(c))
            .or_else(|| BOX_FONTS.get(c))
            .or_else(|| BLOCK_FONTS.get(c))
            .map_or(Glyph::Missing, Glyph::Bitmap)
    }

    fn advance(&self, glyph: &Glyph) -> f32 {
        match glyph {
            Glyph::Outline { advance, .. } => *advance,
            Glyph::Bitmap(_) | Glyph::Missing => (8 * self.bitmap_scale()) as f32,
        }
    }

    fn draw(
        &self,
        page: &mut RgbaImage,
        glyph: &Glyph,
        x: f32,
        top: f32,
        line_height: f32,
        ink: [u8; 4],
    ) {
        let scale = self.bitmap_scale() as i64;
        let cell_top = (top + ((line_height - (8 * scale) as f32) / 2.0).floor()) as i64;
        let left = x as i64;

        match glyph {
            Glyph::Outline { id, .. } => {
                let Some(font) = self.font.as_deref() else {
                    return;
                };
                let scaled = font.as_scaled(PxScale::from(self.px));
                let baseline = top + (line_height - scaled.height()) / 2.0 + scaled.ascent();
                let positioned = id.with_scale_and_position(self.px, point(x, baseline));
                if let Some(outlined) = font.outline_glyph(positioned) {
                    let bounds = outlined.px_bounds();
                    let (ox, oy) = (bounds.min.x as i64, bounds.min.y as i64);
                    outlined.draw(|gx, gy, coverage| {
                        blend(page, ox + gx as i64, oy + gy as i64, ink, coverage);
                    });
                }
            }
            Glyph::Bitmap(rows) => {
                for (row, bits) in rows.iter().enumerate() {
                    for col in 0..8 {
                        if bits & (1 << col) != 0 {
                            let (px, py) = (left + col * scale, cell_top + row as i64 * scale);
                            fill(page, px, py, scale, scale, ink);
                        }
                    }
                }
            }
            Glyph::Missing => {
                let (x0, x1) = (left + scale, left + 7 * scale);
                let (y0, y1) = (cell_top, cell_top + 8 * scale);
                fill(page, x0, y0, x1 - x0, scale, ink);
                fill(page, x0, y1 - scale, x1 - x0, scale, ink);
                fill(page, x0, y0, scale, y1 - y0, ink);
                fill(page, x1 - scale, y0, scale, y1 - y0, ink);
            }
        }
    }
}

fn fill(page: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, ink: [u8; 4]) {
    for py in y..y + h {
        for px in x..x + w {
            blend(page, px, py, ink, 1.0);
        }
    }
}

fn blend(page: &mut RgbaImage, x: i64, y: i64, ink: [u8; 4], coverage: f32) {
    let (w, h) = page.dimensions();
    if x < 0 || y < 0 || x >= w as i64 || y >= h as i64 {
        return;
    }
    let alpha = (ink[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
    if alpha == 0 {
        return;
    }
    page.get_pixel_mut(x as u32, y as u32)
        .blend(&Rgba([ink[0], ink[1], ink[2], alpha]));
}
