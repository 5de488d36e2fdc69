//! Software rasterizer backed by an RGBA pixel buffer.
//!
//! No font backend is bundled, so text is drawn as block glyphs: one filled
//! cell per visible character, laid out with fixed advance. Layout and
//! shadowing follow the usual canvas conventions (centered alignment,
//! baseline anchoring, offset translucent shadow).

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap
)]

use super::surface::{DrawingSurface, SurfaceProvider, TextStyle};
use crate::errors::RenderError;
use crate::theme::Color;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Largest width or height the rasterizer will allocate.
pub const MAX_CANVAS_DIMENSION: u32 = 8192;

/// Advance per character as a fraction of the font size.
const ADVANCE_RATIO: f32 = 0.6;
const BOLD_ADVANCE_RATIO: f32 = 0.66;
/// Glyph cell height as a fraction of the font size (cap height).
const CAP_HEIGHT_RATIO: f32 = 0.7;
/// Inked share of each glyph cell.
const INK_RATIO: f32 = 0.8;

/// A drawing surface over an in-memory RGBA image.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Creates a transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Returns the pixel at `(x, y)`, if in bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Encodes an image as PNG.
    pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .map_err(|e| RenderError::encode(e.to_string()))?;
        Ok(buf)
    }

    /// Alpha-blends `color` over the rectangle `[x0, x1) x [y0, y1)`.
    fn blend_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Color, opacity: f32) {
        let (w, h) = self.image.dimensions();
        let clamp_x = |v: f32| v.round().clamp(0.0, w as f32) as u32;
        let clamp_y = |v: f32| v.round().clamp(0.0, h as f32) as u32;
        let (x0, x1, y0, y1) = (clamp_x(x0), clamp_x(x1), clamp_y(y0), clamp_y(y1));
        let alpha = opacity.clamp(0.0, 1.0);

        for y in y0..y1 {
            for x in x0..x1 {
                let dst = self.image.get_pixel_mut(x, y);
                *dst = blend(*dst, color, alpha);
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_glyphs(
        &mut self,
        text: &str,
        left: f32,
        baseline: f32,
        advance: f32,
        cap: f32,
        color: Color,
        opacity: f32,
        spread: f32,
    ) {
        let ink = advance * INK_RATIO;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = (i as f32).mul_add(advance, left);
            self.blend_rect(
                x - spread,
                baseline - cap - spread,
                x + ink + spread,
                baseline + spread,
                color,
                opacity,
            );
        }
    }
}

fn blend(dst: Rgba<u8>, src: Color, alpha: f32) -> Rgba<u8> {
    let mix = |s: u8, d: u8| -> u8 {
        f32::from(s).mul_add(alpha, f32::from(d) * (1.0 - alpha)).round() as u8
    };
    let [dr, dg, db, da] = dst.0;
    let out_alpha = f32::from(da).mul_add(1.0 - alpha, alpha * 255.0).round() as u8;
    Rgba([mix(src.r, dr), mix(src.g, dg), mix(src.b, db), out_alpha])
}

impl DrawingSurface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn fill_linear_gradient(&mut self, from: (f32, f32), to: (f32, f32), start: Color, end: Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len_sq = dx.mul_add(dx, dy * dy);

        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let t = if len_sq > 0.0 {
                let px_x = x as f32 + 0.5 - from.0;
                let px_y = y as f32 + 0.5 - from.1;
                px_x.mul_add(dx, px_y * dy) / len_sq
            } else {
                0.0
            };
            *px = Rgba(start.lerp(end, t).to_rgba(255));
        }
    }

    fn fill_text(&mut self, text: &str, center_x: f32, baseline_y: f32, style: &TextStyle) {
        let ratio = if style.bold { BOLD_ADVANCE_RATIO } else { ADVANCE_RATIO };
        let advance = style.size_px * ratio;
        let cap = style.size_px * CAP_HEIGHT_RATIO;
        let width = advance * text.chars().count() as f32;
        let left = center_x - width / 2.0;

        if let Some(shadow) = style.shadow {
            // Two passes: a faint halo for the blur, then the core shadow.
            let spread = shadow.blur / 2.0;
            let (color, opacity) = (shadow.color, shadow.opacity);
            self.draw_glyphs(text, left, baseline_y, advance, cap, color, opacity / 3.0, spread);
            self.draw_glyphs(text, left, baseline_y, advance, cap, color, opacity, 0.0);
        }
        self.draw_glyphs(text, left, baseline_y, advance, cap, style.color, 1.0, 0.0);
    }

    fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        Self::encode_png(&self.image)
    }
}

/// Provides [`RasterSurface`]s up to [`MAX_CANVAS_DIMENSION`] per side.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterSurfaceProvider;

impl RasterSurfaceProvider {
    /// Returns true if a surface of this size can be allocated.
    #[must_use]
    pub fn supports(width: u32, height: u32) -> bool {
        (1..=MAX_CANVAS_DIMENSION).contains(&width) && (1..=MAX_CANVAS_DIMENSION).contains(&height)
    }
}

impl SurfaceProvider for RasterSurfaceProvider {
    fn acquire(&self, width: u32, height: u32) -> Option<Box<dyn DrawingSurface>> {
        Self::supports(width, height)
            .then(|| Box::new(RasterSurface::new(width, height)) as Box<dyn DrawingSurface>)
    }
}
