//! The 2D drawing capability the renderer depends on.

use crate::errors::RenderError;
use crate::theme::Color;

/// Drop shadow painted beneath text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Color,
    /// Shadow opacity in [0, 1].
    pub opacity: f32,
    /// Blur radius in pixels.
    pub blur: f32,
}

/// How a line of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub size_px: f32,
    /// Bold weight.
    pub bold: bool,
    /// Fill color.
    pub color: Color,
    /// Optional drop shadow.
    pub shadow: Option<Shadow>,
}

impl TextStyle {
    /// White text of the given size with the standard overlay shadow.
    #[must_use]
    pub fn overlay(size_px: f32) -> Self {
        Self {
            size_px,
            bold: false,
            color: Color::WHITE,
            shadow: Some(Shadow {
                color: Color::new(0, 0, 0),
                opacity: 0.5,
                blur: 10.0,
            }),
        }
    }

    /// Switches to bold weight.
    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// A 2D drawing surface: gradient fill, centered text, bitmap export.
pub trait DrawingSurface: Send {
    /// Returns the surface size as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Fills the whole surface with a linear gradient running from `from`
    /// (color `start`) to `to` (color `end`).
    fn fill_linear_gradient(&mut self, from: (f32, f32), to: (f32, f32), start: Color, end: Color);

    /// Draws one line of text horizontally centered on `center_x` with its
    /// baseline at `baseline_y`.
    fn fill_text(&mut self, text: &str, center_x: f32, baseline_y: f32, style: &TextStyle);

    /// Encodes the surface contents as PNG bytes.
    fn export_png(&self) -> Result<Vec<u8>, RenderError>;
}

/// Acquires drawing surfaces.
///
/// Returning `None` means no surface is available in this environment; the
/// renderer then degrades to a blank artifact.
pub trait SurfaceProvider: Send + Sync {
    /// Acquires a surface of the given size.
    fn acquire(&self, width: u32, height: u32) -> Option<Box<dyn DrawingSurface>>;
}
