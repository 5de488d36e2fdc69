//! Mock drawing surfaces for testing.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::errors::RenderError;
use crate::render::{DrawingSurface, SurfaceProvider, TextStyle};
use crate::theme::{Color, ColorTheme};

/// A surface that records each drawing call as a line of text.
#[derive(Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Arc<Mutex<Vec<String>>>,
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_linear_gradient(&mut self, from: (f32, f32), to: (f32, f32), start: Color, end: Color) {
        self.calls.lock().push(format!(
            "gradient ({},{})->({},{}) {}",
            from.0,
            from.1,
            to.0,
            to.1,
            ColorTheme::new(start, end)
        ));
    }

    fn fill_text(&mut self, text: &str, center_x: f32, baseline_y: f32, style: &TextStyle) {
        let weight = if style.bold { " bold" } else { "" };
        self.calls.lock().push(format!(
            "text '{}' at ({},{}) {}px{}",
            text, center_x, baseline_y, style.size_px, weight
        ));
    }

    fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        self.calls.lock().push("export".to_string());
        Ok(b"\x89PNG\r\n\x1a\n".to_vec())
    }
}

/// Hands out [`RecordingSurface`]s that share one call log.
#[derive(Debug, Default)]
pub struct RecordingSurfaceProvider {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingSurfaceProvider {
    /// Creates a new recording provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded call, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Returns the number of surfaces exported.
    #[must_use]
    pub fn export_count(&self) -> usize {
        self.calls.lock().iter().filter(|c| *c == "export").count()
    }
}

impl SurfaceProvider for RecordingSurfaceProvider {
    fn acquire(&self, width: u32, height: u32) -> Option<Box<dyn DrawingSurface>> {
        Some(Box::new(RecordingSurface {
            width,
            height,
            calls: self.calls.clone(),
        }))
    }
}

/// A provider that never yields a surface.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableSurfaceProvider;

impl SurfaceProvider for UnavailableSurfaceProvider {
    fn acquire(&self, _width: u32, _height: u32) -> Option<Box<dyn DrawingSurface>> {
        None
    }
}

/// A provider whose surfaces draw fine but fail to export.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingExportProvider;

#[derive(Debug)]
struct FailingExportSurface(u32, u32);

impl DrawingSurface for FailingExportSurface {
    fn size(&self) -> (u32, u32) {
        (self.0, self.1)
    }

    fn fill_linear_gradient(&mut self, _: (f32, f32), _: (f32, f32), _: Color, _: Color) {}

    fn fill_text(&mut self, _: &str, _: f32, _: f32, _: &TextStyle) {}

    fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::encode("export disabled"))
    }
}

impl SurfaceProvider for FailingExportProvider {
    fn acquire(&self, width: u32, height: u32) -> Option<Box<dyn DrawingSurface>> {
        Some(Box::new(FailingExportSurface(width, height)))
    }
}
