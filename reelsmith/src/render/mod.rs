//! Deterministic artifact rendering.
//!
//! The renderer is written against the [`DrawingSurface`] capability so the
//! drawing backend can be swapped; [`RasterSurfaceProvider`] is the bundled
//! software rasterizer.

mod raster;
mod renderer;
mod surface;

pub use raster::{RasterSurface, RasterSurfaceProvider, MAX_CANVAS_DIMENSION};
pub use renderer::{excerpt, ArtifactRenderer};
pub use surface::{DrawingSurface, Shadow, SurfaceProvider, TextStyle};
