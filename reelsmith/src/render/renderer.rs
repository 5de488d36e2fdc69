//! Prompt + theme → artifact.

#![allow(clippy::cast_precision_loss)]

use super::raster::{RasterSurface, RasterSurfaceProvider};
use super::surface::{SurfaceProvider, TextStyle};
use crate::config::AgentConfig;
use crate::core::{Artifact, BLANK_DATA_URI};
use crate::errors::RenderError;
use crate::theme::ColorTheme;
use base64::{engine::general_purpose, Engine as _};
use image::RgbaImage;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{debug, warn};

const TITLE_SIZE_PX: f32 = 60.0;
const EXCERPT_SIZE_PX: f32 = 30.0;
const CAPTION_SIZE_PX: f32 = 20.0;

/// Returns at most the first `max_chars` characters of `prompt`.
///
/// Truncation counts Unicode scalar values, so the result is always valid
/// UTF-8 and never splits a character.
#[must_use]
pub fn excerpt(prompt: &str, max_chars: usize) -> String {
    prompt.chars().take(max_chars).collect()
}

/// Renders the preview artifact for a prompt.
///
/// Rendering is best-effort: if no surface is available or encoding fails,
/// the result is a blank artifact flagged as degraded.
#[derive(Clone)]
pub struct ArtifactRenderer {
    provider: Arc<dyn SurfaceProvider>,
    title: String,
    caption: String,
    excerpt_chars: usize,
}

impl std::fmt::Debug for ArtifactRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactRenderer")
            .field("title", &self.title)
            .field("caption", &self.caption)
            .field("excerpt_chars", &self.excerpt_chars)
            .finish_non_exhaustive()
    }
}

impl Default for ArtifactRenderer {
    fn default() -> Self {
        Self::from_config(&AgentConfig::default(), Arc::new(RasterSurfaceProvider))
    }
}

impl ArtifactRenderer {
    /// Creates a renderer with default overlay text over the given provider.
    #[must_use]
    pub fn new(provider: Arc<dyn SurfaceProvider>) -> Self {
        Self::from_config(&AgentConfig::default(), provider)
    }

    /// Creates a renderer using the overlay settings from `config`.
    #[must_use]
    pub fn from_config(config: &AgentConfig, provider: Arc<dyn SurfaceProvider>) -> Self {
        Self {
            provider,
            title: config.title.clone(),
            caption: config.caption.clone(),
            excerpt_chars: config.excerpt_chars,
        }
    }

    /// Renders an artifact, discarding any degradation reason.
    #[must_use]
    pub fn render(&self, prompt: &str, theme: ColorTheme, width: u32, height: u32) -> Artifact {
        self.render_checked(prompt, theme, width, height).0
    }

    /// Renders an artifact and reports why it degraded, if it did.
    #[must_use]
    pub fn render_checked(
        &self,
        prompt: &str,
        theme: ColorTheme,
        width: u32,
        height: u32,
    ) -> (Artifact, Option<RenderError>) {
        let lines = vec![
            self.title.clone(),
            excerpt(prompt, self.excerpt_chars),
            self.caption.clone(),
        ];

        match self.draw(&lines, theme, width, height) {
            Ok(png) => {
                debug!(width, height, bytes = png.len(), "Rendered artifact");
                let data_uri = encode_data_uri(&png);
                let artifact =
                    build_artifact(data_uri, prompt, theme, width, height, lines, false);
                (artifact, None)
            }
            Err(err) => {
                warn!(error = %err, width, height, "Rendering degraded, using blank artifact");
                let data_uri = blank_data_uri(width, height);
                let artifact =
                    build_artifact(data_uri, prompt, theme, width, height, Vec::new(), true);
                (artifact, Some(err))
            }
        }
    }

    fn draw(
        &self,
        lines: &[String],
        theme: ColorTheme,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut surface = self
            .provider
            .acquire(width, height)
            .ok_or_else(|| RenderError::surface_unavailable(width, height))?;

        let (w, h) = (width as f32, height as f32);
        surface.fill_linear_gradient((0.0, 0.0), (w, h), theme.start, theme.end);

        let cx = w / 2.0;
        let cy = h / 2.0;
        let styles = [
            (TextStyle::overlay(TITLE_SIZE_PX).bold(), cy - 50.0),
            (TextStyle::overlay(EXCERPT_SIZE_PX), cy + 20.0),
            (TextStyle::overlay(CAPTION_SIZE_PX), cy + 60.0),
        ];
        for (line, (style, baseline)) in lines.iter().zip(styles.iter()) {
            surface.fill_text(line, cx, *baseline, style);
        }

        surface.export_png()
    }
}

fn build_artifact(
    data_uri: String,
    prompt: &str,
    theme: ColorTheme,
    width: u32,
    height: u32,
    text_lines: Vec<String>,
    degraded: bool,
) -> Artifact {
    let digest = hex::encode(Sha256::digest(data_uri.as_bytes()));
    Artifact {
        data_uri,
        prompt: prompt.to_string(),
        theme,
        width,
        height,
        text_lines,
        digest,
        degraded,
    }
}

fn encode_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", general_purpose::STANDARD.encode(png))
}

/// A transparent PNG of the requested size, or `data:,` when even that
/// cannot be produced.
fn blank_data_uri(width: u32, height: u32) -> String {
    if !RasterSurfaceProvider::supports(width, height) {
        return BLANK_DATA_URI.to_string();
    }
    RasterSurface::encode_png(&RgbaImage::new(width, height))
        .map_or_else(|_| BLANK_DATA_URI.to_string(), |png| encode_data_uri(&png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        FailingExportProvider, RecordingSurfaceProvider, UnavailableSurfaceProvider,
    };
    use crate::theme::{classify, ThemeKind};
    use pretty_assertions::assert_eq;

    fn renderer() -> ArtifactRenderer {
        ArtifactRenderer::default()
    }

    #[test]
    fn test_excerpt_bounds() {
        assert_eq!(excerpt("short", 50), "short");
        assert_eq!(excerpt(&"x".repeat(80), 50).chars().count(), 50);
        assert_eq!(excerpt("ééééé", 3), "ééé");
    }

    #[test]
    fn test_render_produces_png_data_uri() {
        let theme = classify("A sunset over the ocean");
        let artifact = renderer().render("A sunset over the ocean", theme, 64, 36);

        assert!(artifact.data_uri.starts_with("data:image/png;base64,"));
        assert_eq!(artifact.mime_type(), Some("image/png"));
        assert_eq!(artifact.theme, ThemeKind::Sunset.theme());
        assert!(!artifact.degraded);
        assert_eq!(artifact.digest.len(), 64);
        assert_eq!(
            artifact.text_lines,
            vec!["AI Generated Video", "A sunset over the ocean", "(Demo Preview)"]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let theme = ThemeKind::Forest.theme();
        let a = renderer().render("green hills", theme, 80, 45);
        let b = renderer().render("green hills", theme, 80, 45);
        assert_eq!(a, b);

        let c = renderer().render("green hills!", theme, 80, 45);
        assert_ne!(a.digest, c.digest);
    }

    #[test]
    fn test_long_prompt_excerpt_is_bounded() {
        let prompt = "a very long description of a scene ".repeat(10);
        let artifact = renderer().render(&prompt, classify(&prompt), 64, 36);
        assert!(artifact.excerpt().unwrap().chars().count() <= 50);
        assert_eq!(artifact.prompt, prompt);
    }

    #[test]
    fn test_draw_calls_follow_layout() {
        let provider = Arc::new(RecordingSurfaceProvider::new());
        let renderer = ArtifactRenderer::new(provider.clone());
        let theme = ThemeKind::Night.theme();
        let _ = renderer.render("dark night", theme, 1280, 720);

        let calls = provider.calls();
        assert_eq!(calls[0], format!("gradient (0,0)->(1280,720) {}", theme));
        assert_eq!(calls[1], "text 'AI Generated Video' at (640,310) 60px bold");
        assert_eq!(calls[2], "text 'dark night' at (640,380) 30px");
        assert_eq!(calls[3], "text '(Demo Preview)' at (640,420) 20px");
        assert_eq!(calls[4], "export");
    }

    #[test]
    fn test_unavailable_surface_degrades() {
        let renderer = ArtifactRenderer::new(Arc::new(UnavailableSurfaceProvider));
        let (artifact, err) = renderer.render_checked("ocean", classify("ocean"), 32, 18);

        assert!(artifact.degraded);
        assert!(artifact.has_payload());
        assert!(artifact.text_lines.is_empty());
        assert_eq!(err, Some(RenderError::surface_unavailable(32, 18)));
    }

    #[test]
    fn test_export_failure_degrades() {
        let renderer = ArtifactRenderer::new(Arc::new(FailingExportProvider));
        let (artifact, err) = renderer.render_checked("fire", classify("fire"), 8, 8);

        assert!(artifact.degraded);
        assert!(matches!(err, Some(RenderError::Encode(_))));
    }

    #[test]
    fn test_zero_sized_canvas_yields_blank_uri() {
        let artifact = renderer().render("anything", classify("anything"), 0, 0);
        assert!(artifact.degraded);
        assert_eq!(artifact.data_uri, BLANK_DATA_URI);
    }
}
