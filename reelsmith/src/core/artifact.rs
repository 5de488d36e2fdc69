//! The rendered artifact attached to a completed job.

use crate::theme::ColorTheme;
use serde::{Deserialize, Serialize};

/// Data URI a browser yields for a canvas it cannot encode.
pub const BLANK_DATA_URI: &str = "data:,";

/// The visual payload produced for a completed job.
///
/// Artifacts are created once by the renderer and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Self-contained image payload, `data:image/png;base64,...`.
    pub data_uri: String,
    /// The prompt the artifact was rendered from.
    pub prompt: String,
    /// The theme used for the background gradient.
    pub theme: ColorTheme,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Overlay lines in draw order: title, prompt excerpt, caption.
    pub text_lines: Vec<String>,
    /// SHA-256 of the data URI, hex encoded.
    pub digest: String,
    /// Whether the renderer fell back to a blank payload.
    pub degraded: bool,
}

impl Artifact {
    /// Returns the prompt excerpt drawn on the artifact.
    #[must_use]
    pub fn excerpt(&self) -> Option<&str> {
        self.text_lines.get(1).map(String::as_str)
    }

    /// Returns true if the payload carries image bytes.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        self.data_uri != BLANK_DATA_URI && !self.data_uri.is_empty()
    }

    /// Returns the MIME type declared in the data URI, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        let rest = self.data_uri.strip_prefix("data:")?;
        let end = rest.find([';', ','])?;
        Some(&rest[..end]).filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeKind;

    fn artifact(data_uri: &str) -> Artifact {
        Artifact {
            data_uri: data_uri.to_string(),
            prompt: "p".to_string(),
            theme: ThemeKind::Default.theme(),
            width: 2,
            height: 2,
            text_lines: vec!["t".to_string(), "p".to_string(), "c".to_string()],
            digest: String::new(),
            degraded: false,
        }
    }

    #[test]
    fn test_mime_type() {
        assert_eq!(artifact("data:image/png;base64,AAAA").mime_type(), Some("image/png"));
        assert_eq!(artifact(BLANK_DATA_URI).mime_type(), None);
    }

    #[test]
    fn test_has_payload() {
        assert!(artifact("data:image/png;base64,AAAA").has_payload());
        assert!(!artifact(BLANK_DATA_URI).has_payload());
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(artifact("x").excerpt(), Some("p"));
    }
}
