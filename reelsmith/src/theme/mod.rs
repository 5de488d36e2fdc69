//! Prompt classification into gradient color themes.
//!
//! Classification is a pure, total function of the prompt text: the prompt
//! is lower-cased and tested against an ordered list of keyword groups by
//! substring containment. The first matching group wins, so a prompt that
//! mentions both "sunset" and "ocean" is always a sunset.

mod color;

pub use color::{Color, ColorParseError};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-color gradient used to paint an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorTheme {
    /// Gradient start color (top-left).
    pub start: Color,
    /// Gradient end color (bottom-right).
    pub end: Color,
}

impl ColorTheme {
    /// Creates a theme from two colors.
    #[must_use]
    pub const fn new(start: Color, end: Color) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// The keyword group a prompt resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeKind {
    /// sunset / orange
    Sunset,
    /// ocean / blue
    Ocean,
    /// forest / green
    Forest,
    /// night / dark
    Night,
    /// fire / red
    Fire,
    /// No keyword matched.
    Default,
}

impl ThemeKind {
    /// Returns the fixed theme for this group.
    #[must_use]
    pub const fn theme(self) -> ColorTheme {
        match self {
            Self::Sunset => ColorTheme::new(
                Color::new(0xff, 0x6b, 0x35),
                Color::new(0xf7, 0x93, 0x1e),
            ),
            Self::Ocean => ColorTheme::new(
                Color::new(0x00, 0x77, 0xbe),
                Color::new(0x00, 0xa8, 0xe8),
            ),
            Self::Forest => ColorTheme::new(
                Color::new(0x2d, 0x6a, 0x4f),
                Color::new(0x52, 0xb7, 0x88),
            ),
            Self::Night => ColorTheme::new(
                Color::new(0x1a, 0x1a, 0x2e),
                Color::new(0x16, 0x21, 0x3e),
            ),
            Self::Fire => ColorTheme::new(
                Color::new(0xd0, 0x00, 0x00),
                Color::new(0xff, 0x6d, 0x00),
            ),
            Self::Default => ColorTheme::new(
                Color::new(0x6b, 0x4c, 0xe6),
                Color::new(0x9b, 0x59, 0xb6),
            ),
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunset => write!(f, "sunset"),
            Self::Ocean => write!(f, "ocean"),
            Self::Forest => write!(f, "forest"),
            Self::Night => write!(f, "night"),
            Self::Fire => write!(f, "fire"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Keyword groups in match priority order.
const KEYWORD_GROUPS: [(ThemeKind, &[&str]); 5] = [
    (ThemeKind::Sunset, &["sunset", "orange"]),
    (ThemeKind::Ocean, &["ocean", "blue"]),
    (ThemeKind::Forest, &["forest", "green"]),
    (ThemeKind::Night, &["night", "dark"]),
    (ThemeKind::Fire, &["fire", "red"]),
];

/// Returns the keyword group a prompt belongs to.
#[must_use]
pub fn classify_named(prompt: &str) -> ThemeKind {
    let lower = prompt.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map_or(ThemeKind::Default, |(kind, _)| *kind)
}

/// Maps a prompt to its color theme.
///
/// # Examples
///
/// ```
/// use reelsmith::theme::{classify, ThemeKind};
///
/// assert_eq!(classify("A sunset over the ocean"), ThemeKind::Sunset.theme());
/// assert_eq!(classify("a quiet meadow"), ThemeKind::Default.theme());
/// ```
#[must_use]
pub fn classify(prompt: &str) -> ColorTheme {
    classify_named(prompt).theme()
}
