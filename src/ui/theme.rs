//! Theme management and ANSI escape sequence generation.
//!
//! This module defines the color scheme system for the plugin, supporting the
//! built-in light and dark themes and custom themes loaded from TOML files.
//! It provides utilities for converting hex colors to ANSI escape sequences.
//!
//! # Built-in Themes
//!
//! - `light`: Light background, dark text (default)
//! - `dark`: Dark blue background, light text
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//! kind = "dark"
//!
//! [colors]
//! background = "#202c37"
//! header_fg = "#ffffff"
//! selection_fg = "#202c37"
//! selection_bg = "#ffffff"
//! text_normal = "#ffffff"
//! text_dim = "#9aa5b1"
//! border = "#2b3945"
//! card_border = "#3b4a58"
//! search_bar_border = "#ffffff"
//! match_highlight_fg = "#202c37"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! error_fg = "#f38ba8"
//! link_fg = "#89dceb"
//! ```

use crate::domain::{CountrydexError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Whether a theme is meant for a light or dark background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    Light,
    Dark,
}

impl ThemeKind {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Name of the built-in theme of this kind.
    #[must_use]
    pub const fn builtin_name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Light or dark, used by the theme toggle.
    pub kind: ThemeKind,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements.
///
/// All colors are specified as hex strings (e.g., "#202c37").
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Pane background painted behind every line.
    pub background: String,

    /// Header text color.
    pub header_fg: String,
    /// Optional header background color.
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Selected card foreground color.
    pub selection_fg: String,
    /// Selected card background color.
    pub selection_bg: String,

    /// Normal text color.
    pub text_normal: String,
    /// Dimmed text color (footer, labels).
    pub text_dim: String,

    /// Section separator color.
    pub border: String,
    /// Card frame color.
    pub card_border: String,

    /// Search bar border color.
    pub search_bar_border: String,
    /// Search match highlight foreground.
    pub match_highlight_fg: String,
    /// Search match highlight background.
    pub match_highlight_bg: String,

    /// Empty state message color.
    pub empty_state_fg: String,
    /// Error message color.
    pub error_fg: String,
    /// Border-country link color in the detail view.
    pub link_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`light` or `dark`).
    ///
    /// ```rust
    /// use countrydex::ui::theme::{Theme, ThemeKind};
    ///
    /// let theme = Theme::from_name("dark").unwrap();
    /// assert_eq!(theme.kind, ThemeKind::Dark);
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "light" => include_str!("../../themes/light.toml"),
            "dark" => include_str!("../../themes/dark.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CountrydexError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CountrydexError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| CountrydexError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// The built-in theme of the opposite kind.
    #[must_use]
    pub fn toggled(&self) -> Self {
        let name = self.kind.opposite().builtin_name();
        Self::from_name(name).unwrap_or_else(|| {
            tracing::debug!(theme_name = %name, "built-in theme failed to parse, keeping current");
            self.clone()
        })
    }

    /// Converts a hex color to RGB tuple.
    ///
    /// Returns `(255, 255, 255)` (white) on parse errors.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// Generates an ANSI 24-bit foreground color escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// Generates an ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Base style for a line: theme background and normal text.
    #[must_use]
    pub fn base(&self) -> String {
        format!(
            "{}{}",
            Self::bg(&self.colors.background),
            Self::fg(&self.colors.text_normal)
        )
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Returns the ANSI reset escape sequence (`\x1b[0m`).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (light).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse (should never occur).
    fn default() -> Self {
        Self::from_name("light").expect("Built-in light theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtins_parse_with_matching_kind() {
        assert_eq!(Theme::from_name("light").unwrap().kind, ThemeKind::Light);
        assert_eq!(Theme::from_name("dark").unwrap().kind, ThemeKind::Dark);
        assert_eq!(Theme::default().name, "light");
    }

    #[test]
    fn toggling_alternates_between_builtins() {
        let light = Theme::default();
        let dark = light.toggled();
        assert_eq!(dark.kind, ThemeKind::Dark);
        assert_eq!(dark.toggled().kind, ThemeKind::Light);
    }

    #[test]
    fn hex_colors_become_truecolor_sequences() {
        assert_eq!(Theme::fg("#202c37"), "\u{1b}[38;2;32;44;55m");
        assert_eq!(Theme::bg("ffffff"), "\u{1b}[48;2;255;255;255m");
        assert_eq!(Theme::fg("#bad"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn custom_theme_loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let mut contents = include_str!("../../themes/dark.toml").to_string();
        contents = contents.replacen("name = \"dark\"", "name = \"midnight\"", 1);
        file.write_all(contents.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.toggled().name, "light");
    }

    #[test]
    fn unreadable_theme_is_a_theme_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Theme::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, CountrydexError::Theme(_)));
    }
}
