use crate::scoring::{LevelColor, RiskLevel};
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        // Check CLICOLOR environment variable
        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        // Check CLICOLOR_FORCE environment variable
        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// Create a plain output configuration (no colors)
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    /// Apply the color decision to the `colored` crate globally.
    pub fn apply(&self) {
        colored::control::set_override(self.color.should_use_color());
    }
}

/// Parse a `#rrggbb` colour into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn truecolor(text: ColoredString, hex: &str) -> ColoredString {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text,
    }
}

fn on_truecolor(text: ColoredString, hex: &str) -> ColoredString {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => text.on_truecolor(r, g, b),
        None => text,
    }
}

/// Level name in the level's foreground colour.
pub fn paint_level(level: RiskLevel, use_color: bool) -> String {
    paint_in_level(level.as_str(), level, use_color)
}

/// `text` in the level's foreground colour. Pad before painting: escape
/// codes count towards format widths.
pub fn paint_in_level(text: &str, level: RiskLevel, use_color: bool) -> String {
    if use_color {
        truecolor(text.bold(), level.color().foreground).to_string()
    } else {
        text.to_string()
    }
}

/// Text drawn as a badge: level foreground on the level background.
pub fn badge(text: &str, color: LevelColor, use_color: bool) -> String {
    if use_color {
        on_truecolor(truecolor(text.bold(), color.foreground), color.background).to_string()
    } else {
        text.to_string()
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check if stdout is a TTY
    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_modes_ignore_terminal() {
        assert!(ColorMode::Always.should_use_color());
        assert!(!ColorMode::Never.should_use_color());
    }

    #[test]
    fn plain_disables_color() {
        assert!(!FormattingConfig::plain().color.should_use_color());
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#dc2626"), Some((0xdc, 0x26, 0x26)));
        assert_eq!(hex_to_rgb("#FEF9C3"), Some((0xfe, 0xf9, 0xc3)));
        assert_eq!(hex_to_rgb("dc2626"), None);
        assert_eq!(hex_to_rgb("#dc26"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn uncolored_output_is_plain_text() {
        assert_eq!(paint_level(RiskLevel::High, false), "HIGH");
        assert_eq!(paint_in_level("LOW     ", RiskLevel::Low, false), "LOW     ");
        assert_eq!(badge("12", RiskLevel::High.color(), false), "12");
    }

    #[test]
    fn painted_text_keeps_padding_inside_escapes() {
        colored::control::set_override(true);
        let painted = paint_in_level(&format!("{:<8}", "LOW"), RiskLevel::Low, true);
        colored::control::unset_override();
        assert!(painted.starts_with('\u{1b}'));
        assert!(painted.contains("LOW     "));
    }

    #[test]
    fn every_level_colour_parses() {
        for level in RiskLevel::ALL {
            assert!(hex_to_rgb(level.color().foreground).is_some());
            assert!(hex_to_rgb(level.color().background).is_some());
        }
    }
}
