//! Badge and heat-map colours for each risk level.

use super::level::RiskLevel;
use serde::Serialize;

/// Strong foreground colour paired with a pale background tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelColor {
    pub foreground: &'static str,
    pub background: &'static str,
}

pub const LOW_COLOR: LevelColor = LevelColor {
    foreground: "#22c55e",
    background: "#dcfce7",
};

// Older call sites also used #ca8a04 for medium; #eab308 is the single
// canonical value.
pub const MEDIUM_COLOR: LevelColor = LevelColor {
    foreground: "#eab308",
    background: "#fef9c3",
};

pub const HIGH_COLOR: LevelColor = LevelColor {
    foreground: "#f59e0b",
    background: "#fed7aa",
};

pub const CRITICAL_COLOR: LevelColor = LevelColor {
    foreground: "#dc2626",
    background: "#fecaca",
};

pub fn color_for_level(level: RiskLevel) -> LevelColor {
    match level {
        RiskLevel::Low => LOW_COLOR,
        RiskLevel::Medium => MEDIUM_COLOR,
        RiskLevel::High => HIGH_COLOR,
        RiskLevel::Critical => CRITICAL_COLOR,
    }
}

impl RiskLevel {
    pub fn color(self) -> LevelColor {
        color_for_level(self)
    }

    /// CSS class used for badges and heat-map cells, e.g. `risk-critical`.
    pub fn css_class(self) -> &'static str {
        match self {
            RiskLevel::Low => "risk-low",
            RiskLevel::Medium => "risk-medium",
            RiskLevel::High => "risk-high",
            RiskLevel::Critical => "risk-critical",
        }
    }
}
