//! Qualitative risk levels and the score thresholds that produce them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lowest score classified as [`RiskLevel::Critical`].
pub const CRITICAL_THRESHOLD: i64 = 15;

/// Lowest score classified as [`RiskLevel::High`].
pub const HIGH_THRESHOLD: i64 = 10;

/// Lowest score classified as [`RiskLevel::Medium`].
pub const MEDIUM_THRESHOLD: i64 = 5;

/// Qualitative severity bucket derived from a risk score.
///
/// Variants are ordered from least to most severe, so `Ord` can be used for
/// "at least this severe" filtering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// All levels from least to most severe.
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Low,
        RiskLevel::Medium,
        RiskLevel::High,
        RiskLevel::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// Title-case name for prose and table headers.
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }

    /// Smallest score that lands in this level.
    pub fn min_score(self) -> i64 {
        match self {
            RiskLevel::Low => i64::MIN,
            RiskLevel::Medium => MEDIUM_THRESHOLD,
            RiskLevel::High => HIGH_THRESHOLD,
            RiskLevel::Critical => CRITICAL_THRESHOLD,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" | "med" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" | "crit" => Ok(RiskLevel::Critical),
            other => Err(format!(
                "unknown risk level '{}' (expected low, medium, high or critical)",
                other
            )),
        }
    }
}

/// Classify a score into its risk level.
///
/// Thresholds are checked highest first and each lower bound is inclusive, so
/// 15 is critical, 10 is high and 5 is medium. Defined for every integer.
pub fn classify_level(score: i64) -> RiskLevel {
    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
