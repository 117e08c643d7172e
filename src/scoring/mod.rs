//! Risk scoring engine.
//!
//! Turns a likelihood/impact pair into a score, a qualitative level and the
//! colour used to draw it. Everything here is pure and total: out-of-range
//! ratings are clamped into [1, 5] rather than rejected, so every call
//! produces a result.
//!
//! ```rust
//! use riskgrid::scoring::{classify_level, compute_score, RiskLevel};
//!
//! let score = compute_score(3, 5);
//! assert_eq!(score.value(), 15);
//! assert_eq!(classify_level(score.into()), RiskLevel::Critical);
//!
//! // Clamped before multiplying
//! assert_eq!(compute_score(0, 3), compute_score(1, 3));
//! ```

pub mod color;
pub mod level;
pub mod rating;

pub use color::{color_for_level, LevelColor};
pub use level::{
    classify_level, RiskLevel, CRITICAL_THRESHOLD, HIGH_THRESHOLD, MEDIUM_THRESHOLD,
};
pub use rating::{
    clamp_rating, parse_rating, Impact, Likelihood, MAX_RATING, MIN_RATING, NEUTRAL_RATING,
};

use serde::{Deserialize, Serialize};

/// Highest possible score (5 x 5).
pub const MAX_SCORE: u8 = 25;

/// Product of a likelihood and an impact rating, always in [1, 25].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskScore(u8);

impl RiskScore {
    pub fn from_ratings(likelihood: Likelihood, impact: Impact) -> Self {
        Self(likelihood.value() * impact.value())
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn level(self) -> RiskLevel {
        classify_level(self.0 as i64)
    }
}

impl From<RiskScore> for i64 {
    fn from(score: RiskScore) -> i64 {
        score.0 as i64
    }
}

impl std::fmt::Display for RiskScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Score a raw likelihood/impact pair, clamping both into [1, 5] first.
pub fn compute_score(likelihood: i64, impact: i64) -> RiskScore {
    RiskScore::from_ratings(Likelihood::new(likelihood), Impact::new(impact))
}

/// Everything a badge or heat-map cell needs for one rating pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub likelihood: Likelihood,
    pub impact: Impact,
    pub score: RiskScore,
    pub level: RiskLevel,
    pub color: LevelColor,
}

impl ScoreCard {
    pub fn new(likelihood: Likelihood, impact: Impact) -> Self {
        let score = RiskScore::from_ratings(likelihood, impact);
        let level = score.level();
        Self {
            likelihood,
            impact,
            score,
            level,
            color: color_for_level(level),
        }
    }
}

/// Score, classify and colour a raw rating pair in one call.
pub fn evaluate(likelihood: i64, impact: i64) -> ScoreCard {
    ScoreCard::new(Likelihood::new(likelihood), Impact::new(impact))
}
