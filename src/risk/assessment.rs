use crate::scoring::{Impact, LevelColor, Likelihood, RiskLevel, RiskScore, ScoreCard};
use serde::{Deserialize, Serialize};

/// A likelihood/impact rating pair attached to a risk.
///
/// Score and level are always derived, never stored, so they cannot drift
/// from the ratings they came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub likelihood: Likelihood,
    pub impact: Impact,
}

impl RiskAssessment {
    pub fn new(likelihood: Likelihood, impact: Impact) -> Self {
        Self { likelihood, impact }
    }

    /// Build from raw values, clamping both into [1, 5].
    pub fn from_values(likelihood: i64, impact: i64) -> Self {
        Self::new(Likelihood::new(likelihood), Impact::new(impact))
    }

    pub fn score(&self) -> RiskScore {
        RiskScore::from_ratings(self.likelihood, self.impact)
    }

    pub fn level(&self) -> RiskLevel {
        self.score().level()
    }

    pub fn color(&self) -> LevelColor {
        self.level().color()
    }

    pub fn card(&self) -> ScoreCard {
        ScoreCard::new(self.likelihood, self.impact)
    }

    /// Copy with a new likelihood, as when a dropdown value changes.
    pub fn with_likelihood(self, likelihood: i64) -> Self {
        Self {
            likelihood: Likelihood::new(likelihood),
            ..self
        }
    }

    /// Copy with a new impact.
    pub fn with_impact(self, impact: i64) -> Self {
        Self {
            impact: Impact::new(impact),
            ..self
        }
    }
}
