use serde::{Deserialize, Serialize};

use crate::scoring::{clamp_rating, NEUTRAL_RATING};

/// What to do with a risk whose likelihood or impact was never filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingRating {
    /// Substitute `default_rating` and keep the risk.
    #[default]
    Neutral,
    /// Leave the risk out of the register so it cannot skew aggregates.
    Skip,
}

/// How raw register records are turned into assessments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    #[serde(default)]
    pub missing_rating: MissingRating,

    /// Rating used in place of a missing value under the `neutral` policy (1-5)
    #[serde(default = "default_rating")]
    pub default_rating: u8,
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            missing_rating: MissingRating::default(),
            default_rating: default_rating(),
        }
    }
}

impl AssessmentConfig {
    pub fn validate(&self) -> Result<(), String> {
        if (1..=5).contains(&self.default_rating) {
            Ok(())
        } else {
            Err(format!(
                "default_rating must be between 1 and 5, got {}",
                self.default_rating
            ))
        }
    }

    /// Pull `default_rating` back onto the scale.
    pub fn normalize(&mut self) {
        self.default_rating = clamp_rating(self.default_rating as i64);
    }
}

pub fn default_rating() -> u8 {
    NEUTRAL_RATING
}
