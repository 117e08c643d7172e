pub mod assessment;
pub mod heatmap;
pub mod register;
pub mod summary;

pub use assessment::RiskAssessment;
pub use heatmap::{build_heat_map_matrix, HeatMapCell, HeatMapMatrix, GRID_SIZE};
pub use register::{
    AssessmentBasis, LoadReport, LoadedRegister, RegisterLoader, Risk, RiskFilter, RiskRegister,
    SortKey,
};
pub use summary::{RiskRow, RiskSummary};

use crate::scoring::RiskLevel;
use serde::Serialize;

/// Number of risks in each level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LevelDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

impl LevelDistribution {
    pub fn from_levels<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = RiskLevel>,
    {
        levels
            .into_iter()
            .fold(Self::default(), |mut distribution, level| {
                distribution.add(level, 1);
                distribution
            })
    }

    pub fn add(&mut self, level: RiskLevel, count: usize) {
        match level {
            RiskLevel::Low => self.low += count,
            RiskLevel::Medium => self.medium += count,
            RiskLevel::High => self.high += count,
            RiskLevel::Critical => self.critical += count,
        }
    }

    pub fn get(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Medium => self.medium,
            RiskLevel::High => self.high,
            RiskLevel::Critical => self.critical,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high + self.critical
    }

    /// Share of the total in `level`, 0.0 when nothing was counted.
    pub fn percentage(&self, level: RiskLevel) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.get(level) as f64 * 100.0 / total as f64,
        }
    }

    /// Levels paired with their counts, most severe first.
    pub fn by_severity(&self) -> impl Iterator<Item = (RiskLevel, usize)> + '_ {
        RiskLevel::ALL
            .iter()
            .rev()
            .map(move |&level| (level, self.get(level)))
    }
}
