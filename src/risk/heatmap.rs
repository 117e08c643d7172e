//! 5x5 heat-map matrix of risk counts.
//!
//! Rows are indexed by likelihood and columns by impact, both zero-based, so
//! `rows()[likelihood - 1][impact - 1]` is the number of assessments with that
//! exact rating pair.

use super::assessment::RiskAssessment;
use super::LevelDistribution;
use crate::scoring::{Impact, Likelihood, RiskLevel, RiskScore, MAX_RATING};
use serde::Serialize;

/// Cells per side of the grid.
pub const GRID_SIZE: usize = MAX_RATING as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct HeatMapMatrix {
    cells: [[u32; GRID_SIZE]; GRID_SIZE],
}

/// One cell of the grid along with the severity it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatMapCell {
    pub likelihood: Likelihood,
    pub impact: Impact,
    pub count: u32,
    pub score: RiskScore,
    pub level: RiskLevel,
}

impl HeatMapCell {
    /// The assessment produced by selecting this cell.
    pub fn assessment(&self) -> RiskAssessment {
        RiskAssessment::new(self.likelihood, self.impact)
    }
}

impl HeatMapMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_assessments<'a, I>(assessments: I) -> Self
    where
        I: IntoIterator<Item = &'a RiskAssessment>,
    {
        assessments
            .into_iter()
            .fold(Self::new(), |mut matrix, assessment| {
                matrix.record(assessment);
                matrix
            })
    }

    pub fn record(&mut self, assessment: &RiskAssessment) {
        self.cells[assessment.likelihood.index()][assessment.impact.index()] += 1;
    }

    pub fn count(&self, likelihood: Likelihood, impact: Impact) -> u32 {
        self.cells[likelihood.index()][impact.index()]
    }

    pub fn rows(&self) -> &[[u32; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    /// Sum of all cells; equals the number of recorded assessments.
    pub fn total(&self) -> usize {
        self.cells.iter().flatten().map(|&count| count as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Largest single-cell count; 0 for an empty matrix.
    pub fn max_count(&self) -> u32 {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Cells in drawing order: likelihood 5 down to 1, impact 1 up to 5
    /// within each row.
    pub fn cells(&self) -> impl Iterator<Item = HeatMapCell> + '_ {
        Likelihood::all().rev().flat_map(move |likelihood| {
            Impact::all().map(move |impact| {
                let score = RiskScore::from_ratings(likelihood, impact);
                HeatMapCell {
                    likelihood,
                    impact,
                    count: self.count(likelihood, impact),
                    score,
                    level: score.level(),
                }
            })
        })
    }

    /// How many recorded assessments fall into each level.
    pub fn level_counts(&self) -> LevelDistribution {
        self.cells()
            .fold(LevelDistribution::default(), |mut distribution, cell| {
                distribution.add(cell.level, cell.count as usize);
                distribution
            })
    }
}

/// Count assessments per (likelihood, impact) cell.
pub fn build_heat_map_matrix<'a, I>(assessments: I) -> HeatMapMatrix
where
    I: IntoIterator<Item = &'a RiskAssessment>,
{
    HeatMapMatrix::from_assessments(assessments)
}
