//! Aggregate view of a register for reports.

use super::heatmap::HeatMapMatrix;
use super::register::{Risk, RiskRegister};
use super::LevelDistribution;
use crate::scoring::ScoreCard;
use serde::Serialize;

/// One report line per risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskRow {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub inherent: ScoreCard,
    pub residual: Option<ScoreCard>,
    pub reduction: Option<i16>,
}

impl From<&Risk> for RiskRow {
    fn from(risk: &Risk) -> Self {
        Self {
            id: risk.id.clone(),
            title: risk.title.clone(),
            category: risk.category.clone(),
            owner: risk.owner.clone(),
            inherent: risk.inherent.card(),
            residual: risk.residual.map(|residual| residual.card()),
            reduction: risk.score_reduction(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSummary {
    pub register: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub total_risks: usize,
    /// Risks with no residual assessment yet
    pub unassessed_residual: usize,
    pub average_inherent_score: f64,
    pub average_residual_score: Option<f64>,
    pub inherent_levels: LevelDistribution,
    pub residual_levels: LevelDistribution,
    pub inherent_matrix: HeatMapMatrix,
    pub residual_matrix: HeatMapMatrix,
    pub risks: Vec<RiskRow>,
}

impl RiskSummary {
    /// Summarise `register`, keeping its risk order for the rows.
    pub fn from_register(register: &RiskRegister) -> Self {
        let inherent_matrix = register.inherent_matrix();
        let residual_matrix = register.residual_matrix();

        let inherent_scores: Vec<f64> = register
            .risks
            .iter()
            .map(|risk| risk.inherent.score().value() as f64)
            .collect();
        let residual_scores: Vec<f64> = register
            .risks
            .iter()
            .filter_map(|risk| risk.residual)
            .map(|residual| residual.score().value() as f64)
            .collect();

        Self {
            register: register.name.clone(),
            description: register.description.clone(),
            total_risks: register.len(),
            unassessed_residual: register.len() - residual_scores.len(),
            average_inherent_score: mean(&inherent_scores).unwrap_or(0.0),
            average_residual_score: mean(&residual_scores),
            inherent_levels: inherent_matrix.level_counts(),
            residual_levels: residual_matrix.level_counts(),
            inherent_matrix,
            residual_matrix,
            risks: register.risks.iter().map(RiskRow::from).collect(),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
