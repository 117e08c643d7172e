//! Risk scoring and heat-map classification for enterprise risk registers.
//!
//! Likelihood and impact are rated on a 1-5 scale; their product is the risk
//! score, which maps onto four levels (Low, Medium, High, Critical) each with
//! a fixed display colour. Registers of risks can be loaded from JSON,
//! filtered, summarised and drawn as 5x5 heat maps.

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod risk;
pub mod scoring;

pub use crate::errors::{Error, Result};

pub use crate::scoring::{
    classify_level, color_for_level, compute_score, evaluate, Impact, LevelColor, Likelihood,
    RiskLevel, RiskScore, ScoreCard,
};

pub use crate::risk::{
    build_heat_map_matrix, AssessmentBasis, HeatMapMatrix, LevelDistribution, RegisterLoader,
    Risk, RiskAssessment, RiskFilter, RiskRegister, RiskSummary, SortKey,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
