//! CLI command implementations.
//!
//! - **score**: score a single likelihood/impact pair
//! - **heatmap**: draw the inherent or residual heat map of a register
//! - **report**: summarise, filter and sort a register
//! - **init**: write a default `.riskgrid.toml`

pub mod heatmap;
pub mod init;
pub mod report;
pub mod score;

pub use heatmap::{render_heat_map, HeatmapConfig};
pub use init::{init_config, init_config_in};
pub use report::{render_report, ReportConfig};
pub use score::{score_pair, ScoreConfig};

use crate::config::AssessmentConfig;
use crate::risk::{RegisterLoader, RiskRegister};
use anyhow::Result;
use std::path::Path;

/// Load a register file, logging anything normalisation had to paper over.
pub(crate) fn load_register(path: &Path, assessment: &AssessmentConfig) -> Result<RiskRegister> {
    let loaded = RegisterLoader::new(assessment.clone()).load(path)?;
    let report = &loaded.report;
    if !report.is_clean() {
        log::warn!(
            "{}: {} rating(s) defaulted to {}, {} risk(s) skipped, {} id(s) generated",
            path.display(),
            report.substituted_ratings,
            assessment.default_rating,
            report.skipped_risks.len(),
            report.generated_ids
        );
    }
    Ok(loaded.register)
}
