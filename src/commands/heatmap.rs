use super::load_register;
use crate::config::AssessmentConfig;
use crate::formatting::FormattingConfig;
use crate::io::{self, create_writer, OutputFormat};
use crate::risk::{AssessmentBasis, HeatMapMatrix};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct HeatmapConfig {
    pub register: PathBuf,
    pub basis: AssessmentBasis,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub assessment: AssessmentConfig,
    pub formatting: FormattingConfig,
}

pub fn render_heat_map(config: HeatmapConfig) -> Result<HeatMapMatrix> {
    let register = load_register(&config.register, &config.assessment)?;
    let matrix = register.matrix(config.basis);

    let title = match config.basis {
        AssessmentBasis::Inherent => format!("{}: Inherent Heat Map", register.name),
        AssessmentBasis::Residual => format!("{}: Residual Heat Map", register.name),
    };
    log::info!("{} covers {} of {} risks", title, matrix.total(), register.len());

    let destination = io::output_destination(config.output.as_deref())?;
    let mut writer = create_writer(config.format, destination, config.formatting);
    writer.write_heat_map(&title, &matrix)?;
    writer.flush()?;

    if let Some(path) = &config.output {
        log::info!("Wrote heat map to {}", path.display());
    }
    Ok(matrix)
}
