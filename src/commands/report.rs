use super::load_register;
use crate::config::AssessmentConfig;
use crate::formatting::FormattingConfig;
use crate::io::{self, create_writer, OutputFormat};
use crate::risk::{RiskFilter, RiskSummary, SortKey};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub register: PathBuf,
    pub filter: RiskFilter,
    pub sort: SortKey,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub assessment: AssessmentConfig,
    pub formatting: FormattingConfig,
}

pub fn render_report(config: ReportConfig) -> Result<RiskSummary> {
    let register = load_register(&config.register, &config.assessment)?;
    let total = register.len();

    let mut selected = if config.filter.is_empty() {
        register
    } else {
        register.filtered(&config.filter)
    };
    selected.sort_by(config.sort);

    if selected.len() < total {
        log::info!("{} of {} risks match the filter", selected.len(), total);
    }

    let summary = RiskSummary::from_register(&selected);
    let destination = io::output_destination(config.output.as_deref())?;
    let mut writer = create_writer(config.format, destination, config.formatting);
    writer.write_summary(&summary)?;
    writer.flush()?;

    if let Some(path) = &config.output {
        log::info!("Wrote report to {}", path.display());
    }
    Ok(summary)
}
