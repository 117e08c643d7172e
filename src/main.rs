use anyhow::Result;
use clap::Parser;
use riskgrid::cli::{Cli, Commands};
use riskgrid::commands::{self, HeatmapConfig, ReportConfig, ScoreConfig};
use riskgrid::config::{self, RiskgridConfig};
use riskgrid::formatting::{ColorMode, FormattingConfig};
use riskgrid::io::OutputFormat;
use riskgrid::risk::{AssessmentBasis, RiskFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    let settings = match &cli.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config(),
    };
    let formatting = create_formatting_config(cli.plain, &settings);
    formatting.apply();

    match cli.command {
        Commands::Score {
            likelihood,
            impact,
            format,
        } => {
            commands::score_pair(ScoreConfig {
                likelihood,
                impact,
                format: resolve_format(format, &settings),
                formatting,
            })?;
        }
        Commands::Heatmap {
            register,
            residual,
            format,
            output,
        } => {
            commands::render_heat_map(HeatmapConfig {
                register,
                basis: basis_for(residual),
                format: resolve_format(format, &settings),
                output,
                assessment: settings.assessment(),
                formatting,
            })?;
        }
        Commands::Report {
            register,
            format,
            output,
            min_level,
            residual,
            search,
            category,
            owner,
            sort,
        } => {
            let filter = RiskFilter {
                basis: basis_for(residual),
                min_level,
                category,
                owner,
                query: search,
            };
            commands::render_report(ReportConfig {
                register,
                filter,
                sort: sort.into(),
                format: resolve_format(format, &settings),
                output,
                assessment: settings.assessment(),
                formatting,
            })?;
        }
        Commands::Init { force } => commands::init_config(force)?,
    }

    Ok(())
}

// RUST_LOG, when set, overrides the -v flags
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn create_formatting_config(plain: bool, settings: &RiskgridConfig) -> FormattingConfig {
    if plain {
        return FormattingConfig::plain();
    }
    // use_color = true still leaves the decision to the terminal
    match settings.use_color() {
        Some(false) => FormattingConfig::new(ColorMode::Never),
        _ => FormattingConfig::from_env(),
    }
}

fn resolve_format(flag: Option<OutputFormat>, settings: &RiskgridConfig) -> OutputFormat {
    flag.or_else(|| {
        let name = settings.default_format()?;
        let parsed = OutputFormat::parse(name);
        if parsed.is_none() {
            log::warn!("Unknown default_format '{}' in config; using terminal", name);
        }
        parsed
    })
    .unwrap_or_default()
}

fn basis_for(residual: bool) -> AssessmentBasis {
    if residual {
        AssessmentBasis::Residual
    } else {
        AssessmentBasis::Inherent
    }
}
