use crate::io::OutputFormat;
use crate::risk::SortKey;
use crate::scoring::RiskLevel;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortArg {
    /// Highest inherent score first
    #[default]
    Score,
    /// Title, alphabetically
    Title,
    /// Risk id
    Id,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Score => SortKey::Score,
            SortArg::Title => SortKey::Title,
            SortArg::Id => SortKey::Id,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "riskgrid")]
#[command(about = "Risk scoring and heat-map classification for risk registers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Disable colored output
    #[arg(long = "plain", global = true)]
    pub plain: bool,

    /// Configuration file (defaults to the nearest .riskgrid.toml)
    #[arg(long = "config", global = true, env = "RISKGRID_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a single likelihood/impact pair
    #[command(allow_negative_numbers = true)]
    Score {
        /// Likelihood rating (1-5, clamped)
        likelihood: i64,

        /// Impact rating (1-5, clamped)
        impact: i64,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Draw the heat map of a register
    Heatmap {
        /// Register file (JSON)
        register: PathBuf,

        /// Use residual instead of inherent assessments
        #[arg(long)]
        residual: bool,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise a register with level counts, heat maps and a risk table
    Report {
        /// Register file (JSON)
        register: PathBuf,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Minimum level to include (low, medium, high, critical)
        #[arg(long = "min-level")]
        min_level: Option<RiskLevel>,

        /// Apply --min-level to residual assessments
        #[arg(long)]
        residual: bool,

        /// Case-insensitive text search over id, title, category and owner
        #[arg(long)]
        search: Option<String>,

        /// Only risks in this category
        #[arg(long)]
        category: Option<String>,

        /// Only risks with this owner
        #[arg(long)]
        owner: Option<String>,

        /// Row order
        #[arg(long, value_enum, default_value = "score")]
        sort: SortArg,
    },

    /// Write a default .riskgrid.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn score_accepts_negative_ratings() {
        let cli = Cli::try_parse_from(["riskgrid", "score", "-2", "9"]).unwrap();
        match cli.command {
            Commands::Score {
                likelihood, impact, ..
            } => {
                assert_eq!(likelihood, -2);
                assert_eq!(impact, 9);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn report_parses_filters() {
        let cli = Cli::try_parse_from([
            "riskgrid",
            "report",
            "register.json",
            "--min-level",
            "high",
            "--sort",
            "title",
            "-vv",
            "--plain",
        ])
        .unwrap();

        assert_eq!(cli.verbosity, 2);
        assert!(cli.plain);
        match cli.command {
            Commands::Report {
                min_level, sort, ..
            } => {
                assert_eq!(min_level, Some(RiskLevel::High));
                assert_eq!(SortKey::from(sort), SortKey::Title);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_level() {
        let result =
            Cli::try_parse_from(["riskgrid", "report", "r.json", "--min-level", "severe"]);
        assert!(result.is_err());
    }
}
