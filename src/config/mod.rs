//! Configuration loaded from `.riskgrid.toml`.
//!
//! The file is looked up in the current directory and up to nine of its
//! ancestors. Every section is optional:
//!
//! ```toml
//! [assessment]
//! missing_rating = "neutral"   # or "skip"
//! default_rating = 3
//!
//! [output]
//! default_format = "terminal"  # terminal, json, markdown, html
//! use_color = true
//! ```

mod assessment;
mod core;
mod loader;

pub use assessment::{default_rating, AssessmentConfig, MissingRating};
pub use self::core::{OutputConfig, RiskgridConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
