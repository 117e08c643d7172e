use serde::{Deserialize, Serialize};

use super::assessment::AssessmentConfig;

/// Root configuration structure for riskgrid
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RiskgridConfig {
    /// Handling of missing ratings in register data
    #[serde(default)]
    pub assessment: Option<AssessmentConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl RiskgridConfig {
    pub fn assessment(&self) -> AssessmentConfig {
        self.assessment.clone().unwrap_or_default()
    }

    /// Format name from `[output] default_format`, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output
            .as_ref()
            .and_then(|output| output.default_format.as_deref())
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref().and_then(|output| output.use_color)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
