use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# riskgrid configuration

[assessment]
# What to do with a risk whose likelihood or impact was never rated:
#   "neutral" scores the missing rating as default_rating
#   "skip" leaves the risk (or its residual assessment) out
missing_rating = "neutral"
default_rating = 3

[output]
# terminal, json, markdown or html
default_format = "terminal"
use_color = true
"#;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

/// Write the default configuration into `dir`, returning the file's path.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    log::debug!("Wrote default configuration to {}", config_path.display());
    Ok(config_path)
}
