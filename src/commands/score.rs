use crate::formatting::FormattingConfig;
use crate::io::{create_writer, OutputFormat};
use crate::scoring::{evaluate, ScoreCard, MAX_RATING, MIN_RATING};
use anyhow::Result;

#[derive(Debug, Clone, Copy)]
pub struct ScoreConfig {
    pub likelihood: i64,
    pub impact: i64,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

pub fn score_pair(config: ScoreConfig) -> Result<ScoreCard> {
    warn_if_clamped("likelihood", config.likelihood);
    warn_if_clamped("impact", config.impact);

    let card = evaluate(config.likelihood, config.impact);
    log::debug!(
        "Scored {} x {} = {} ({})",
        card.likelihood.value(),
        card.impact.value(),
        card.score,
        card.level
    );

    let mut writer = create_writer(
        config.format,
        Box::new(std::io::stdout()),
        config.formatting,
    );
    writer.write_score(&card)?;
    writer.flush()?;
    Ok(card)
}

fn warn_if_clamped(name: &str, value: i64) {
    if !(MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
        log::warn!(
            "{} {} is outside {}-{}; clamped",
            name,
            value,
            MIN_RATING,
            MAX_RATING
        );
    }
}
