//! Risk registers: named lists of risks, each owning an inherent and an
//! optional residual assessment.
//!
//! Registers are stored as plain JSON. Stored ratings are loosely typed
//! (numbers, numeric strings, blanks), so loading goes through
//! [`RegisterLoader`], which normalises every rating once and applies the
//! configured missing-rating policy. Past that boundary every assessment is a
//! clamped, typed [`RiskAssessment`].

use super::assessment::RiskAssessment;
use super::heatmap::HeatMapMatrix;
use crate::config::{AssessmentConfig, MissingRating};
use crate::errors::{Error, Result, ResultExt};
use crate::scoring::{parse_rating, Impact, Likelihood, RiskLevel};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;
use std::path::Path;

const UNTITLED: &str = "Untitled risk";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub inherent: RiskAssessment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residual: Option<RiskAssessment>,
}

impl Risk {
    pub fn new(id: impl Into<String>, title: impl Into<String>, inherent: RiskAssessment) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: None,
            owner: None,
            inherent,
            residual: None,
        }
    }

    pub fn with_residual(mut self, residual: RiskAssessment) -> Self {
        self.residual = Some(residual);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn assessment(&self, basis: AssessmentBasis) -> Option<&RiskAssessment> {
        match basis {
            AssessmentBasis::Inherent => Some(&self.inherent),
            AssessmentBasis::Residual => self.residual.as_ref(),
        }
    }

    /// Score reduction achieved by controls, if a residual assessment exists.
    /// Negative when the residual rating is worse than the inherent one.
    pub fn score_reduction(&self) -> Option<i16> {
        self.residual.map(|residual| {
            self.inherent.score().value() as i16 - residual.score().value() as i16
        })
    }

    fn matches_query(&self, needle: &str) -> bool {
        let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
        contains(&self.title)
            || contains(&self.id)
            || self.category.as_deref().is_some_and(contains)
            || self.owner.as_deref().is_some_and(contains)
    }
}

/// Which of a risk's two assessments an operation looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentBasis {
    #[default]
    Inherent,
    Residual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest score first, ties by id
    #[default]
    Score,
    Title,
    Id,
}

/// Criteria for narrowing a register. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct RiskFilter {
    pub basis: AssessmentBasis,
    pub min_level: Option<RiskLevel>,
    pub category: Option<String>,
    pub owner: Option<String>,
    pub query: Option<String>,
}

impl RiskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn basis(mut self, basis: AssessmentBasis) -> Self {
        self.basis = basis;
        self
    }

    pub fn min_level(mut self, level: RiskLevel) -> Self {
        self.min_level = Some(level);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.min_level.is_none()
            && self.category.is_none()
            && self.owner.is_none()
            && self.query.is_none()
    }

    /// A risk without an assessment on the filter's basis never satisfies a
    /// minimum level.
    pub fn matches(&self, risk: &Risk) -> bool {
        let level_ok = self.min_level.is_none_or(|min| {
            risk.assessment(self.basis)
                .is_some_and(|assessment| assessment.level() >= min)
        });

        level_ok
            && field_matches(self.category.as_deref(), risk.category.as_deref())
            && field_matches(self.owner.as_deref(), risk.owner.as_deref())
            && self
                .query
                .as_deref()
                .is_none_or(|query| risk.matches_query(&query.trim().to_lowercase()))
    }
}

fn field_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => {
            actual.is_some_and(|actual| actual.trim().eq_ignore_ascii_case(wanted.trim()))
        }
    }
}

fn compare_risks(a: &Risk, b: &Risk, key: SortKey) -> Ordering {
    match key {
        SortKey::Score => Reverse(a.inherent.score())
            .cmp(&Reverse(b.inherent.score()))
            .then_with(|| a.id.cmp(&b.id)),
        SortKey::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.id.cmp(&b.id)),
        SortKey::Id => a.id.cmp(&b.id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRegister {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub risks: Vec<Risk>,
}

impl RiskRegister {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            risks: Vec::new(),
        }
    }

    pub fn with_risks(name: impl Into<String>, risks: Vec<Risk>) -> Self {
        Self {
            risks,
            ..Self::new(name)
        }
    }

    pub fn len(&self) -> usize {
        self.risks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Risk> {
        self.risks.iter().find(|risk| risk.id == id)
    }

    /// Ids must be non-blank and unique within a register.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for risk in &self.risks {
            if risk.id.trim().is_empty() {
                return Err(Error::Validation(format!(
                    "risk '{}' has an empty id",
                    risk.title
                )));
            }
            if !seen.insert(risk.id.as_str()) {
                return Err(Error::Validation(format!(
                    "duplicate risk id '{}' in register '{}'",
                    risk.id, self.name
                )));
            }
        }
        Ok(())
    }

    pub fn matrix(&self, basis: AssessmentBasis) -> HeatMapMatrix {
        HeatMapMatrix::from_assessments(
            self.risks
                .iter()
                .filter_map(|risk| risk.assessment(basis)),
        )
    }

    pub fn inherent_matrix(&self) -> HeatMapMatrix {
        self.matrix(AssessmentBasis::Inherent)
    }

    /// Only risks that have a residual assessment are counted.
    pub fn residual_matrix(&self) -> HeatMapMatrix {
        self.matrix(AssessmentBasis::Residual)
    }

    /// Copy of the register holding only risks that match `filter`.
    pub fn filtered(&self, filter: &RiskFilter) -> RiskRegister {
        RiskRegister {
            name: self.name.clone(),
            description: self.description.clone(),
            risks: self
                .risks
                .iter()
                .filter(|risk| filter.matches(risk))
                .cloned()
                .collect(),
        }
    }

    /// Case-insensitive substring search over id, title, category and owner.
    /// A blank query matches every risk.
    pub fn search(&self, query: &str) -> Vec<&Risk> {
        let needle = query.trim().to_lowercase();
        self.risks
            .iter()
            .filter(|risk| risk.matches_query(&needle))
            .collect()
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.risks.sort_by(|a, b| compare_risks(a, b, key));
    }

    pub fn sorted_by(&self, key: SortKey) -> Vec<&Risk> {
        let mut sorted: Vec<&Risk> = self.risks.iter().collect();
        sorted.sort_by(|a, b| compare_risks(a, b, key));
        sorted
    }

    /// Load and normalise a register file with the given assessment settings.
    pub fn load(path: &Path, config: &AssessmentConfig) -> Result<LoadedRegister> {
        RegisterLoader::new(config.clone()).load(path)
    }
}

/// What normalisation had to do to turn stored records into risks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Rating fields filled with the default rating
    pub substituted_ratings: usize,
    /// Ids of risks left out because their inherent rating was missing
    pub skipped_risks: Vec<String>,
    /// Risks that had no id and were given a positional one
    pub generated_ids: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.substituted_ratings == 0 && self.skipped_risks.is_empty() && self.generated_ids == 0
    }
}

#[derive(Debug, Clone)]
pub struct LoadedRegister {
    pub register: RiskRegister,
    pub report: LoadReport,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegister {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    risks: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawRatings {
    likelihood: Option<Value>,
    impact: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRisk {
    id: Option<Value>,
    #[serde(alias = "name")]
    title: Option<String>,
    category: Option<String>,
    owner: Option<String>,
    inherent: Option<RawRatings>,
    residual: Option<RawRatings>,
    #[serde(alias = "inherent_likelihood", alias = "likelihood")]
    inherent_likelihood: Option<Value>,
    #[serde(alias = "inherent_impact", alias = "impact")]
    inherent_impact: Option<Value>,
    #[serde(alias = "residual_likelihood")]
    residual_likelihood: Option<Value>,
    #[serde(alias = "residual_impact")]
    residual_impact: Option<Value>,
}

/// Read one stored rating. `None` means "not assessed": absent, null, zero,
/// or anything without a leading number.
fn read_rating(value: Option<&Value>) -> Option<u8> {
    match value? {
        Value::Number(number) => {
            let whole = number
                .as_i64()
                .or_else(|| number.as_f64().map(|f| f.trunc() as i64))?;
            (whole != 0).then(|| crate::scoring::clamp_rating(whole))
        }
        Value::String(text) => parse_rating(text),
        _ => None,
    }
}

fn pick<'a>(nested: Option<&'a Value>, flat: Option<&'a Value>) -> Option<&'a Value> {
    nested.filter(|v| !v.is_null()).or(flat)
}

fn id_text(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Turns stored register JSON into a validated [`RiskRegister`].
#[derive(Debug, Clone, Default)]
pub struct RegisterLoader {
    config: AssessmentConfig,
}

impl RegisterLoader {
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    pub fn load(&self, path: &Path) -> Result<LoadedRegister> {
        let context = || format!("Loading register {}", path.display());
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io_at(e, path).with_context(context()))?;
        let fallback_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "register".to_string());

        self.parse(&contents, &fallback_name).context(context())
    }

    /// Parse register JSON. Accepts either a register object
    /// (`{"name": ..., "risks": [...]}`) or a bare array of risks, in which
    /// case the register is named `fallback_name`. A register object must
    /// carry `risks`; keys other than `name` and `description` are rejected.
    pub fn parse(&self, contents: &str, fallback_name: &str) -> Result<LoadedRegister> {
        let (name, description, records) = match serde_json::from_str::<Value>(contents)? {
            Value::Array(records) => (None, None, records),
            Value::Object(map) => {
                let register: RawRegister = serde_json::from_value(Value::Object(map))
                    .map_err(|e| Error::Register(format!("invalid register object: {}", e)))?;
                (register.name, register.description, register.risks)
            }
            _ => {
                return Err(Error::Register(
                    "expected an array of risks or an object with a \"risks\" array".to_string(),
                ))
            }
        };
        let raw_risks = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                serde_json::from_value::<RawRisk>(record)
                    .map_err(|e| Error::Register(format!("risk record {}: {}", index + 1, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut report = LoadReport::default();
        let risks = raw_risks
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| self.normalize_risk(index, raw, &mut report))
            .collect();

        let register = RiskRegister {
            name: non_blank(name).unwrap_or_else(|| fallback_name.to_string()),
            description: non_blank(description),
            risks,
        };
        register.validate()?;

        log::info!(
            "Loaded register '{}' with {} risks ({} skipped, {} ratings defaulted)",
            register.name,
            register.len(),
            report.skipped_risks.len(),
            report.substituted_ratings
        );

        Ok(LoadedRegister { register, report })
    }

    fn normalize_risk(&self, index: usize, raw: RawRisk, report: &mut LoadReport) -> Option<Risk> {
        let id = id_text(raw.id.as_ref()).unwrap_or_else(|| {
            report.generated_ids += 1;
            let generated = format!("risk-{}", index + 1);
            log::debug!("Record {} has no id, using '{}'", index + 1, generated);
            generated
        });

        let inherent = raw.inherent.unwrap_or_default();
        let inherent_likelihood = read_rating(pick(
            inherent.likelihood.as_ref(),
            raw.inherent_likelihood.as_ref(),
        ));
        let inherent_impact = read_rating(pick(
            inherent.impact.as_ref(),
            raw.inherent_impact.as_ref(),
        ));

        let inherent = match (inherent_likelihood, inherent_impact) {
            (Some(l), Some(i)) => assessment(l, i),
            (l, i) => match self.config.missing_rating {
                MissingRating::Skip => {
                    log::warn!("Skipping risk '{}': inherent rating not assessed", id);
                    report.skipped_risks.push(id);
                    return None;
                }
                MissingRating::Neutral => self.fill_missing(&id, "inherent", l, i, report),
            },
        };

        let residual = raw.residual.unwrap_or_default();
        let residual_likelihood = read_rating(pick(
            residual.likelihood.as_ref(),
            raw.residual_likelihood.as_ref(),
        ));
        let residual_impact = read_rating(pick(
            residual.impact.as_ref(),
            raw.residual_impact.as_ref(),
        ));

        let residual = match (residual_likelihood, residual_impact) {
            (Some(l), Some(i)) => Some(assessment(l, i)),
            (None, None) => None,
            (l, i) => match self.config.missing_rating {
                MissingRating::Skip => {
                    log::debug!("Risk '{}' has a partial residual rating, ignoring it", id);
                    None
                }
                MissingRating::Neutral => Some(self.fill_missing(&id, "residual", l, i, report)),
            },
        };

        Some(Risk {
            title: non_blank(raw.title).unwrap_or_else(|| UNTITLED.to_string()),
            category: non_blank(raw.category),
            owner: non_blank(raw.owner),
            id,
            inherent,
            residual,
        })
    }

    fn fill_missing(
        &self,
        id: &str,
        which: &str,
        likelihood: Option<u8>,
        impact: Option<u8>,
        report: &mut LoadReport,
    ) -> RiskAssessment {
        let default = self.config.default_rating;
        let mut fill = |value: Option<u8>, field: &str| {
            value.unwrap_or_else(|| {
                log::warn!(
                    "Risk '{}' has no {} {}; assuming {}",
                    id,
                    which,
                    field,
                    default
                );
                report.substituted_ratings += 1;
                default
            })
        };
        let likelihood = fill(likelihood, "likelihood");
        let impact = fill(impact, "impact");
        assessment(likelihood, impact)
    }
}

fn assessment(likelihood: u8, impact: u8) -> RiskAssessment {
    RiskAssessment::new(
        Likelihood::new(likelihood as i64),
        Impact::new(impact as i64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn sample_register() -> RiskRegister {
        RiskRegister::with_risks(
            "Operations",
            vec![
                Risk::new("R-1", "Tailings dam failure", RiskAssessment::from_values(2, 5))
                    .with_category("Environmental")
                    .with_owner("Site Manager")
                    .with_residual(RiskAssessment::from_values(1, 5)),
                Risk::new("R-2", "Haul truck collision", RiskAssessment::from_values(3, 4))
                    .with_category("Safety")
                    .with_owner("HSE Lead"),
                Risk::new("R-3", "Diesel price spike", RiskAssessment::from_values(4, 2))
                    .with_category("Financial")
                    .with_residual(RiskAssessment::from_values(3, 2)),
                Risk::new("R-4", "Ventilation fan outage", RiskAssessment::from_values(1, 2))
                    .with_category("safety"),
            ],
        )
    }

    fn ids(risks: &[&Risk]) -> Vec<String> {
        risks.iter().map(|risk| risk.id.clone()).collect()
    }

    fn loader(missing_rating: MissingRating) -> RegisterLoader {
        RegisterLoader::new(AssessmentConfig {
            missing_rating,
            ..Default::default()
        })
    }

    mod records {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn score_reduction_compares_inherent_and_residual() {
            let register = sample_register();
            assert_eq!(register.get("R-1").unwrap().score_reduction(), Some(5));
            assert_eq!(register.get("R-2").unwrap().score_reduction(), None);
        }

        #[test]
        fn validate_rejects_duplicate_ids() {
            let mut register = sample_register();
            register.risks.push(Risk::new(
                "R-2",
                "Duplicate",
                RiskAssessment::default(),
            ));
            assert!(matches!(register.validate(), Err(Error::Validation(_))));
        }

        #[test]
        fn validate_rejects_blank_ids() {
            let register = RiskRegister::with_risks(
                "Blank",
                vec![Risk::new("  ", "No id", RiskAssessment::default())],
            );
            assert!(register.validate().is_err());
        }

        #[test]
        fn matrices_follow_basis() {
            let register = sample_register();
            assert_eq!(register.inherent_matrix().total(), 4);
            assert_eq!(register.residual_matrix().total(), 2);
            assert_eq!(
                register
                    .residual_matrix()
                    .count(Likelihood::new(1), Impact::new(5)),
                1
            );
        }
    }

    mod querying {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn search_is_case_insensitive_over_fields() {
            let register = sample_register();
            assert_eq!(ids(&register.search("TRUCK")), vec!["R-2"]);
            assert_eq!(ids(&register.search("hse")), vec!["R-2"]);
            assert_eq!(ids(&register.search("safety")), vec!["R-2", "R-4"]);
            assert_eq!(register.search("  ").len(), 4);
            assert!(register.search("flood").is_empty());
        }

        #[test]
        fn filter_by_min_level_on_inherent() {
            let register = sample_register();
            let filtered = register.filtered(&RiskFilter::new().min_level(RiskLevel::High));
            let ids: Vec<&str> = filtered.risks.iter().map(|r| r.id.as_str()).collect();
            assert_eq!(ids, vec!["R-1", "R-2"]);
        }

        #[test]
        fn residual_basis_excludes_unassessed_risks() {
            let register = sample_register();
            let filter = RiskFilter::new()
                .basis(AssessmentBasis::Residual)
                .min_level(RiskLevel::Medium);
            let ids: Vec<String> = register
                .filtered(&filter)
                .risks
                .into_iter()
                .map(|r| r.id)
                .collect();
            assert_eq!(ids, vec!["R-1", "R-3"]);
        }

        #[test]
        fn filter_by_category_ignores_case() {
            let register = sample_register();
            let filtered = register.filtered(&RiskFilter::new().category("SAFETY"));
            assert_eq!(filtered.len(), 2);
        }

        #[test]
        fn filter_criteria_combine() {
            let register = sample_register();
            let filter = RiskFilter::new()
                .category("safety")
                .min_level(RiskLevel::Medium);
            let filtered = register.filtered(&filter);
            assert_eq!(filtered.len(), 1);
            assert_eq!(filtered.risks[0].id, "R-2");
        }

        #[test]
        fn empty_filter_keeps_everything() {
            let register = sample_register();
            assert!(RiskFilter::new().is_empty());
            assert_eq!(register.filtered(&RiskFilter::new()), register);
        }

        #[test]
        fn sort_by_score_descending_then_id() {
            let register = sample_register();
            // R-2 = 12, R-1 = 10, R-3 = 8, R-4 = 2
            assert_eq!(
                ids(&register.sorted_by(SortKey::Score)),
                vec!["R-2", "R-1", "R-3", "R-4"]
            );
        }

        #[test]
        fn sort_by_title() {
            let register = sample_register();
            assert_eq!(
                ids(&register.sorted_by(SortKey::Title)),
                vec!["R-3", "R-2", "R-1", "R-4"]
            );
        }

        #[test]
        fn score_ties_break_on_id() {
            let mut register = RiskRegister::with_risks(
                "Ties",
                vec![
                    Risk::new("B", "b", RiskAssessment::from_values(2, 3)),
                    Risk::new("A", "a", RiskAssessment::from_values(3, 2)),
                ],
            );
            register.sort_by(SortKey::Score);
            assert_eq!(register.risks[0].id, "A");
        }
    }

    mod loading {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn parses_flat_camel_case_records() {
            let loaded = loader(MissingRating::Neutral)
                .parse(
                    indoc! {r#"
                    {
                        "name": "Mine Site A",
                        "risks": [
                            {"id": "R-1", "title": "Pit wall collapse", "category": "Safety",
                             "inherentLikelihood": 3, "inherentImpact": "5",
                             "residualLikelihood": 2, "residualImpact": 4}
                        ]
                    }
                "#},
                    "fallback",
                )
                .unwrap();

            assert_eq!(loaded.register.name, "Mine Site A");
            let risk = &loaded.register.risks[0];
            assert_eq!(risk.inherent, RiskAssessment::from_values(3, 5));
            assert_eq!(risk.residual, Some(RiskAssessment::from_values(2, 4)));
            assert_eq!(risk.inherent.level(), RiskLevel::Critical);
            assert!(loaded.report.is_clean());
        }

        #[test]
        fn parses_nested_records_and_bare_arrays() {
            let loaded = loader(MissingRating::Neutral)
                .parse(
                    r#"[{"id": 7, "name": "Data breach",
                         "inherent": {"likelihood": 4, "impact": 4},
                         "residual": {"likelihood": 2, "impact": 4}}]"#,
                    "cyber",
                )
                .unwrap();

            assert_eq!(loaded.register.name, "cyber");
            let risk = &loaded.register.risks[0];
            assert_eq!(risk.id, "7");
            assert_eq!(risk.title, "Data breach");
            assert_eq!(risk.inherent.score().value(), 16);
            assert_eq!(risk.score_reduction(), Some(8));
        }

        #[test]
        fn round_trips_serialized_register() {
            let register = sample_register();
            let json = serde_json::to_string(&register).unwrap();
            let loaded = loader(MissingRating::Neutral)
                .parse(&json, "unused")
                .unwrap();
            assert_eq!(loaded.register, register);
        }

        #[test]
        fn out_of_range_values_are_clamped() {
            let loaded = loader(MissingRating::Neutral)
                .parse(
                    r#"[{"id": "R-1", "likelihood": 9, "impact": -4}]"#,
                    "clamped",
                )
                .unwrap();
            assert_eq!(
                loaded.register.risks[0].inherent,
                RiskAssessment::from_values(5, 1)
            );
        }

        #[test]
        fn neutral_policy_substitutes_default_rating() {
            let loaded = loader(MissingRating::Neutral)
                .parse(
                    r#"[{"id": "R-1", "inherentLikelihood": "", "inherentImpact": 4},
                        {"id": "R-2", "inherentLikelihood": 0, "inherentImpact": null}]"#,
                    "gaps",
                )
                .unwrap();

            let risks = &loaded.register.risks;
            assert_eq!(risks[0].inherent, RiskAssessment::from_values(3, 4));
            assert_eq!(risks[1].inherent, RiskAssessment::from_values(3, 3));
            assert_eq!(risks[0].residual, None);
            assert_eq!(loaded.report.substituted_ratings, 3);
        }

        #[test]
        fn neutral_policy_uses_configured_default() {
            let loader = RegisterLoader::new(AssessmentConfig {
                missing_rating: MissingRating::Neutral,
                default_rating: 1,
            });
            let loaded = loader
                .parse(r#"[{"id": "R-1", "inherentImpact": 5}]"#, "gaps")
                .unwrap();
            assert_eq!(
                loaded.register.risks[0].inherent,
                RiskAssessment::from_values(1, 5)
            );
        }

        #[test]
        fn skip_policy_drops_unassessed_risks() {
            let loaded = loader(MissingRating::Skip)
                .parse(
                    r#"[{"id": "R-1", "inherentLikelihood": 2, "inherentImpact": 2},
                        {"id": "R-2", "inherentLikelihood": 4},
                        {"id": "R-3", "inherentLikelihood": 1, "inherentImpact": 1,
                         "residualLikelihood": 1}]"#,
                    "skip",
                )
                .unwrap();

            let ids: Vec<&str> = loaded
                .register
                .risks
                .iter()
                .map(|r| r.id.as_str())
                .collect();
            assert_eq!(ids, vec!["R-1", "R-3"]);
            assert_eq!(loaded.report.skipped_risks, vec!["R-2".to_string()]);
            assert_eq!(loaded.register.risks[1].residual, None);
            assert_eq!(loaded.report.substituted_ratings, 0);
        }

        #[test]
        fn missing_ids_and_titles_get_placeholders() {
            let loaded = loader(MissingRating::Neutral)
                .parse(
                    r#"[{"likelihood": 2, "impact": 2}, {"title": "  ", "likelihood": 1, "impact": 1}]"#,
                    "anon",
                )
                .unwrap();
            let risks = &loaded.register.risks;
            assert_eq!(risks[0].id, "risk-1");
            assert_eq!(risks[1].id, "risk-2");
            assert_eq!(risks[1].title, UNTITLED);
            assert_eq!(loaded.report.generated_ids, 2);
        }

        #[test]
        fn duplicate_ids_fail_loading() {
            let result = loader(MissingRating::Neutral).parse(
                r#"[{"id": "R-1", "likelihood": 1, "impact": 1},
                    {"id": "R-1", "likelihood": 2, "impact": 2}]"#,
                "dupes",
            );
            assert!(matches!(result, Err(Error::Validation(_))));
        }

        #[test]
        fn malformed_json_is_an_error() {
            let result = loader(MissingRating::Neutral).parse("{not json", "broken");
            assert!(matches!(result, Err(Error::Json(_))));
        }

        #[test]
        fn wrong_shape_is_a_register_error() {
            let result = loader(MissingRating::Neutral).parse(r#""just a string""#, "odd");
            assert!(matches!(result, Err(Error::Register(_))));
        }

        #[test]
        fn misspelled_risks_key_is_rejected() {
            let result = loader(MissingRating::Neutral).parse(
                r#"{"name": "Ops", "Risks": [{"id": "A", "likelihood": 5, "impact": 5}]}"#,
                "ops",
            );
            match result {
                Err(Error::Register(message)) => assert!(message.contains("Risks"), "{}", message),
                other => panic!("expected a register error, got {:?}", other),
            }
        }

        #[test]
        fn single_risk_object_is_not_a_register() {
            let result = loader(MissingRating::Neutral)
                .parse(r#"{"id": "A", "likelihood": 5, "impact": 5}"#, "single");
            assert!(matches!(result, Err(Error::Register(_))));
        }

        #[test]
        fn register_object_without_risks_is_rejected() {
            let result = loader(MissingRating::Neutral).parse(r#"{"name": "Ops"}"#, "ops");
            match result {
                Err(Error::Register(message)) => assert!(message.contains("risks"), "{}", message),
                other => panic!("expected a register error, got {:?}", other),
            }
        }

        #[test]
        fn empty_risks_array_is_an_empty_register() {
            let loaded = loader(MissingRating::Neutral)
                .parse(r#"{"name": "Ops", "risks": []}"#, "ops")
                .unwrap();
            assert!(loaded.register.is_empty());
        }

        #[test]
        fn bad_record_error_names_its_position() {
            let result = loader(MissingRating::Neutral).parse(
                r#"[{"id": "A", "likelihood": 1, "impact": 1},
                    {"id": "B", "title": "Flood", "name": "Flooding"}]"#,
                "dupes",
            );
            match result {
                Err(Error::Register(message)) => {
                    assert!(message.starts_with("risk record 2:"), "{}", message);
                    assert!(message.contains("title"), "{}", message);
                }
                other => panic!("expected a register error, got {:?}", other),
            }
        }

        #[test]
        fn load_reads_file_and_names_from_stem() {
            let temp = tempfile::TempDir::new().unwrap();
            let path = temp.path().join("quarterly.json");
            std::fs::write(&path, r#"[{"id": "R-1", "likelihood": 5, "impact": 5}]"#).unwrap();

            let loaded = RiskRegister::load(&path, &AssessmentConfig::default()).unwrap();
            assert_eq!(loaded.register.name, "quarterly");
            assert_eq!(loaded.register.risks[0].inherent.level(), RiskLevel::Critical);
        }

        #[test]
        fn load_reports_missing_file_with_context() {
            let temp = tempfile::TempDir::new().unwrap();
            let err = RiskRegister::load(&temp.path().join("absent.json"), &Default::default())
                .unwrap_err();
            assert!(matches!(err, Error::WithContext { .. }));
            assert!(err.to_string().contains("absent.json"));
        }
    }

    #[test]
    fn read_rating_handles_json_shapes() {
        assert_eq!(read_rating(Some(&Value::from(4))), Some(4));
        assert_eq!(read_rating(Some(&Value::from(3.9))), Some(3));
        assert_eq!(read_rating(Some(&Value::from("2"))), Some(2));
        assert_eq!(read_rating(Some(&Value::from(0))), None);
        assert_eq!(read_rating(Some(&Value::Bool(true))), None);
        assert_eq!(read_rating(Some(&Value::Null)), None);
        assert_eq!(read_rating(None), None);
    }
}
