use pretty_assertions::assert_eq;
use riskgrid::config::{AssessmentConfig, MissingRating};
use riskgrid::*;
use std::path::PathBuf;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/plant_register.json")
}

fn skip_config() -> AssessmentConfig {
    AssessmentConfig {
        missing_rating: MissingRating::Skip,
        ..AssessmentConfig::default()
    }
}

#[test]
fn neutral_policy_fills_missing_ratings() {
    let loaded = RiskRegister::load(&fixture(), &AssessmentConfig::default()).unwrap();
    let register = &loaded.register;

    assert_eq!(register.name, "Plant Operations");
    assert_eq!(register.len(), 5);
    assert_eq!(loaded.report.substituted_ratings, 1);
    assert!(loaded.report.skipped_risks.is_empty());

    let dispute = register.get("OPS-5").unwrap();
    assert_eq!(dispute.inherent.likelihood.value(), 3);
    assert_eq!(dispute.inherent.impact.value(), 4);
    assert_eq!(dispute.inherent.level(), RiskLevel::High);
}

#[test]
fn skip_policy_leaves_unrated_risks_out() {
    let loaded = RiskRegister::load(&fixture(), &skip_config()).unwrap();

    assert_eq!(loaded.register.len(), 4);
    assert_eq!(loaded.report.skipped_risks, vec!["OPS-5".to_string()]);
    assert_eq!(loaded.report.substituted_ratings, 0);
}

#[test]
fn fixture_reproduces_the_reference_matrix() {
    let loaded = RiskRegister::load(&fixture(), &skip_config()).unwrap();
    let matrix = loaded.register.inherent_matrix();

    assert_eq!(matrix.rows()[2][2], 2);
    assert_eq!(matrix.rows()[4][4], 1);
    assert_eq!(matrix.rows()[0][1], 1);
    assert_eq!(matrix.total(), 4);
}

#[test]
fn summary_covers_both_bases() {
    let loaded = RiskRegister::load(&fixture(), &skip_config()).unwrap();
    let summary = RiskSummary::from_register(&loaded.register);

    assert_eq!(summary.total_risks, 4);
    assert_eq!(summary.unassessed_residual, 2);
    assert_eq!(summary.residual_matrix.total(), 2);
    assert_eq!(summary.inherent_levels.critical, 1);
    assert_eq!(summary.residual_levels.medium, 2);
    assert_eq!(summary.description.as_deref(), Some("Operational risks for the northern plant"));
}

#[test]
fn filter_and_sort_compose() {
    let loaded = RiskRegister::load(&fixture(), &AssessmentConfig::default()).unwrap();
    let filter = RiskFilter::new().owner("maintenance");
    let mut selected = loaded.register.filtered(&filter);
    selected.sort_by(SortKey::Score);

    let ids: Vec<&str> = selected.risks.iter().map(|risk| risk.id.as_str()).collect();
    assert_eq!(ids, vec!["OPS-3", "OPS-1"]);
}

#[test]
fn search_matches_titles_and_categories() {
    let loaded = RiskRegister::load(&fixture(), &AssessmentConfig::default()).unwrap();
    let hits: Vec<&str> = loaded
        .register
        .search("SAFETY")
        .iter()
        .map(|risk| risk.id.as_str())
        .collect();
    assert_eq!(hits, vec!["OPS-1", "OPS-3"]);
}

#[test]
fn duplicate_ids_are_rejected() {
    let loader = RegisterLoader::new(AssessmentConfig::default());
    let result = loader.parse(
        r#"[{"id": "X", "likelihood": 1, "impact": 1},
            {"id": "X", "likelihood": 2, "impact": 2}]"#,
        "dupes",
    );
    assert!(matches!(result, Err(Error::Validation(_))));
}
