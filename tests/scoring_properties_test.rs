//! Properties of the scoring engine through the public API.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use riskgrid::*;

fn assessments(pairs: &[(i64, i64)]) -> Vec<RiskAssessment> {
    pairs
        .iter()
        .map(|&(l, i)| RiskAssessment::from_values(l, i))
        .collect()
}

#[test]
fn boundary_scores_map_to_expected_levels() {
    let cases = [
        ((1, 1), 1, RiskLevel::Low),
        ((1, 5), 5, RiskLevel::Medium),
        ((2, 5), 10, RiskLevel::High),
        ((3, 5), 15, RiskLevel::Critical),
        ((5, 5), 25, RiskLevel::Critical),
    ];

    for ((l, i), score, level) in cases {
        let computed = compute_score(l, i);
        assert_eq!(computed.value(), score, "score of ({}, {})", l, i);
        assert_eq!(classify_level(computed.into()), level, "level of {}", score);
    }
}

#[test]
fn threshold_edges_are_inclusive() {
    assert_eq!(classify_level(4), RiskLevel::Low);
    assert_eq!(classify_level(5), RiskLevel::Medium);
    assert_eq!(classify_level(9), RiskLevel::Medium);
    assert_eq!(classify_level(10), RiskLevel::High);
    assert_eq!(classify_level(14), RiskLevel::High);
    assert_eq!(classify_level(15), RiskLevel::Critical);
}

#[test]
fn out_of_range_ratings_are_clamped() {
    assert_eq!(compute_score(0, 3), compute_score(1, 3));
    assert_eq!(compute_score(7, 3), compute_score(5, 3));
    assert_eq!(evaluate(0, 3), evaluate(1, 3));
}

#[test]
fn four_assessment_scenario() {
    let input = assessments(&[(3, 3), (3, 3), (5, 5), (1, 2)]);
    let matrix = build_heat_map_matrix(&input);

    let mut expected = [[0u32; 5]; 5];
    expected[2][2] = 2;
    expected[4][4] = 1;
    expected[0][1] = 1;
    assert_eq!(matrix.rows(), &expected);

    let levels: Vec<RiskLevel> = input
        .iter()
        .map(|assessment| classify_level(assessment.score().into()))
        .collect();
    assert_eq!(
        levels,
        vec![
            RiskLevel::Medium,
            RiskLevel::Medium,
            RiskLevel::Critical,
            RiskLevel::Low
        ]
    );
}

#[test]
fn every_level_has_a_distinct_colour() {
    let colours: Vec<LevelColor> = RiskLevel::ALL.iter().map(|&l| color_for_level(l)).collect();
    for (index, colour) in colours.iter().enumerate() {
        assert!(!colours[index + 1..].contains(colour));
    }
    assert_eq!(color_for_level(RiskLevel::Medium).foreground, "#eab308");
}

proptest! {
    #[test]
    fn classification_is_stable(l in 1i64..=5, i in 1i64..=5) {
        let first = classify_level(compute_score(l, i).into());
        for _ in 0..3 {
            prop_assert_eq!(classify_level(compute_score(l, i).into()), first);
        }
    }

    #[test]
    fn raising_either_rating_never_lowers_the_score(l in 1i64..=5, i in 1i64..=5) {
        if l < 5 {
            prop_assert!(compute_score(l + 1, i) >= compute_score(l, i));
        }
        if i < 5 {
            prop_assert!(compute_score(l, i + 1) >= compute_score(l, i));
        }
    }

    #[test]
    fn matrix_cells_sum_to_input_length(
        pairs in prop::collection::vec((any::<i64>(), any::<i64>()), 0..300)
    ) {
        let input = assessments(&pairs);
        let matrix = build_heat_map_matrix(&input);
        let sum: u32 = matrix.rows().iter().flatten().sum();
        prop_assert_eq!(sum as usize, input.len());
    }
}
