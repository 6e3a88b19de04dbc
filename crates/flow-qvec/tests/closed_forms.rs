mod support;

use std::f64::consts::{FRAC_PI_2, PI};

use approx::{assert_abs_diff_eq, assert_relative_eq};
use flow_core::CorrelatorSpec;
use flow_qvec::{
    evaluate, evaluate_harmonics, five, four, recursion, six, three, two, EvaluationPath,
    QVectorTable,
};
use num_complex::Complex64;
use proptest::prelude::*;

use support::random_event;

fn closed_form(table: &QVectorTable, h: &[i32]) -> Complex64 {
    match *h {
        [n1, n2] => two(table, n1, n2).unwrap(),
        [n1, n2, n3] => three(table, n1, n2, n3).unwrap(),
        [n1, n2, n3, n4] => four(table, n1, n2, n3, n4).unwrap(),
        [n1, n2, n3, n4, n5] => five(table, n1, n2, n3, n4, n5).unwrap(),
        [n1, n2, n3, n4, n5, n6] => six(table, n1, n2, n3, n4, n5, n6).unwrap(),
        _ => panic!("no closed form for order {}", h.len()),
    }
}

/// Both evaluators normalised by the recursion's combinatorial weight.
fn assert_equivalent(table: &QVectorTable, harmonics: &[i32]) {
    let weight = recursion(table, &vec![0; harmonics.len()]).unwrap().re;
    let expected = recursion(table, harmonics).unwrap() / weight;
    let actual = closed_form(table, harmonics) / weight;
    assert_abs_diff_eq!(actual.re, expected.re, epsilon = 1e-9);
    assert_abs_diff_eq!(actual.im, expected.im, epsilon = 1e-9);
}

/// Every harmonic list of `order` entries drawn from `-range..=range`.
fn all_lists(order: usize, range: i32) -> Vec<Vec<i32>> {
    let mut lists = vec![Vec::new()];
    for _ in 0..order {
        lists = lists
            .into_iter()
            .flat_map(|prefix| {
                (-range..=range).map(move |h| {
                    let mut next = prefix.clone();
                    next.push(h);
                    next
                })
            })
            .collect();
    }
    lists
}

#[test]
fn closed_forms_match_recursion_exhaustively() {
    let (angles, weights) = random_event(2024, 25);
    let unweighted = QVectorTable::build(12, 6, &angles, None).unwrap();
    let weighted = QVectorTable::build(12, 6, &angles, Some(&weights)).unwrap();
    for (order, range) in [(2, 3), (3, 2), (4, 2), (5, 1), (6, 1)] {
        for harmonics in all_lists(order, range) {
            assert_equivalent(&unweighted, &harmonics);
            assert_equivalent(&weighted, &harmonics);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn closed_forms_match_recursion_on_random_events(
        seed in any::<u64>(),
        particles in 6usize..40,
        harmonics in prop::collection::vec(-4i32..=4, 2..=6),
        weighted in any::<bool>(),
    ) {
        let (angles, weights) = random_event(seed, particles);
        let weights = weighted.then_some(weights.as_slice());
        let table = QVectorTable::build(24, 6, &angles, weights).unwrap();
        assert_equivalent(&table, &harmonics);
    }
}

#[test]
fn dispatch_uses_expected_path() {
    assert_eq!(EvaluationPath::for_order(1), EvaluationPath::Single);
    assert_eq!(EvaluationPath::for_order(2), EvaluationPath::ClosedForm);
    assert_eq!(EvaluationPath::for_order(6), EvaluationPath::ClosedForm);
    assert_eq!(EvaluationPath::for_order(7), EvaluationPath::Recursion);
}

#[test]
fn evaluate_reports_sum_and_weight() {
    let (angles, weights) = random_event(8, 30);
    let table = QVectorTable::build(16, 8, &angles, Some(&weights)).unwrap();
    for harmonics in [vec![3], vec![2, -2], vec![1, 2, -3, 1, -1, 2, -2], vec![2, 2, -2, -2, 1, -1, 0, 0]] {
        let correlation = evaluate_harmonics(&table, &harmonics).unwrap();
        let sum = recursion(&table, &harmonics).unwrap();
        let weight = recursion(&table, &vec![0; harmonics.len()]).unwrap().re;
        assert_relative_eq!(correlation.weight, weight, max_relative = 1e-12);
        assert_abs_diff_eq!(correlation.sum.re / weight, sum.re / weight, epsilon = 1e-9);
        assert!(correlation.mean().is_some());
    }
}

#[test]
fn three_particle_reference_two_particle_correlator() {
    let table = QVectorTable::build(2, 2, &[0.0, FRAC_PI_2, PI], None).unwrap();
    let spec = CorrelatorSpec::new(vec![1, -1]).unwrap();
    let correlation = evaluate(&table, &spec).unwrap();
    assert_eq!(correlation.weight, 6.0);
    assert_abs_diff_eq!(correlation.mean().unwrap(), -1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn empty_event_has_no_mean() {
    let table = QVectorTable::build(4, 4, &[], None).unwrap();
    let spec = CorrelatorSpec::new(vec![2, 2, -2, -2]).unwrap();
    let correlation = evaluate(&table, &spec).unwrap();
    assert_eq!(correlation.weight, 0.0);
    assert_eq!(correlation.mean(), None);

    let single = QVectorTable::build(4, 4, &[1.0], None).unwrap();
    let correlation = evaluate(&single, &CorrelatorSpec::new(vec![2, -2]).unwrap()).unwrap();
    assert_eq!(correlation.weight, 0.0);
    assert_eq!(correlation.mean(), None);
}

#[test]
fn closed_forms_validate_bounds() {
    let table = QVectorTable::new(2, 3).unwrap();
    assert!(two(&table, 2, 1).is_err());
    assert!(four(&table, 1, 1, -1, -1).is_err());
    assert!(three(&table, 1, 1, -2).is_ok());
}
