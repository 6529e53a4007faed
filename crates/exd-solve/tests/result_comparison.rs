use std::time::Duration;

use exd_core::{Distance, ObservableId};
use exd_solve::{compare_results, SolveResult};

fn result(backend: &str, distance: Distance, optimal: bool) -> SolveResult {
    SolveResult {
        model_hash: "model".into(),
        target: ObservableId::from_raw(0),
        backend: backend.into(),
        distance,
        optimal,
        elapsed: Duration::from_millis(1),
        certificate: None,
        nodes_explored: 10,
    }
}

#[test]
fn agreeing_optimal_results_pass() {
    let results = vec![
        result("branch-bound", Distance::Finite(3), true),
        result("exhaustive", Distance::Finite(3), true),
    ];
    assert!(compare_results(&results).is_ok());
}

#[test]
fn conflicting_optimal_results_are_surfaced_loudly() {
    let results = vec![
        result("branch-bound", Distance::Finite(3), true),
        result("exhaustive", Distance::Finite(4), true),
    ];
    let err = compare_results(&results).unwrap_err();
    assert_eq!(err.info().code, "backend-disagreement");
    assert_eq!(
        err.info().context.get("left_backend").map(String::as_str),
        Some("branch-bound")
    );
}

#[test]
fn upper_bound_below_a_certified_minimum_is_a_disagreement() {
    let results = vec![
        result("branch-bound", Distance::Finite(5), true),
        result("exhaustive", Distance::Finite(4), false),
    ];
    let err = compare_results(&results).unwrap_err();
    assert_eq!(err.info().code, "backend-disagreement");
}

#[test]
fn valid_upper_bound_above_the_minimum_passes() {
    let results = vec![
        result("branch-bound", Distance::Finite(3), true),
        result("exhaustive", Distance::Finite(5), false),
    ];
    assert!(compare_results(&results).is_ok());
}

#[test]
fn finite_bound_against_proven_infeasibility_is_a_disagreement() {
    let results = vec![
        result("branch-bound", Distance::Infinite, true),
        result("exhaustive", Distance::Finite(2), false),
    ];
    let err = compare_results(&results).unwrap_err();
    assert_eq!(err.info().code, "backend-disagreement");
}

#[test]
fn different_targets_are_never_compared() {
    let mut other = result("exhaustive", Distance::Finite(7), true);
    other.target = ObservableId::from_raw(1);
    let results = vec![result("branch-bound", Distance::Finite(3), true), other];
    assert!(compare_results(&results).is_ok());
}
