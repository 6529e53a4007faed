use std::time::Duration;

use exd_core::{BackendKind, SolveOptions, TargetObservables};

#[test]
fn defaults_are_branch_bound_unbounded_all_targets() {
    let options = SolveOptions::default();
    assert_eq!(options.backend, BackendKind::BranchBound);
    assert_eq!(options.time_limit(), None);
    assert_eq!(options.thread_count, 1);
    assert_eq!(options.targets, TargetObservables::All);
}

#[test]
fn empty_document_yields_defaults() {
    let options = SolveOptions::from_yaml_str("{}").unwrap();
    assert_eq!(options, SolveOptions::default());
}

#[test]
fn full_document_parses() {
    let options = SolveOptions::from_yaml_str(
        "backend: exhaustive\n\
         time_limit_secs: 300\n\
         thread_count: 4\n\
         targets:\n\
         \x20\x20type: only\n\
         \x20\x20observables: [0, 2]\n",
    )
    .unwrap();
    assert_eq!(options.backend, BackendKind::Exhaustive);
    assert_eq!(options.time_limit(), Some(Duration::from_secs(300)));
    assert_eq!(options.thread_count, 4);
    assert_eq!(
        options.targets,
        TargetObservables::Only {
            observables: vec![0, 2]
        }
    );
}

#[test]
fn unknown_backend_is_a_serde_error() {
    let err = SolveOptions::from_yaml_str("backend: simplex\n").unwrap_err();
    assert_eq!(err.info().code, "yaml-deserialize");
}
