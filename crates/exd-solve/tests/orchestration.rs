use exd_core::{
    Distance, FaultMechanism, FaultModel, ModelProvenance, ObservableId, SchemaVersion,
    SolveOptions, TargetObservables,
};
use exd_solve::{compute_any_logical_distance, compute_distance};

fn provenance() -> ModelProvenance {
    ModelProvenance {
        extractor: "stim-dem".into(),
        circuit_hash: "orchestration".into(),
        created_at: "2026-08-01T00:00:00Z".into(),
        tool_versions: Default::default(),
    }
}

/// Two logicals with different distances: L0 needs the full weight-3
/// repetition chain, L1 flips directly with a single detector-free
/// mechanism.
fn two_logical_model() -> FaultModel {
    FaultModel::new(
        2,
        2,
        vec![
            FaultMechanism::unit(vec![0], vec![0]),
            FaultMechanism::unit(vec![0, 1], vec![]),
            FaultMechanism::unit(vec![1], vec![]),
            FaultMechanism::unit(vec![], vec![1]),
        ],
        SchemaVersion::new(1, 0, 0),
        provenance(),
    )
    .unwrap()
}

#[test]
fn one_result_per_target_observable() {
    let results = compute_distance(&two_logical_model(), &SolveOptions::default()).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].target, ObservableId::from_raw(0));
    assert_eq!(results[0].distance, Distance::Finite(3));
    assert_eq!(results[1].target, ObservableId::from_raw(1));
    assert_eq!(results[1].distance, Distance::Finite(1));
    assert!(results.iter().all(|result| result.optimal));
}

#[test]
fn explicit_target_list_restricts_the_solves() {
    let options = SolveOptions {
        targets: TargetObservables::Only {
            observables: vec![1],
        },
        ..SolveOptions::default()
    };
    let results = compute_distance(&two_logical_model(), &options).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].target, ObservableId::from_raw(1));
}

#[test]
fn out_of_range_target_list_fails_fast() {
    let options = SolveOptions {
        targets: TargetObservables::Only {
            observables: vec![5],
        },
        ..SolveOptions::default()
    };
    let err = compute_distance(&two_logical_model(), &options).unwrap_err();
    assert_eq!(err.info().code, "target-observable-out-of-range");
}

#[test]
fn empty_target_list_fails_fast() {
    let options = SolveOptions {
        targets: TargetObservables::Only {
            observables: vec![],
        },
        ..SolveOptions::default()
    };
    let err = compute_distance(&two_logical_model(), &options).unwrap_err();
    assert_eq!(err.info().code, "empty-target-list");
}

#[test]
fn any_logical_distance_takes_the_cheapest_target() {
    let best =
        compute_any_logical_distance(&two_logical_model(), &SolveOptions::default()).unwrap();
    assert_eq!(best.target, ObservableId::from_raw(1));
    assert_eq!(best.distance, Distance::Finite(1));
}

#[test]
fn no_observables_is_a_model_error() {
    let model = FaultModel::new(
        1,
        0,
        vec![FaultMechanism::unit(vec![0], vec![])],
        SchemaVersion::new(1, 0, 0),
        provenance(),
    )
    .unwrap();
    let err = compute_any_logical_distance(&model, &SolveOptions::default()).unwrap_err();
    assert_eq!(err.info().code, "no-observables");
}
