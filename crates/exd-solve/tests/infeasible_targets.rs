use exd_core::{
    Distance, FaultMechanism, FaultModel, ModelProvenance, ObservableId, SchemaVersion,
};
use exd_solve::{solve_target, BranchBoundBackend, ExhaustiveBackend, SolveBudget, SolverBackend};

fn provenance() -> ModelProvenance {
    ModelProvenance {
        extractor: "stim-dem".into(),
        circuit_hash: "infeasible".into(),
        created_at: "2026-08-01T00:00:00Z".into(),
        tool_versions: Default::default(),
    }
}

#[test]
fn untouched_target_is_infinite_and_optimal() {
    // No mechanism flips the observable at all.
    let model = FaultModel::new(
        1,
        1,
        vec![FaultMechanism::unit(vec![0], vec![])],
        SchemaVersion::new(1, 0, 0),
        provenance(),
    )
    .unwrap();
    let result = solve_target(
        &model,
        &BranchBoundBackend,
        ObservableId::from_raw(0),
        &SolveBudget::unbounded(),
    )
    .unwrap();
    assert_eq!(result.distance, Distance::Infinite);
    assert!(result.optimal);
    assert!(result.certificate.is_none());
    assert_eq!(result.nodes_explored, 0);
}

#[test]
fn detector_coupling_can_prove_infeasibility() {
    // The only mechanism flipping L also flips D0, and nothing else
    // touches D0, so the detector can never stay silent.
    let model = FaultModel::new(
        1,
        1,
        vec![FaultMechanism::unit(vec![0], vec![0])],
        SchemaVersion::new(1, 0, 0),
        provenance(),
    )
    .unwrap();
    let backends: Vec<Box<dyn SolverBackend>> = vec![
        Box::new(BranchBoundBackend),
        Box::new(ExhaustiveBackend::default()),
    ];
    for backend in backends {
        let result = solve_target(
            &model,
            backend.as_ref(),
            ObservableId::from_raw(0),
            &SolveBudget::unbounded(),
        )
        .unwrap();
        assert_eq!(result.distance, Distance::Infinite, "{}", result.backend);
        assert!(result.optimal, "{}", result.backend);
    }
}
