use exd_core::{
    Distance, FaultMechanism, FaultModel, MechanismId, ModelProvenance, ObservableId,
    SchemaVersion,
};
use exd_solve::{
    solve_target, verify_certificate, BranchBoundBackend, ExhaustiveBackend, SolveBudget,
    SolverBackend,
};

fn provenance() -> ModelProvenance {
    ModelProvenance {
        extractor: "stim-dem".into(),
        circuit_hash: "weighted".into(),
        created_at: "2026-08-01T00:00:00Z".into(),
        tool_versions: Default::default(),
    }
}

#[test]
fn weights_steer_the_optimum_away_from_the_smallest_support() {
    // One direct logical flip costing 5 versus a two-mechanism path
    // through detector D0 costing 1 + 1.
    let model = FaultModel::new(
        1,
        1,
        vec![
            FaultMechanism::new(5, vec![], vec![0]),
            FaultMechanism::new(1, vec![0], vec![0]),
            FaultMechanism::new(1, vec![0], vec![]),
        ],
        SchemaVersion::new(1, 0, 0),
        provenance(),
    )
    .unwrap();
    let target = ObservableId::from_raw(0);
    let backends: Vec<Box<dyn SolverBackend>> = vec![
        Box::new(BranchBoundBackend),
        Box::new(ExhaustiveBackend::default()),
    ];
    for backend in backends {
        let result =
            solve_target(&model, backend.as_ref(), target, &SolveBudget::unbounded()).unwrap();
        assert_eq!(result.distance, Distance::Finite(2), "{}", result.backend);
        assert!(result.optimal);
        let certificate = result.certificate.as_deref().unwrap();
        assert_eq!(
            certificate,
            &[MechanismId::from_raw(1), MechanismId::from_raw(2)]
        );
        assert!(verify_certificate(&model, target, certificate));
    }
}

#[test]
fn zero_weight_mechanisms_are_free_to_select() {
    // The logical flip itself costs 0; the detector it trips can be
    // cancelled by a unit-weight mechanism.
    let model = FaultModel::new(
        1,
        1,
        vec![
            FaultMechanism::new(0, vec![0], vec![0]),
            FaultMechanism::new(1, vec![0], vec![]),
        ],
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
    assert_eq!(result.distance, Distance::Finite(1));
    assert!(result.optimal);
}
