use exd_core::serde::{from_bytes, from_json, to_bytes, to_json};
use exd_core::{
    canonical_model_hash, FaultMechanism, FaultModel, ModelProvenance, SchemaVersion,
};

fn sample_model() -> FaultModel {
    let provenance = ModelProvenance {
        extractor: "stim-dem".into(),
        circuit_hash: "deadbeef".into(),
        created_at: "2026-08-01T00:00:00Z".into(),
        tool_versions: [("stim".to_string(), "1.13".to_string())].into_iter().collect(),
    };
    FaultModel::new(
        2,
        1,
        vec![
            FaultMechanism::unit(vec![0], vec![0]),
            FaultMechanism::unit(vec![0, 1], vec![]),
            FaultMechanism::new(2, vec![1], vec![]),
        ],
        SchemaVersion::new(1, 0, 0),
        provenance,
    )
    .unwrap()
}

#[test]
fn json_round_trip_preserves_model_and_hash() {
    let model = sample_model();
    let json = to_json(&model).unwrap();
    let restored = from_json(&json).unwrap();
    assert_eq!(model, restored);
    assert_eq!(canonical_model_hash(&model), canonical_model_hash(&restored));
}

#[test]
fn binary_round_trip_preserves_model() {
    let model = sample_model();
    let bytes = to_bytes(&model).unwrap();
    let restored = from_bytes(&bytes).unwrap();
    assert_eq!(model, restored);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = from_json("{not json").unwrap_err();
    assert_eq!(err.info().code, "json-deserialize");
}

#[test]
fn hash_is_stable_across_identical_builds() {
    assert_eq!(
        canonical_model_hash(&sample_model()),
        canonical_model_hash(&sample_model())
    );
}

#[test]
fn hash_changes_with_the_mechanisms() {
    let base = sample_model();
    let provenance = base.provenance().clone();
    let modified = FaultModel::new(
        2,
        1,
        vec![FaultMechanism::unit(vec![0], vec![0])],
        base.schema_version(),
        provenance,
    )
    .unwrap();
    assert_ne!(canonical_model_hash(&base), canonical_model_hash(&modified));
}
