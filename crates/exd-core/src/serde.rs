//! Serialization routines for JSON and binary round-trips.

use ::serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ExdError};
use crate::model::{FaultMechanism, FaultModel};
use crate::provenance::{ModelProvenance, SchemaVersion};

#[derive(Debug, Serialize, Deserialize)]
struct SerializableMechanism {
    weight: u64,
    detectors: Vec<usize>,
    observables: Vec<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializableFaultModel {
    schema_version: SchemaVersion,
    provenance: ModelProvenance,
    num_detectors: usize,
    num_observables: usize,
    mechanisms: Vec<SerializableMechanism>,
}

fn serialize_mechanisms(mechanisms: &[FaultMechanism]) -> Vec<SerializableMechanism> {
    mechanisms
        .iter()
        .map(|mechanism| SerializableMechanism {
            weight: mechanism.weight(),
            detectors: mechanism.detectors().to_vec(),
            observables: mechanism.observables().to_vec(),
        })
        .collect()
}

fn deserialize_mechanisms(data: Vec<SerializableMechanism>) -> Vec<FaultMechanism> {
    data.into_iter()
        .map(|payload| FaultMechanism::new(payload.weight, payload.detectors, payload.observables))
        .collect()
}

/// Serializes a fault model to a JSON string.
pub fn to_json(model: &FaultModel) -> Result<String, ExdError> {
    let payload = SerializableFaultModel {
        schema_version: model.schema_version(),
        provenance: model.provenance().clone(),
        num_detectors: model.num_detectors(),
        num_observables: model.num_observables(),
        mechanisms: serialize_mechanisms(model.mechanisms()),
    };
    serde_json::to_string_pretty(&payload)
        .map_err(|err| ExdError::Serde(ErrorInfo::new("json-serialize", err.to_string())))
}

/// Restores a fault model from a JSON string.
pub fn from_json(data: &str) -> Result<FaultModel, ExdError> {
    let payload: SerializableFaultModel = serde_json::from_str(data)
        .map_err(|err| ExdError::Serde(ErrorInfo::new("json-deserialize", err.to_string())))?;
    FaultModel::new(
        payload.num_detectors,
        payload.num_observables,
        deserialize_mechanisms(payload.mechanisms),
        payload.schema_version,
        payload.provenance,
    )
}

/// Serializes a fault model into a binary blob.
pub fn to_bytes(model: &FaultModel) -> Result<Vec<u8>, ExdError> {
    let json = to_json(model)?;
    bincode::serialize(&json)
        .map_err(|err| ExdError::Serde(ErrorInfo::new("bincode-serialize", err.to_string())))
}

/// Rehydrates a fault model from a binary blob.
pub fn from_bytes(bytes: &[u8]) -> Result<FaultModel, ExdError> {
    let json: String = bincode::deserialize(bytes)
        .map_err(|err| ExdError::Serde(ErrorInfo::new("bincode-deserialize", err.to_string())))?;
    from_json(&json)
}
