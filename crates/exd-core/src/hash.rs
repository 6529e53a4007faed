//! Canonical hashing for fault models.
//!
//! The hash is the "model identity" carried in every error payload and
//! solve result, so two runs can be matched to the same extracted model.

use sha2::{Digest, Sha256};

use crate::model::{FaultMechanism, FaultModel};

fn update_support(hasher: &mut Sha256, support: &[usize]) {
    hasher.update((support.len() as u64).to_le_bytes());
    for &index in support {
        hasher.update((index as u64).to_le_bytes());
    }
}

fn update_mechanism(hasher: &mut Sha256, mechanism: &FaultMechanism) {
    hasher.update(mechanism.weight().to_le_bytes());
    update_support(hasher, mechanism.detectors());
    update_support(hasher, mechanism.observables());
}

/// Computes the canonical structural hash for a fault model.
pub fn canonical_model_hash(model: &FaultModel) -> String {
    let mut hasher = Sha256::new();
    let version = model.schema_version();
    hasher.update((version.major as u64).to_le_bytes());
    hasher.update((version.minor as u64).to_le_bytes());
    hasher.update((version.patch as u64).to_le_bytes());
    hasher.update((model.num_detectors() as u64).to_le_bytes());
    hasher.update((model.num_observables() as u64).to_le_bytes());
    hasher.update((model.mechanisms().len() as u64).to_le_bytes());

    for mechanism in model.mechanisms() {
        update_mechanism(&mut hasher, mechanism);
    }

    let digest = hasher.finalize();
    digest
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<String>()
}
