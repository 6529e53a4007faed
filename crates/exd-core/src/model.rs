//! Fault-model data types produced by an external detector-error-model
//! extractor. Immutable once constructed.

use std::fmt;

use ::serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ExdError};
use crate::provenance::{ModelProvenance, SchemaVersion};
use crate::MechanismId;

/// A single fault mechanism: one independent physical fault event,
/// together with the detectors and logical observables it flips.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultMechanism {
    weight: u64,
    detectors: Box<[usize]>,
    observables: Box<[usize]>,
}

impl fmt::Debug for FaultMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultMechanism")
            .field("weight", &self.weight)
            .field("detectors", &self.detectors)
            .field("observables", &self.observables)
            .finish()
    }
}

impl FaultMechanism {
    /// Creates a normalized mechanism from raw supports.
    ///
    /// Supports are sorted and XOR-reduced: an index listed twice
    /// cancels out, matching how extractors fold repeated flips.
    pub fn new(weight: u64, detectors: Vec<usize>, observables: Vec<usize>) -> Self {
        Self {
            weight,
            detectors: normalize_support(detectors),
            observables: normalize_support(observables),
        }
    }

    /// Unit-weight convenience constructor for counting faults.
    pub fn unit(detectors: Vec<usize>, observables: Vec<usize>) -> Self {
        Self::new(1, detectors, observables)
    }

    /// Returns the cost of selecting this mechanism.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Returns the detector indices flipped by this mechanism.
    pub fn detectors(&self) -> &[usize] {
        &self.detectors
    }

    /// Returns the observable indices flipped by this mechanism.
    pub fn observables(&self) -> &[usize] {
        &self.observables
    }

    /// Returns whether this mechanism flips the given observable.
    pub fn flips_observable(&self, observable: usize) -> bool {
        self.observables.binary_search(&observable).is_ok()
    }

    /// Returns whether this mechanism flips neither detectors nor
    /// observables.
    pub fn is_dead(&self) -> bool {
        self.detectors.is_empty() && self.observables.is_empty()
    }
}

fn normalize_support(mut indices: Vec<usize>) -> Box<[usize]> {
    indices.sort_unstable();
    let mut normalized = Vec::with_capacity(indices.len());
    for index in indices {
        if normalized.last() == Some(&index) {
            normalized.pop();
        } else {
            normalized.push(index);
        }
    }
    normalized.into_boxed_slice()
}

/// Validated, immutable fault model over a fixed set of detectors and
/// logical observables.
#[derive(Clone, PartialEq, Eq)]
pub struct FaultModel {
    num_detectors: usize,
    num_observables: usize,
    mechanisms: Vec<FaultMechanism>,
    schema_version: SchemaVersion,
    provenance: ModelProvenance,
    detector_adjacency: Vec<Vec<usize>>,
    observable_adjacency: Vec<Vec<usize>>,
}

impl fmt::Debug for FaultModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultModel")
            .field("num_detectors", &self.num_detectors)
            .field("num_observables", &self.num_observables)
            .field("num_mechanisms", &self.mechanisms.len())
            .field("schema_version", &self.schema_version)
            .finish_non_exhaustive()
    }
}

impl FaultModel {
    /// Constructs a fault model, validating every support index.
    pub fn new(
        num_detectors: usize,
        num_observables: usize,
        mechanisms: Vec<FaultMechanism>,
        schema_version: SchemaVersion,
        provenance: ModelProvenance,
    ) -> Result<Self, ExdError> {
        for (idx, mechanism) in mechanisms.iter().enumerate() {
            if let Some(&detector) = mechanism
                .detectors()
                .iter()
                .find(|&&d| d >= num_detectors)
            {
                let info = ErrorInfo::new(
                    "detector-index-out-of-range",
                    "mechanism references a detector outside the model",
                )
                .with_context("mechanism", idx.to_string())
                .with_context("detector", detector.to_string())
                .with_context("num_detectors", num_detectors.to_string());
                return Err(ExdError::Model(info));
            }
            if let Some(&observable) = mechanism
                .observables()
                .iter()
                .find(|&&o| o >= num_observables)
            {
                let info = ErrorInfo::new(
                    "observable-index-out-of-range",
                    "mechanism references an observable outside the model",
                )
                .with_context("mechanism", idx.to_string())
                .with_context("observable", observable.to_string())
                .with_context("num_observables", num_observables.to_string());
                return Err(ExdError::Model(info));
            }
        }

        let detector_adjacency = build_adjacency(num_detectors, &mechanisms, |m| m.detectors());
        let observable_adjacency =
            build_adjacency(num_observables, &mechanisms, |m| m.observables());

        Ok(Self {
            num_detectors,
            num_observables,
            mechanisms,
            schema_version,
            provenance,
            detector_adjacency,
            observable_adjacency,
        })
    }

    /// Returns the number of detectors in the model.
    pub fn num_detectors(&self) -> usize {
        self.num_detectors
    }

    /// Returns the number of logical observables in the model.
    pub fn num_observables(&self) -> usize {
        self.num_observables
    }

    /// Returns the fault mechanisms in extraction order.
    pub fn mechanisms(&self) -> &[FaultMechanism] {
        &self.mechanisms
    }

    /// Returns the mechanism indices whose support contains `detector`.
    pub fn mechanisms_on_detector(&self, detector: usize) -> &[usize] {
        &self.detector_adjacency[detector]
    }

    /// Returns the mechanism indices whose support contains `observable`.
    pub fn mechanisms_on_observable(&self, observable: usize) -> &[usize] {
        &self.observable_adjacency[observable]
    }

    /// Returns identifiers of mechanisms with empty support.
    ///
    /// Dead mechanisms never affect the optimal distance; builders may
    /// skip them for performance, never for correctness.
    pub fn dead_mechanisms(&self) -> Vec<MechanismId> {
        self.mechanisms
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_dead())
            .map(|(idx, _)| MechanismId::from_raw(idx))
            .collect()
    }

    /// Returns the schema version of the payload.
    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }

    /// Returns the provenance attached by the extractor.
    pub fn provenance(&self) -> &ModelProvenance {
        &self.provenance
    }
}

fn build_adjacency<F>(len: usize, mechanisms: &[FaultMechanism], support: F) -> Vec<Vec<usize>>
where
    F: Fn(&FaultMechanism) -> &[usize],
{
    let mut adjacency = vec![Vec::new(); len];
    for (idx, mechanism) in mechanisms.iter().enumerate() {
        for &entry in support(mechanism) {
            adjacency[entry].push(idx);
        }
    }
    adjacency
}
