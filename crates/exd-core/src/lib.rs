#![deny(missing_docs)]
#![doc = "Core fault-model types, errors, and configuration for the EXD exact-distance engine."]

pub mod config;
pub mod errors;
pub mod hash;
pub mod model;
pub mod provenance;
pub mod serde;

use ::serde::{Deserialize, Serialize};

pub use config::{BackendKind, SolveOptions, TargetObservables};
pub use errors::{ErrorInfo, ExdError};
pub use hash::canonical_model_hash;
pub use model::{FaultMechanism, FaultModel};
pub use provenance::{ModelProvenance, SchemaVersion};

/// Identifier for a fault mechanism within a [`FaultModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MechanismId(usize);

impl MechanismId {
    /// Creates a new identifier from its raw index representation.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index representation of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Identifier for a detector (silent parity check) within a [`FaultModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DetectorId(usize);

impl DetectorId {
    /// Creates a new identifier from its raw index representation.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index representation of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Identifier for a logical observable within a [`FaultModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObservableId(usize);

impl ObservableId {
    /// Creates a new identifier from its raw index representation.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index representation of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Exact minimum fault weight for a target observable, or a proof that
/// no undetected logical error exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Distance {
    /// Minimum total weight over all undetected fault selections.
    Finite(u64),
    /// The parity system is infeasible; no fault selection flips the
    /// target while keeping every detector silent.
    Infinite,
}

impl Distance {
    /// Returns the finite value, if any.
    pub fn finite(&self) -> Option<u64> {
        match self {
            Distance::Finite(value) => Some(*value),
            Distance::Infinite => None,
        }
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Distance::Finite(value) => write!(f, "{value}"),
            Distance::Infinite => write!(f, "inf"),
        }
    }
}
