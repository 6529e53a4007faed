//! YAML-configurable options governing a distance computation.

use std::time::Duration;

use ::serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, ExdError};

/// Options recognized by the orchestration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Which optimization backend to invoke.
    #[serde(default)]
    pub backend: BackendKind,
    /// Wall-clock budget in seconds; `None` means unbounded.
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
    /// Solver-internal parallelism hint. The in-tree backends are
    /// single-threaded and record this without acting on it.
    #[serde(default = "default_thread_count")]
    pub thread_count: usize,
    /// Which logical observables to treat as the "flip to 1" target.
    #[serde(default)]
    pub targets: TargetObservables,
}

fn default_thread_count() -> usize {
    1
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            time_limit_secs: None,
            thread_count: default_thread_count(),
            targets: TargetObservables::default(),
        }
    }
}

impl SolveOptions {
    /// Returns the wall-clock budget as a duration, if bounded.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    /// Parses options from a YAML document.
    pub fn from_yaml_str(data: &str) -> Result<Self, ExdError> {
        serde_yaml::from_str(data)
            .map_err(|err| ExdError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string())))
    }
}

/// Supported optimization backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Depth-first branch-and-bound with parity propagation (primary).
    #[default]
    BranchBound,
    /// Full enumeration over selections (reference, small models only).
    Exhaustive,
}

/// Selection of target observables for independent solves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TargetObservables {
    /// Solve one independent program per observable in the model.
    #[default]
    All,
    /// Solve only the listed observable indices.
    Only {
        /// Raw observable indices to target.
        observables: Vec<usize>,
    },
}
