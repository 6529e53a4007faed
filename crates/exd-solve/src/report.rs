//! Turns raw backend outcomes into reported solve results.

use std::collections::BTreeSet;
use std::time::Duration;

use exd_core::{Distance, ErrorInfo, ExdError, FaultModel, MechanismId, ObservableId};
use serde::{Deserialize, Serialize};

use crate::backend::{RawSolve, SolveStatus};

/// Distance report for one (backend, target observable) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Canonical hash of the fault model that was solved.
    pub model_hash: String,
    /// The logical observable targeted by this solve.
    pub target: ObservableId,
    /// Backend that produced the result.
    pub backend: String,
    /// Minimum fault weight, or infinite when proven infeasible.
    pub distance: Distance,
    /// Whether the distance is certified (proven minimum or proven
    /// infeasible) rather than a time-limited upper bound.
    pub optimal: bool,
    /// Wall-clock time spent building and solving.
    pub elapsed: Duration,
    /// Witnessing fault selection for finite distances, when available.
    pub certificate: Option<Vec<MechanismId>>,
    /// Search effort reported by the backend.
    pub nodes_explored: u64,
}

impl SolveResult {
    /// Translates a raw backend outcome into a reported result.
    ///
    /// Infeasibility maps to an infinite distance with `optimal = true`
    /// (the infeasibility proof is itself a certificate of infinite
    /// distance); a budget-limited `Feasible` outcome maps to a
    /// non-optimal upper bound.
    pub fn from_raw(
        raw: RawSolve,
        model_hash: String,
        target: ObservableId,
        backend: &str,
        elapsed: Duration,
    ) -> Result<Self, ExdError> {
        let (distance, optimal) = match raw.status {
            SolveStatus::Optimal | SolveStatus::Feasible => {
                let Some(objective) = raw.objective else {
                    let info = ErrorInfo::new(
                        "missing-objective",
                        "backend reported a solution without an objective value",
                    )
                    .with_context("backend", backend)
                    .with_context("model_hash", model_hash)
                    .with_context("target", target.as_raw().to_string());
                    return Err(ExdError::Solver(info));
                };
                (
                    Distance::Finite(objective),
                    raw.status == SolveStatus::Optimal,
                )
            }
            SolveStatus::Infeasible => (Distance::Infinite, true),
        };
        Ok(Self {
            model_hash,
            target,
            backend: backend.to_string(),
            distance,
            optimal,
            elapsed,
            certificate: raw.selected,
            nodes_explored: raw.nodes_explored,
        })
    }

    /// Result for a target observable no mechanism can flip: the
    /// distance is infinite without invoking any backend.
    pub fn trivially_infeasible(
        model_hash: String,
        target: ObservableId,
        backend: &str,
        elapsed: Duration,
    ) -> Self {
        Self {
            model_hash,
            target,
            backend: backend.to_string(),
            distance: Distance::Infinite,
            optimal: true,
            elapsed,
            certificate: None,
            nodes_explored: 0,
        }
    }
}

/// Checks a certificate against the fault model it claims to break:
/// every detector parity must be even and the target parity odd.
///
/// Duplicate or out-of-range mechanism ids invalidate the certificate.
pub fn verify_certificate(
    model: &FaultModel,
    target: ObservableId,
    certificate: &[MechanismId],
) -> bool {
    if target.as_raw() >= model.num_observables() {
        return false;
    }
    let mut seen = BTreeSet::new();
    let mut detector_parity = vec![0u8; model.num_detectors()];
    let mut target_parity = 0u8;
    for mechanism in certificate {
        if mechanism.as_raw() >= model.mechanisms().len() || !seen.insert(*mechanism) {
            return false;
        }
        let effect = &model.mechanisms()[mechanism.as_raw()];
        for &detector in effect.detectors() {
            detector_parity[detector] ^= 1;
        }
        if effect.flips_observable(target.as_raw()) {
            target_parity ^= 1;
        }
    }
    detector_parity.iter().all(|&parity| parity == 0) && target_parity == 1
}

/// Cross-checks results for the same model and target across backends.
///
/// Two certified results that disagree are a modeling or backend bug
/// and surface as a [`ExdError::Disagreement`]; likewise an upper bound
/// below a certified minimum. Disagreements are never reconciled by
/// picking one value.
pub fn compare_results(results: &[SolveResult]) -> Result<(), ExdError> {
    for (idx, left) in results.iter().enumerate() {
        for right in &results[idx + 1..] {
            if left.model_hash != right.model_hash || left.target != right.target {
                continue;
            }
            let conflicting = if left.optimal && right.optimal {
                left.distance != right.distance
            } else {
                // A non-optimal bound may exceed the certified value,
                // never undercut it.
                bound_undercuts(left, right) || bound_undercuts(right, left)
            };
            if conflicting {
                let info = ErrorInfo::new(
                    "backend-disagreement",
                    "backends report conflicting distances for the same model and target",
                )
                .with_context("model_hash", left.model_hash.clone())
                .with_context("target", left.target.as_raw().to_string())
                .with_context("left_backend", left.backend.clone())
                .with_context("left_distance", left.distance.to_string())
                .with_context("right_backend", right.backend.clone())
                .with_context("right_distance", right.distance.to_string());
                return Err(ExdError::Disagreement(info));
            }
        }
    }
    Ok(())
}

fn bound_undercuts(certified: &SolveResult, bound: &SolveResult) -> bool {
    if !certified.optimal || bound.optimal {
        return false;
    }
    match (certified.distance, bound.distance) {
        (Distance::Finite(minimum), Distance::Finite(upper)) => upper < minimum,
        // Any finite bound against a certified infeasibility is a bug.
        (Distance::Infinite, Distance::Finite(_)) => true,
        _ => false,
    }
}
