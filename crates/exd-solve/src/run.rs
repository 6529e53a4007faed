//! Per-target orchestration: build one program per target observable,
//! hand each to exactly one backend invocation, aggregate the results.
//!
//! Every solve owns an independently constructed program, so callers
//! may run solves for different targets or backends concurrently; no
//! state is shared across invocations.

use std::time::Instant;

use exd_core::{
    canonical_model_hash, BackendKind, ErrorInfo, ExdError, FaultModel, ObservableId, SolveOptions,
    TargetObservables,
};
use exd_ilp::{build_program, BuildOutcome};

use crate::backend::{SolveBudget, SolverBackend};
use crate::branch_bound::BranchBoundBackend;
use crate::exhaustive::ExhaustiveBackend;
use crate::report::{compare_results, SolveResult};

/// Instantiates the backend named by the configuration.
pub fn resolve_backend(kind: BackendKind) -> Box<dyn SolverBackend> {
    match kind {
        BackendKind::BranchBound => Box::new(BranchBoundBackend),
        BackendKind::Exhaustive => Box::new(ExhaustiveBackend::default()),
    }
}

/// Runs one solve for one target observable on the given backend.
pub fn solve_target(
    model: &FaultModel,
    backend: &dyn SolverBackend,
    target: ObservableId,
    budget: &SolveBudget,
) -> Result<SolveResult, ExdError> {
    let started = Instant::now();
    match build_program(model, target)? {
        BuildOutcome::TriviallyInfeasible => Ok(SolveResult::trivially_infeasible(
            canonical_model_hash(model),
            target,
            backend.name(),
            started.elapsed(),
        )),
        BuildOutcome::Program(program) => {
            let raw = backend.solve(&program, budget)?;
            SolveResult::from_raw(
                raw,
                program.model_hash().to_string(),
                target,
                backend.name(),
                started.elapsed(),
            )
        }
    }
}

/// Computes the exact distance for every requested target observable,
/// one independent solve per target.
pub fn compute_distance(
    model: &FaultModel,
    options: &SolveOptions,
) -> Result<Vec<SolveResult>, ExdError> {
    let backend = resolve_backend(options.backend);
    let targets = resolve_targets(model, options)?;
    let budget = budget_from_options(options);
    targets
        .into_iter()
        .map(|target| solve_target(model, backend.as_ref(), target, &budget))
        .collect()
}

/// Runs every requested target on every supplied backend and
/// cross-checks the outcomes before returning them.
pub fn compare_backends(
    model: &FaultModel,
    options: &SolveOptions,
    backends: &[&dyn SolverBackend],
) -> Result<Vec<SolveResult>, ExdError> {
    let targets = resolve_targets(model, options)?;
    let budget = budget_from_options(options);
    let mut results = Vec::with_capacity(targets.len() * backends.len());
    for target in targets {
        for backend in backends {
            results.push(solve_target(model, *backend, target, &budget)?);
        }
    }
    compare_results(&results)?;
    Ok(results)
}

/// Minimum distance over the requested targets: the cheapest fault
/// selection flipping *some* targeted logical observable.
///
/// Implemented as the minimum of independent per-target solves so the
/// answer keeps a per-observable certificate.
pub fn compute_any_logical_distance(
    model: &FaultModel,
    options: &SolveOptions,
) -> Result<SolveResult, ExdError> {
    let results = compute_distance(model, options)?;
    let mut best: Option<SolveResult> = None;
    for result in results {
        let better = match &best {
            None => true,
            Some(current) => match (result.distance.finite(), current.distance.finite()) {
                (Some(candidate), Some(incumbent)) => candidate < incumbent,
                (Some(_), None) => true,
                _ => false,
            },
        };
        if better {
            best = Some(result);
        }
    }
    best.ok_or_else(|| {
        ExdError::Model(
            ErrorInfo::new(
                "no-observables",
                "the fault model defines no logical observable to target",
            )
            .with_context("model_hash", canonical_model_hash(model)),
        )
    })
}

fn budget_from_options(options: &SolveOptions) -> SolveBudget {
    SolveBudget {
        time_limit: options.time_limit(),
        thread_hint: options.thread_count,
    }
}

fn resolve_targets(
    model: &FaultModel,
    options: &SolveOptions,
) -> Result<Vec<ObservableId>, ExdError> {
    match &options.targets {
        TargetObservables::All => Ok((0..model.num_observables())
            .map(ObservableId::from_raw)
            .collect()),
        TargetObservables::Only { observables } => {
            if observables.is_empty() {
                let info = ErrorInfo::new(
                    "empty-target-list",
                    "an explicit target list must name at least one observable",
                )
                .with_context("model_hash", canonical_model_hash(model));
                return Err(ExdError::Model(info));
            }
            for &observable in observables {
                if observable >= model.num_observables() {
                    let info = ErrorInfo::new(
                        "target-observable-out-of-range",
                        "target observable does not exist in the fault model",
                    )
                    .with_context("model_hash", canonical_model_hash(model))
                    .with_context("target", observable.to_string())
                    .with_context("num_observables", model.num_observables().to_string());
                    return Err(ExdError::Model(info));
                }
            }
            Ok(observables
                .iter()
                .map(|&observable| ObservableId::from_raw(observable))
                .collect())
        }
    }
}
