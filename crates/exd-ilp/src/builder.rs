//! Builds the exact parity program for one target observable.
//!
//! Each detector must stay silent: `sum(x_m : m flips d) = 2 * y_d`.
//! The target observable must flip: `sum(x_m : m flips o) = 2 * s_o + 1`.
//! Detectors touched by no mechanism are trivially silent and emit no
//! row; a target touched by no mechanism short-circuits the whole build
//! to an infeasibility proof instead of a degenerate program.

use exd_core::{canonical_model_hash, ErrorInfo, ExdError, FaultModel, MechanismId, ObservableId};

use crate::objective::formulate_objective;
use crate::program::{IntegerProgram, ParityConstraint, VarId, VarKind};

/// Outcome of constraint construction for one target observable.
#[derive(Debug, Clone)]
pub enum BuildOutcome {
    /// A well-formed program ready to hand to a backend.
    Program(IntegerProgram),
    /// No mechanism flips the target observable: distance is provably
    /// infinite without invoking any backend.
    TriviallyInfeasible,
}

/// Builds the integer program for `target`, or proves trivial
/// infeasibility.
///
/// Mechanisms appearing in no row of this program (empty detector
/// support and not flipping `target`) get no selection variable; with
/// non-negative weights they can never improve the optimum.
pub fn build_program(model: &FaultModel, target: ObservableId) -> Result<BuildOutcome, ExdError> {
    let model_hash = canonical_model_hash(model);

    if target.as_raw() >= model.num_observables() {
        let info = ErrorInfo::new(
            "target-observable-out-of-range",
            "target observable does not exist in the fault model",
        )
        .with_context("model_hash", model_hash)
        .with_context("target", target.as_raw().to_string())
        .with_context("num_observables", model.num_observables().to_string());
        return Err(ExdError::Model(info));
    }

    if model.mechanisms_on_observable(target.as_raw()).is_empty() {
        return Ok(BuildOutcome::TriviallyInfeasible);
    }

    // One selection variable per mechanism that appears in at least one
    // row of this program.
    let mut var_of_mechanism = vec![None; model.mechanisms().len()];
    let mut var_mechanisms = Vec::new();
    for (idx, mechanism) in model.mechanisms().iter().enumerate() {
        let live = !mechanism.detectors().is_empty() || mechanism.flips_observable(target.as_raw());
        if live {
            var_of_mechanism[idx] = Some(VarId::from_raw(var_mechanisms.len()));
            var_mechanisms.push(MechanismId::from_raw(idx));
        }
    }

    let num_selection = var_mechanisms.len();
    let mut var_kinds = vec![VarKind::Binary; num_selection];
    // At most floor(n/2) selected mechanisms can pair up on one row.
    let slack_bound = (num_selection / 2) as u64;

    let mut constraints = Vec::new();
    let mut next_var = num_selection;

    for detector in 0..model.num_detectors() {
        let touching = model.mechanisms_on_detector(detector);
        if touching.is_empty() {
            continue;
        }
        let selection_vars = touching
            .iter()
            .filter_map(|&idx| var_of_mechanism[idx])
            .collect::<Vec<_>>();
        let slack_var = VarId::from_raw(next_var);
        next_var += 1;
        var_kinds.push(VarKind::Slack {
            upper_bound: slack_bound,
        });
        constraints.push(ParityConstraint::new(selection_vars, slack_var, 0));
    }

    let selection_vars = model
        .mechanisms_on_observable(target.as_raw())
        .iter()
        .filter_map(|&idx| var_of_mechanism[idx])
        .collect::<Vec<_>>();
    let slack_var = VarId::from_raw(next_var);
    var_kinds.push(VarKind::Slack {
        upper_bound: slack_bound,
    });
    constraints.push(ParityConstraint::new(selection_vars, slack_var, 1));

    let objective = formulate_objective(model, &var_mechanisms);

    Ok(BuildOutcome::Program(IntegerProgram::new(
        model_hash,
        target,
        var_kinds,
        var_mechanisms,
        constraints,
        objective,
    )))
}
