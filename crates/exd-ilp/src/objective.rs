//! Minimum-weight objective over selection variables.

use exd_core::{FaultModel, MechanismId};

use crate::program::VarId;

/// Formulates `minimize sum(weight[m] * x_m)` for the given
/// variable-to-mechanism mapping.
///
/// Weights are arbitrary non-negative integers; the common unit-weight
/// case counts physical fault events. The constraint side is oblivious
/// to the weights, so correlated or higher-cost mechanisms need no
/// builder changes.
pub fn formulate_objective(model: &FaultModel, var_mechanisms: &[MechanismId]) -> Vec<(VarId, u64)> {
    var_mechanisms
        .iter()
        .enumerate()
        .map(|(var, mechanism)| {
            (
                VarId::from_raw(var),
                model.mechanisms()[mechanism.as_raw()].weight(),
            )
        })
        .collect()
}
