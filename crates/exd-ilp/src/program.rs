//! Integer-program representation of an undetected-logical-error search.
//!
//! Every constraint is the exact linearization of a GF(2) parity:
//! `sum(selection vars) = 2 * slack + target`, with integer slacks and
//! equality only. Nothing in this representation approximates.

use std::fmt;

use exd_core::{MechanismId, ObservableId};
use serde::{Deserialize, Serialize};

/// Identifier for a variable within an [`IntegerProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(usize);

impl VarId {
    /// Creates a new identifier from its raw index representation.
    pub fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw index representation of the identifier.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

/// Kind of a program variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VarKind {
    /// Binary selection variable, one per live fault mechanism.
    Binary,
    /// Non-negative integer parity slack, bounded above.
    Slack {
        /// Largest value the slack can take: at most half the number of
        /// selection variables can pair up on any parity row.
        upper_bound: u64,
    },
}

/// Exact parity row: `sum(selection_vars) = 2 * slack_var + target_parity`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityConstraint {
    selection_vars: Box<[VarId]>,
    slack_var: VarId,
    target_parity: u8,
}

impl fmt::Debug for ParityConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParityConstraint")
            .field("selection_vars", &self.selection_vars)
            .field("slack_var", &self.slack_var)
            .field("target_parity", &self.target_parity)
            .finish()
    }
}

impl ParityConstraint {
    pub(crate) fn new(mut selection_vars: Vec<VarId>, slack_var: VarId, target_parity: u8) -> Self {
        selection_vars.sort_unstable();
        Self {
            selection_vars: selection_vars.into_boxed_slice(),
            slack_var,
            target_parity: target_parity & 1,
        }
    }

    /// Returns the selection variables on the left-hand side.
    pub fn selection_vars(&self) -> &[VarId] {
        &self.selection_vars
    }

    /// Returns the slack variable absorbing even multiples.
    pub fn slack_var(&self) -> VarId {
        self.slack_var
    }

    /// Returns the required parity (0 for detectors, 1 for the target).
    pub fn target_parity(&self) -> u8 {
        self.target_parity
    }
}

/// A complete integer program for one target observable.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerProgram {
    model_hash: String,
    target: ObservableId,
    var_kinds: Vec<VarKind>,
    var_mechanisms: Vec<MechanismId>,
    constraints: Vec<ParityConstraint>,
    objective: Vec<(VarId, u64)>,
}

impl fmt::Debug for IntegerProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntegerProgram")
            .field("model_hash", &self.model_hash)
            .field("target", &self.target)
            .field("num_vars", &self.var_kinds.len())
            .field("num_selection_vars", &self.var_mechanisms.len())
            .field("num_constraints", &self.constraints.len())
            .finish_non_exhaustive()
    }
}

impl IntegerProgram {
    pub(crate) fn new(
        model_hash: String,
        target: ObservableId,
        var_kinds: Vec<VarKind>,
        var_mechanisms: Vec<MechanismId>,
        constraints: Vec<ParityConstraint>,
        objective: Vec<(VarId, u64)>,
    ) -> Self {
        debug_assert!(var_mechanisms.len() <= var_kinds.len());
        Self {
            model_hash,
            target,
            var_kinds,
            var_mechanisms,
            constraints,
            objective,
        }
    }

    /// Returns the canonical hash of the source fault model.
    pub fn model_hash(&self) -> &str {
        &self.model_hash
    }

    /// Returns the observable this program targets.
    pub fn target(&self) -> ObservableId {
        self.target
    }

    /// Returns the total number of variables, slacks included.
    pub fn num_vars(&self) -> usize {
        self.var_kinds.len()
    }

    /// Returns the number of binary selection variables.
    ///
    /// Selection variables occupy indices `0..num_selection_vars()`;
    /// slack variables follow.
    pub fn num_selection_vars(&self) -> usize {
        self.var_mechanisms.len()
    }

    /// Returns the kind of the given variable.
    pub fn var_kind(&self, var: VarId) -> VarKind {
        self.var_kinds[var.as_raw()]
    }

    /// Returns the fault mechanism a selection variable stands for.
    pub fn mechanism_for(&self, var: VarId) -> MechanismId {
        self.var_mechanisms[var.as_raw()]
    }

    /// Returns the parity rows of the program.
    pub fn constraints(&self) -> &[ParityConstraint] {
        &self.constraints
    }

    /// Returns the minimization objective as (variable, weight) terms.
    pub fn objective(&self) -> &[(VarId, u64)] {
        &self.objective
    }

    /// Returns the objective weight of a selection variable.
    pub fn objective_weight(&self, var: VarId) -> u64 {
        self.objective[var.as_raw()].1
    }

    /// Evaluates the objective for a selection given as a bit per
    /// selection variable.
    pub fn objective_value(&self, selection: &[bool]) -> u64 {
        self.objective
            .iter()
            .map(|&(var, weight)| {
                if selection[var.as_raw()] {
                    weight
                } else {
                    0
                }
            })
            .sum()
    }
}
