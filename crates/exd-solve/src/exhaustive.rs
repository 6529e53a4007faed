//! Reference backend: full enumeration over selections.
//!
//! Intended as the brute-force oracle for cross-checking the primary
//! backend on small models; refuses programs above its variable cap.

use std::time::Instant;

use exd_core::{ErrorInfo, ExdError, MechanismId};
use exd_ilp::{IntegerProgram, VarId};

use crate::backend::{RawSolve, SolveBudget, SolveStatus, SolverBackend};

const DEADLINE_CHECK_MASK: u64 = 0xfff;

/// Default largest selection-variable count the backend will enumerate.
pub const DEFAULT_VAR_CAP: usize = 24;

/// Exhaustive enumeration solver for small models.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveBackend {
    var_cap: usize,
}

impl Default for ExhaustiveBackend {
    fn default() -> Self {
        Self {
            var_cap: DEFAULT_VAR_CAP,
        }
    }
}

impl ExhaustiveBackend {
    /// Creates a backend willing to enumerate up to `var_cap` variables.
    /// Caps above 62 are clamped so the selection mask fits in a `u64`.
    pub fn with_var_cap(var_cap: usize) -> Self {
        Self {
            var_cap: var_cap.min(62),
        }
    }
}

impl SolverBackend for ExhaustiveBackend {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, program: &IntegerProgram, budget: &SolveBudget) -> Result<RawSolve, ExdError> {
        let num_vars = program.num_selection_vars();
        if num_vars > self.var_cap {
            let info = ErrorInfo::new(
                "model-too-large",
                "selection variable count exceeds the enumeration cap",
            )
            .with_context("backend", self.name())
            .with_context("model_hash", program.model_hash())
            .with_context("target", program.target().as_raw().to_string())
            .with_context("num_selection_vars", num_vars.to_string())
            .with_context("var_cap", self.var_cap.to_string())
            .with_hint("use the branch-bound backend for large models");
            return Err(ExdError::Solver(info));
        }

        let deadline = budget.deadline();
        let rows: Vec<(u64, u8)> = program
            .constraints()
            .iter()
            .map(|constraint| {
                let mask = constraint
                    .selection_vars()
                    .iter()
                    .fold(0u64, |mask, var| mask | 1u64 << var.as_raw());
                (mask, constraint.target_parity())
            })
            .collect();
        let weights: Vec<u64> = (0..num_vars)
            .map(|var| program.objective_weight(VarId::from_raw(var)))
            .collect();

        let mut best: Option<(u64, u64)> = None;
        let mut examined = 0u64;
        let mut timed_out = false;

        for mask in 0..1u64 << num_vars {
            examined += 1;
            if examined & DEADLINE_CHECK_MASK == 0
                && matches!(deadline, Some(deadline) if Instant::now() >= deadline)
            {
                timed_out = true;
                break;
            }
            let weight = selection_weight(mask, &weights);
            if let Some((best_weight, _)) = best {
                if weight >= best_weight {
                    continue;
                }
            }
            let feasible = rows
                .iter()
                .all(|&(row_mask, target)| (mask & row_mask).count_ones() & 1 == u32::from(target));
            if feasible {
                best = Some((weight, mask));
            }
        }

        match (timed_out, best) {
            (false, Some((weight, mask))) => Ok(RawSolve {
                status: SolveStatus::Optimal,
                objective: Some(weight),
                selected: Some(certificate(program, mask)),
                nodes_explored: examined,
            }),
            (true, Some((weight, mask))) => Ok(RawSolve {
                status: SolveStatus::Feasible,
                objective: Some(weight),
                selected: Some(certificate(program, mask)),
                nodes_explored: examined,
            }),
            (true, None) => {
                let info = ErrorInfo::new(
                    "budget-exhausted-no-incumbent",
                    "time budget expired before any feasible selection was found",
                )
                .with_context("backend", self.name())
                .with_context("model_hash", program.model_hash())
                .with_context("target", program.target().as_raw().to_string())
                .with_context("nodes_explored", examined.to_string())
                .with_hint("raise the time limit or switch backends");
                Err(ExdError::Solver(info))
            }
            (false, None) => Ok(RawSolve {
                status: SolveStatus::Infeasible,
                objective: None,
                selected: None,
                nodes_explored: examined,
            }),
        }
    }
}

fn selection_weight(mask: u64, weights: &[u64]) -> u64 {
    let mut weight = 0;
    let mut bits = mask;
    while bits != 0 {
        let var = bits.trailing_zeros() as usize;
        weight += weights[var];
        bits &= bits - 1;
    }
    weight
}

fn certificate(program: &IntegerProgram, mask: u64) -> Vec<MechanismId> {
    let mut selected = Vec::new();
    let mut bits = mask;
    while bits != 0 {
        let var = bits.trailing_zeros() as usize;
        selected.push(program.mechanism_for(VarId::from_raw(var)));
        bits &= bits - 1;
    }
    selected.sort_unstable();
    selected
}
