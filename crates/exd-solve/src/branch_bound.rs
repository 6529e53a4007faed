//! Primary exact backend: depth-first branch-and-bound over selection
//! variables with parity propagation.
//!
//! Slack variables never appear explicitly: every parity row of the
//! program reads `sum(x) = 2k + b` with the slack bounded by half the
//! selection count, so a row is satisfiable exactly when the selected
//! parity equals `b`. The search branches on selection variables in
//! fixed index order, forces the last undecided variable of any row,
//! prunes branches whose cost already meets the incumbent, and proves
//! optimality by exhausting the remaining tree.

use std::time::Instant;

use exd_core::{ErrorInfo, ExdError, MechanismId};
use exd_ilp::{IntegerProgram, VarId};

use crate::backend::{RawSolve, SolveBudget, SolveStatus, SolverBackend};

const DEADLINE_CHECK_MASK: u64 = 0x3ff;

/// Deterministic branch-and-bound solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct BranchBoundBackend;

impl SolverBackend for BranchBoundBackend {
    fn name(&self) -> &'static str {
        "branch-bound"
    }

    fn solve(&self, program: &IntegerProgram, budget: &SolveBudget) -> Result<RawSolve, ExdError> {
        let deadline = budget.deadline();
        if expired(deadline) {
            return Err(no_incumbent_error(self.name(), program, 0));
        }

        let num_vars = program.num_selection_vars();
        let mut rows = Vec::with_capacity(program.constraints().len());
        let mut var_rows = vec![Vec::new(); num_vars];
        for (row_idx, constraint) in program.constraints().iter().enumerate() {
            let vars: Vec<usize> = constraint
                .selection_vars()
                .iter()
                .map(|var| var.as_raw())
                .collect();
            for &var in &vars {
                var_rows[var].push(row_idx);
            }
            rows.push(Row {
                undecided: vars.len() as u32,
                ones: 0,
                target: constraint.target_parity(),
                vars,
            });
        }

        // A row closed before any branching must already hold.
        if rows.iter().any(|row| row.undecided == 0 && row.target == 1) {
            return Ok(RawSolve {
                status: SolveStatus::Infeasible,
                objective: None,
                selected: None,
                nodes_explored: 0,
            });
        }

        let weights: Vec<u64> = (0..num_vars)
            .map(|var| program.objective_weight(VarId::from_raw(var)))
            .collect();

        let mut searcher = Searcher {
            rows,
            var_rows,
            weights,
            assignment: vec![None; num_vars],
            trail: Vec::new(),
            current_weight: 0,
            best: None,
            deadline,
            nodes: 0,
            timed_out: false,
        };

        if searcher.propagate() {
            searcher.search();
        }

        let nodes_explored = searcher.nodes;
        let timed_out = searcher.timed_out;
        match (timed_out, searcher.best) {
            (false, Some((weight, selection))) => Ok(RawSolve {
                status: SolveStatus::Optimal,
                objective: Some(weight),
                selected: Some(certificate(program, &selection)),
                nodes_explored,
            }),
            (true, Some((weight, selection))) => Ok(RawSolve {
                status: SolveStatus::Feasible,
                objective: Some(weight),
                selected: Some(certificate(program, &selection)),
                nodes_explored,
            }),
            (true, None) => Err(no_incumbent_error(self.name(), program, nodes_explored)),
            (false, None) => Ok(RawSolve {
                status: SolveStatus::Infeasible,
                objective: None,
                selected: None,
                nodes_explored,
            }),
        }
    }
}

fn certificate(program: &IntegerProgram, selection: &[bool]) -> Vec<MechanismId> {
    let mut selected: Vec<MechanismId> = selection
        .iter()
        .enumerate()
        .filter(|(_, &chosen)| chosen)
        .map(|(var, _)| program.mechanism_for(VarId::from_raw(var)))
        .collect();
    selected.sort_unstable();
    selected
}

fn expired(deadline: Option<Instant>) -> bool {
    matches!(deadline, Some(deadline) if Instant::now() >= deadline)
}

fn no_incumbent_error(backend: &str, program: &IntegerProgram, nodes: u64) -> ExdError {
    let info = ErrorInfo::new(
        "budget-exhausted-no-incumbent",
        "time budget expired before any feasible selection was found",
    )
    .with_context("backend", backend)
    .with_context("model_hash", program.model_hash())
    .with_context("target", program.target().as_raw().to_string())
    .with_context("nodes_explored", nodes.to_string())
    .with_hint("raise the time limit or switch backends");
    ExdError::Solver(info)
}

struct Row {
    vars: Vec<usize>,
    target: u8,
    ones: u32,
    undecided: u32,
}

struct Searcher {
    rows: Vec<Row>,
    var_rows: Vec<Vec<usize>>,
    weights: Vec<u64>,
    assignment: Vec<Option<bool>>,
    trail: Vec<(usize, bool)>,
    current_weight: u64,
    best: Option<(u64, Vec<bool>)>,
    deadline: Option<Instant>,
    nodes: u64,
    timed_out: bool,
}

impl Searcher {
    /// Assigns a variable, updating every row it touches. Returns false
    /// when a row closes with the wrong parity.
    fn assign(&mut self, var: usize, value: bool) -> bool {
        self.assignment[var] = Some(value);
        self.trail.push((var, value));
        if value {
            self.current_weight += self.weights[var];
        }
        let mut consistent = true;
        for &row_idx in &self.var_rows[var] {
            let row = &mut self.rows[row_idx];
            row.undecided -= 1;
            if value {
                row.ones += 1;
            }
            if row.undecided == 0 && row.ones & 1 != u32::from(row.target) {
                consistent = false;
            }
        }
        consistent
    }

    fn undo_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some((var, value)) = self.trail.pop() {
                self.assignment[var] = None;
                if value {
                    self.current_weight -= self.weights[var];
                }
                for &row_idx in &self.var_rows[var] {
                    let row = &mut self.rows[row_idx];
                    row.undecided += 1;
                    if value {
                        row.ones -= 1;
                    }
                }
            }
        }
    }

    /// Forces the last undecided variable of every one-open row until a
    /// fixpoint or a conflict.
    fn propagate(&mut self) -> bool {
        loop {
            let mut forced = None;
            for row in &self.rows {
                if row.undecided == 1 {
                    let var = row
                        .vars
                        .iter()
                        .copied()
                        .find(|&var| self.assignment[var].is_none());
                    if let Some(var) = var {
                        let value = row.ones & 1 != u32::from(row.target);
                        forced = Some((var, value));
                        break;
                    }
                }
            }
            match forced {
                Some((var, value)) => {
                    if !self.assign(var, value) {
                        return false;
                    }
                }
                None => return true,
            }
        }
    }

    fn search(&mut self) {
        if self.timed_out {
            return;
        }
        self.nodes += 1;
        if self.nodes & DEADLINE_CHECK_MASK == 0 && expired(self.deadline) {
            self.timed_out = true;
            return;
        }
        if let Some((best_weight, _)) = &self.best {
            if self.current_weight >= *best_weight {
                return;
            }
        }

        let next = self.assignment.iter().position(Option::is_none);
        let Some(var) = next else {
            // Complete assignment: every row closed consistently, so
            // this is a feasible selection cheaper than the incumbent.
            let selection: Vec<bool> = self
                .assignment
                .iter()
                .map(|slot| *slot == Some(true))
                .collect();
            self.best = Some((self.current_weight, selection));
            return;
        };

        for value in [false, true] {
            let mark = self.trail.len();
            if self.assign(var, value) && self.propagate() {
                self.search();
            }
            self.undo_to(mark);
            if self.timed_out {
                return;
            }
        }
    }
}
