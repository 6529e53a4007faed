//! Uniform solve contract over interchangeable optimization backends.

use std::time::{Duration, Instant};

use exd_core::{ExdError, MechanismId};
use exd_ilp::IntegerProgram;
use serde::{Deserialize, Serialize};

/// Resource budget scoped to a single solve invocation.
///
/// The budget is the only cancellation mechanism: a backend whose
/// deadline passes returns its incumbent rather than being killed, so
/// every resource it holds is released on the normal exit path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveBudget {
    /// Wall-clock limit for the solve; `None` means run to proof.
    pub time_limit: Option<Duration>,
    /// Solver-internal parallelism hint; opaque to the orchestrator.
    pub thread_hint: usize,
}

impl SolveBudget {
    /// Creates an unbounded single-threaded budget.
    pub fn unbounded() -> Self {
        Self {
            time_limit: None,
            thread_hint: 1,
        }
    }

    /// Creates a budget with the given wall-clock limit.
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit: Some(time_limit),
            thread_hint: 1,
        }
    }

    /// Converts the limit into an absolute deadline measured from now.
    pub fn deadline(&self) -> Option<Instant> {
        self.time_limit.map(|limit| Instant::now() + limit)
    }
}

/// Termination status reported by a backend.
///
/// Backend failures (unavailable, over capacity, out of budget with no
/// incumbent) are `Err(ExdError::Solver)` rather than a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolveStatus {
    /// The reported objective value is proven minimal.
    Optimal,
    /// A solution was found but the budget expired before the proof;
    /// the objective is a valid upper bound only.
    Feasible,
    /// No selection satisfies the parity system; distance is infinite
    /// and the proof is complete.
    Infeasible,
}

/// Raw outcome of one backend invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSolve {
    /// Termination status.
    pub status: SolveStatus,
    /// Objective value of the returned selection, when one exists.
    pub objective: Option<u64>,
    /// Selected fault mechanisms (the certificate), sorted by id.
    pub selected: Option<Vec<MechanismId>>,
    /// Search nodes (or enumerated selections) examined.
    pub nodes_explored: u64,
}

/// Capability contract implemented once per optimization backend.
///
/// For a fixed program and budget configuration the optimal *value* is
/// deterministic; the certificate need not be when multiple optima
/// exist.
pub trait SolverBackend: Send + Sync {
    /// Stable backend identifier carried into results and errors.
    fn name(&self) -> &'static str;

    /// Runs the solve within the budget and extracts the outcome.
    fn solve(&self, program: &IntegerProgram, budget: &SolveBudget) -> Result<RawSolve, ExdError>;
}
