#![deny(missing_docs)]
#![doc = "Solver backends, result aggregation, and per-target orchestration for the EXD exact-distance engine."]

pub mod backend;
pub mod branch_bound;
pub mod exhaustive;
pub mod report;
pub mod run;

pub use backend::{RawSolve, SolveBudget, SolveStatus, SolverBackend};
pub use branch_bound::BranchBoundBackend;
pub use exhaustive::ExhaustiveBackend;
pub use report::{compare_results, verify_certificate, SolveResult};
pub use run::{
    compare_backends, compute_any_logical_distance, compute_distance, resolve_backend,
    solve_target,
};
