#![deny(missing_docs)]
#![doc = "Integer-program construction for exact circuit-level distance: parity linearization and the minimum-weight objective."]

pub mod builder;
pub mod objective;
pub mod program;

pub use builder::{build_program, BuildOutcome};
pub use objective::formulate_objective;
pub use program::{IntegerProgram, ParityConstraint, VarId, VarKind};
