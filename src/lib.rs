//! This crate provides the core logic for a single-tape sequential machine interpreter.
//! It includes the execution engine with its sparse unbounded tape, a loader for
//! JSON machine definitions, and text rendering for halt reports.

pub mod loader;
pub mod machine;
pub mod render;
pub mod tape;
pub mod types;

/// Re-exports the `MachineLoader` struct and tape-text parsing from the loader module.
pub use loader::{parse_tape, MachineLoader};
/// Re-exports the `Machine` engine and its tracing types from the machine module.
pub use machine::{Machine, StepSnapshot, Tracer};
/// Re-exports the rendering helpers from the render module.
pub use render::{render_report, render_tape};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the types describing machine definitions and execution outcomes.
pub use types::{
    Delta, HaltReason, MachineError, Position, Program, Rule, RunState, Step, Symbol,
    DEFAULT_BLANK_SYMBOL, HALT_STATE,
};
