//! This module defines the core data structures and types used throughout the machine
//! interpreter, including the machine definition, transition rules, run-state and halt
//! outcomes, and error types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The default blank symbol used on the tape when a definition does not override it.
pub const DEFAULT_BLANK_SYMBOL: &str = "_";
/// The reserved terminal state label. Reaching it ends execution without a table lookup.
pub const HALT_STATE: &str = "HALT";

/// A signed tape address. The tape is unbounded in both directions.
pub type Position = i64;
/// A signed head displacement applied after a step. Any magnitude is legal,
/// including 0 and multi-cell jumps.
pub type Delta = i64;

/// An opaque alphabet token stored on the tape.
///
/// Symbols carry no numeric meaning and the alphabet is unrestricted; a
/// multi-character sentinel such as `ERROR0` is one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The default blank symbol, `_`.
    pub fn blank() -> Self {
        Self(DEFAULT_BLANK_SYMBOL.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<char> for Symbol {
    fn from(token: char) -> Self {
        Self(token.to_string())
    }
}

/// A single transition rule: what to write, how far to move, where to go next.
///
/// In the persisted definition a rule is the 3-element array
/// `[write, delta, next_state]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Symbol, Delta, String)", into = "(Symbol, Delta, String)")]
pub struct Rule {
    /// The symbol written at the current position.
    pub write: Symbol,
    /// The head displacement applied after writing.
    pub delta: Delta,
    /// The state the machine transitions to.
    pub next_state: String,
}

impl From<(Symbol, Delta, String)> for Rule {
    fn from((write, delta, next_state): (Symbol, Delta, String)) -> Self {
        Self {
            write,
            delta,
            next_state,
        }
    }
}

impl From<Rule> for (Symbol, Delta, String) {
    fn from(rule: Rule) -> Self {
        (rule.write, rule.delta, rule.next_state)
    }
}

/// A machine definition: the transition table plus its metadata.
///
/// The table maps a state label to the rules for each symbol readable in that
/// state. It is fixed for the lifetime of a run and read-only from the
/// engine's perspective; several engines may share one definition behind an
/// `Arc`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Program {
    /// The name of the machine.
    #[serde(default)]
    pub name: String,
    /// The initial state. Named explicitly rather than derived from table order.
    pub start: String,
    /// The blank symbol used on the tape.
    #[serde(default = "Symbol::blank")]
    pub blank: Symbol,
    /// Optional initial tape text, parsed by the loader at machine construction.
    #[serde(default)]
    pub tape: Option<String>,
    /// The transition table, keyed by state then by the symbol under the head.
    pub states: HashMap<String, HashMap<Symbol, Rule>>,
}

impl Program {
    /// Resolves the rule for the given state and symbol under the head.
    pub fn lookup(&self, state: &str, symbol: &Symbol) -> Option<&Rule> {
        self.states.get(state).and_then(|rules| rules.get(symbol))
    }

    /// Checks whether the table defines any rules for the given state.
    pub fn has_state(&self, state: &str) -> bool {
        self.states.contains_key(state)
    }

    /// Returns the number of states in the table.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns the total number of transition rules across all states.
    pub fn transition_count(&self) -> usize {
        self.states.values().map(|rules| rules.len()).sum()
    }
}

/// The engine's run-state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Constructed but not yet stepped.
    #[default]
    NotStarted,
    /// At least one step taken and no halting condition reached yet.
    Running,
    /// A halting condition was reached; further steps are no-ops.
    Halted,
}

/// The outcome of a single execution step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The machine performed a step and continues execution.
    Continue,
    /// The machine has halted.
    Halted(HaltReason),
}

/// Why the machine halted.
///
/// Both variants are ordinary outcomes; a malformed table surfaces as
/// [`MachineError::UndefinedState`] instead, never as a `HaltReason`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// The machine reached the reserved `HALT` label.
    Halt,
    /// No rule is defined for the state and the symbol under the head.
    ///
    /// Authored machines use this deliberately, both to mark completion and
    /// to signal sentinel error symbols, so the triggering triple is kept
    /// for reporting.
    NoRule {
        state: String,
        symbol: Symbol,
        position: Position,
    },
}

/// Represents the errors that can occur while loading or executing a machine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MachineError {
    /// The current state is neither `HALT` nor a key of the transition table.
    #[error("undefined state: {0}")]
    UndefinedState(String),
    /// Indicates an error during parsing of a machine definition.
    #[error("definition parsing error: {0}")]
    ParseError(String),
    /// Indicates an error related to file system operations.
    #[error("file error: {0}")]
    FileError(String),
}
