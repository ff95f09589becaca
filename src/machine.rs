//! This module defines the `Machine` struct, the execution engine for a single-tape,
//! single-head sequential machine. It owns the tape, drives the step/transition
//! algorithm against a read-only definition, and applies the halt/error policy.

use crate::loader::parse_tape;
use crate::tape::Tape;
use crate::types::{
    HaltReason, MachineError, Position, Program, RunState, Step, Symbol, HALT_STATE,
};
use std::sync::Arc;

/// A snapshot handed to the step tracer after each mutating step.
#[derive(Debug, Clone, Copy)]
pub struct StepSnapshot<'a> {
    /// The state entered by the step.
    pub state: &'a str,
    /// The head position after the move.
    pub position: Position,
    /// The full visited tape.
    pub tape: &'a Tape,
    /// Steps executed so far.
    pub steps: usize,
}

/// An optional observer invoked after each mutating step.
///
/// Tracing is injected at construction rather than toggled globally, and it
/// never affects engine semantics.
pub type Tracer = Box<dyn FnMut(StepSnapshot<'_>)>;

/// The execution engine.
///
/// A `Machine` owns its tape exclusively and reads a definition that is never
/// mutated after construction, so several machines may share one definition
/// behind an `Arc`. Execution is single-threaded and fully synchronous; a
/// step is indivisible.
pub struct Machine {
    program: Arc<Program>,
    tape: Tape,
    state: String,
    position: Position,
    run_state: RunState,
    halt_reason: Option<HaltReason>,
    step_count: usize,
    tracer: Option<Tracer>,
}

impl Machine {
    /// Creates a new `Machine` from a definition.
    ///
    /// The head starts at position 0 in the definition's `start` state. If
    /// the definition carries initial tape text, it is loaded at origin 0.
    ///
    /// Accepts either a `Program` or an `Arc<Program>`, so one definition can
    /// drive several independent machines.
    pub fn new(program: impl Into<Arc<Program>>) -> Self {
        let program = program.into();
        Self {
            tape: Self::initial_tape(&program),
            state: program.start.clone(),
            position: 0,
            run_state: RunState::NotStarted,
            halt_reason: None,
            step_count: 0,
            tracer: None,
            program,
        }
    }

    /// Installs a step tracer, consuming and returning the machine.
    pub fn with_tracer(mut self, tracer: impl FnMut(StepSnapshot<'_>) + 'static) -> Self {
        self.tracer = Some(Box::new(tracer));
        self
    }

    fn initial_tape(program: &Program) -> Tape {
        let mut tape = Tape::new(program.blank.clone());
        if let Some(text) = &program.tape {
            tape.load(parse_tape(text), 0);
        }
        tape
    }

    /// Writes `contents` into consecutive cells starting at `origin`,
    /// replacing whatever the definition loaded there.
    pub fn load_tape(&mut self, contents: impl IntoIterator<Item = Symbol>, origin: Position) {
        self.tape.load(contents, origin);
    }

    /// Executes a single, indivisible step.
    ///
    /// A step halts the machine through exactly one of three triggers:
    /// reaching the reserved `HALT` label (clean, no table lookup), an
    /// undefined current state (fatal, returned as an error), or a missing
    /// rule for the symbol under the head (halt-by-design, reported with the
    /// triggering state, symbol, and position). Otherwise it writes one cell,
    /// moves the head, and enters the next state.
    ///
    /// Once halted, `step` is a no-op that repeats the halting outcome.
    pub fn step(&mut self) -> Result<Step, MachineError> {
        if self.run_state == RunState::Halted {
            return match &self.halt_reason {
                Some(reason) => Ok(Step::Halted(reason.clone())),
                None => Err(MachineError::UndefinedState(self.state.clone())),
            };
        }
        self.run_state = RunState::Running;

        if self.state == HALT_STATE {
            return Ok(self.halt(HaltReason::Halt));
        }

        if !self.program.has_state(&self.state) {
            self.run_state = RunState::Halted;
            return Err(MachineError::UndefinedState(self.state.clone()));
        }

        let symbol = self.tape.read(self.position);
        let rule = match self.program.lookup(&self.state, &symbol).cloned() {
            Some(rule) => rule,
            None => {
                let reason = HaltReason::NoRule {
                    state: self.state.clone(),
                    symbol,
                    position: self.position,
                };
                return Ok(self.halt(reason));
            }
        };

        self.tape.write(self.position, rule.write);
        self.position += rule.delta;
        self.state = rule.next_state;
        self.step_count += 1;

        if let Some(tracer) = self.tracer.as_mut() {
            tracer(StepSnapshot {
                state: &self.state,
                position: self.position,
                tape: &self.tape,
                steps: self.step_count,
            });
        }

        Ok(Step::Continue)
    }

    /// Runs the machine until it halts.
    ///
    /// There is no step bound: a machine that never reaches a halting
    /// condition runs forever. Callers wanting bounded execution should drive
    /// [`Machine::step`] in their own loop.
    pub fn run(&mut self) -> Result<HaltReason, MachineError> {
        loop {
            match self.step()? {
                Step::Continue => {}
                Step::Halted(reason) => return Ok(reason),
            }
        }
    }

    fn halt(&mut self, reason: HaltReason) -> Step {
        self.run_state = RunState::Halted;
        self.halt_reason = Some(reason.clone());
        Step::Halted(reason)
    }

    /// Resets the machine to its initial configuration, reloading the tape
    /// from the definition.
    pub fn reset(&mut self) {
        self.tape = Self::initial_tape(&self.program);
        self.state = self.program.start.clone();
        self.position = 0;
        self.run_state = RunState::NotStarted;
        self.halt_reason = None;
        self.step_count = 0;
    }

    /// Returns the current state label.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Returns the current head position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the engine's run-state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Returns why the machine halted, if it halted by reaching `HALT` or by
    /// a missing rule. `None` while running and after a fatal error.
    pub fn halt_reason(&self) -> Option<&HaltReason> {
        self.halt_reason.as_ref()
    }

    /// Returns the number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the tape for reporting.
    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the machine definition.
    pub fn program(&self) -> &Program {
        &self.program
    }
}
