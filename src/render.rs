//! Text rendering for tapes and halt reports. The engine performs no output of its
//! own; these helpers turn its final run-state into printable lines for the CLI.

use crate::machine::Machine;
use crate::tape::Tape;
use crate::types::HaltReason;

/// Renders every visited cell in ascending position order, space-separated.
pub fn render_tape(tape: &Tape) -> String {
    tape.visited()
        .map(|(_, symbol)| symbol.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Renders the final run-state of a halted (or still running) machine:
/// state, head position, step count, why it halted, and the visited tape.
pub fn render_report(machine: &Machine) -> String {
    let mut lines = vec![
        format!("State: {}", machine.state()),
        format!("Position: {}", machine.position()),
        format!("Steps: {}", machine.step_count()),
    ];

    if let Some(HaltReason::NoRule {
        state,
        symbol,
        position,
    }) = machine.halt_reason()
    {
        lines.push(format!(
            "No rule for state {} reading {} at position {}",
            state, symbol, position
        ));
    }

    lines.push(format!("Tape: {}", render_tape(machine.tape())));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Program, Rule, Symbol};
    use std::collections::HashMap;

    #[test]
    fn test_render_tape_ordering() {
        let mut tape = Tape::new(Symbol::blank());
        tape.write(1, Symbol::from("b"));
        tape.write(-1, Symbol::from("a"));
        tape.write(3, Symbol::from("ERROR0"));

        assert_eq!(render_tape(&tape), "a b ERROR0");
    }

    #[test]
    fn test_render_empty_tape() {
        let tape = Tape::new(Symbol::blank());
        assert_eq!(render_tape(&tape), "");
    }

    #[test]
    fn test_render_report_includes_missing_rule() {
        let mut rules: HashMap<Symbol, Rule> = HashMap::new();
        rules.insert(
            Symbol::from("0"),
            Rule {
                write: Symbol::from("0"),
                delta: 1,
                next_state: "main".to_string(),
            },
        );
        let mut states = HashMap::new();
        states.insert("main".to_string(), rules);

        let program = Program {
            name: String::new(),
            start: "main".to_string(),
            blank: Symbol::blank(),
            tape: Some("01".to_string()),
            states,
        };

        let mut machine = Machine::new(program);
        machine.run().unwrap();

        let report = render_report(&machine);
        assert!(report.contains("State: main"));
        assert!(report.contains("Position: 1"));
        assert!(report.contains("Steps: 1"));
        assert!(report.contains("No rule for state main reading 1 at position 1"));
        assert!(report.contains("Tape: 0 1"));
    }
}
