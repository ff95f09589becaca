use clap::Parser;
use spool::{render_report, render_tape, Machine, MachineError, MachineLoader};
use std::path::Path;
use std::process::ExitCode;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine definition file to execute
    #[clap(short, long)]
    program: String,

    /// Initial tape contents, overriding the definition's tape
    #[clap(short, long)]
    tape: Option<String>,

    /// Print each step of the execution
    #[clap(short = 'd', long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), MachineError> {
    let mut program = MachineLoader::load_program(Path::new(&cli.program))?;
    if cli.tape.is_some() {
        program.tape = cli.tape.clone();
    }

    let mut machine = Machine::new(program);
    if cli.debug {
        machine = machine.with_tracer(|snapshot| {
            println!(
                "Step: {}, State: {}, Position: {}, Tape: [{}]",
                snapshot.steps,
                snapshot.state,
                snapshot.position,
                render_tape(snapshot.tape)
            );
        });
    }

    machine.run()?;
    println!("{}", render_report(&machine));
    Ok(())
}
