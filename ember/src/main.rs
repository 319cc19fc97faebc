// Copyright (C) 2025 Ethan Uppal. All rights reserved.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing::Level;

use ember_vm::{
    arch::Word,
    fault::MachineResult,
    loader,
    machine::{Machine, Output, Status},
};

/// An emulator for an 8-bit stack-and-register machine.
#[derive(Parser)]
struct Args {
    /// Program source: one base-2 instruction byte per line
    program: PathBuf,

    /// Print a machine state line to stderr before every instruction
    #[arg(long)]
    trace: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Prints each PRN value as a base-2 literal, matching the source format.
struct Console;

impl Output for Console {
    fn emit(&mut self, value: Word) {
        println!("{value:#b}");
    }
}

fn init_tracing(level: Level) {
    let _ = tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_max_level(level)
        .try_init();
}

fn run_with_trace(machine: &mut Machine, out: &mut Console) -> MachineResult {
    while machine.status() == Status::Running {
        eprintln!("{}", machine.snapshot());
        machine.step(out)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(if args.debug { Level::TRACE } else { Level::WARN });

    let image = match loader::load_file(&args.program) {
        Ok(image) => image,
        Err(error) => {
            eprintln!("{}: {error}", args.program.display());
            return ExitCode::from(2);
        }
    };

    let mut machine = Machine::new();
    if let Err(fault) = machine.load(&image) {
        eprintln!("{}: {fault}", args.program.display());
        return ExitCode::from(2);
    }

    let mut console = Console;
    let outcome = if args.trace {
        run_with_trace(&mut machine, &mut console)
    } else {
        machine.run(&mut console)
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(fault) => {
            eprintln!("{fault}");
            ExitCode::FAILURE
        }
    }
}
