//! Intel 8080 emulator binary.
//!
//! Loads a raw image at address 0 and runs it until HLT. Exits 0 on HLT and
//! 1 on any fault.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use emu_core::{Cpu, Observable};
use intel_8080::{I8080, Machine};

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// Run a raw Intel 8080 program image.
#[derive(Parser)]
#[command(version)]
struct CliArgs {
    /// Image to load at address 0x0000
    #[arg(default_value = "in.rom")]
    rom: PathBuf,

    /// Print PC and opcode before every instruction
    #[arg(long, env = "EMU_8080_TRACE")]
    trace: bool,

    /// Print registers and flags when execution stops
    #[arg(long)]
    dump: bool,

    /// Give up after this many instructions
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

fn make_machine(cli: &CliArgs) -> Machine {
    let image = match std::fs::read(&cli.rom) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to read {}: {e}", cli.rom.display());
            process::exit(1);
        }
    };

    match Machine::from_image(&image) {
        Ok(machine) => machine,
        Err(e) => {
            eprintln!("{}: {e}", cli.rom.display());
            process::exit(1);
        }
    }
}

/// Run until HLT, a fault, or the step limit. Returns the exit status.
fn run(machine: &mut Machine, cli: &CliArgs) -> i32 {
    let trace = cli.trace;
    let result = machine.run_traced(cli.max_steps, |pc, opcode| {
        if trace {
            eprintln!("{pc:04X}: {opcode:02X}");
        }
    });

    match result {
        Ok(_) if machine.cpu().is_halted() => 0,
        Ok(steps) => {
            eprintln!(
                "Step limit reached after {steps} instructions at PC=${:04X}",
                machine.cpu().regs.pc
            );
            1
        }
        Err(e) => {
            eprintln!("Fault: {e}");
            1
        }
    }
}

/// Print every observable register and flag, one per line.
fn dump(cpu: &I8080) {
    for path in cpu.query_paths() {
        if let Some(value) = cpu.query(path) {
            println!("{path:>8} = {value}");
        }
    }
}

fn main() {
    let cli = CliArgs::parse();
    let mut machine = make_machine(&cli);

    let status = run(&mut machine, &cli);

    if cli.dump {
        dump(machine.cpu());
    }
    process::exit(status);
}
