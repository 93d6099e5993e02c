//! Instruction-level Intel 8080 CPU emulator.
//!
//! Each call to `step()` executes exactly one instruction.

mod alu;
mod cpu;
mod error;
mod flags;
mod machine;
mod registers;

pub use cpu::{I8080, RunState};
pub use error::Error;
pub use flags::{AC, CY, Flags, P, S, Z};
pub use machine::Machine;
pub use registers::{RegisterPair, Registers};
