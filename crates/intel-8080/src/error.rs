//! Fatal emulator errors.

use thiserror::Error;

/// Fatal conditions. There is no recovery path: a faulted CPU stays faulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The opcode has no semantics in this emulator.
    #[error("unimplemented instruction {opcode:#04X} at {pc:#06X}")]
    UnimplementedInstruction { opcode: u8, pc: u16 },

    /// No program was supplied.
    #[error("empty image: no program to run")]
    EmptyImage,
}
