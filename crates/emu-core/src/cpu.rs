//! CPU core trait.

use crate::Bus;

/// A CPU that executes one whole instruction per step.
///
/// The bus is passed in, not owned, so the same memory can be inspected or
/// patched by the host between steps.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Fatal condition raised by an instruction.
    type Error;

    /// Execute one instruction.
    ///
    /// A halted CPU does nothing. A CPU that has faulted keeps returning
    /// the same error.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true if the CPU has executed a halt instruction.
    fn is_halted(&self) -> bool;

    /// Reset the CPU to its power-on state.
    fn reset(&mut self);
}
