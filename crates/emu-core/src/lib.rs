//! Core traits and types for instruction-stepped emulation.
//!
//! A CPU executes whole instructions against a bus it does not own. Every
//! component exposes its state for inspection.

mod bus;
mod cpu;
mod observable;

pub use bus::{ADDRESS_SPACE, Bus, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
