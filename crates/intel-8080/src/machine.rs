//! An 8080 with its own flat 64 KiB memory.

use emu_core::SimpleBus;

use crate::cpu::{I8080, RunState};
use crate::error::Error;

/// CPU plus the memory it runs against.
///
/// Each machine owns its memory; nothing is shared between instances.
pub struct Machine {
    cpu: I8080,
    bus: SimpleBus,
}

impl Machine {
    /// Build a machine with `image` copied to address 0.
    ///
    /// Every register and flag starts at zero and execution begins at 0x0000.
    /// Bytes past 0xFFFF are dropped.
    pub fn from_image(image: &[u8]) -> Result<Self, Error> {
        if image.is_empty() {
            return Err(Error::EmptyImage);
        }
        let mut bus = SimpleBus::new();
        bus.load(0x0000, image);
        Ok(Self {
            cpu: I8080::new(),
            bus,
        })
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Result<(), Error> {
        self.cpu.step(&mut self.bus)
    }

    /// Run until HLT. Returns the number of instructions executed.
    pub fn run(&mut self) -> Result<u64, Error> {
        self.run_traced(None, |_, _| {})
    }

    /// Run until HLT or until `max_steps` instructions have executed,
    /// calling `trace` with PC and opcode before each instruction.
    ///
    /// Returns the number of instructions executed. Check
    /// `cpu().state()` to tell a halt from an exhausted step limit.
    pub fn run_traced<F: FnMut(u16, u8)>(
        &mut self,
        max_steps: Option<u64>,
        mut trace: F,
    ) -> Result<u64, Error> {
        let mut count = 0;
        while self.cpu.state() == RunState::Running {
            if max_steps.is_some_and(|limit| count >= limit) {
                return Ok(count);
            }
            let pc = self.cpu.regs.pc;
            trace(pc, self.bus.peek(pc));
            self.step()?;
            count += 1;
        }
        // Faulted before the loop started.
        if let RunState::Faulted(error) = self.cpu.state() {
            return Err(error);
        }
        Ok(count)
    }

    #[must_use]
    pub fn cpu(&self) -> &I8080 {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut I8080 {
        &mut self.cpu
    }

    #[must_use]
    pub fn bus(&self) -> &SimpleBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut SimpleBus {
        &mut self.bus
    }
}
