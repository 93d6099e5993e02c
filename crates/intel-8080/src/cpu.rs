//! 8080 CPU core with per-instruction execution.

mod execute;

use emu_core::{Bus, Cpu, Observable, Value};

use crate::error::Error;
use crate::flags::Flags;
use crate::registers::{RegisterPair, Registers};

/// Execution state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// HLT executed. Not an error.
    Halted,
    /// An unimplemented opcode was fetched. There is no way back.
    Faulted(Error),
}

/// Intel 8080 CPU.
///
/// The CPU does not own memory. The bus is passed to `step()` so the host
/// can inspect or patch memory between instructions.
pub struct I8080 {
    /// Register file.
    pub regs: Registers,
    /// Condition flags.
    pub flags: Flags,
    /// Interrupt-enable latch. No instruction writes it and nothing delivers
    /// interrupts.
    pub inte: bool,
    state: RunState,
}

impl I8080 {
    /// Create a CPU in the power-on state: everything zero, running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::default(),
            flags: Flags::default(),
            inte: false,
            state: RunState::Running,
        }
    }

    #[must_use]
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Execute one instruction.
    ///
    /// On an unimplemented opcode the CPU faults and PC is left pointing at
    /// the offending opcode.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), Error> {
        match self.state {
            RunState::Halted => return Ok(()),
            RunState::Faulted(error) => return Err(error),
            RunState::Running => {}
        }

        let pc = self.regs.pc;
        let opcode = self.fetch_byte(bus);
        if let Err(error) = self.execute(bus, opcode) {
            self.regs.pc = pc;
            self.state = RunState::Faulted(error);
            return Err(error);
        }
        Ok(())
    }

    /// Read the byte at PC and advance PC past it.
    fn fetch_byte<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let byte = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        byte
    }

    /// Read the 16-bit little-endian operand following the opcode and
    /// advance PC past it.
    pub fn operand_address<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = self.fetch_byte(bus);
        let high = self.fetch_byte(bus);
        u16::from(high) << 8 | u16::from(low)
    }

    /// SP -= 2, then low byte at SP and high byte at SP+1.
    pub fn push_word<B: Bus>(&mut self, bus: &mut B, high: u8, low: u8) {
        self.regs.sp = self.regs.sp.wrapping_sub(2);
        bus.write(self.regs.sp, low);
        bus.write(self.regs.sp.wrapping_add(1), high);
    }

    /// Read low byte at SP and high byte at SP+1, then SP += 2.
    pub fn pop_word<B: Bus>(&mut self, bus: &mut B) -> (u8, u8) {
        let low = bus.read(self.regs.sp);
        let high = bus.read(self.regs.sp.wrapping_add(1));
        self.regs.sp = self.regs.sp.wrapping_add(2);
        (high, low)
    }

    fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        self.push_word(bus, (value >> 8) as u8, value as u8);
    }

    fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let (high, low) = self.pop_word(bus);
        u16::from(high) << 8 | u16::from(low)
    }

    /// Canonical post-ALU update: flags from the raw result, low byte into A.
    pub fn apply_arithmetic_flags(&mut self, raw: u16) {
        self.flags.update_arithmetic(raw);
        self.regs.a = raw as u8;
    }

    /// Read an 8-bit operand by its 3-bit encoding. 6 is M, the byte at HL.
    fn read_reg<B: Bus>(&self, bus: &mut B, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => bus.read(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    /// Write an 8-bit operand by its 3-bit encoding. 6 is M, the byte at HL.
    fn write_reg<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => bus.write(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    /// Read a 16-bit operand by its 2-bit encoding: BC, DE, HL, SP.
    fn read_pair(&self, index: u8) -> u16 {
        match RegisterPair::decode(index) {
            Some(pair) => self.regs.pair(pair),
            None => self.regs.sp,
        }
    }

    /// Write a 16-bit operand by its 2-bit encoding: BC, DE, HL, SP.
    fn write_pair(&mut self, index: u8, value: u16) {
        match RegisterPair::decode(index) {
            Some(pair) => self.regs.set_pair(pair, value),
            None => self.regs.sp = value,
        }
    }
}

impl Default for I8080 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu for I8080 {
    type Registers = Registers;
    type Error = Error;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<(), Error> {
        I8080::step(self, bus)
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.state == RunState::Halted
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

const QUERY_PATHS: &[&str] = &[
    "pc", "sp", "a", "b", "c", "d", "e", "h", "l", "bc", "de", "hl", "psw", "flags.z", "flags.s",
    "flags.p", "flags.cy", "flags.ac", "inte", "halted",
];

impl Observable for I8080 {
    fn query(&self, path: &str) -> Option<Value> {
        let value: Value = match path {
            "pc" => self.regs.pc.into(),
            "sp" => self.regs.sp.into(),
            "a" => self.regs.a.into(),
            "b" => self.regs.b.into(),
            "c" => self.regs.c.into(),
            "d" => self.regs.d.into(),
            "e" => self.regs.e.into(),
            "h" => self.regs.h.into(),
            "l" => self.regs.l.into(),
            "bc" => self.regs.bc().into(),
            "de" => self.regs.de().into(),
            "hl" => self.regs.hl().into(),
            "psw" => (u16::from(self.regs.a) << 8 | u16::from(self.flags.to_psw())).into(),
            "flags.z" => self.flags.z.into(),
            "flags.s" => self.flags.s.into(),
            "flags.p" => self.flags.p.into(),
            "flags.cy" => self.flags.cy.into(),
            "flags.ac" => self.flags.ac.into(),
            "inte" => self.inte.into(),
            "halted" => (self.state == RunState::Halted).into(),
            _ => return None,
        };
        Some(value)
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}
