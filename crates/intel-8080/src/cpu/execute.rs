//! Instruction execution for the 8080.
//!
//! PC has already been advanced past the opcode when `execute` runs. Operand
//! bytes are consumed with `fetch_byte`/`operand_address`, so after an
//! instruction PC points at the next one unless the instruction jumped.

use emu_core::Bus;

use crate::alu;
use crate::error::Error;
use crate::flags::Flags;

use super::{I8080, RunState};

impl I8080 {
    /// Execute a fetched opcode.
    pub(super) fn execute<B: Bus>(&mut self, bus: &mut B, op: u8) -> Result<(), Error> {
        match op {
            // NOP
            0x00 => {}

            // LXI rp, d16
            0x01 | 0x11 | 0x21 | 0x31 => {
                let value = self.operand_address(bus);
                self.write_pair(op >> 4, value);
            }

            // STAX B / STAX D
            0x02 | 0x12 => {
                let addr = self.read_pair(op >> 4);
                bus.write(addr, self.regs.a);
            }

            // LDAX B / LDAX D
            0x0A | 0x1A => {
                let addr = self.read_pair(op >> 4);
                self.regs.a = bus.read(addr);
            }

            // INX rp
            0x03 | 0x13 | 0x23 | 0x33 => {
                let pair = op >> 4;
                self.write_pair(pair, self.read_pair(pair).wrapping_add(1));
            }

            // DCX rp
            0x0B | 0x1B | 0x2B | 0x3B => {
                let pair = op >> 4;
                self.write_pair(pair, self.read_pair(pair).wrapping_sub(1));
            }

            // DAD rp
            0x09 | 0x19 | 0x29 | 0x39 => {
                let (sum, carry) = alu::add16(self.regs.hl(), self.read_pair(op >> 4));
                self.regs.set_hl(sum);
                self.flags.cy = carry;
            }

            // INR r / INR M
            0x04 | 0x0C | 0x14 | 0x1C | 0x24 | 0x2C | 0x34 | 0x3C => {
                let index = op >> 3;
                let (result, aux_carry) = alu::inc8(self.read_reg(bus, index));
                self.write_reg(bus, index, result);
                self.flags.update_zsp(result);
                self.flags.ac = aux_carry;
            }

            // DCR r / DCR M
            0x05 | 0x0D | 0x15 | 0x1D | 0x25 | 0x2D | 0x35 | 0x3D => {
                let index = op >> 3;
                let (result, aux_carry) = alu::dec8(self.read_reg(bus, index));
                self.write_reg(bus, index, result);
                self.flags.update_zsp(result);
                self.flags.ac = aux_carry;
            }

            // MVI r, d8 / MVI M, d8
            0x06 | 0x0E | 0x16 | 0x1E | 0x26 | 0x2E | 0x36 | 0x3E => {
                let value = self.fetch_byte(bus);
                self.write_reg(bus, op >> 3, value);
            }

            // RLC - bit 7 goes to both bit 0 and CY
            0x07 => {
                let carry = self.regs.a >> 7;
                self.regs.a = (self.regs.a << 1) | carry;
                self.flags.cy = carry != 0;
            }

            // RRC - bit 0 goes to both bit 7 and CY
            0x0F => {
                let carry = self.regs.a & 1;
                self.regs.a = (self.regs.a >> 1) | (carry << 7);
                self.flags.cy = carry != 0;
            }

            // RAL - rotate left through carry
            0x17 => {
                let old_carry = u8::from(self.flags.cy);
                let new_carry = self.regs.a >> 7;
                self.regs.a = (self.regs.a << 1) | old_carry;
                self.flags.cy = new_carry != 0;
            }

            // RAR - rotate right through carry
            0x1F => {
                let old_carry = u8::from(self.flags.cy) << 7;
                let new_carry = self.regs.a & 1;
                self.regs.a = (self.regs.a >> 1) | old_carry;
                self.flags.cy = new_carry != 0;
            }

            // SHLD a16
            0x22 => {
                let addr = self.operand_address(bus);
                bus.write(addr, self.regs.l);
                bus.write(addr.wrapping_add(1), self.regs.h);
            }

            // LHLD a16
            0x2A => {
                let addr = self.operand_address(bus);
                self.regs.l = bus.read(addr);
                self.regs.h = bus.read(addr.wrapping_add(1));
            }

            // STA a16
            0x32 => {
                let addr = self.operand_address(bus);
                bus.write(addr, self.regs.a);
            }

            // LDA a16
            0x3A => {
                let addr = self.operand_address(bus);
                self.regs.a = bus.read(addr);
            }

            // CMA
            0x2F => self.regs.a = !self.regs.a,

            // STC
            0x37 => self.flags.cy = true,

            // CMC
            0x3F => self.flags.cy = !self.flags.cy,

            // HLT - must precede the MOV range, it sits where MOV M,M would be
            0x76 => self.state = RunState::Halted,

            // MOV dst, src
            0x40..=0x7F => {
                let value = self.read_reg(bus, op);
                self.write_reg(bus, op >> 3, value);
            }

            // ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r|M
            0x80..=0xBF => {
                let operand = self.read_reg(bus, op);
                self.alu_op(op >> 3, operand);
            }

            // ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                let operand = self.fetch_byte(bus);
                self.alu_op(op >> 3, operand);
            }

            // POP B / POP D / POP H
            0xC1 | 0xD1 | 0xE1 => {
                let value = self.pop_u16(bus);
                self.write_pair(op >> 4, value);
            }

            // POP PSW
            0xF1 => {
                let (a, psw) = self.pop_word(bus);
                self.regs.a = a;
                self.flags = Flags::from_psw(psw);
            }

            // PUSH B / PUSH D / PUSH H
            0xC5 | 0xD5 | 0xE5 => {
                let value = self.read_pair(op >> 4);
                self.push_u16(bus, value);
            }

            // PUSH PSW
            0xF5 => self.push_word(bus, self.regs.a, self.flags.to_psw()),

            // JMP a16
            0xC3 => self.regs.pc = self.operand_address(bus),

            // Jcc a16
            0xC2 | 0xCA | 0xD2 | 0xDA | 0xE2 | 0xEA | 0xF2 | 0xFA => {
                let addr = self.operand_address(bus);
                if self.flags.condition(op >> 3) {
                    self.regs.pc = addr;
                }
            }

            // CALL a16
            0xCD => {
                let addr = self.operand_address(bus);
                self.call(bus, addr);
            }

            // Ccc a16
            0xC4 | 0xCC | 0xD4 | 0xDC | 0xE4 | 0xEC | 0xF4 | 0xFC => {
                let addr = self.operand_address(bus);
                if self.flags.condition(op >> 3) {
                    self.call(bus, addr);
                }
            }

            // RET
            0xC9 => self.regs.pc = self.pop_u16(bus),

            // Rcc
            0xC0 | 0xC8 | 0xD0 | 0xD8 | 0xE0 | 0xE8 | 0xF0 | 0xF8 => {
                if self.flags.condition(op >> 3) {
                    self.regs.pc = self.pop_u16(bus);
                }
            }

            // XCHG
            0xEB => {
                let de = self.regs.de();
                self.regs.set_de(self.regs.hl());
                self.regs.set_hl(de);
            }

            // XTHL - swap HL with the word on top of the stack
            0xE3 => {
                let (high, low) = (self.regs.h, self.regs.l);
                let sp = self.regs.sp;
                self.regs.l = bus.read(sp);
                self.regs.h = bus.read(sp.wrapping_add(1));
                bus.write(sp, low);
                bus.write(sp.wrapping_add(1), high);
            }

            // SPHL
            0xF9 => self.regs.sp = self.regs.hl(),

            // PCHL
            0xE9 => self.regs.pc = self.regs.hl(),

            // DAA, RIM/SIM, IN/OUT, DI/EI, RST n and the undocumented duplicates
            _ => {
                return Err(Error::UnimplementedInstruction {
                    opcode: op,
                    pc: self.regs.pc.wrapping_sub(1),
                });
            }
        }

        Ok(())
    }

    /// Accumulator ALU operation selected by bits 5-3 of the opcode.
    fn alu_op(&mut self, kind: u8, operand: u8) {
        let a = self.regs.a;
        match kind & 0x07 {
            // ADD / ADC
            0 | 1 => {
                let carry = if kind & 1 == 1 { self.flags.carry_in() } else { 0 };
                let result = alu::add8(a, operand, carry);
                self.flags.ac = result.aux_carry;
                self.apply_arithmetic_flags(result.raw);
            }
            // SUB / SBB
            2 | 3 => {
                let borrow = if kind & 1 == 1 { self.flags.carry_in() } else { 0 };
                let result = alu::sub8(a, operand, borrow);
                self.flags.ac = result.aux_carry;
                self.apply_arithmetic_flags(result.raw);
            }
            // ANA
            4 => {
                self.regs.a = a & operand;
                self.flags.update_logic(self.regs.a, alu::and_aux_carry(a, operand));
            }
            // XRA
            5 => {
                self.regs.a = a ^ operand;
                self.flags.update_logic(self.regs.a, false);
            }
            // ORA
            6 => {
                self.regs.a = a | operand;
                self.flags.update_logic(self.regs.a, false);
            }
            // CMP - flags only, A is untouched
            _ => {
                let result = alu::sub8(a, operand, 0);
                self.flags.ac = result.aux_carry;
                self.flags.update_arithmetic(result.raw);
            }
        }
    }

    /// Push the return address (PC, already past the operand) and jump.
    fn call<B: Bus>(&mut self, bus: &mut B, addr: u16) {
        self.push_u16(bus, self.regs.pc);
        self.regs.pc = addr;
    }
}
