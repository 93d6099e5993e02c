//! ALU operations for the 8080.
//!
//! Arithmetic returns the untruncated 16-bit result so the caller can derive
//! CY from it. The 8080 subtracts by adding the complement, which decides
//! how the auxiliary carry comes out for SUB/SBB/CMP.

/// Result of an 8-bit add or subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    /// Result before truncation to 8 bits.
    pub raw: u16,
    /// Carry out of bit 3.
    pub aux_carry: bool,
}

/// `a + b + carry`.
#[must_use]
pub fn add8(a: u8, b: u8, carry: u16) -> AluResult {
    let raw = u16::from(a) + u16::from(b) + carry;
    let aux_carry = u16::from(a & 0x0F) + u16::from(b & 0x0F) + carry > 0x0F;
    AluResult { raw, aux_carry }
}

/// `a - b - borrow`, wrapping in 16 bits so a borrow shows up in the high byte.
#[must_use]
pub fn sub8(a: u8, b: u8, borrow: u16) -> AluResult {
    let raw = u16::from(a).wrapping_sub(u16::from(b)).wrapping_sub(borrow);
    let aux_carry = u16::from(a & 0x0F) + u16::from(!b & 0x0F) + (1 - borrow) > 0x0F;
    AluResult { raw, aux_carry }
}

/// Auxiliary carry for AND: the 8080 ORs bit 3 of both operands.
#[must_use]
pub const fn and_aux_carry(a: u8, b: u8) -> bool {
    (a | b) & 0x08 != 0
}

/// Increment with wraparound. Returns the result and auxiliary carry.
#[must_use]
pub const fn inc8(value: u8) -> (u8, bool) {
    let result = value.wrapping_add(1);
    (result, result & 0x0F == 0)
}

/// Decrement with wraparound. Returns the result and auxiliary carry.
#[must_use]
pub const fn dec8(value: u8) -> (u8, bool) {
    let result = value.wrapping_sub(1);
    (result, result & 0x0F != 0x0F)
}

/// 16-bit add for DAD. Returns the sum and the carry out of bit 15.
#[must_use]
pub fn add16(a: u16, b: u16) -> (u16, bool) {
    let sum = u32::from(a) + u32::from(b);
    (sum as u16, sum > 0xFFFF)
}
