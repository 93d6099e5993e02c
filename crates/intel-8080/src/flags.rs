//! 8080 condition flags and the packed PSW flag byte.

/// Sign flag (bit 7) - set if bit 7 of the result is set.
pub const S: u8 = 0b1000_0000;

/// Zero flag (bit 6) - set if the result is zero.
pub const Z: u8 = 0b0100_0000;

/// Auxiliary carry flag (bit 4) - carry out of bit 3.
pub const AC: u8 = 0b0001_0000;

/// Parity flag (bit 2) - set if the result has an even number of 1 bits.
pub const P: u8 = 0b0000_0100;

/// Bit 1 always reads as 1 in the packed byte. Bits 3 and 5 always read 0.
const ALWAYS_SET: u8 = 0b0000_0010;

/// Carry flag (bit 0) - carry out of bit 7, or borrow.
pub const CY: u8 = 0b0000_0001;

/// Compute parity of a byte (true if even number of 1 bits).
#[must_use]
pub const fn parity(value: u8) -> bool {
    value.count_ones().is_multiple_of(2)
}

/// Condition flags.
///
/// Kept as separate booleans; the packed form only exists on the stack
/// (`PUSH PSW` / `POP PSW`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    pub z: bool,
    pub s: bool,
    pub p: bool,
    pub cy: bool,
    pub ac: bool,
}

impl Flags {
    /// Carry as a number, for add/subtract with carry.
    #[must_use]
    pub const fn carry_in(&self) -> u16 {
        self.cy as u16
    }

    pub fn set_parity(&mut self, value: u8) {
        self.p = parity(value);
    }

    /// Z, S and P from an 8-bit result. Used by INR/DCR, which leave CY alone.
    pub fn update_zsp(&mut self, value: u8) {
        self.z = value == 0;
        self.s = value & 0x80 != 0;
        self.set_parity(value);
    }

    /// Z, S, P and CY from an untruncated 16-bit ALU result.
    ///
    /// CY is set when any bit above bit 7 is set. For subtraction the raw
    /// value wraps to 0xFFxx on borrow, which sets CY as required.
    pub fn update_arithmetic(&mut self, raw: u16) {
        self.update_zsp(raw as u8);
        self.cy = raw > 0xFF;
    }

    /// Z, S, P from a logic result. Logic ops never carry.
    pub fn update_logic(&mut self, value: u8, aux_carry: bool) {
        self.update_zsp(value);
        self.cy = false;
        self.ac = aux_carry;
    }

    /// Pack into the byte pushed by `PUSH PSW`.
    ///
    /// Layout: S Z 0 AC 0 P 1 CY.
    #[must_use]
    pub const fn to_psw(self) -> u8 {
        let mut f = ALWAYS_SET;
        if self.s {
            f |= S;
        }
        if self.z {
            f |= Z;
        }
        if self.ac {
            f |= AC;
        }
        if self.p {
            f |= P;
        }
        if self.cy {
            f |= CY;
        }
        f
    }

    /// Unpack the byte popped by `POP PSW`. Reserved bits are ignored.
    #[must_use]
    pub const fn from_psw(byte: u8) -> Self {
        Self {
            z: byte & Z != 0,
            s: byte & S != 0,
            p: byte & P != 0,
            cy: byte & CY != 0,
            ac: byte & AC != 0,
        }
    }

    /// Evaluate a condition code (bits 5-3 of a conditional jump, call or
    /// return opcode).
    ///
    /// 0 NZ, 1 Z, 2 NC, 3 C, 4 PO, 5 PE, 6 P, 7 M.
    #[must_use]
    pub const fn condition(&self, code: u8) -> bool {
        match code & 0x07 {
            0 => !self.z,
            1 => self.z,
            2 => !self.cy,
            3 => self.cy,
            4 => !self.p,
            5 => self.p,
            6 => !self.s,
            _ => self.s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_counts_bits_zero_through_eight() {
        // Values with 0, 1, 2, ... 8 bits set.
        let values = [0x00, 0x01, 0x03, 0x07, 0x0F, 0x1F, 0x3F, 0x7F, 0xFF];
        for (bits, &value) in values.iter().enumerate() {
            let mut flags = Flags::default();
            flags.set_parity(value);
            assert_eq!(flags.p, bits % 2 == 0, "{value:#04X} has {bits} bits set");
        }
    }

    #[test]
    fn psw_layout_fixes_reserved_bits() {
        assert_eq!(Flags::default().to_psw(), 0x02);
        let all = Flags {
            z: true,
            s: true,
            p: true,
            cy: true,
            ac: true,
        };
        assert_eq!(all.to_psw(), 0xD7);
    }

    #[test]
    fn psw_round_trips_every_flag_combination() {
        for bits in 0u8..32 {
            let flags = Flags {
                z: bits & 1 != 0,
                s: bits & 2 != 0,
                p: bits & 4 != 0,
                cy: bits & 8 != 0,
                ac: bits & 16 != 0,
            };
            assert_eq!(Flags::from_psw(flags.to_psw()), flags);
        }
    }

    #[test]
    fn arithmetic_carry_from_bits_above_seven() {
        let mut flags = Flags::default();
        flags.update_arithmetic(0x0100);
        assert!(flags.cy);
        assert!(flags.z);
        assert!(flags.p);

        flags.update_arithmetic(0x0080);
        assert!(!flags.cy);
        assert!(flags.s);
        assert!(!flags.z);

        // 0x01 - 0x02 as a wrapped 16-bit difference.
        flags.update_arithmetic(0x0001u16.wrapping_sub(0x0002));
        assert!(flags.cy);
        assert!(flags.s);
    }

    #[test]
    fn zsp_update_leaves_carry_alone() {
        let mut flags = Flags {
            cy: true,
            ..Flags::default()
        };
        flags.update_zsp(0x00);
        assert!(flags.cy);
        assert!(flags.z);
    }

    #[test]
    fn conditions_follow_documented_polarity() {
        let set = Flags {
            z: true,
            s: true,
            p: true,
            cy: true,
            ac: false,
        };
        let clear = Flags::default();
        for code in 0..8 {
            let wants_set = code % 2 == 1;
            assert_eq!(set.condition(code), wants_set, "code {code}");
            assert_eq!(clear.condition(code), !wants_set, "code {code}");
        }
    }
}
