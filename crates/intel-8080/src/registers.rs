//! 8080 register set.

/// A register pair named by its high register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterPair {
    /// B (high) and C (low).
    BC,
    /// D (high) and E (low).
    DE,
    /// H (high) and L (low). Also the memory pointer `M`.
    HL,
}

impl RegisterPair {
    /// Decode the 2-bit pair field of an opcode. Encoding 3 is SP (or PSW for
    /// PUSH/POP), which is not a register pair.
    #[must_use]
    pub const fn decode(index: u8) -> Option<Self> {
        match index & 0x03 {
            0 => Some(Self::BC),
            1 => Some(Self::DE),
            2 => Some(Self::HL),
            _ => None,
        }
    }
}

/// 8080 registers snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    /// Get BC register pair.
    #[must_use]
    pub const fn bc(&self) -> u16 {
        (self.b as u16) << 8 | self.c as u16
    }

    /// Get DE register pair.
    #[must_use]
    pub const fn de(&self) -> u16 {
        (self.d as u16) << 8 | self.e as u16
    }

    /// Get HL register pair.
    #[must_use]
    pub const fn hl(&self) -> u16 {
        (self.h as u16) << 8 | self.l as u16
    }

    /// Set BC register pair.
    pub fn set_bc(&mut self, value: u16) {
        self.b = (value >> 8) as u8;
        self.c = value as u8;
    }

    /// Set DE register pair.
    pub fn set_de(&mut self, value: u16) {
        self.d = (value >> 8) as u8;
        self.e = value as u8;
    }

    /// Set HL register pair.
    pub fn set_hl(&mut self, value: u16) {
        self.h = (value >> 8) as u8;
        self.l = value as u8;
    }

    #[must_use]
    pub const fn pair(&self, pair: RegisterPair) -> u16 {
        match pair {
            RegisterPair::BC => self.bc(),
            RegisterPair::DE => self.de(),
            RegisterPair::HL => self.hl(),
        }
    }

    pub fn set_pair(&mut self, pair: RegisterPair, value: u16) {
        match pair {
            RegisterPair::BC => self.set_bc(value),
            RegisterPair::DE => self.set_de(value),
            RegisterPair::HL => self.set_hl(value),
        }
    }
}
