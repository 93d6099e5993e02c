//! Memory bus interface and a flat RAM implementation.

/// Size of a 16-bit address space in bytes.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Memory bus interface.
///
/// CPUs reach memory through this trait. Addresses are 16-bit, so every
/// address is valid and there is no out-of-range case to handle.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Flat 64 KiB RAM with no devices attached.
///
/// Every address is plain read/write storage. Used by machines without
/// memory-mapped I/O and by tests.
pub struct SimpleBus {
    ram: Box<[u8; ADDRESS_SPACE]>,
}

impl SimpleBus {
    /// Create a zero-filled bus.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Copy `data` into memory starting at `address`.
    ///
    /// Bytes that would land past 0xFFFF are dropped. Returns the number of
    /// bytes actually stored.
    pub fn load(&mut self, address: u16, data: &[u8]) -> usize {
        let start = address as usize;
        let len = data.len().min(ADDRESS_SPACE - start);
        self.ram[start..start + len].copy_from_slice(&data[..len]);
        len
    }

    /// Read a byte without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    /// Write a byte without going through the `Bus` trait.
    pub fn poke(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }

    /// The whole address space.
    #[must_use]
    pub fn ram(&self) -> &[u8] {
        &self.ram[..]
    }
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[address as usize]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[address as usize] = value;
    }
}
