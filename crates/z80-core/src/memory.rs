//! Flat byte-addressable memory.
//!
//! The store spans the whole 16-bit address space, so every `u16` address is
//! valid and no wrap or bounds policy is needed.

/// Size in bytes of the flat address space (64 KiB).
pub const ADDRESS_SPACE_BYTES: usize = u16::MAX as usize + 1;

/// Address where setup code places the program and where `PC` starts.
pub const PROGRAM_ORIGIN: u16 = 0x0100;

/// Zero-initialized 64 KiB memory image.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Memory {
    bytes: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Allocates a zeroed address space.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: vec![0; ADDRESS_SPACE_BYTES].into_boxed_slice(),
        }
    }

    /// Reads the byte at `addr`.
    #[must_use]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[usize::from(addr)]
    }

    /// Writes `value` at `addr`.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[usize::from(addr)] = value;
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Number of addressable bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the image holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Read-only view of the whole image.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}
