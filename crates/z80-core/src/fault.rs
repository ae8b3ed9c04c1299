use thiserror::Error;

/// Unrecoverable conditions raised by the instruction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Fault {
    /// The fetched byte has no entry in the operation table.
    #[error("instruction 0x{opcode:02x} not valid (at 0x{pc:04x})")]
    UnsupportedOpcode {
        /// Offending opcode byte.
        opcode: u8,
        /// Address the opcode was fetched from.
        pc: u16,
    },
}

impl Fault {
    /// Opcode that triggered the fault.
    #[must_use]
    pub const fn opcode(self) -> u8 {
        match self {
            Self::UnsupportedOpcode { opcode, .. } => opcode,
        }
    }

    /// Program counter position of the faulting fetch.
    #[must_use]
    pub const fn pc(self) -> u16 {
        match self {
            Self::UnsupportedOpcode { pc, .. } => pc,
        }
    }
}
