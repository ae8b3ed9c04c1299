//! Opcode to operation descriptor table.
//!
//! Covered subset of the Z80 opcode map: `NOP`, `HALT`, `INC/DEC r`,
//! `INC BC`, `ADD/SUB/AND/XOR/OR A,r`, `LD r,r'`, `LD r,n`, `LD HL,nn` and the
//! `(HL)` forms `INC`, `DEC`, `LD (HL),n`, `LD (HL),B`, `LD B,(HL)`. Every other
//! byte is undecodable.

use crate::{Pair, Reg8};

/// Byte operation applied to the accumulator and one operand register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum AluOp {
    Add,
    Sub,
    And,
    Xor,
    Or,
}

impl AluOp {
    /// Decodes bits 5..3 of an `0x80..=0xBF` opcode.
    ///
    /// `ADC`, `SBC` and `CP` occupy the remaining slots and are not covered.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Add),
            2 => Some(Self::Sub),
            4 => Some(Self::And),
            5 => Some(Self::Xor),
            6 => Some(Self::Or),
            _ => None,
        }
    }

    /// Computes the wrapping byte result.
    #[must_use]
    pub const fn apply(self, lhs: u8, rhs: u8) -> u8 {
        match self {
            Self::Add => lhs.wrapping_add(rhs),
            Self::Sub => lhs.wrapping_sub(rhs),
            Self::And => lhs & rhs,
            Self::Xor => lhs ^ rhs,
            Self::Or => lhs | rhs,
        }
    }
}

/// Decoded operation kind plus operand selectors for one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Operation {
    /// `NOP`.
    Nop,
    /// `HALT`: sets the halted flag.
    Halt,
    /// `INC r`.
    Inc8(Reg8),
    /// `DEC r`.
    Dec8(Reg8),
    /// `INC rr` on a full 16-bit pair.
    Inc16(Pair),
    /// `op A,r` with the result written to the accumulator.
    Alu {
        /// Operation applied.
        op: AluOp,
        /// Right-hand operand.
        src: Reg8,
    },
    /// `LD dst,src`.
    Load8 {
        /// Destination register.
        dst: Reg8,
        /// Source register.
        src: Reg8,
    },
    /// `LD r,n`.
    LoadImm8(Reg8),
    /// `LD rr,nn`.
    LoadImm16(Pair),
    /// `INC (HL)`.
    IncIndirect,
    /// `DEC (HL)`.
    DecIndirect,
    /// `LD (HL),n`.
    StoreImmIndirect,
    /// `LD (HL),r`.
    StoreIndirect(Reg8),
    /// `LD r,(HL)`.
    LoadIndirect(Reg8),
}

/// Opcode-indexed operation table; `None` marks an unsupported opcode.
pub const OPERATION_TABLE: [Option<Operation>; 256] = build_operation_table();

/// Looks up the operation for `opcode`.
#[must_use]
pub const fn decode(opcode: u8) -> Option<Operation> {
    OPERATION_TABLE[opcode as usize]
}

/// Returns `true` when `opcode` has a handler.
#[must_use]
pub const fn is_supported(opcode: u8) -> bool {
    decode(opcode).is_some()
}

const fn build_operation_table() -> [Option<Operation>; 256] {
    let mut table = [None; 256];
    let mut opcode: usize = 0;
    while opcode < table.len() {
        #[allow(clippy::cast_possible_truncation)]
        let byte = opcode as u8;
        table[opcode] = classify(byte);
        opcode += 1;
    }
    table
}

const fn classify(opcode: u8) -> Option<Operation> {
    let y = (opcode >> 3) & 0x07;
    let z = opcode & 0x07;

    match opcode {
        0x00 => Some(Operation::Nop),
        0x76 => Some(Operation::Halt),
        0x03 => Some(Operation::Inc16(Pair::BC)),
        0x21 => Some(Operation::LoadImm16(Pair::HL)),
        0x34 => Some(Operation::IncIndirect),
        0x35 => Some(Operation::DecIndirect),
        0x36 => Some(Operation::StoreImmIndirect),
        0x70 => Some(Operation::StoreIndirect(Reg8::B)),
        0x46 => Some(Operation::LoadIndirect(Reg8::B)),
        0x00..=0x3F => match (z, Reg8::from_u3(y)) {
            (4, Some(reg)) => Some(Operation::Inc8(reg)),
            (5, Some(reg)) => Some(Operation::Dec8(reg)),
            (6, Some(reg)) => Some(Operation::LoadImm8(reg)),
            _ => None,
        },
        0x40..=0x7F => match (Reg8::from_u3(y), Reg8::from_u3(z)) {
            (Some(dst), Some(src)) => Some(Operation::Load8 { dst, src }),
            _ => None,
        },
        0x80..=0xBF => match (AluOp::from_u3(y), Reg8::from_u3(z)) {
            (Some(op), Some(src)) => Some(Operation::Alu { op, src }),
            _ => None,
        },
        0xC0..=0xFF => None,
    }
}
