//! CPU state model primitives.

/// Register pairs and the register file.
pub mod registers;
/// Engine lifecycle states.
pub mod run_state;

pub use registers::{
    Half, Pair, Reg8, RegisterFile, RegisterPair, INITIAL_AF, INITIAL_BC, INITIAL_DE,
    INITIAL_HL, INITIAL_PC, INITIAL_SP,
};
pub use run_state::{RunState, TerminationCause};
