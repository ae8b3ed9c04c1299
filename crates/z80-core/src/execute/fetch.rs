//! Program-counter driven operand fetch.

use crate::CoreState;

/// Reads the byte at `PC`, then advances `PC` by one (wrapping).
pub fn fetch_byte(state: &mut CoreState) -> u8 {
    let pc = state.regs.pc();
    let byte = state.memory.read(pc);
    state.regs.set_pc(pc.wrapping_add(1));
    byte
}

/// Fetches a little-endian word: low byte first, then high byte.
pub fn fetch_word(state: &mut CoreState) -> u16 {
    let low = fetch_byte(state);
    let high = fetch_byte(state);
    u16::from_le_bytes([low, high])
}
