//! Instruction engine for a Z80-subset teaching emulator.
//!
//! The core owns the register file, a flat 64 KiB memory, the opcode and cycle
//! tables, the per-opcode execution counters and the halt/fault lifecycle.
//! Program loading, the driver loop and trace formatting live with the host.

/// Flat byte-addressable memory.
pub mod memory;
pub use memory::{Memory, ADDRESS_SPACE_BYTES, PROGRAM_ORIGIN};

/// CPU register and lifecycle state.
pub mod state;
pub use state::{
    Half, Pair, Reg8, RegisterFile, RegisterPair, RunState, TerminationCause, INITIAL_AF,
    INITIAL_BC, INITIAL_DE, INITIAL_HL, INITIAL_PC, INITIAL_SP,
};

/// Fault taxonomy.
pub mod fault;
pub use fault::Fault;

/// Per-opcode cycle-cost table.
pub mod timing;
pub use timing::{CycleTable, CYCLE_COST_OVERRIDES, DEFAULT_CYCLE_COST};

/// Opcode to operation descriptor table.
pub mod encoding;
pub use encoding::{decode, is_supported, AluOp, Operation, OPERATION_TABLE};

/// Per-opcode execution counters.
pub mod counters;
pub use counters::{ExecutionCounters, OPCODE_SPACE};

/// Public host-facing API contract and integration types.
pub mod api;
pub use api::{
    CoreConfig, CoreState, NullTraceSink, RunOutcome, StepOutcome, TraceEvent, TraceSink,
};

/// Instruction execution pipeline.
pub mod execute;
pub use execute::{execute_operation, fetch_byte, fetch_word, run_to_termination, step_one};

/// End-of-run usage reporting.
pub mod lifecycle;
pub use lifecycle::UsageReport;

#[cfg(test)]
use proptest as _;
#[cfg(test)]
use rstest as _;
