//! End-of-run usage reporting.

use std::fmt;

use crate::{CoreState, TerminationCause};

/// Snapshot of what a run consumed, taken when it ends.
///
/// `Display` renders the fault diagnostic (fault runs only), the cycle total,
/// one line per executed opcode in ascending order, and the shutdown notice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct UsageReport {
    /// Why the run ended; `None` when captured before termination.
    pub cause: Option<TerminationCause>,
    /// Cumulative cycle total.
    pub total_cycles: u64,
    /// `(opcode, count)` for every nonzero counter, ascending by opcode.
    pub instruction_counts: Vec<(u8, u64)>,
}

impl UsageReport {
    /// Captures the report from the current core state.
    #[must_use]
    pub fn from_state(state: &CoreState) -> Self {
        Self {
            cause: state.termination(),
            total_cycles: state.total_cycles,
            instruction_counts: state.counters.nonzero().collect(),
        }
    }
}

impl fmt::Display for UsageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fault) = self.cause.and_then(TerminationCause::fault) {
            writeln!(f, "{fault}")?;
        }
        writeln!(f, "Total Clock Cycles: {}", self.total_cycles)?;
        for (opcode, count) in &self.instruction_counts {
            writeln!(f, "Instruction 0x{opcode:02x} count is  {count:04x}")?;
        }
        write!(f, "Halting now.")
    }
}
