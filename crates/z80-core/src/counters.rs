//! Per-opcode execution counters.

/// Number of distinct opcode values.
pub const OPCODE_SPACE: usize = 256;

/// How many times each opcode byte has been fetched for dispatch.
///
/// Counts only ever grow; unsupported opcodes are counted too.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ExecutionCounters {
    counts: Box<[u64]>,
}

impl Default for ExecutionCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionCounters {
    /// All counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            counts: vec![0; OPCODE_SPACE].into_boxed_slice(),
        }
    }

    /// Records one dispatch of `opcode`.
    pub fn record(&mut self, opcode: u8) {
        let slot = &mut self.counts[usize::from(opcode)];
        *slot = slot.saturating_add(1);
    }

    /// Dispatch count for `opcode`.
    #[must_use]
    pub fn count(&self, opcode: u8) -> u64 {
        self.counts[usize::from(opcode)]
    }

    /// Sum over all opcodes.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Nonzero counters in ascending opcode order.
    pub fn nonzero(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        (0_u8..=u8::MAX)
            .zip(self.counts.iter().copied())
            .filter(|(_, count)| *count > 0)
    }

    /// Resets every counter to zero.
    pub fn clear(&mut self) {
        self.counts.fill(0);
    }
}
