//! Public host-facing API for driving the core.

use crate::{
    CycleTable, ExecutionCounters, Fault, Memory, RegisterFile, RunState, TerminationCause,
};

/// Top-level configuration for a core instance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreConfig {
    /// Enables trace callback dispatch on every step.
    pub tracing_enabled: bool,
}

/// The single CPU state and memory image of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct CoreState {
    /// Register pairs `AF`, `BC`, `DE`, `HL`, `SP`, `PC`.
    pub regs: RegisterFile,
    /// Flat 64 KiB memory image.
    pub memory: Memory,
    /// Power/halt/termination lifecycle.
    pub run_state: RunState,
    /// Running total of elapsed cycles.
    pub total_cycles: u64,
    /// Per-opcode dispatch counts.
    pub counters: ExecutionCounters,
    /// Opcode cycle costs.
    pub cycle_table: CycleTable,
}

impl Default for CoreState {
    fn default() -> Self {
        Self::new()
    }
}

impl CoreState {
    /// Creates a powered-off core with power-on register values and zeroed memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: RegisterFile::default(),
            memory: Memory::new(),
            run_state: RunState::Idle,
            total_cycles: 0,
            counters: ExecutionCounters::new(),
            cycle_table: CycleTable::new(),
        }
    }

    /// Restores every initialization default.
    ///
    /// Rebuilds the cycle table, zeroes counters and memory, reloads the
    /// documented register values, clears the cycle total and powers off.
    pub fn reset_canonical(&mut self) {
        self.regs = RegisterFile::default();
        self.memory.clear();
        self.run_state = RunState::Idle;
        self.total_cycles = 0;
        self.counters.clear();
        self.cycle_table = CycleTable::new();
    }

    /// Switches power on. Has no effect once running, halted or terminated.
    pub fn power_on(&mut self) {
        if self.run_state == RunState::Idle {
            self.run_state = RunState::Running;
        }
    }

    /// `true` once power has been switched on.
    #[must_use]
    pub const fn is_powered(&self) -> bool {
        self.run_state.is_powered()
    }

    /// `true` once `HALT` has executed.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.run_state.is_halted()
    }

    /// Returns the termination cause once the run has ended.
    #[must_use]
    pub const fn termination(&self) -> Option<TerminationCause> {
        self.run_state.termination()
    }
}

/// Output status from one `step_one` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum StepOutcome {
    /// Power is off; nothing happened.
    Idle,
    /// One instruction executed.
    Retired {
        /// Opcode dispatched.
        opcode: u8,
        /// Cycles charged for it.
        cycles: u8,
    },
    /// `HALT` executed; the next step terminates.
    Halted {
        /// Cycles charged for `HALT`.
        cycles: u8,
    },
    /// The run is over.
    Terminated {
        /// Why it ended.
        cause: TerminationCause,
    },
}

/// Aggregated outcome from running steps until termination or a step limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunOutcome {
    /// Number of `step_one` calls made.
    pub steps: u64,
    /// Last step-level status observed before returning.
    pub final_step: StepOutcome,
}

impl RunOutcome {
    /// Returns the termination cause when the run ended rather than hit its limit.
    #[must_use]
    pub const fn termination(&self) -> Option<TerminationCause> {
        match self.final_step {
            StepOutcome::Terminated { cause } => Some(cause),
            StepOutcome::Idle | StepOutcome::Retired { .. } | StepOutcome::Halted { .. } => None,
        }
    }
}

/// Trace events emitted in execution order when tracing is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TraceEvent {
    /// Start of a powered step, before halt or fault handling.
    StepStart {
        /// Register file including `PC`.
        registers: RegisterFile,
        /// Cycle total before this step.
        total_cycles: u64,
    },
    /// Opcode fetched and about to be dispatched.
    InstructionFetched {
        /// Address the opcode was read from.
        pc: u16,
        /// Opcode byte.
        opcode: u8,
    },
    /// An unsupported opcode was fetched.
    FaultRaised {
        /// Fault diagnostic.
        fault: Fault,
    },
    /// The run ended.
    Terminated {
        /// Why it ended.
        cause: TerminationCause,
    },
}

/// Sink trait for trace hooks.
pub trait TraceSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: TraceEvent);
}

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn on_event(&mut self, _event: TraceEvent) {}
}

impl TraceSink for Vec<TraceEvent> {
    fn on_event(&mut self, event: TraceEvent) {
        self.push(event);
    }
}
