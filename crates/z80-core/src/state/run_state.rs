use crate::Fault;

/// Why the engine stopped for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum TerminationCause {
    /// A step observed the halted flag set by a previous `HALT`.
    Halt,
    /// An unsupported opcode was fetched.
    Fault(Fault),
}

impl TerminationCause {
    /// Returns the fault behind this termination, if any.
    #[must_use]
    pub const fn fault(self) -> Option<Fault> {
        match self {
            Self::Fault(fault) => Some(fault),
            Self::Halt => None,
        }
    }
}

/// Lifecycle of the instruction engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum RunState {
    /// Power is off; stepping does nothing.
    #[default]
    Idle,
    /// Powered and executing.
    Running,
    /// `HALT` executed; the next step observes it and terminates.
    Halted,
    /// Terminal; no further instruction executes.
    Terminated(TerminationCause),
}

impl RunState {
    /// `true` once power has been switched on.
    #[must_use]
    pub const fn is_powered(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// `true` when the halted flag is set or the run has already ended on `HALT`.
    #[must_use]
    pub const fn is_halted(self) -> bool {
        matches!(
            self,
            Self::Halted | Self::Terminated(TerminationCause::Halt)
        )
    }

    /// Returns the termination cause, if this state is terminal.
    #[must_use]
    pub const fn termination(self) -> Option<TerminationCause> {
        match self {
            Self::Terminated(cause) => Some(cause),
            Self::Idle | Self::Running | Self::Halted => None,
        }
    }
}
