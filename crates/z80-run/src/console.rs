//! Trace sinks that write core events to an output stream.

use std::io::{self, Write};

use z80_core::{TraceEvent, TraceSink};

/// Human-readable per-step trace.
///
/// Write failures are held until [`TextTrace::finish`] so a broken pipe does
/// not interrupt the run.
pub(crate) struct TextTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextTrace<W> {
    pub(crate) const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub(crate) fn finish(mut self) -> io::Result<()> {
        match self.error.take() {
            Some(error) => Err(error),
            None => self.out.flush(),
        }
    }

    fn write_event(&mut self, event: &TraceEvent) -> io::Result<()> {
        match event {
            TraceEvent::StepStart {
                registers,
                total_cycles,
            } => {
                writeln!(
                    self.out,
                    "PC: {:04x}, AF: {:04x}, BC: {:04x}, DE: {:04x}, HL: {:04x}, SP: {:04x}",
                    registers.pc.get(),
                    registers.af.get(),
                    registers.bc.get(),
                    registers.de.get(),
                    registers.hl.get(),
                    registers.sp.get(),
                )?;
                writeln!(self.out, "TotalClockCycles at {total_cycles:08}")
            }
            TraceEvent::InstructionFetched { opcode, .. } => {
                writeln!(self.out, "instruction = {opcode:04x}")
            }
            // The usage report repeats the diagnostic; the trace only marks it.
            TraceEvent::FaultRaised { fault } => writeln!(self.out, "fault: {fault}"),
            TraceEvent::Terminated { .. } => Ok(()),
        }
    }
}

impl<W: Write> TraceSink for TextTrace<W> {
    fn on_event(&mut self, event: TraceEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.write_event(&event) {
            self.error = Some(error);
        }
    }
}

/// One JSON object per event, newline separated.
pub(crate) struct JsonTrace<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> JsonTrace<W> {
    pub(crate) const fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub(crate) fn finish(mut self) -> io::Result<()> {
        match self.error.take() {
            Some(error) => Err(error),
            None => self.out.flush(),
        }
    }

    fn write_event(&mut self, event: &TraceEvent) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        self.out.write_all(b"\n")
    }
}

impl<W: Write> TraceSink for JsonTrace<W> {
    fn on_event(&mut self, event: TraceEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.write_event(&event) {
            self.error = Some(error);
        }
    }
}
