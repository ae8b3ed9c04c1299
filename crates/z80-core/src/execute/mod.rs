//! Fetch-decode-execute engine.
//!
//! Each step, while powered and not terminated:
//! 1. Surface registers and the cycle total to the trace sink
//! 2. Terminate if the halted flag was set by the previous step
//! 3. Fetch one opcode byte
//! 4. Charge its cycle cost and bump its execution counter
//! 5. Dispatch to its handler, or fault when the opcode is unsupported
//!
//! No handler computes condition flags; the `F` half of `AF` is never written.

mod fetch;

pub use fetch::{fetch_byte, fetch_word};

use crate::encoding::{decode, AluOp, Operation};
use crate::{
    CoreConfig, CoreState, Fault, Pair, Reg8, RunOutcome, RunState, StepOutcome,
    TerminationCause, TraceEvent, TraceSink,
};

/// Runs one fetch-decode-execute step.
///
/// A powered-off core is left untouched. `HALT` only sets the halted flag; the
/// following call observes it and ends the run, so one extra step is needed
/// after `HALT` before termination is reported. Once terminated, further calls
/// repeat the terminal outcome without side effects.
pub fn step_one(
    state: &mut CoreState,
    trace: &mut dyn TraceSink,
    config: &CoreConfig,
) -> StepOutcome {
    match state.run_state {
        RunState::Idle => return StepOutcome::Idle,
        RunState::Terminated(cause) => return StepOutcome::Terminated { cause },
        RunState::Running | RunState::Halted => {}
    }

    emit(
        trace,
        config,
        TraceEvent::StepStart {
            registers: state.regs,
            total_cycles: state.total_cycles,
        },
    );

    if state.run_state == RunState::Halted {
        return terminate(state, trace, config, TerminationCause::Halt);
    }

    let pc = state.regs.pc();
    let opcode = fetch_byte(state);
    emit(trace, config, TraceEvent::InstructionFetched { pc, opcode });

    let cycles = state.cycle_table.cost(opcode);
    state.total_cycles = state.total_cycles.saturating_add(u64::from(cycles));
    state.counters.record(opcode);

    let Some(operation) = decode(opcode) else {
        let fault = Fault::UnsupportedOpcode { opcode, pc };
        emit(trace, config, TraceEvent::FaultRaised { fault });
        return terminate(state, trace, config, TerminationCause::Fault(fault));
    };

    execute_operation(state, operation);

    if state.run_state == RunState::Halted {
        StepOutcome::Halted { cycles }
    } else {
        StepOutcome::Retired { opcode, cycles }
    }
}

/// Calls [`step_one`] until the run terminates, the core is unpowered, or
/// `max_steps` calls have been made.
pub fn run_to_termination(
    state: &mut CoreState,
    trace: &mut dyn TraceSink,
    config: &CoreConfig,
    max_steps: Option<u64>,
) -> RunOutcome {
    let mut steps = 0_u64;
    let mut final_step = StepOutcome::Idle;

    while max_steps.is_none_or(|limit| steps < limit) {
        final_step = step_one(state, trace, config);
        steps += 1;
        if matches!(
            final_step,
            StepOutcome::Idle | StepOutcome::Terminated { .. }
        ) {
            break;
        }
    }

    RunOutcome { steps, final_step }
}

/// Applies one decoded operation to the state.
///
/// Operand bytes are fetched through `PC` as the operation requires; cycle
/// accounting is the caller's job.
pub fn execute_operation(state: &mut CoreState, operation: Operation) {
    match operation {
        Operation::Nop => {}
        Operation::Halt => state.run_state = RunState::Halted,
        Operation::Inc8(reg) => execute_inc_dec8(state, reg, 1),
        Operation::Dec8(reg) => execute_inc_dec8(state, reg, u8::MAX),
        Operation::Inc16(pair) => execute_inc16(state, pair),
        Operation::Alu { op, src } => execute_alu(state, op, src),
        Operation::Load8 { dst, src } => state.regs.copy8(dst, src),
        Operation::LoadImm8(reg) => {
            let value = fetch_byte(state);
            state.regs.write8(reg, value);
        }
        Operation::LoadImm16(pair) => execute_load_imm16(state, pair),
        Operation::IncIndirect => execute_inc_dec_indirect(state, 1),
        Operation::DecIndirect => execute_inc_dec_indirect(state, u8::MAX),
        Operation::StoreImmIndirect => {
            let value = fetch_byte(state);
            state.memory.write(state.regs.hl.get(), value);
        }
        Operation::StoreIndirect(reg) => {
            let value = state.regs.read8(reg);
            state.memory.write(state.regs.hl.get(), value);
        }
        Operation::LoadIndirect(reg) => {
            let value = state.memory.read(state.regs.hl.get());
            state.regs.write8(reg, value);
        }
    }
}

fn emit(trace: &mut dyn TraceSink, config: &CoreConfig, event: TraceEvent) {
    if config.tracing_enabled {
        trace.on_event(event);
    }
}

fn terminate(
    state: &mut CoreState,
    trace: &mut dyn TraceSink,
    config: &CoreConfig,
    cause: TerminationCause,
) -> StepOutcome {
    state.run_state = RunState::Terminated(cause);
    emit(trace, config, TraceEvent::Terminated { cause });
    StepOutcome::Terminated { cause }
}

// `delta` of 0xFF is a wrapping decrement.
fn execute_inc_dec8(state: &mut CoreState, reg: Reg8, delta: u8) {
    let value = state.regs.read8(reg).wrapping_add(delta);
    state.regs.write8(reg, value);
}

fn execute_inc16(state: &mut CoreState, pair: Pair) {
    let target = state.regs.pair_mut(pair);
    target.set(target.get().wrapping_add(1));
}

fn execute_alu(state: &mut CoreState, op: AluOp, src: Reg8) {
    let result = op.apply(state.regs.read8(Reg8::A), state.regs.read8(src));
    state.regs.af.set_high(result);
}

fn execute_load_imm16(state: &mut CoreState, pair: Pair) {
    let low = fetch_byte(state);
    state.regs.pair_mut(pair).set_low(low);
    let high = fetch_byte(state);
    state.regs.pair_mut(pair).set_high(high);
}

fn execute_inc_dec_indirect(state: &mut CoreState, delta: u8) {
    let addr = state.regs.hl.get();
    let value = state.memory.read(addr).wrapping_add(delta);
    state.memory.write(addr, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullTraceSink;

    fn powered_with_program(program: &[u8]) -> CoreState {
        let mut state = CoreState::new();
        for (addr, byte) in (crate::PROGRAM_ORIGIN..).zip(program.iter().copied()) {
            state.memory.write(addr, byte);
        }
        state.power_on();
        state
    }

    fn step(state: &mut CoreState) -> StepOutcome {
        step_one(state, &mut NullTraceSink, &CoreConfig::default())
    }

    #[test]
    fn nop_advances_pc_and_charges_one_cycle() {
        let mut state = powered_with_program(&[0x00]);
        assert_eq!(
            step(&mut state),
            StepOutcome::Retired {
                opcode: 0x00,
                cycles: 1
            }
        );
        assert_eq!(state.regs.pc(), 0x0101);
        assert_eq!(state.total_cycles, 1);
    }

    #[test]
    fn inc_a_writes_back_high_half_only() {
        let mut state = powered_with_program(&[0x3C]);
        step(&mut state);
        assert_eq!(state.regs.af.get(), 0x02B0);
    }

    #[test]
    fn dec_c_wraps_below_zero() {
        let mut state = powered_with_program(&[0x0D]);
        state.regs.bc.set(0x0800);
        step(&mut state);
        assert_eq!(state.regs.bc.get(), 0x08FF);
    }

    #[test]
    fn inc_bc_increments_the_full_word() {
        let mut state = powered_with_program(&[0x03]);
        state.regs.bc.set(0x08FF);
        step(&mut state);
        assert_eq!(state.regs.bc.get(), 0x0900);
    }

    #[test]
    fn sub_leaves_flags_half_untouched() {
        let mut state = powered_with_program(&[0x90]);
        step(&mut state);
        assert_eq!(state.regs.af.get(), 0xF9B0);
    }

    #[test]
    fn load_imm16_fills_low_then_high() {
        let mut state = powered_with_program(&[0x21, 0x00, 0x02]);
        step(&mut state);
        assert_eq!(state.regs.hl.get(), 0x0200);
        assert_eq!(state.regs.pc(), 0x0103);
        assert_eq!(state.total_cycles, 10);
    }

    #[test]
    fn indirect_increment_and_decrement_touch_memory() {
        let mut state = powered_with_program(&[0x34, 0x34, 0x35]);
        state.regs.hl.set(0x0300);
        step(&mut state);
        step(&mut state);
        assert_eq!(state.memory.read(0x0300), 2);
        step(&mut state);
        assert_eq!(state.memory.read(0x0300), 1);
        assert_eq!(state.total_cycles, 33);
    }

    #[test]
    fn store_b_through_pointer() {
        let mut state = powered_with_program(&[0x70]);
        state.regs.hl.set(0x0400);
        step(&mut state);
        assert_eq!(state.memory.read(0x0400), 0x08);
    }

    #[test]
    fn halt_needs_one_more_step_to_terminate() {
        let mut state = powered_with_program(&[0x76]);
        assert_eq!(step(&mut state), StepOutcome::Halted { cycles: 1 });
        assert_eq!(state.run_state, RunState::Halted);

        assert_eq!(
            step(&mut state),
            StepOutcome::Terminated {
                cause: TerminationCause::Halt
            }
        );
        assert_eq!(state.regs.pc(), 0x0101);
        assert_eq!(state.total_cycles, 1);
    }

    #[test]
    fn unsupported_opcode_faults_at_its_fetch_address() {
        let mut state = powered_with_program(&[0x00, 0xDD]);
        step(&mut state);
        let outcome = step(&mut state);
        let fault = Fault::UnsupportedOpcode {
            opcode: 0xDD,
            pc: 0x0101,
        };
        assert_eq!(
            outcome,
            StepOutcome::Terminated {
                cause: TerminationCause::Fault(fault)
            }
        );
        assert_eq!(state.counters.count(0xDD), 1);
        assert_eq!(state.total_cycles, 2);
    }

    #[test]
    fn run_to_termination_honours_step_limit() {
        let mut state = powered_with_program(&[]);
        let outcome = run_to_termination(
            &mut state,
            &mut NullTraceSink,
            &CoreConfig::default(),
            Some(5),
        );
        assert_eq!(outcome.steps, 5);
        assert_eq!(outcome.termination(), None);
        assert_eq!(state.counters.count(0x00), 5);
    }

    #[test]
    fn run_to_termination_stops_on_halt() {
        let mut state = powered_with_program(&[0x3C, 0x76]);
        let outcome =
            run_to_termination(&mut state, &mut NullTraceSink, &CoreConfig::default(), None);
        assert_eq!(outcome.steps, 3);
        assert_eq!(outcome.termination(), Some(TerminationCause::Halt));
    }

    #[test]
    fn run_to_termination_returns_immediately_when_unpowered() {
        let mut state = CoreState::new();
        let outcome =
            run_to_termination(&mut state, &mut NullTraceSink, &CoreConfig::default(), None);
        assert_eq!(outcome.steps, 1);
        assert_eq!(outcome.final_step, StepOutcome::Idle);
    }
}
