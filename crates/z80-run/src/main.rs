//! CLI entry point for the z80-run emulator driver.

mod console;
mod programs;

use std::env;
use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;

use console::{JsonTrace, TextTrace};
use programs::{BuiltinProgram, ProgramSource};
#[cfg(test)]
use tempfile as _;
use z80_core::{
    run_to_termination, CoreConfig, CoreState, NullTraceSink, RunOutcome, UsageReport,
};

const USAGE_TEXT: &str = "\
Usage: z80-run [options]

Loads a program at 0x0100, powers the core on, runs until HALT or an
unsupported opcode, and prints the usage report.

Options:
  -p, --program <name>   Built-in program: test, first (default: first)
  -i, --image <file>     Raw binary image to load instead of a built-in
  -t, --trace <mode>     Per-step trace: off, text, json (default: off)
  -n, --max-steps <n>    Stop after n steps if the program has not ended
  -h, --help             Show this help message

Examples:
  z80-run --program test --trace text
  z80-run --image program.bin --max-steps 1000
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TraceMode {
    #[default]
    Off,
    Text,
    Json,
}

impl TraceMode {
    fn parse(value: &str) -> Result<Self, String> {
        match value {
            "off" => Ok(Self::Off),
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown trace mode: {other}")),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Default)]
struct RunArgs {
    source: ProgramSource,
    trace: TraceMode,
    max_steps: Option<u64>,
}

#[derive(Debug)]
enum ParseResult {
    Run(RunArgs),
    Help,
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String, String> {
    args.next()
        .map(|value| value.to_string_lossy().into_owned())
        .ok_or_else(|| format!("missing value for {flag}"))
}

#[allow(clippy::while_let_on_iterator)]
fn parse_args(mut args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let mut program: Option<BuiltinProgram> = None;
    let mut image: Option<PathBuf> = None;
    let mut parsed = RunArgs::default();

    while let Some(arg) = args.next() {
        let flag = arg.to_string_lossy().into_owned();
        match flag.as_str() {
            "-h" | "--help" => return Ok(ParseResult::Help),
            "-p" | "--program" => {
                let name = next_value(&mut args, &flag)?;
                let builtin = BuiltinProgram::from_name(&name)
                    .ok_or_else(|| format!("unknown program: {name}"))?;
                program = Some(builtin);
            }
            "-i" | "--image" => {
                let path = args
                    .next()
                    .ok_or_else(|| format!("missing value for {flag}"))?;
                image = Some(PathBuf::from(path));
            }
            "-t" | "--trace" => {
                parsed.trace = TraceMode::parse(&next_value(&mut args, &flag)?)?;
            }
            "-n" | "--max-steps" => {
                let value = next_value(&mut args, &flag)?;
                let limit = value
                    .parse::<u64>()
                    .map_err(|_| format!("invalid step limit: {value}"))?;
                parsed.max_steps = Some(limit);
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }

    parsed.source = match (program, image) {
        (Some(_), Some(_)) => return Err("--program and --image are exclusive".to_string()),
        (Some(builtin), None) => ProgramSource::Builtin(builtin),
        (None, Some(path)) => ProgramSource::Image(path),
        (None, None) => ProgramSource::default(),
    };
    Ok(ParseResult::Run(parsed))
}

fn drive(state: &mut CoreState, args: &RunArgs, out: &mut impl Write) -> io::Result<RunOutcome> {
    let config = CoreConfig {
        tracing_enabled: args.trace != TraceMode::Off,
    };

    let outcome = match args.trace {
        TraceMode::Off => run_to_termination(state, &mut NullTraceSink, &config, args.max_steps),
        TraceMode::Text => {
            let mut trace = TextTrace::new(&mut *out);
            let outcome = run_to_termination(state, &mut trace, &config, args.max_steps);
            trace.finish()?;
            outcome
        }
        TraceMode::Json => {
            let mut trace = JsonTrace::new(&mut *out);
            let outcome = run_to_termination(state, &mut trace, &config, args.max_steps);
            trace.finish()?;
            outcome
        }
    };
    Ok(outcome)
}

fn run(args: &RunArgs) -> Result<(), i32> {
    let mut state = CoreState::new();
    let loaded = programs::read_source(&args.source)
        .and_then(|bytes| programs::load_program(&mut state.memory, &bytes));
    if let Err(error) = loaded {
        eprintln!("error: {error}");
        return Err(1);
    }
    state.power_on();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = drive(&mut state, args, &mut out).and_then(|outcome| {
        if outcome.termination().is_none() {
            writeln!(out, "Step limit reached after {} steps", outcome.steps)?;
        }
        writeln!(out, "{}", UsageReport::from_state(&state))
    });

    // A closed stdout still counts as a completed run.
    if let Err(error) = written {
        if error.kind() != io::ErrorKind::BrokenPipe {
            eprintln!("error: failed to write output: {error}");
            return Err(1);
        }
    }
    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(args)) => match run(&args) {
            Ok(()) => 0,
            Err(code) => code,
        },
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
