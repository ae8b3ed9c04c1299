//! Program sources and the setup-time loader.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use z80_core::{Memory, ADDRESS_SPACE_BYTES, PROGRAM_ORIGIN};

/// Three accumulator increments, `ADD A,B`, `HALT`.
const TEST_PROGRAM: &[u8] = &[0x3C, 0x3C, 0x3C, 0x80, 0x76];

/// Increment, add, and bitwise exercise ending in `HALT`.
const FIRST_PROGRAM: &[u8] = &[
    0x3C, 0x3C, 0x3C, 0x80, 0xA0, 0xB3, 0x1C, 0xB3, 0xA1, 0x0C, 0xA1, 0xAA, 0x15, 0xAA, 0x76,
];

/// Programs compiled into the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuiltinProgram {
    Test,
    First,
}

impl BuiltinProgram {
    pub(crate) const ALL: [Self; 2] = [Self::Test, Self::First];

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|program| program.name() == name)
    }

    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::First => "first",
        }
    }

    pub(crate) const fn bytes(self) -> &'static [u8] {
        match self {
            Self::Test => TEST_PROGRAM,
            Self::First => FIRST_PROGRAM,
        }
    }
}

/// Where the program bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProgramSource {
    Builtin(BuiltinProgram),
    Image(PathBuf),
}

impl Default for ProgramSource {
    fn default() -> Self {
        Self::Builtin(BuiltinProgram::First)
    }
}

#[derive(Debug, Error)]
pub(crate) enum LoadError {
    #[error("failed to read image {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("image of {len} bytes does not fit at 0x{origin:04x}")]
    ImageTooLarge { len: usize, origin: u16 },
}

/// Resolves a source to its raw bytes.
pub(crate) fn read_source(source: &ProgramSource) -> Result<Vec<u8>, LoadError> {
    match source {
        ProgramSource::Builtin(program) => Ok(program.bytes().to_vec()),
        ProgramSource::Image(path) => fs::read(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        }),
    }
}

/// Writes `bytes` into memory from [`PROGRAM_ORIGIN`] upward, one byte at a time.
pub(crate) fn load_program(memory: &mut Memory, bytes: &[u8]) -> Result<(), LoadError> {
    if bytes.len() > ADDRESS_SPACE_BYTES - usize::from(PROGRAM_ORIGIN) {
        return Err(LoadError::ImageTooLarge {
            len: bytes.len(),
            origin: PROGRAM_ORIGIN,
        });
    }

    for (addr, byte) in (PROGRAM_ORIGIN..=u16::MAX).zip(bytes.iter().copied()) {
        memory.write(addr, byte);
    }
    Ok(())
}
