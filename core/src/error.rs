use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Reasons a program image could not be placed in memory.
///
/// These abort loading; an interpreter that failed to load never runs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is too large ({size} bytes), max size is {max} bytes")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("unable to read program: {0}")]
    ProgramLoadFailed(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::ProgramTooLarge {
            size,
            max: MAX_PROGRAM_SIZE,
        }
    }
}

/// Instruction-level failures.
///
/// None of these stop execution: the offending instruction behaves as a no-op
/// and the fault is reported alongside the step that caused it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("stack overflow: call with a full return stack")]
    StackOverflow,

    #[error("stack underflow: return with an empty return stack")]
    StackUnderflow,

    #[error("unknown opcode {0:#06X}")]
    UnknownOpcode(u16),
}
