// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

use crate::Value;

/// Errors raised while executing a program.
///
/// Every variant is fatal for the current `process()` call. A VM that returned
/// one of these is left in an unspecified state and should be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// A memory access used a negative address (also used for negative jump targets).
    #[error("invalid memory address {address}")]
    InvalidAddress { address: Value },

    /// Unknown mode digit, or immediate mode on a write target.
    #[error("invalid addressing mode {mode} in instruction at {address}")]
    InvalidAddressingMode { mode: Value, address: usize },

    #[error("unknown opcode {opcode} at {address}")]
    UnknownOpcode { opcode: Value, address: usize },

    /// The instruction pointer left the program image before a halt was executed.
    #[error("malformed program: instruction pointer {address} ran off the image without halting")]
    MalformedProgram { address: usize },

    /// Rejected at the input boundary (empty batch, non-integer text).
    #[error("input contract violation: {0}")]
    InputContractViolation(String),

    #[error("arithmetic overflow in instruction at {address}")]
    ArithmeticOverflow { address: usize },
}

/// Errors raised while loading a program image.
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("failed to read program {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid integer {token:?} at position {position}")]
    Parse { token: String, position: usize },

    #[error("program image is empty")]
    Empty,
}
