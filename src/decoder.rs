// src/decoder.rs

use std::convert::TryFrom;

use crate::error::VmError;
use crate::Value;

// --- Opcodes ---

/// The operations understood by the execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i64)]
pub enum Opcode {
    Add = 1,
    Multiply = 2,
    Input = 3,
    Output = 4,
    JumpIfTrue = 5,
    JumpIfFalse = 6,
    LessThan = 7,
    Equals = 8,
    AdjustRelativeBase = 9,
    Halt = 99,
}

impl Opcode {
    /// Number of parameters following the instruction word.
    pub fn arity(self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Index of the parameter the operation writes to, if any.
    pub fn write_parameter(self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }
}

impl TryFrom<Value> for Opcode {
    type Error = Value;

    /// Converts the low two digits of an instruction word; the unknown code is returned on failure.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Add), 2 => Ok(Opcode::Multiply), 3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output), 5 => Ok(Opcode::JumpIfTrue), 6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan), 8 => Ok(Opcode::Equals), 9 => Ok(Opcode::AdjustRelativeBase),
            99 => Ok(Opcode::Halt),
            other => Err(other),
        }
    }
}

// --- Addressing modes ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// The parameter is an address; the operand lives in memory there.
    #[default]
    Position,
    /// The parameter is the operand. Never valid for a write target.
    Immediate,
    /// The parameter is an offset from the relative base.
    Relative,
}

impl TryFrom<Value> for Mode {
    type Error = Value;

    fn try_from(digit: Value) -> Result<Self, Self::Error> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            other => Err(other),
        }
    }
}

// --- Decoded instruction ---

/// Maximum parameter count of any opcode.
pub const MAX_PARAMETERS: usize = 3;

/// An instruction word split into its opcode and per-parameter modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub modes: [Mode; MAX_PARAMETERS],
}

impl Instruction {
    /// Decodes the word found at `address`.
    ///
    /// Only as many mode digits as the opcode has parameters are inspected,
    /// the first parameter taking the least significant one. Higher digits are
    /// ignored.
    pub fn decode(word: Value, address: usize) -> Result<Self, VmError> {
        let opcode = Opcode::try_from(word % 100)
            .map_err(|opcode| VmError::UnknownOpcode { opcode, address })?;

        let mut modes = [Mode::Position; MAX_PARAMETERS];
        let mut digits = word / 100;
        for (index, slot) in modes.iter_mut().enumerate().take(opcode.arity()) {
            let digit = digits % 10;
            digits /= 10;
            let mode = Mode::try_from(digit)
                .map_err(|mode| VmError::InvalidAddressingMode { mode, address })?;
            if mode == Mode::Immediate && opcode.write_parameter() == Some(index) {
                return Err(VmError::InvalidAddressingMode { mode: digit, address });
            }
            *slot = mode;
        }

        Ok(Instruction { opcode, modes })
    }

    /// Width of the instruction including its parameters.
    pub fn width(&self) -> usize {
        1 + self.opcode.arity()
    }
}
