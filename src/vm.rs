// src/vm.rs

use std::fmt;

use tracing::{debug, info, trace};

use crate::decoder::{Instruction, Mode, Opcode};
use crate::error::VmError;
use crate::io::{InputBatch, InputQueue};
use crate::memory::Memory;
use crate::Value;

// --- Run state ---

/// Where the VM stands between `process()` calls.
///
/// `Active` only exists while the engine loop is running; callers observe
/// `Blocked` (waiting for input, resumable) or `Terminated` (halted, inert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Active,
    Blocked,
    Terminated,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Active => write!(f, "active"),
            State::Blocked => write!(f, "blocked on input"),
            State::Terminated => write!(f, "terminated"),
        }
    }
}

// --- Virtual Machine ---

/// A resumable program VM.
///
/// All state needed to resume lives in this value: memory, instruction
/// pointer, relative base, run state and pending input. Cloning a VM forks
/// it; the copy continues independently from the same point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMachine {
    ip: usize,            // Index of the next instruction word.
    relative_base: Value, // Offset applied to relative-mode parameters.
    memory: Memory,
    input: InputQueue,
    state: State,
}

impl VirtualMachine {
    /// Creates a VM over `program` with no input queued.
    pub fn new(program: impl Into<Vec<Value>>) -> Self {
        VirtualMachine {
            ip: 0,
            relative_base: 0,
            memory: Memory::new(program.into()),
            input: InputQueue::default(),
            state: State::Active,
        }
    }

    /// Creates a VM and seeds its input queue. An empty batch is rejected.
    pub fn with_input(
        program: impl Into<Vec<Value>>,
        input: impl Into<InputBatch>,
    ) -> Result<Self, VmError> {
        let mut vm = Self::new(program);
        vm.feed_input(input)?;
        Ok(vm)
    }

    // --- Facade ---

    /// Queues input for upcoming input instructions.
    pub fn feed_input(&mut self, input: impl Into<InputBatch>) -> Result<(), VmError> {
        self.input.push(input.into())
    }

    /// Runs until the program halts or needs input that is not queued.
    ///
    /// Returns the values output during this call only. Once terminated every
    /// call returns an empty vector without touching memory.
    pub fn process(&mut self) -> Result<Vec<Value>, VmError> {
        let mut output = Vec::new();
        if self.state == State::Terminated {
            return Ok(output);
        }

        debug!(ip = self.ip, pending = self.input.len(), "resuming");
        self.state = State::Active;
        while self.state == State::Active {
            self.step(&mut output)?;
        }
        debug!(ip = self.ip, outputs = output.len(), state = %self.state, "returning control");
        Ok(output)
    }

    pub fn is_terminated(&self) -> bool {
        self.state == State::Terminated
    }

    pub fn is_blocked(&self) -> bool {
        self.state == State::Blocked
    }

    pub fn state(&self) -> State {
        self.state
    }

    // --- Inspection ---

    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn relative_base(&self) -> Value {
        self.relative_base
    }

    /// Number of queued inputs not yet consumed.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn read(&self, address: Value) -> Result<Value, VmError> {
        self.memory.read(address)
    }

    /// Patches a memory cell, typically before the first `process()` call.
    pub fn write(&mut self, address: Value, value: Value) -> Result<(), VmError> {
        self.memory.write(address, value)
    }

    /// Logs the registers and the word under the instruction pointer.
    pub fn dump_registers(&self) {
        let word = self.memory.read(self.ip as Value).unwrap_or_default();
        info!(
            ip = self.ip,
            relative_base = self.relative_base,
            word,
            pending = self.input.len(),
            state = %self.state,
            "vm registers"
        );
    }

    // --- Fetching ---

    /// Decodes the instruction under `ip`, failing once `ip` leaves the image.
    #[inline]
    fn fetch_instruction(&self) -> Result<Instruction, VmError> {
        if self.ip >= self.memory.image_len() {
            return Err(VmError::MalformedProgram { address: self.ip });
        }
        let word = self.memory.read(self.ip as Value)?;
        Instruction::decode(word, self.ip)
    }

    /// Raw parameter word `index` of the current instruction.
    #[inline]
    fn raw_parameter(&self, index: usize) -> Result<Value, VmError> {
        self.memory.read((self.ip + 1 + index) as Value)
    }

    /// Effective address of a position or relative parameter.
    fn parameter_address(&self, instruction: &Instruction, index: usize) -> Result<Value, VmError> {
        let raw = self.raw_parameter(index)?;
        match instruction.modes[index] {
            Mode::Position => Ok(raw),
            Mode::Relative => self
                .relative_base
                .checked_add(raw)
                .ok_or(VmError::ArithmeticOverflow { address: self.ip }),
            Mode::Immediate => Err(VmError::InvalidAddressingMode { mode: 1, address: self.ip }),
        }
    }

    fn read_parameter(&self, instruction: &Instruction, index: usize) -> Result<Value, VmError> {
        match instruction.modes[index] {
            Mode::Immediate => self.raw_parameter(index),
            _ => self.memory.read(self.parameter_address(instruction, index)?),
        }
    }

    fn write_parameter(
        &mut self,
        instruction: &Instruction,
        index: usize,
        value: Value,
    ) -> Result<(), VmError> {
        let address = self.parameter_address(instruction, index)?;
        self.memory.write(address, value)
    }

    // --- Execution Loop ---

    /// Performs one fetch-decode-execute cycle and moves `ip` to the next
    /// instruction.
    ///
    /// Halt and an input instruction facing an empty queue only change the
    /// state and leave `ip` where it is, so a blocked input is retried on resume.
    fn step(&mut self, output: &mut Vec<Value>) -> Result<(), VmError> {
        let instruction = &self.fetch_instruction()?;
        trace!(ip = self.ip, opcode = ?instruction.opcode, modes = ?instruction.modes, "execute");
        let address = self.ip;
        let mut next = self.ip + instruction.width();

        match instruction.opcode {
            Opcode::Add | Opcode::Multiply => {
                let a = self.read_parameter(instruction, 0)?;
                let b = self.read_parameter(instruction, 1)?;
                let result = match instruction.opcode {
                    Opcode::Add => a.checked_add(b),
                    _ => a.checked_mul(b),
                };
                let result = result.ok_or(VmError::ArithmeticOverflow { address })?;
                self.write_parameter(instruction, 2, result)?;
            }
            Opcode::LessThan | Opcode::Equals => {
                let a = self.read_parameter(instruction, 0)?;
                let b = self.read_parameter(instruction, 1)?;
                let holds = match instruction.opcode {
                    Opcode::LessThan => a < b,
                    _ => a == b,
                };
                self.write_parameter(instruction, 2, Value::from(holds))?;
            }
            Opcode::Input => {
                let target = self.parameter_address(instruction, 0)?;
                let Some(value) = self.input.pop() else {
                    debug!(ip = self.ip, "blocked on input");
                    self.state = State::Blocked;
                    return Ok(());
                };
                self.memory.write(target, value)?;
            }
            Opcode::Output => {
                output.push(self.read_parameter(instruction, 0)?);
            }
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => {
                let condition = self.read_parameter(instruction, 0)?;
                let target = self.read_parameter(instruction, 1)?;
                let taken = match instruction.opcode {
                    Opcode::JumpIfTrue => condition != 0,
                    _ => condition == 0,
                };
                if taken {
                    next = usize::try_from(target)
                        .map_err(|_| VmError::InvalidAddress { address: target })?;
                }
            }
            Opcode::AdjustRelativeBase => {
                let offset = self.read_parameter(instruction, 0)?;
                self.relative_base = self
                    .relative_base
                    .checked_add(offset)
                    .ok_or(VmError::ArithmeticOverflow { address })?;
            }
            Opcode::Halt => {
                debug!(ip = self.ip, "halt");
                self.state = State::Terminated;
                return Ok(());
            }
        }

        self.ip = next;
        Ok(())
    }
}
