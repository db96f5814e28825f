//! A resumable virtual machine for integer programs.
//!
//! Programs are flat images of signed integers that may rewrite themselves.
//! The [`vm::VirtualMachine`] runs until the program halts or until it needs
//! input nobody has supplied yet; it then returns control to the caller with
//! the outputs produced so far and picks up at the same instruction on the
//! next [`vm::VirtualMachine::process`] call.
//!
//! Several machines can be chained by their callers, see [`pipeline`], and the
//! [`controllers`] module drives single machines through small interactive
//! protocols. [`search`] brute-forces the inputs patched into a program image.

pub mod controllers;
pub mod decoder;
pub mod error;
pub mod io;
pub mod logger;
pub mod memory;
pub mod pipeline;
pub mod program;
pub mod search;
pub mod vm;

/// The machine word: every memory cell, operand and I/O value.
pub type Value = i64;

pub use error::{ProgramError, VmError};
pub use io::InputBatch;
pub use vm::{State, VirtualMachine};
