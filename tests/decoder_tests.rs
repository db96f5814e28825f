// tests/decoder_tests.rs

use intcode::decoder::{Instruction, Mode, Opcode};
use intcode::VmError;

#[test]
fn test_decode_plain_opcode() {
    let instruction = Instruction::decode(1, 0).unwrap();
    assert_eq!(instruction.opcode, Opcode::Add);
    assert_eq!(instruction.modes, [Mode::Position; 3]);
    assert_eq!(instruction.width(), 4);
}

#[test]
fn test_decode_modes_first_parameter_is_lowest_digit() {
    let instruction = Instruction::decode(21002, 7).unwrap();
    assert_eq!(instruction.opcode, Opcode::Multiply);
    assert_eq!(instruction.modes, [Mode::Position, Mode::Immediate, Mode::Relative]);
}

#[test]
fn test_decode_halt_has_no_parameters() {
    let instruction = Instruction::decode(99, 3).unwrap();
    assert_eq!(instruction.opcode, Opcode::Halt);
    assert_eq!(instruction.width(), 1);
}

#[test]
fn test_decode_ignores_digits_beyond_arity() {
    // Output has one parameter; the 3 in the thousands digit is never read.
    let instruction = Instruction::decode(3104, 0).unwrap();
    assert_eq!(instruction.opcode, Opcode::Output);
    assert_eq!(instruction.modes[0], Mode::Immediate);
}

#[test]
fn test_decode_unknown_opcode() {
    assert_eq!(Instruction::decode(42, 5), Err(VmError::UnknownOpcode { opcode: 42, address: 5 }));
    assert_eq!(Instruction::decode(0, 0), Err(VmError::UnknownOpcode { opcode: 0, address: 0 }));
}

#[test]
fn test_decode_unknown_mode() {
    assert_eq!(
        Instruction::decode(301, 2),
        Err(VmError::InvalidAddressingMode { mode: 3, address: 2 })
    );
}

#[test]
fn test_decode_immediate_write_target() {
    // add with immediate third parameter
    assert_eq!(
        Instruction::decode(10001, 0),
        Err(VmError::InvalidAddressingMode { mode: 1, address: 0 })
    );
    // input with immediate target
    assert_eq!(Instruction::decode(103, 4), Err(VmError::InvalidAddressingMode { mode: 1, address: 4 }));
    // relative targets are fine
    assert!(Instruction::decode(203, 0).is_ok());
}
