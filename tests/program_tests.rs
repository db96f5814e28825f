// tests/program_tests.rs

use std::fs;
use std::path::PathBuf;

use intcode::program::{load_program, parse_program};
use intcode::{ProgramError, VirtualMachine};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("intcode-{}-{name}", std::process::id()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_parse_comma_separated() {
    assert_eq!(parse_program("1,9,10,3,2,3,11,0,99,30,40,50").unwrap().len(), 12);
    assert_eq!(parse_program("1002,4,3,4,33\n").unwrap(), vec![1002, 4, 3, 4, 33]);
}

#[test]
fn test_parse_whitespace_and_trailing_separator() {
    assert_eq!(parse_program("  3 0\n4, 0,\t99,\n").unwrap(), vec![3, 0, 4, 0, 99]);
    assert_eq!(parse_program("-1,+2,-300").unwrap(), vec![-1, 2, -300]);
}

#[test]
fn test_parse_rejects_garbage() {
    match parse_program("1,2,x3,4") {
        Err(ProgramError::Parse { token, position }) => {
            assert_eq!(token, "x3");
            assert_eq!(position, 2);
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
    assert!(matches!(parse_program("1.5"), Err(ProgramError::Parse { .. })));
}

#[test]
fn test_parse_rejects_empty_image() {
    assert!(matches!(parse_program(""), Err(ProgramError::Empty)));
    assert!(matches!(parse_program(" ,\n, "), Err(ProgramError::Empty)));
}

#[test]
fn test_load_and_run_from_disk() {
    let path = write_temp("echo.txt", "3,0,4,0,99\n");
    let program = load_program(&path).unwrap();
    fs::remove_file(&path).unwrap();

    let mut vm = VirtualMachine::with_input(program, 7).unwrap();
    assert_eq!(vm.process(), Ok(vec![7]));
    assert!(vm.is_terminated());
}

#[test]
fn test_load_missing_file() {
    let path = std::env::temp_dir().join("intcode-this-file-does-not-exist.txt");
    match load_program(&path) {
        Err(ProgramError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}

#[test]
fn test_error_messages() {
    let err = parse_program("1,oops").unwrap_err();
    assert_eq!(err.to_string(), "invalid integer \"oops\" at position 1");
    assert_eq!(ProgramError::Empty.to_string(), "program image is empty");
}
