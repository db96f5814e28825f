// src/program.rs

//! Loading program images from their textual form.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::ProgramError;
use crate::Value;

/// Parses a comma- or whitespace-separated list of signed integers.
///
/// Leading/trailing whitespace and a trailing separator are tolerated.
pub fn parse_program(source: &str) -> Result<Vec<Value>, ProgramError> {
    let program = source
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse::<Value>().map_err(|_| ProgramError::Parse {
                token: token.to_string(),
                position,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if program.is_empty() {
        return Err(ProgramError::Empty);
    }
    Ok(program)
}

/// Reads and parses a program image from disk.
pub fn load_program(path: impl AsRef<Path>) -> Result<Vec<Value>, ProgramError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = parse_program(&source)?;
    debug!(path = %path.display(), words = program.len(), "loaded program");
    Ok(program)
}
