// src/search.rs

use itertools::iproduct;
use tracing::{debug, trace};

use crate::error::VmError;
use crate::vm::VirtualMachine;
use crate::Value;

/// Nouns and verbs are both tried over `0..100`.
pub const SEARCH_RANGE: std::ops::Range<Value> = 0..100;

const NOUN_ADDRESS: Value = 1;
const VERB_ADDRESS: Value = 2;
const RESULT_ADDRESS: Value = 0;

/// Finds the first `(noun, verb)` pair that leaves `target` in address 0.
///
/// Every pair runs on a fresh copy of `program` with the noun written to
/// address 1 and the verb to address 2. Nouns are tried in the outer loop.
/// A run that fails or stops waiting for input is skipped.
pub fn find_noun_verb(program: &[Value], target: Value) -> Result<Option<(Value, Value)>, VmError> {
    for (noun, verb) in iproduct!(SEARCH_RANGE, SEARCH_RANGE) {
        let mut vm = VirtualMachine::new(program);
        vm.write(NOUN_ADDRESS, noun)?;
        vm.write(VERB_ADDRESS, verb)?;

        if let Err(e) = vm.process() {
            trace!(noun, verb, error = %e, "skipping failed run");
            continue;
        }
        if !vm.is_terminated() {
            trace!(noun, verb, "skipping run blocked on input");
            continue;
        }
        if vm.read(RESULT_ADDRESS)? == target {
            debug!(noun, verb, target, "pair found");
            return Ok(Some((noun, verb)));
        }
    }
    Ok(None)
}
