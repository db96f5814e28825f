// src/io.rs

use std::collections::VecDeque;
use std::str::FromStr;

use crate::error::VmError;
use crate::Value;

/// A batch of values handed to a VM in one `feed_input` call.
///
/// Conversions never fail; emptiness is checked when the batch reaches the VM
/// so that "nothing supplied" (no call at all) stays distinct from "supplied
/// nothing" (an empty batch, which is rejected).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputBatch(Vec<Value>);

impl InputBatch {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn into_values(self) -> Vec<Value> {
        self.0
    }
}

impl From<Value> for InputBatch {
    fn from(value: Value) -> Self {
        InputBatch(vec![value])
    }
}

impl From<Vec<Value>> for InputBatch {
    fn from(values: Vec<Value>) -> Self {
        InputBatch(values)
    }
}

impl From<&[Value]> for InputBatch {
    fn from(values: &[Value]) -> Self {
        InputBatch(values.to_vec())
    }
}

impl<const N: usize> From<[Value; N]> for InputBatch {
    fn from(values: [Value; N]) -> Self {
        InputBatch(values.to_vec())
    }
}

impl FromStr for InputBatch {
    type Err = VmError;

    /// Parses comma- or whitespace-separated integers, e.g. `"1, 2 3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token.parse::<Value>().map_err(|_| {
                    VmError::InputContractViolation(format!("{token:?} is not an integer"))
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(InputBatch)
    }
}

/// FIFO of inputs waiting to be consumed by input instructions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputQueue {
    pending: VecDeque<Value>,
}

impl InputQueue {
    /// Appends a batch. Empty batches are a caller error.
    pub fn push(&mut self, batch: InputBatch) -> Result<(), VmError> {
        if batch.is_empty() {
            return Err(VmError::InputContractViolation(
                "input batch must contain at least one value".to_string(),
            ));
        }
        self.pending.extend(batch.into_values());
        Ok(())
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
