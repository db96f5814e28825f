// src/memory.rs

use std::collections::HashMap;

use crate::error::VmError;
use crate::Value;

/// Unbounded integer memory.
///
/// Addresses below the image length hit the (mutable) program image directly.
/// Anything at or beyond it lives in a sparse overflow map and reads as zero
/// until written. Callers never see the seam between the two regions.
///
/// Two memories are equal when their images match and every address reads
/// the same; an overflow cell explicitly set to zero equals one never written.
#[derive(Debug, Clone, Default)]
pub struct Memory {
    image: Vec<Value>,
    overflow: HashMap<usize, Value>,
}

impl Memory {
    pub fn new(image: Vec<Value>) -> Self {
        Memory { image, overflow: HashMap::new() }
    }

    /// Number of cells in the dense image. The executable region ends here.
    pub fn image_len(&self) -> usize {
        self.image.len()
    }

    /// The dense image, including any in-place rewrites.
    pub fn image(&self) -> &[Value] {
        &self.image
    }

    /// Number of overflow cells that have been written.
    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    pub fn read(&self, address: Value) -> Result<Value, VmError> {
        let index = Self::index(address)?;
        match self.image.get(index) {
            Some(&value) => Ok(value),
            None => Ok(self.overflow.get(&index).copied().unwrap_or(0)),
        }
    }

    pub fn write(&mut self, address: Value, value: Value) -> Result<(), VmError> {
        let index = Self::index(address)?;
        match self.image.get_mut(index) {
            Some(cell) => *cell = value,
            None => {
                self.overflow.insert(index, value);
            }
        }
        Ok(())
    }

    /// Whether every overflow cell written here reads the same in `other`.
    fn overflow_agrees(&self, other: &Memory) -> bool {
        self.overflow
            .iter()
            .all(|(index, &value)| other.overflow.get(index).copied().unwrap_or(0) == value)
    }

    #[inline]
    fn index(address: Value) -> Result<usize, VmError> {
        usize::try_from(address).map_err(|_| VmError::InvalidAddress { address })
    }
}

impl PartialEq for Memory {
    fn eq(&self, other: &Self) -> bool {
        self.image == other.image && self.overflow_agrees(other) && other.overflow_agrees(self)
    }
}

impl Eq for Memory {}
