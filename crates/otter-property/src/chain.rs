//! Descriptor chain
//!
//! Ordered stack of layers for one (object, key) pair. Insertion order is
//! attachment order; the last layer is `current`. Lookups never fail and
//! return `None` out of range. Mutations at an invalid position fail with
//! [`PropertyError::InvalidIndex`] and leave the chain untouched.

use smallvec::SmallVec;

use crate::error::{PropertyError, PropertyResult};
use crate::record::DescriptorRecord;

/// Layers stored inline before spilling to the heap
const INLINE_LAYERS: usize = 4;

/// Ordered stack of descriptor records
#[derive(Clone, Debug, Default)]
pub struct DescriptorChain {
    layers: SmallVec<[DescriptorRecord; INLINE_LAYERS]>,
}

impl DescriptorChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer; it becomes `current`
    pub fn push(&mut self, record: DescriptorRecord) {
        self.layers.push(record);
    }

    /// Insert a layer at `index`, shifting later layers up
    pub fn insert(&mut self, index: usize, record: DescriptorRecord) -> PropertyResult<()> {
        if index > self.layers.len() {
            return Err(PropertyError::invalid_index(index, self.layers.len()));
        }
        self.layers.insert(index, record);
        Ok(())
    }

    /// Layer at `index`
    pub fn get(&self, index: usize) -> Option<&DescriptorRecord> {
        self.layers.get(index)
    }

    /// Mutable layer at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut DescriptorRecord> {
        self.layers.get_mut(index)
    }

    /// Remove the layer at `index`; later layers shift down by one
    pub fn remove_at(&mut self, index: usize) -> PropertyResult<DescriptorRecord> {
        if index >= self.layers.len() {
            return Err(PropertyError::invalid_index(index, self.layers.len()));
        }
        Ok(self.layers.remove(index))
    }

    /// Top of the stack
    pub fn current(&self) -> Option<&DescriptorRecord> {
        self.layers.last()
    }

    /// Mutable top of the stack
    pub fn current_mut(&mut self) -> Option<&mut DescriptorRecord> {
        self.layers.last_mut()
    }

    /// Second from the top
    pub fn previous(&self) -> Option<&DescriptorRecord> {
        let len = self.layers.len();
        if len < 2 {
            return None;
        }
        self.layers.get(len - 2)
    }

    /// Index of `current`
    pub fn last_index(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if there are no layers
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &DescriptorRecord> {
        self.layers.iter()
    }
}
