//! Slot-based inventories

use std::ops::Range;

use super::ItemStack;
use crate::content::ContentIndices;

/// Fixed-size list of item stacks
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    id: i64,
    slots: Vec<ItemStack>,
}

impl Inventory {
    /// Create an inventory with `size` empty slots
    pub fn new(id: i64, size: usize) -> Self {
        Self {
            id,
            slots: vec![ItemStack::default(); size],
        }
    }

    /// Inventory id (0 for temporary inventories)
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Number of slots
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Slot by index
    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index)
    }

    /// Mutable slot by index
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ItemStack> {
        self.slots.get_mut(index)
    }

    /// All slots
    pub fn slots(&self) -> &[ItemStack] {
        &self.slots
    }

    /// Move `stack` into the slots of `range` (whole inventory when `None`)
    ///
    /// Slots are filled in order; whatever does not fit stays in `stack`.
    pub fn move_stack(&mut self, stack: &mut ItemStack, indices: &ContentIndices, range: Option<Range<usize>>) {
        let range = range.unwrap_or(0..self.slots.len());
        let end = range.end.min(self.slots.len());
        for slot in &mut self.slots[range.start.min(end)..end] {
            if stack.is_empty() {
                break;
            }
            if slot.accepts(stack) {
                slot.move_from(stack, indices);
            }
        }
    }
}
