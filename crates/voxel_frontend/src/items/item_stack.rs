//! Item stacks

use super::ItemId;
use crate::content::ContentIndices;

/// A count of one item kind; a count of zero always means the empty item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ItemStack {
    item: ItemId,
    count: u32,
}

impl ItemStack {
    /// Create a stack; a zero count yields the empty stack
    pub fn new(item: ItemId, count: u32) -> Self {
        if count == 0 || item == ItemId::EMPTY {
            return Self::default();
        }
        Self { item, count }
    }

    /// Item kind
    pub fn item_id(&self) -> ItemId {
        self.item
    }

    /// Item count
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether the stack holds nothing
    pub fn is_empty(&self) -> bool {
        self.item == ItemId::EMPTY
    }

    /// Replace contents with a copy of `other`
    pub fn set(&mut self, other: ItemStack) {
        *self = other;
    }

    /// Change the count; zero empties the stack
    pub fn set_count(&mut self, count: u32) {
        self.count = count;
        if count == 0 {
            self.item = ItemId::EMPTY;
        }
    }

    /// Empty the stack
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `other` can be merged into this stack
    pub fn accepts(&self, other: &ItemStack) -> bool {
        self.is_empty() || self.item == other.item
    }

    /// Move as much of `other` into this stack as the item's stack size allows
    ///
    /// The remainder stays in `other`. Unknown items are not moved.
    pub fn move_from(&mut self, other: &mut ItemStack, indices: &ContentIndices) {
        if other.is_empty() || !self.accepts(other) {
            return;
        }
        let Some(def) = indices.item_def(other.item) else {
            log::warn!("Cannot move unknown item {:?}", other.item);
            return;
        };
        let space = def.stack_size.saturating_sub(self.count);
        let moved = other.count.min(space);
        if moved == 0 {
            return;
        }
        if self.is_empty() {
            *self = ItemStack::new(other.item, moved);
        } else {
            self.count += moved;
        }
        other.set_count(other.count - moved);
    }
}
