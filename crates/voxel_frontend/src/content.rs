//! Registered game content as seen by the frontend

use std::collections::HashMap;

use crate::items::{ItemDef, ItemId, ItemIcon};

/// Name of the implicit item with id 0
pub const EMPTY_ITEM: &str = "core:empty";

/// Block definition
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDef {
    /// Full block name (`namespace:name`)
    pub name: String,
}

impl BlockDef {
    /// Create a block definition
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Id-indexed content tables
///
/// Item id 0 is always the empty item; registered items start at 1.
#[derive(Debug, Clone)]
pub struct ContentIndices {
    items: Vec<ItemDef>,
    blocks: Vec<BlockDef>,
}

impl ContentIndices {
    /// Build tables from registered definitions
    pub fn new(items: Vec<ItemDef>, blocks: Vec<BlockDef>) -> Self {
        let mut all_items = Vec::with_capacity(items.len() + 1);
        all_items.push(ItemDef::new(EMPTY_ITEM).with_icon(ItemIcon::None));
        all_items.extend(items);
        Self {
            items: all_items,
            blocks,
        }
    }

    /// Item definition by id
    pub fn item_def(&self, id: ItemId) -> Option<&ItemDef> {
        self.items.get(id.0 as usize)
    }

    /// Block definition by id
    pub fn block_def(&self, id: u32) -> Option<&BlockDef> {
        self.blocks.get(id as usize)
    }

    /// Number of item definitions, the empty item included
    pub fn count_item_defs(&self) -> usize {
        self.items.len()
    }

    /// Number of block definitions
    pub fn count_block_defs(&self) -> usize {
        self.blocks.len()
    }
}

/// Content registry
#[derive(Debug, Clone)]
pub struct Content {
    indices: ContentIndices,
    item_ids: HashMap<String, ItemId>,
}

impl Content {
    /// Create content from its tables
    pub fn new(indices: ContentIndices) -> Self {
        let item_ids = indices
            .items
            .iter()
            .enumerate()
            .map(|(id, def)| (def.name.clone(), ItemId(id as u32)))
            .collect();
        Self { indices, item_ids }
    }

    /// Id-indexed tables
    pub fn indices(&self) -> &ContentIndices {
        &self.indices
    }

    /// Item id by full name
    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.item_ids.get(name).copied()
    }
}
