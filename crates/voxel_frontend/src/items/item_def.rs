//! Item definitions

/// Numeric item id; 0 is the empty item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemId(pub u32);

impl ItemId {
    /// The empty item
    pub const EMPTY: ItemId = ItemId(0);
}

/// How an item is pictured in a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemIcon {
    /// Nothing is drawn
    None,
    /// Preview of a block, by block name
    Block(String),
    /// Sprite from the items atlas, by sprite name
    Sprite(String),
}

/// Item definition registered by content
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDef {
    /// Full item name (`namespace:name`)
    pub name: String,
    /// Maximum count a single stack may hold
    pub stack_size: u32,
    /// Slot icon
    pub icon: ItemIcon,
}

impl ItemDef {
    /// Default stack size for new definitions
    pub const DEFAULT_STACK_SIZE: u32 = 64;

    /// Definition with default stack size and no icon
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stack_size: Self::DEFAULT_STACK_SIZE,
            icon: ItemIcon::None,
        }
    }

    /// Builder: set stack size
    pub fn with_stack_size(mut self, stack_size: u32) -> Self {
        self.stack_size = stack_size;
        self
    }

    /// Builder: set icon
    pub fn with_icon(mut self, icon: ItemIcon) -> Self {
        self.icon = icon;
        self
    }
}
