//! Item model backing inventory views

pub mod item_def;
pub mod item_stack;
pub mod inventory;

pub use item_def::{ItemDef, ItemIcon, ItemId};
pub use item_stack::ItemStack;
pub use inventory::Inventory;
