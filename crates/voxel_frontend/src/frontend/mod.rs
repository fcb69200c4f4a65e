//! Game frontend: layout documents, inventory views and the HUD

pub mod assets;
pub mod document;
pub mod hud;
pub mod inventory_view;
pub mod level_frontend;
pub mod menus;

#[cfg(test)]
mod tests;

pub use assets::{AssetError, Assets};
pub use document::{NodesMap, UiDocument};
pub use hud::{FpsStats, HudError, HudRenderer};
pub use inventory_view::{
    InventoryBuilder, InventoryInteraction, InventoryView, SlotLayout, SlotView, SLOT_INTERVAL, SLOT_SIZE,
};
pub use level_frontend::{LevelFrontend, RenderStats};
