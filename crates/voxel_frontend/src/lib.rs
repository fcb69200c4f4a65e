//! # Voxel Frontend
//!
//! User interface layer of a voxel game: a retained node tree, XML layout
//! documents with attached scripts, inventory views and the in-game HUD.
//!
//! ## Overview
//!
//! - **UI tree**: [`ui::UiNode`] widgets shared as [`ui::NodeRef`], routed by [`ui::Gui`]
//! - **Layouts**: [`ui::UiXmlReader`] and [`frontend::UiDocument`]
//! - **Inventories**: [`frontend::InventoryView`] grids bound to [`items::Inventory`]
//! - **HUD**: [`frontend::HudRenderer`] composing hotbar, debug panel and menus
//! - **Rendering**: everything is recorded into a [`render::Batch2D`] consumed by a
//!   [`render::UiRenderBackend`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use voxel_frontend::prelude::*;
//!
//! fn frame(engine: &Engine, hud: &mut HudRenderer, input: &mut InputState) -> Result<(), HudError> {
//!     hud.update(true, input)?;
//!     engine.gui().borrow_mut().act(0.016, input);
//!
//!     let viewport = Viewport::new(1280, 720);
//!     let mut batch = Batch2D::new();
//!     hud.draw(viewport, &mut batch, input);
//!     engine.gui().borrow().draw(viewport, &mut batch);
//!     input.end_frame();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod render;
pub mod ui;
pub mod items;
pub mod content;
pub mod world;
pub mod scripting;
pub mod frontend;

mod engine;

pub use engine::Engine;

/// Common imports for frontend users
pub mod prelude {
    pub use crate::{
        Engine,
        config::{Config, ConfigError, Settings},
        content::{Content, ContentIndices},
        foundation::math::{Vec2, Vec3, Vec4},
        frontend::{
            Assets, HudError, HudRenderer, InventoryBuilder, InventoryView, LevelFrontend, SlotLayout,
            UiDocument,
        },
        input::{InputState, KeyCode, MouseButton},
        items::{Inventory, ItemDef, ItemIcon, ItemId, ItemStack},
        render::{Batch2D, DrawCommand, UiRenderBackend, Viewport},
        scripting::{NullScripting, ScriptRuntime},
        ui::{Gui, NodeRef, UiNode, UiXmlReader},
        world::{Level, Player, World},
    };
}
