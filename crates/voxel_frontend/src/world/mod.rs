//! Game-domain state the HUD reads and edits
//!
//! Only the fields the frontend touches are modelled; simulation lives
//! elsewhere.

pub mod player;

pub use player::{Player, Hitbox, Voxel};

use std::rc::Rc;

use crate::content::Content;

/// World-wide parameters
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    /// World generation seed
    pub seed: i64,
    /// Day fraction in `[0, 1)`
    pub daytime: f32,
}

/// Chunk statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Chunks {
    /// Loaded chunks
    pub chunks_count: usize,
    /// Chunks drawn last frame
    pub visible: usize,
}

/// Running level
#[derive(Debug)]
pub struct Level {
    /// World parameters
    pub world: World,
    /// Chunk statistics
    pub chunks: Chunks,
    /// The local player
    pub player: Player,
    /// Registered content
    pub content: Rc<Content>,
}

impl Level {
    /// Create a level
    pub fn new(world: World, player: Player, content: Rc<Content>) -> Self {
        Self {
            world,
            chunks: Chunks::default(),
            player,
            content,
        }
    }
}
