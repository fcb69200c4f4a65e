//! Local player

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Vec3;
use crate::items::Inventory;

/// Axis-aligned body of an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    /// Center position in world space
    pub position: Vec3,
    /// Velocity in blocks per second
    pub velocity: Vec3,
}

impl Hitbox {
    /// Hitbox at rest at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::zeros(),
        }
    }
}

/// Voxel value as stored in chunks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Voxel {
    /// Block id
    pub id: u32,
    /// Rotation and user state bits
    pub states: u8,
}

/// Player state used by the HUD
#[derive(Debug)]
pub struct Player {
    /// Physical body
    pub hitbox: Hitbox,
    /// Whether debug overlays are enabled for this player
    pub debug: bool,
    /// Voxel under the crosshair
    pub selected_voxel: Voxel,
    inventory: Rc<RefCell<Inventory>>,
    chosen_slot: usize,
    hotbar_size: usize,
}

impl Player {
    /// Default number of hotbar slots at the start of the inventory
    pub const HOTBAR_SIZE: usize = 10;

    /// Create a player at `position` carrying `inventory`
    pub fn new(position: Vec3, inventory: Inventory) -> Self {
        Self {
            hitbox: Hitbox::new(position),
            debug: false,
            selected_voxel: Voxel::default(),
            inventory: Rc::new(RefCell::new(inventory)),
            chosen_slot: 0,
            hotbar_size: Self::HOTBAR_SIZE,
        }
    }

    /// Builder: hotbar with `size` slots
    pub fn with_hotbar_size(mut self, size: usize) -> Self {
        self.set_hotbar_size(size);
        self
    }

    /// Number of selectable hotbar slots
    pub fn hotbar_size(&self) -> usize {
        self.hotbar_size
    }

    /// Resize the hotbar (at least one slot), keeping the choice in range
    pub fn set_hotbar_size(&mut self, size: usize) {
        self.hotbar_size = size.max(1);
        self.chosen_slot = self.chosen_slot.min(self.hotbar_size - 1);
    }

    /// Shared handle to the inventory
    pub fn inventory(&self) -> Rc<RefCell<Inventory>> {
        Rc::clone(&self.inventory)
    }

    /// Currently selected hotbar slot
    pub fn chosen_slot(&self) -> usize {
        self.chosen_slot
    }

    /// Select a hotbar slot; out-of-range indices are ignored
    pub fn set_chosen_slot(&mut self, index: usize) {
        if index < self.hotbar_size {
            self.chosen_slot = index;
        } else {
            log::warn!("Hotbar slot {index} out of range");
        }
    }

    /// Move the player, dropping any velocity
    pub fn teleport(&mut self, position: Vec3) {
        log::info!("Teleporting player to ({:.1}, {:.1}, {:.1})", position.x, position.y, position.z);
        self.hitbox.position = position;
        self.hitbox.velocity = Vec3::zeros();
    }
}
