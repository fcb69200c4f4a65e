//! Frontend-side view of a running level

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Settings;
use crate::content::Content;
use crate::world::Level;

/// Renderer counters and parameters exposed to the debug panel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderStats {
    /// Meshes currently allocated
    pub meshes_count: usize,
    /// Fog density in `[0, 1]`
    pub fog: f32,
}

/// Shared handles the HUD needs to read and edit the level
pub struct LevelFrontend {
    level: Rc<RefCell<Level>>,
    content: Rc<Content>,
    stats: Rc<RefCell<RenderStats>>,
}

impl LevelFrontend {
    /// Frontend for `level`, fog taken from the settings
    pub fn new(level: Level, settings: &Settings) -> Self {
        let content = Rc::clone(&level.content);
        Self {
            level: Rc::new(RefCell::new(level)),
            content,
            stats: Rc::new(RefCell::new(RenderStats {
                meshes_count: 0,
                fog: settings.graphics.fog,
            })),
        }
    }

    /// Shared level
    pub fn level(&self) -> &Rc<RefCell<Level>> {
        &self.level
    }

    /// Shared content
    pub fn content(&self) -> &Rc<Content> {
        &self.content
    }

    /// Shared render statistics
    pub fn stats(&self) -> &Rc<RefCell<RenderStats>> {
        &self.stats
    }
}
