//! Engine-wide shared services used by screens and the HUD

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Settings;
use crate::frontend::Assets;
use crate::scripting::ScriptRuntime;
use crate::ui::Gui;

/// Settings, assets, GUI and scripting shared by every screen
pub struct Engine {
    settings: Rc<RefCell<Settings>>,
    assets: Rc<Assets>,
    gui: Rc<RefCell<Gui>>,
    scripting: Rc<dyn ScriptRuntime>,
}

impl Engine {
    /// Create the engine context with an empty GUI
    pub fn new(settings: Settings, assets: Assets, scripting: Rc<dyn ScriptRuntime>) -> Self {
        log::info!("Engine context created ({} layouts)", assets.layouts_count());
        Self {
            settings: Rc::new(RefCell::new(settings)),
            assets: Rc::new(assets),
            gui: Rc::new(RefCell::new(Gui::new())),
            scripting,
        }
    }

    /// Shared settings
    pub fn settings(&self) -> &Rc<RefCell<Settings>> {
        &self.settings
    }

    /// Loaded assets
    pub fn assets(&self) -> &Rc<Assets> {
        &self.assets
    }

    /// GUI root
    pub fn gui(&self) -> &Rc<RefCell<Gui>> {
        &self.gui
    }

    /// Script runtime
    pub fn scripting(&self) -> &Rc<dyn ScriptRuntime> {
        &self.scripting
    }
}
