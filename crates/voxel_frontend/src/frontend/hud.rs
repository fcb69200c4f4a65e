//! In-game HUD
//!
//! Owns the hotbar, debug panel, content access panel, grabbed item view,
//! dark overlay and the optional inventory overlay, and drives the pause /
//! inventory state from input every frame.

use std::cell::RefCell;
use std::rc::Rc;

use super::assets::Assets;
use super::document::UiDocument;
use super::inventory_view::{InventoryBuilder, InventoryInteraction, InventoryView, SlotLayout, SlotView};
use super::level_frontend::{LevelFrontend, RenderStats};
use crate::config::Settings;
use crate::content::Content;
use crate::engine::Engine;
use crate::foundation::math::{Vec2, Vec4};
use crate::foundation::timeutil;
use crate::input::{InputState, KeyCode, BIND_HUD_INVENTORY};
use crate::items::{Inventory, ItemId, ItemStack};
use crate::render::{Batch2D, UiCamera, Viewport};
use crate::scripting::ScriptRuntime;
use crate::ui::gui::Gui;
use crate::ui::node::{as_node, downcast_node, into_ref, node_is, NodeRef, UiNode};
use crate::ui::widgets::{FullCheckBox, Label, Orientation, Panel, TextBox, TrackBar};
use crate::world::Level;

/// Errors raised by HUD state changes
#[derive(thiserror::Error, Debug)]
pub enum HudError {
    #[error("Layout '{0}' is not loaded")]
    MissingLayout(String),

    #[error("Root of layout '{0}' is not an inventory view")]
    NotAnInventory(String),
}

/// Frame rate figures shown by the debug panel
#[derive(Debug, Clone, Default)]
pub struct FpsStats {
    /// Last reported frame rate
    pub fps: i32,
    /// Lowest frame rate since the last refresh
    pub fps_min: i32,
    /// Highest frame rate since the last refresh
    pub fps_max: i32,
    /// Text shown after `fps: `
    pub fps_string: String,
}

impl FpsStats {
    fn refresh(&mut self) {
        self.fps_string = format!("{} / {}", self.fps_max, self.fps_min);
        self.fps_min = self.fps;
        self.fps_max = self.fps;
    }
}

const DARK_OVERLAY_COLOR: Vec4 = Vec4::new(0.0, 0.0, 0.0, 0.5);
const CROSSHAIR_DARK: Vec4 = Vec4::new(0.2, 0.2, 0.2, 1.0);
const CROSSHAIR_LIGHT: Vec4 = Vec4::new(0.9, 0.9, 0.9, 1.0);

/// Heads-up display of a running level
pub struct HudRenderer {
    gui: Rc<RefCell<Gui>>,
    assets: Rc<Assets>,
    scripting: Rc<dyn ScriptRuntime>,
    settings: Rc<RefCell<Settings>>,
    level: Rc<RefCell<Level>>,
    content: Rc<Content>,
    interaction: Rc<RefCell<InventoryInteraction>>,
    grabbed_view: Rc<RefCell<SlotView>>,
    content_access: Rc<RefCell<InventoryView>>,
    content_access_panel: Rc<RefCell<Panel>>,
    hotbar: Rc<RefCell<InventoryView>>,
    dark_overlay: Rc<RefCell<Panel>>,
    debug_panel: Rc<RefCell<Panel>>,
    camera: UiCamera,
    fps: Rc<RefCell<FpsStats>>,
    inventory_document: Option<Rc<UiDocument>>,
    inventory_view: Option<NodeRef>,
    inventory_open: bool,
    pause: bool,
}

impl HudRenderer {
    /// Build the HUD and attach its nodes to the engine GUI
    pub fn new(engine: &Engine, frontend: &LevelFrontend) -> Self {
        let level = Rc::clone(frontend.level());
        let content = Rc::clone(frontend.content());
        let settings = Rc::clone(engine.settings());
        let interaction = Rc::new(RefCell::new(InventoryInteraction::new()));

        let mut grabbed = SlotView::new(SlotLayout::default());
        grabbed.bind_grabbed(Rc::clone(&content), Rc::clone(&interaction));
        grabbed.set_color(Vec4::zeros());
        grabbed.set_interactive(false);
        let grabbed_view = into_ref(grabbed);

        let content_access = into_ref(create_content_access(&level, &content, &interaction, &settings.borrow()));
        let access_size = content_access.borrow().size();
        content_access.borrow_mut().set_margin(Vec4::zeros());
        let mut access_panel = Panel::new(access_size, Vec4::zeros(), 0.0);
        access_panel.set_color(Vec4::zeros());
        access_panel.add(as_node(&content_access));
        access_panel.set_scrollable(true);
        let content_access_panel = into_ref(access_panel);

        let hotbar = into_ref(create_hotbar(&level, &content, &interaction, &settings.borrow()));

        let mut overlay = Panel::sized(Vec2::new(4000.0, 4000.0));
        overlay.set_color(DARK_OVERLAY_COLOR);
        let dark_overlay = into_ref(overlay);

        let fps = Rc::new(RefCell::new(FpsStats::default()));
        let debug_panel = into_ref(create_debug_panel(&level, &settings, frontend.stats(), &fps));

        let gui = Rc::clone(engine.gui());
        {
            let mut gui = gui.borrow_mut();
            gui.menu().borrow_mut().reset();
            gui.add_back(as_node(&dark_overlay));
            gui.add_back(as_node(&hotbar));
            gui.add(as_node(&debug_panel));
            gui.add(as_node(&content_access_panel));
            gui.add(as_node(&grabbed_view));
        }

        Self {
            gui,
            assets: Rc::clone(engine.assets()),
            scripting: Rc::clone(engine.scripting()),
            settings,
            level,
            content,
            interaction,
            grabbed_view,
            content_access,
            content_access_panel,
            hotbar,
            dark_overlay,
            debug_panel,
            camera: UiCamera::new(1.0),
            fps,
            inventory_document: None,
            inventory_view: None,
            inventory_open: false,
            pause: false,
        }
    }

    /// Report the current frame rate
    pub fn draw_debug(&mut self, fps: i32) {
        let mut stats = self.fps.borrow_mut();
        stats.fps = fps;
        stats.fps_min = stats.fps_min.min(fps);
        stats.fps_max = stats.fps_max.max(fps);
    }

    /// Frame rate figures
    pub fn fps_stats(&self) -> FpsStats {
        self.fps.borrow().clone()
    }

    /// Apply this frame's input to the HUD state; run before `Gui::act`
    pub fn update(&mut self, visible: bool, input: &mut InputState) -> Result<(), HudError> {
        let menu = self.gui.borrow().menu();
        let debug = self.level.borrow().player.debug;

        self.debug_panel.borrow_mut().set_visible(debug && visible);
        menu.borrow_mut().set_visible(self.pause);

        if !visible && self.inventory_open {
            self.close_inventory();
        }
        if self.pause && menu.borrow().current().panel.is_none() {
            self.pause = false;
        }
        if input.jpressed(KeyCode::Escape) && !self.gui.borrow().is_focus_caught() {
            if self.pause {
                log::info!("Resuming");
                self.pause = false;
                menu.borrow_mut().reset();
            } else if self.inventory_open {
                self.close_inventory();
            } else {
                log::info!("Paused");
                self.pause = true;
                menu.borrow_mut().set_page("pause", true);
            }
        }
        if visible && input.jactive(BIND_HUD_INVENTORY) && !self.pause {
            if self.inventory_open {
                self.close_inventory();
            } else {
                self.open_inventory()?;
            }
        }
        if (self.pause || self.inventory_open) == input.is_cursor_locked() {
            input.toggle_cursor();
        }

        {
            let mut panel = self.content_access_panel.borrow_mut();
            let width = panel.size().x;
            panel.set_visible(self.inventory_open);
            panel.set_size(Vec2::new(width, input.window_size.y));
        }
        self.hotbar.borrow_mut().set_visible(visible);

        let mut level = self.level.borrow_mut();
        let player = &mut level.player;
        let slots = player.hotbar_size();
        for digit in 0..=9u8 {
            // keys 1-9 pick slots 0-8, key 0 picks slot 9
            let slot = (usize::from(digit) + 9) % 10;
            if slot < slots && input.jpressed(KeyCode::digit(digit)) {
                player.set_chosen_slot(slot);
            }
        }
        if !self.pause && !self.inventory_open && input.scroll != 0 {
            let slot = (player.chosen_slot() as i64 - i64::from(input.scroll)).rem_euclid(slots as i64);
            player.set_chosen_slot(slot as usize);
        }
        drop(level);

        self.dark_overlay.borrow_mut().set_visible(self.pause);
        Ok(())
    }

    /// Show the configured inventory layout bound to the player's inventory
    pub fn open_inventory(&mut self) -> Result<(), HudError> {
        let name = self.settings.borrow().ui.inventory_layout.clone();
        let document = self
            .assets
            .get_layout(&name)
            .ok_or_else(|| HudError::MissingLayout(name.clone()))?;
        let root = Rc::clone(document.root());
        if !node_is::<InventoryView>(&root) {
            return Err(HudError::NotAnInventory(name));
        }

        let inventory = self.level.borrow().player.inventory();
        downcast_node::<InventoryView, _>(&root, |view| {
            view.bind(Rc::clone(&inventory), Rc::clone(&self.content), Rc::clone(&self.interaction));
        });
        log::info!("Opening inventory '{}'", name);
        self.inventory_open = true;
        self.scripting.on_ui_open(&document, &inventory);

        let grabbed = as_node(&self.grabbed_view);
        let mut gui = self.gui.borrow_mut();
        gui.remove(&grabbed);
        gui.add(Rc::clone(&root));
        gui.add(grabbed);
        drop(gui);

        self.inventory_view = Some(root);
        self.inventory_document = Some(document);
        Ok(())
    }

    /// Hide the inventory overlay and drop the grabbed item
    pub fn close_inventory(&mut self) {
        let view = self.inventory_view.take();
        let document = self.inventory_document.take();
        if let (Some(view), Some(document)) = (view, document) {
            let inventory = downcast_node::<InventoryView, _>(&view, |view| view.inventory()).flatten();
            if let Some(inventory) = inventory {
                self.scripting.on_ui_close(&document, &inventory);
            }
            self.gui.borrow_mut().remove(&view);
            log::info!("Closed inventory '{}'", document.id());
        }
        self.inventory_open = false;
        self.interaction.borrow_mut().grabbed_mut().clear();
    }

    /// Place HUD nodes for this viewport and record the crosshair
    pub fn draw(&mut self, viewport: Viewport, batch: &mut Batch2D, input: &InputState) {
        let width = viewport.width_f();
        let height = viewport.height_f();
        self.camera.set_viewport(viewport);
        batch.begin();

        let level = self.level.borrow();
        {
            let mut hotbar = self.hotbar.borrow_mut();
            hotbar.set_coord(Vec2::new((width / 2.0).floor(), height - 65.0));
            hotbar.set_selected(level.player.chosen_slot());
        }

        if !self.pause && input.is_cursor_locked() && !level.player.debug {
            let (cx, cy) = ((width / 2.0).floor(), (height / 2.0).floor());
            batch.line_width(2.0);
            batch.line(Vec2::new(cx, cy - 6.0), Vec2::new(cx, cy + 6.0), CROSSHAIR_DARK);
            batch.line(Vec2::new(cx + 6.0, cy), Vec2::new(cx - 6.0, cy), CROSSHAIR_DARK);
            batch.line(Vec2::new(cx - 5.0, cy - 5.0), Vec2::new(cx + 5.0, cy + 5.0), CROSSHAIR_LIGHT);
            batch.line(Vec2::new(cx + 5.0, cy - 5.0), Vec2::new(cx - 5.0, cy + 5.0), CROSSHAIR_LIGHT);
            batch.line_width(1.0);
        }

        if let Some(view) = self.inventory_view.as_ref().filter(|_| self.inventory_open) {
            let access_width = self.content_access.borrow().size().x;
            let mut view = view.borrow_mut();
            let size = view.size();
            view.set_coord(Vec2::new(
                (width / 2.0 - size.x / 2.0).min(width - access_width - 10.0 - size.x),
                height / 2.0 - size.y / 2.0,
            ));
            self.content_access_panel
                .borrow_mut()
                .set_coord(Vec2::new(width - access_width, 0.0));
        }
        self.grabbed_view.borrow_mut().set_coord(input.cursor);
    }

    /// UI camera sized by the last `draw`
    pub fn camera(&self) -> &UiCamera {
        &self.camera
    }

    /// Whether the inventory overlay is shown
    pub fn is_inventory_open(&self) -> bool {
        self.inventory_open
    }

    /// Whether the game is paused
    pub fn is_pause(&self) -> bool {
        self.pause
    }

    /// The hotbar view
    pub fn hotbar(&self) -> &Rc<RefCell<InventoryView>> {
        &self.hotbar
    }

    /// The creative content access view
    pub fn content_access(&self) -> &Rc<RefCell<InventoryView>> {
        &self.content_access
    }

    /// Panel holding the content access view
    pub fn content_access_panel(&self) -> &Rc<RefCell<Panel>> {
        &self.content_access_panel
    }

    /// The debug panel
    pub fn debug_panel(&self) -> &Rc<RefCell<Panel>> {
        &self.debug_panel
    }

    /// Overlay darkening the world while paused
    pub fn dark_overlay(&self) -> &Rc<RefCell<Panel>> {
        &self.dark_overlay
    }

    /// View following the cursor with the grabbed item
    pub fn grabbed_view(&self) -> &Rc<RefCell<SlotView>> {
        &self.grabbed_view
    }

    /// Open inventory root, if any
    pub fn inventory_view(&self) -> Option<&NodeRef> {
        self.inventory_view.as_ref()
    }

    /// Shared grabbed-item state
    pub fn interaction(&self) -> &Rc<RefCell<InventoryInteraction>> {
        &self.interaction
    }
}

impl Drop for HudRenderer {
    fn drop(&mut self) {
        let Ok(mut gui) = self.gui.try_borrow_mut() else {
            log::error!("GUI is borrowed while the HUD is dropped; HUD nodes stay attached");
            return;
        };
        gui.remove(&as_node(&self.grabbed_view));
        if let Some(view) = self.inventory_view.take() {
            gui.remove(&view);
        }
        gui.remove(&as_node(&self.hotbar));
        gui.remove(&as_node(&self.dark_overlay));
        gui.remove(&as_node(&self.content_access_panel));
        gui.remove(&as_node(&self.debug_panel));
    }
}

fn create_content_access(
    level: &Rc<RefCell<Level>>,
    content: &Rc<Content>,
    interaction: &Rc<RefCell<InventoryInteraction>>,
    settings: &Settings,
) -> InventoryView {
    let items_count = content.indices().count_item_defs();
    let mut access = Inventory::new(0, items_count);
    for id in 1..items_count {
        if let Some(slot) = access.slot_mut(id - 1) {
            slot.set(ItemStack::new(ItemId(id as u32), 1));
        }
    }

    let inventory = level.borrow().player.inventory();
    let share_inventory = Rc::clone(&inventory);
    let share_content = Rc::clone(content);
    let chosen_level = Rc::downgrade(level);
    let layout = SlotLayout::new(0, Vec2::zeros(), false, true)
        .with_share_func(move |item| {
            let mut copy = *item;
            share_inventory
                .borrow_mut()
                .move_stack(&mut copy, share_content.indices(), None);
        })
        .with_right_click(move |item, _grabbed| {
            let Some(level) = chosen_level.upgrade() else {
                return;
            };
            let chosen = level.borrow().player.chosen_slot();
            if let Some(slot) = inventory.borrow_mut().slot_mut(chosen) {
                slot.set(*item);
            }
        });

    let mut builder = InventoryBuilder::new();
    builder.add_grid(
        settings.ui.content_columns.max(1),
        items_count.saturating_sub(1),
        Vec2::zeros(),
        8.0,
        true,
        layout,
    );
    let mut view = builder.build();
    view.bind(Rc::new(RefCell::new(access)), Rc::clone(content), Rc::clone(interaction));
    view
}

fn create_hotbar(
    level: &Rc<RefCell<Level>>,
    content: &Rc<Content>,
    interaction: &Rc<RefCell<InventoryInteraction>>,
    settings: &Settings,
) -> InventoryView {
    let slots = settings.ui.hotbar_slots.max(1);
    level.borrow_mut().player.set_hotbar_size(slots);
    let mut builder = InventoryBuilder::new();
    builder.add_grid(slots, slots, Vec2::zeros(), 4.0, true, SlotLayout::default());
    let mut view = builder.build();
    let width = view.size().x;
    view.set_origin(Vec2::new(width / 2.0, 0.0));
    view.bind(level.borrow().player.inventory(), Rc::clone(content), Rc::clone(interaction));
    view.set_interactive(false);
    view
}

fn coordinate_row(level: &Rc<RefCell<Level>>, axis: usize) -> Panel {
    let mut row = Panel::new(Vec2::new(10.0, 27.0), Vec4::zeros(), 2.0);
    row.set_orientation(Orientation::Horizontal);
    row.set_color(Vec4::zeros());

    let name = ["x", "y", "z"][axis];
    let mut label = Label::new(format!("{name}: "));
    label.set_margin(Vec4::new(2.0, 3.0, 2.0, 3.0));
    row.add(into_ref(label));

    let mut textbox = TextBox::new("", 2.0);
    let source = Rc::clone(level);
    textbox.text_supplier(move || format!("{:.2}", source.borrow().player.hitbox.position[axis]));
    let target = Rc::clone(level);
    textbox.text_consumer(move |text| {
        let Some(value) = parse_leading_int(text) else {
            log::warn!("Ignoring coordinate '{}': not a number", text);
            return;
        };
        let mut level = target.borrow_mut();
        let mut position = level.player.hitbox.position;
        position[axis] = value as f32;
        level.player.teleport(position);
    });
    let start = Rc::clone(level);
    textbox.edit_start_supplier(move || (start.borrow().player.hitbox.position[axis] as i32).to_string());
    row.add(into_ref(textbox));
    row
}

fn create_debug_panel(
    level: &Rc<RefCell<Level>>,
    settings: &Rc<RefCell<Settings>>,
    stats: &Rc<RefCell<RenderStats>>,
    fps: &Rc<RefCell<FpsStats>>,
) -> Panel {
    let mut panel = Panel::new(Vec2::new(250.0, 200.0), Vec4::new(5.0, 5.0, 5.0, 5.0), 2.0);
    panel.set_coord(Vec2::new(10.0, 10.0));

    let interval = settings.borrow().debug.fps_interval;
    let fps_timer = Rc::clone(fps);
    panel.listen_interval(interval, move || fps_timer.borrow_mut().refresh());

    let fps_label = Rc::clone(fps);
    panel.add(into_ref(Label::supplied(move || format!("fps: {}", fps_label.borrow().fps_string))));

    let meshes = Rc::clone(stats);
    panel.add(into_ref(Label::supplied(move || format!("meshes: {}", meshes.borrow().meshes_count))));

    let culling = Rc::clone(settings);
    panel.add(into_ref(Label::supplied(move || {
        let on = culling.borrow().graphics.frustum_culling;
        format!("frustum-culling: {}", if on { "on" } else { "off" })
    })));

    let chunks = Rc::clone(level);
    panel.add(into_ref(Label::supplied(move || {
        let chunks = chunks.borrow().chunks;
        format!("chunks: {} visible: {}", chunks.chunks_count, chunks.visible)
    })));

    let block = Rc::clone(level);
    panel.add(into_ref(Label::supplied(move || {
        let level = block.borrow();
        let voxel = level.player.selected_voxel;
        let name = level
            .content
            .indices()
            .block_def(voxel.id)
            .map(|def| format!(" ({})", def.name))
            .unwrap_or_default();
        format!("block: {} {:x}{}", voxel.id, voxel.states, name)
    })));

    let seed = Rc::clone(level);
    panel.add(into_ref(Label::supplied(move || format!("seed: {}", seed.borrow().world.seed))));

    for axis in 0..3 {
        panel.add(into_ref(coordinate_row(level, axis)));
    }

    let time = Rc::clone(level);
    panel.add(into_ref(Label::supplied(move || {
        format!("time: {}", timeutil::clock_string(time.borrow().world.daytime))
    })));

    let mut daytime = TrackBar::new(0.0, 1.0, 1.0, 0.005, 8);
    let source = Rc::clone(level);
    daytime.supplier(move || f64::from(source.borrow().world.daytime));
    let target = Rc::clone(level);
    daytime.consumer(move |value| target.borrow_mut().world.daytime = value as f32);
    panel.add(into_ref(daytime));

    let mut fog = TrackBar::new(0.0, 1.0, 0.0, 0.005, 8);
    let source = Rc::clone(stats);
    fog.supplier(move || f64::from(source.borrow().fog));
    let target = Rc::clone(stats);
    fog.consumer(move |value| target.borrow_mut().fog = value as f32);
    panel.add(into_ref(fog));

    let mut borders = FullCheckBox::new("Show Chunk Borders", false);
    let source = Rc::clone(settings);
    borders
        .checkbox_mut()
        .supplier(move || source.borrow().debug.show_chunk_borders);
    let target = Rc::clone(settings);
    borders
        .checkbox_mut()
        .consumer(move |checked| target.borrow_mut().debug.show_chunk_borders = checked);
    panel.add(into_ref(borders));

    panel.refresh();
    panel
}

/// Integer prefix of `text` after leading whitespace, like `12` in `" 12.5"`
fn parse_leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let digits_start = usize::from(text.starts_with(['+', '-']));
    let end = text[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text.len(), |offset| digits_start + offset);
    if end == digits_start {
        return None;
    }
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12"), Some(12));
        assert_eq!(parse_leading_int("  -7.5"), Some(-7));
        assert_eq!(parse_leading_int("+3abc"), Some(3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int(""), None);
    }

    #[test]
    fn test_fps_refresh() {
        let mut stats = FpsStats {
            fps: 60,
            fps_min: 30,
            fps_max: 90,
            fps_string: String::new(),
        };
        stats.refresh();
        assert_eq!(stats.fps_string, "90 / 30");
        assert_eq!((stats.fps_min, stats.fps_max), (60, 60));
    }
}
