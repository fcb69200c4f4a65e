//! HUD scenarios driven frame by frame through the engine GUI

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use approx::assert_relative_eq;

use crate::config::Settings;
use crate::content::{BlockDef, Content, ContentIndices};
use crate::engine::Engine;
use crate::foundation::math::{Vec2, Vec3};
use crate::input::{InputState, KeyCode, Modifiers, MouseButton, BIND_HUD_INVENTORY};
use crate::items::{Inventory, ItemDef, ItemIcon, ItemId, ItemStack};
use crate::render::{Batch2D, DrawCommand, Viewport};
use crate::scripting::{Consumer, DocumentScript, NullScripting, Runnable, ScriptError, ScriptRuntime};
use crate::ui::node::{downcast_node, node_is, same_node, ClickEvent, NodeRef, UiNode};
use crate::ui::widgets::{Panel, TextBox};
use crate::ui::UiXmlReader;
use crate::world::{Level, Player, World};

use super::inventory_view::create_readers;
use super::menus::create_pause_panel;
use super::{Assets, HudError, HudRenderer, InventoryView, LevelFrontend, UiDocument};

const INVENTORY_XML: &str = r#"<inventory id="inventory"><slots-grid cols="10" count="40"/></inventory>"#;

#[derive(Default)]
struct RecordingScripting {
    events: RefCell<Vec<String>>,
}

impl ScriptRuntime for RecordingScripting {
    fn load_layout_script(&self, env: i32, _namespace: &str, _path: &Path) -> Result<DocumentScript, ScriptError> {
        Ok(DocumentScript {
            environment: env,
            ..DocumentScript::default()
        })
    }

    fn on_ui_open(&self, document: &UiDocument, inventory: &Rc<RefCell<Inventory>>) {
        let id = inventory.borrow().id();
        self.events.borrow_mut().push(format!("open {} {}", document.id(), id));
    }

    fn on_ui_close(&self, document: &UiDocument, inventory: &Rc<RefCell<Inventory>>) {
        let id = inventory.borrow().id();
        self.events.borrow_mut().push(format!("close {} {}", document.id(), id));
    }

    fn create_runnable(&self, _env: i32, _source: &str, _file: &str) -> Result<Runnable, ScriptError> {
        Ok(Box::new(|| {}))
    }

    fn create_consumer(&self, _env: i32, _source: &str, _file: &str) -> Result<Consumer, ScriptError> {
        Ok(Box::new(|_| {}))
    }
}

fn content() -> Rc<Content> {
    Rc::new(Content::new(ContentIndices::new(
        vec![
            ItemDef::new("base:stone.item").with_icon(ItemIcon::Block("base:stone".to_string())),
            ItemDef::new("base:dirt.item").with_icon(ItemIcon::Block("base:dirt".to_string())),
            ItemDef::new("base:pickaxe")
                .with_stack_size(1)
                .with_icon(ItemIcon::Sprite("items:pickaxe".to_string())),
        ],
        vec![BlockDef::new("core:air"), BlockDef::new("base:stone"), BlockDef::new("base:dirt")],
    )))
}

fn layout(scripting: &Rc<RecordingScripting>, name: &str, xml: &str) -> UiDocument {
    let runtime: Rc<dyn ScriptRuntime> = Rc::clone(scripting) as Rc<dyn ScriptRuntime>;
    let mut reader = UiXmlReader::new(0, runtime);
    create_readers(&mut reader);
    let root = reader.read_str(name, xml).expect("layout parses");
    UiDocument::new(name, DocumentScript::default(), root, 0)
}

struct Harness {
    hud: HudRenderer,
    frontend: LevelFrontend,
    engine: Engine,
    scripting: Rc<RecordingScripting>,
    input: InputState,
}

impl Harness {
    fn new() -> Self {
        Self::with_pause_menu(true)
    }

    fn with_pause_menu(pause_menu: bool) -> Self {
        Self::with_settings(pause_menu, Settings::default())
    }

    fn with_settings(pause_menu: bool, settings: Settings) -> Self {
        let scripting = Rc::new(RecordingScripting::default());
        let mut assets = Assets::new();
        assets.add_layout("core:inventory", layout(&scripting, "core:inventory", INVENTORY_XML));
        assets.add_layout(
            "core:panel",
            layout(&scripting, "core:panel", r#"<panel><label>not an inventory</label></panel>"#),
        );

        let runtime: Rc<dyn ScriptRuntime> = Rc::clone(&scripting) as Rc<dyn ScriptRuntime>;
        let engine = Engine::new(settings.clone(), assets, runtime);
        if pause_menu {
            create_pause_panel(&engine, || {});
        }

        let content = content();
        let player = Player::new(Vec3::new(1.5, 64.0, -3.25), Inventory::new(7, 40));
        let world = World {
            seed: 42,
            daytime: 0.5,
        };
        let level = Level::new(world, player, content);
        let frontend = LevelFrontend::new(level, &settings);
        let hud = HudRenderer::new(&engine, &frontend);

        Self {
            hud,
            frontend,
            engine,
            scripting,
            input: InputState::new(800.0, 600.0),
        }
    }

    fn frame(&mut self) -> Result<Batch2D, HudError> {
        let viewport = Viewport::new(800, 600);
        self.hud.update(true, &mut self.input)?;
        self.engine.gui().borrow_mut().act(0.016, &self.input);
        let mut batch = Batch2D::new();
        self.hud.draw(viewport, &mut batch, &self.input);
        self.engine.gui().borrow().draw(viewport, &mut batch);
        self.input.end_frame();
        Ok(batch)
    }

    fn tap(&mut self, key: KeyCode) -> Result<Batch2D, HudError> {
        self.input.set_key(key, true);
        let batch = self.frame();
        self.input.set_key(key, false);
        batch
    }

    fn toggle_inventory(&mut self) -> Result<Batch2D, HudError> {
        self.input.set_binding(BIND_HUD_INVENTORY, true);
        let batch = self.frame();
        self.input.set_binding(BIND_HUD_INVENTORY, false);
        batch
    }

    fn events(&self) -> Vec<String> {
        self.scripting.events.borrow().clone()
    }

    fn player_slot(&self, index: usize) -> ItemStack {
        let inventory = self.frontend.level().borrow().player.inventory();
        let stack = inventory.borrow().slots()[index];
        stack
    }
}

fn lines(batch: &Batch2D) -> usize {
    batch
        .commands()
        .iter()
        .filter(|command| matches!(command, DrawCommand::Line { .. }))
        .count()
}

fn debug_textbox(hud: &HudRenderer, axis: usize) -> NodeRef {
    let panel = hud.debug_panel().borrow();
    let row = Rc::clone(&panel.nodes()[6 + axis]);
    drop(panel);
    let textbox = downcast_node::<Panel, _>(&row, |row| Rc::clone(&row.nodes()[1]));
    textbox.expect("coordinate row holds a text box")
}

#[test]
fn test_first_frame_locks_cursor_and_draws_crosshair() {
    let mut harness = Harness::new();
    assert!(!harness.input.is_cursor_locked());

    let batch = harness.frame().unwrap();
    assert!(harness.input.is_cursor_locked());
    assert!(!harness.hud.is_pause());
    assert!(!harness.hud.is_inventory_open());
    assert_eq!(lines(&batch), 4);

    let hotbar = harness.hud.hotbar().borrow();
    assert_eq!(hotbar.coord(), Vec2::new(400.0, 535.0));
    assert!(hotbar.is_visible());
    assert!(hotbar.slots()[0].borrow().is_highlighted());
}

#[test]
fn test_short_hotbar_limits_slot_choice() {
    let mut settings = Settings::default();
    settings.ui.hotbar_slots = 5;
    let mut harness = Harness::with_settings(true, settings);
    harness.frame().unwrap();
    assert_eq!(harness.hud.hotbar().borrow().slots().len(), 5);
    let chosen = |harness: &Harness| harness.frontend.level().borrow().player.chosen_slot();

    harness.tap(KeyCode::digit(8)).unwrap();
    assert_eq!(chosen(&harness), 0);
    harness.tap(KeyCode::digit(0)).unwrap();
    assert_eq!(chosen(&harness), 0);

    harness.tap(KeyCode::digit(5)).unwrap();
    assert_eq!(chosen(&harness), 4);
    assert!(harness.hud.hotbar().borrow().slots()[4].borrow().is_highlighted());

    harness.input.add_scroll(-1);
    harness.frame().unwrap();
    assert_eq!(chosen(&harness), 0);
    harness.input.add_scroll(1);
    harness.frame().unwrap();
    assert_eq!(chosen(&harness), 4);
}

#[test]
fn test_escape_pauses_and_resumes() {
    let mut harness = Harness::new();
    harness.frame().unwrap();

    let batch = harness.tap(KeyCode::Escape).unwrap();
    assert!(harness.hud.is_pause());
    assert!(!harness.input.is_cursor_locked());
    assert!(harness.hud.dark_overlay().borrow().is_visible());
    assert_eq!(lines(&batch), 0);

    let menu = harness.engine.gui().borrow().menu();
    assert_eq!(menu.borrow().current().name, "pause");
    harness.frame().unwrap();
    assert!(menu.borrow().is_visible());

    harness.tap(KeyCode::Escape).unwrap();
    assert!(!harness.hud.is_pause());
    assert!(harness.input.is_cursor_locked());
    assert!(menu.borrow().current().panel.is_none());
    assert!(!harness.hud.dark_overlay().borrow().is_visible());
    harness.frame().unwrap();
    assert!(!menu.borrow().is_visible());
}

#[test]
fn test_pause_without_pause_page_is_dropped() {
    let mut harness = Harness::with_pause_menu(false);
    harness.frame().unwrap();

    harness.tap(KeyCode::Escape).unwrap();
    assert!(harness.hud.is_pause());

    harness.frame().unwrap();
    assert!(!harness.hud.is_pause());
    assert!(harness.input.is_cursor_locked());
}

#[test]
fn test_inventory_binding_opens_and_closes() {
    let mut harness = Harness::new();
    harness.frame().unwrap();

    harness.toggle_inventory().unwrap();
    assert!(harness.hud.is_inventory_open());
    assert!(!harness.input.is_cursor_locked());
    assert_eq!(harness.events(), vec!["open core:inventory 7".to_string()]);
    assert!(harness.hud.content_access_panel().borrow().is_visible());

    let view = Rc::clone(harness.hud.inventory_view().expect("inventory is shown"));
    {
        let gui = harness.engine.gui().borrow();
        let roots = gui.roots();
        assert!(gui.contains(&view));
        let grabbed: NodeRef = Rc::clone(harness.hud.grabbed_view()) as NodeRef;
        assert!(same_node(&roots[roots.len() - 1], &grabbed));
        assert!(same_node(&roots[roots.len() - 2], &view));
    }

    // 10x4 grid plus the trailing interval
    let size = view.borrow().size();
    assert_relative_eq!(size.x, 524.0);
    assert_relative_eq!(size.y, 212.0);
    let access_width = harness.hud.content_access().borrow().size().x;
    let coord = view.borrow().coord();
    assert_relative_eq!(coord.x, (400.0 - 262.0f32).min(800.0 - access_width - 10.0 - 524.0));
    assert_relative_eq!(coord.y, 300.0 - 106.0);
    assert_eq!(
        harness.hud.content_access_panel().borrow().coord(),
        Vec2::new(800.0 - access_width, 0.0)
    );
    assert_relative_eq!(harness.hud.content_access_panel().borrow().size().y, 600.0);

    harness.toggle_inventory().unwrap();
    assert!(!harness.hud.is_inventory_open());
    assert!(harness.input.is_cursor_locked());
    assert!(!harness.engine.gui().borrow().contains(&view));
    assert_eq!(
        harness.events(),
        vec!["open core:inventory 7".to_string(), "close core:inventory 7".to_string()]
    );
}

#[test]
fn test_escape_closes_inventory_and_drops_grabbed() {
    let mut harness = Harness::new();
    harness.frame().unwrap();
    harness.toggle_inventory().unwrap();

    harness
        .hud
        .interaction()
        .borrow_mut()
        .grabbed_mut()
        .set(ItemStack::new(ItemId(1), 5));

    harness.tap(KeyCode::Escape).unwrap();
    assert!(!harness.hud.is_inventory_open());
    assert!(!harness.hud.is_pause());
    assert!(harness.hud.interaction().borrow().grabbed().is_empty());
    assert!(harness.hud.inventory_view().is_none());
}

#[test]
fn test_inventory_binding_ignored_while_paused() {
    let mut harness = Harness::new();
    harness.frame().unwrap();
    harness.tap(KeyCode::Escape).unwrap();

    harness.toggle_inventory().unwrap();
    assert!(!harness.hud.is_inventory_open());
    assert!(harness.events().is_empty());
}

#[test]
fn test_missing_inventory_layout() {
    let mut harness = Harness::new();
    harness.engine.settings().borrow_mut().ui.inventory_layout = "core:missing".to_string();
    harness.frame().unwrap();

    let result = harness.toggle_inventory();
    assert!(matches!(result, Err(HudError::MissingLayout(name)) if name == "core:missing"));
    assert!(!harness.hud.is_inventory_open());
}

#[test]
fn test_layout_without_inventory_root() {
    let mut harness = Harness::new();
    harness.engine.settings().borrow_mut().ui.inventory_layout = "core:panel".to_string();
    harness.frame().unwrap();

    let result = harness.toggle_inventory();
    assert!(matches!(result, Err(HudError::NotAnInventory(name)) if name == "core:panel"));
    assert!(harness.events().is_empty());
}

#[test]
fn test_digit_keys_choose_hotbar_slot() {
    let mut harness = Harness::new();
    harness.frame().unwrap();

    harness.tap(KeyCode::digit(3)).unwrap();
    assert_eq!(harness.frontend.level().borrow().player.chosen_slot(), 2);
    harness.frame().unwrap();
    assert!(harness.hud.hotbar().borrow().slots()[2].borrow().is_highlighted());
    assert!(!harness.hud.hotbar().borrow().slots()[0].borrow().is_highlighted());

    harness.tap(KeyCode::digit(0)).unwrap();
    assert_eq!(harness.frontend.level().borrow().player.chosen_slot(), 9);
}

#[test]
fn test_scroll_wraps_hotbar_slot() {
    let mut harness = Harness::new();
    harness.frame().unwrap();

    harness.input.add_scroll(1);
    harness.frame().unwrap();
    assert_eq!(harness.frontend.level().borrow().player.chosen_slot(), 9);

    harness.input.add_scroll(-2);
    harness.frame().unwrap();
    assert_eq!(harness.frontend.level().borrow().player.chosen_slot(), 1);
}

#[test]
fn test_scroll_ignored_with_inventory_open() {
    let mut harness = Harness::new();
    harness.frame().unwrap();
    harness.toggle_inventory().unwrap();

    harness.input.add_scroll(1);
    harness.frame().unwrap();
    assert_eq!(harness.frontend.level().borrow().player.chosen_slot(), 0);
}

#[test]
fn test_debug_panel_follows_player_debug() {
    let mut harness = Harness::new();
    harness.frame().unwrap();
    assert!(!harness.hud.debug_panel().borrow().is_visible());

    harness.frontend.level().borrow_mut().player.debug = true;
    let batch = harness.frame().unwrap();
    assert!(harness.hud.debug_panel().borrow().is_visible());
    assert_eq!(lines(&batch), 0);

    harness.hud.update(false, &mut harness.input).unwrap();
    assert!(!harness.hud.debug_panel().borrow().is_visible());
    assert!(!harness.hud.hotbar().borrow().is_visible());
}

#[test]
fn test_hidden_hud_closes_inventory() {
    let mut harness = Harness::new();
    harness.frame().unwrap();
    harness.toggle_inventory().unwrap();

    harness.hud.update(false, &mut harness.input).unwrap();
    assert!(!harness.hud.is_inventory_open());
    assert_eq!(harness.events().len(), 2);
}

#[test]
fn test_coordinate_box_teleports_player() {
    let mut harness = Harness::new();
    harness.frontend.level().borrow_mut().player.debug = true;
    harness.frame().unwrap();

    let textbox = debug_textbox(&harness.hud, 0);
    downcast_node::<TextBox, _>(&textbox, |textbox| assert_eq!(textbox.text(), "1.50"));

    textbox.borrow_mut().focus();
    downcast_node::<TextBox, _>(&textbox, |textbox| {
        assert_eq!(textbox.text(), "1");
        textbox.set_text("12abc");
    });
    textbox.borrow_mut().key_pressed(KeyCode::Enter);

    let position = harness.frontend.level().borrow().player.hitbox.position;
    assert_relative_eq!(position.x, 12.0);
    assert_relative_eq!(position.y, 64.0);

    harness.frame().unwrap();
    downcast_node::<TextBox, _>(&textbox, |textbox| assert_eq!(textbox.text(), "12.00"));
}

#[test]
fn test_coordinate_box_rejects_garbage() {
    let mut harness = Harness::new();
    let textbox = debug_textbox(&harness.hud, 2);

    textbox.borrow_mut().focus();
    downcast_node::<TextBox, _>(&textbox, |textbox| textbox.set_text("north"));
    textbox.borrow_mut().defocus();

    let position = harness.frontend.level().borrow().player.hitbox.position;
    assert_relative_eq!(position.z, -3.25);
    harness.frame().unwrap();
}

#[test]
fn test_content_access_shares_and_replaces() {
    let mut harness = Harness::new();
    harness.frame().unwrap();

    let slots: Vec<_> = harness.hud.content_access().borrow().slots().to_vec();
    assert_eq!(slots.len(), 3);

    slots[0].borrow_mut().clicked(&ClickEvent {
        button: MouseButton::Left,
        local: Vec2::new(4.0, 4.0),
        modifiers: Modifiers::SHIFT,
    });
    assert_eq!(harness.player_slot(0), ItemStack::new(ItemId(1), 1));

    harness.frontend.level().borrow_mut().player.set_chosen_slot(3);
    slots[1].borrow_mut().clicked(&ClickEvent {
        button: MouseButton::Right,
        local: Vec2::new(4.0, 4.0),
        modifiers: Modifiers::empty(),
    });
    assert_eq!(harness.player_slot(3), ItemStack::new(ItemId(2), 1));

    slots[2].borrow_mut().clicked(&ClickEvent {
        button: MouseButton::Left,
        local: Vec2::new(4.0, 4.0),
        modifiers: Modifiers::empty(),
    });
    assert_eq!(*harness.hud.interaction().borrow().grabbed(), ItemStack::new(ItemId(3), 1));
}

#[test]
fn test_grabbed_view_follows_cursor() {
    let mut harness = Harness::new();
    harness.input.move_cursor(120.0, 80.0);
    harness.frame().unwrap();
    assert_eq!(harness.hud.grabbed_view().borrow().coord(), Vec2::new(120.0, 80.0));
}

#[test]
fn test_fps_stats_refresh_on_interval() {
    let mut harness = Harness::new();
    harness.hud.draw_debug(60);
    harness.hud.draw_debug(30);
    let stats = harness.hud.fps_stats();
    assert_eq!(stats.fps, 30);
    assert_eq!(stats.fps_max, 60);

    let interval = harness.engine.settings().borrow().debug.fps_interval;
    harness.engine.gui().borrow_mut().act(interval + 0.01, &harness.input);
    let stats = harness.hud.fps_stats();
    assert_eq!(stats.fps_string, "60 / 0");
    assert_eq!(stats.fps_min, 30);
    assert_eq!(stats.fps_max, 30);

    harness.hud.draw_debug(45);
    let stats = harness.hud.fps_stats();
    assert_eq!((stats.fps_min, stats.fps_max), (30, 45));
}

#[test]
fn test_drop_detaches_nodes() {
    let scripting: Rc<dyn ScriptRuntime> = Rc::new(NullScripting);
    let mut assets = Assets::new();
    let recording = Rc::new(RecordingScripting::default());
    assets.add_layout("core:inventory", layout(&recording, "core:inventory", INVENTORY_XML));
    let engine = Engine::new(Settings::default(), assets, scripting);
    let level = Level::new(
        World { seed: 0, daytime: 0.0 },
        Player::new(Vec3::zeros(), Inventory::new(1, 40)),
        content(),
    );
    let frontend = LevelFrontend::new(level, &Settings::default());
    assert_eq!(engine.gui().borrow().roots().len(), 1);

    let mut hud = HudRenderer::new(&engine, &frontend);
    assert_eq!(engine.gui().borrow().roots().len(), 6);
    hud.open_inventory().unwrap();
    assert_eq!(engine.gui().borrow().roots().len(), 7);
    assert!(hud.inventory_view().is_some_and(|view| node_is::<InventoryView>(view)));

    drop(hud);
    assert_eq!(engine.gui().borrow().roots().len(), 1);
}

#[test]
fn test_drop_while_gui_borrowed_keeps_nodes() {
    let harness = Harness::new();
    let Harness { hud, engine, .. } = harness;
    let gui = Rc::clone(engine.gui());
    {
        let guard = gui.borrow();
        assert_eq!(guard.roots().len(), 6);
        drop(hud);
        assert_eq!(guard.roots().len(), 6);
    }
    assert!(gui.try_borrow_mut().is_ok());
}
