//! HUD demo
//!
//! Runs the in-game HUD headlessly for a scripted sequence of frames: hotbar
//! selection, opening the inventory layout, moving an item, pausing and
//! resuming. Every frame is flushed to a backend that logs what it receives.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use voxel_frontend::content::BlockDef;
use voxel_frontend::foundation::logging;
use voxel_frontend::foundation::math::Mat4;
use voxel_frontend::frontend::menus::{create_pause_panel, create_settings_panel};
use voxel_frontend::frontend::AssetError;
use voxel_frontend::input::{Modifiers, BIND_HUD_INVENTORY};
use voxel_frontend::prelude::*;
use voxel_frontend::render::{RenderError, UiCamera, UiVertex};
use voxel_frontend::ui::ClickEvent;

const WIDTH: u32 = 1280;
const HEIGHT: u32 = 720;
const FRAME_TIME: f32 = 1.0 / 60.0;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("HUD error: {0}")]
    Hud(#[from] HudError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Backend that only reports what it was asked to draw
#[derive(Default)]
struct LoggingBackend {
    frames: usize,
}

impl UiRenderBackend for LoggingBackend {
    fn begin_ui_pass(&mut self, _proj_view: &Mat4) -> Result<(), RenderError> {
        self.frames += 1;
        Ok(())
    }

    fn render_batch(&mut self, commands: &[DrawCommand], vertices: &[UiVertex]) -> Result<(), RenderError> {
        let texts: Vec<&str> = commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        log::debug!(
            "Frame {}: {} commands, {} vertices, text {:?}",
            self.frames,
            commands.len(),
            vertices.len(),
            texts
        );
        Ok(())
    }

    fn end_ui_pass(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

struct Demo {
    hud: HudRenderer,
    frontend: LevelFrontend,
    engine: Engine,
    input: InputState,
    camera: UiCamera,
    backend: LoggingBackend,
    batch: Batch2D,
    quit: Rc<Cell<bool>>,
}

impl Demo {
    fn new(resources: &Path) -> Result<Self, DemoError> {
        let settings = Settings::load_or_default(resources.join("settings.toml"))?;
        let scripting: Rc<dyn ScriptRuntime> = Rc::new(NullScripting);

        let mut assets = Assets::new();
        assets.load_layouts(&resources.join("layouts"), "core", 0, &scripting)?;

        let engine = Engine::new(settings.clone(), assets, scripting);
        let quit = Rc::new(Cell::new(false));
        let quit_flag = Rc::clone(&quit);
        create_pause_panel(&engine, move || quit_flag.set(true));
        create_settings_panel(&engine);

        let frontend = LevelFrontend::new(create_level(), &settings);
        let hud = HudRenderer::new(&engine, &frontend);

        Ok(Self {
            hud,
            frontend,
            engine,
            input: InputState::new(WIDTH as f32, HEIGHT as f32),
            camera: UiCamera::new(HEIGHT as f32),
            backend: LoggingBackend::default(),
            batch: Batch2D::new(),
            quit,
        })
    }

    fn frame(&mut self) -> Result<(), DemoError> {
        let viewport = Viewport::new(WIDTH, HEIGHT);
        self.hud.update(true, &mut self.input)?;
        self.engine.gui().borrow_mut().act(FRAME_TIME, &self.input);

        self.camera.set_viewport(viewport);
        self.hud.draw(viewport, &mut self.batch, &self.input);
        self.engine.gui().borrow().draw(viewport, &mut self.batch);
        self.batch.flush(&mut self.backend, &self.camera.proj_view(), viewport)?;

        self.input.end_frame();
        self.hud.draw_debug((1.0 / FRAME_TIME) as i32);
        Ok(())
    }

    fn tap(&mut self, key: KeyCode) -> Result<(), DemoError> {
        self.input.set_key(key, true);
        self.frame()?;
        self.input.set_key(key, false);
        Ok(())
    }

    fn click(&mut self, x: f32, y: f32) -> Result<(), DemoError> {
        self.input.move_cursor(x, y);
        self.input.set_mouse_button(MouseButton::Left, true);
        self.frame()?;
        self.input.set_mouse_button(MouseButton::Left, false);
        self.frame()
    }

    fn toggle_inventory(&mut self) -> Result<(), DemoError> {
        self.input.set_binding(BIND_HUD_INVENTORY, true);
        self.frame()?;
        self.input.set_binding(BIND_HUD_INVENTORY, false);
        Ok(())
    }

    fn report(&self, step: &str) {
        let level = self.frontend.level().borrow();
        let inventory = level.player.inventory();
        let inventory = inventory.borrow();
        let filled = inventory.slots().iter().filter(|slot| !slot.is_empty()).count();
        log::info!(
            "{}: slot {} chosen, {} stacks, pause={}, inventory={}, cursor locked={}",
            step,
            level.player.chosen_slot() + 1,
            filled,
            self.hud.is_pause(),
            self.hud.is_inventory_open(),
            self.input.is_cursor_locked()
        );
    }

    fn run(&mut self) -> Result<(), DemoError> {
        self.frame()?;
        self.report("Start");

        self.tap(KeyCode::digit(3))?;
        self.input.add_scroll(-1);
        self.frame()?;
        self.report("Hotbar");

        self.frontend.level().borrow_mut().player.debug = true;
        for _ in 0..40 {
            self.frame()?;
        }
        let fps = self.hud.fps_stats();
        log::info!("Debug panel fps: {}", fps.fps_string);
        self.frontend.level().borrow_mut().player.debug = false;

        self.toggle_inventory()?;
        let coord = self.hud.inventory_view().map(|view| view.borrow().coord());
        if let Some(coord) = coord {
            // From the hotbar row at the bottom into the first storage slot
            let hotbar_slot = coord + Vec2::new(28.0, 196.0);
            let storage_slot = coord + Vec2::new(28.0, 28.0);
            self.click(hotbar_slot.x, hotbar_slot.y)?;
            self.click(storage_slot.x, storage_slot.y)?;
        }
        self.report("Inventory");

        let slot = self.hud.content_access().borrow().slots().first().cloned();
        if let Some(slot) = slot {
            slot.borrow_mut().clicked(&ClickEvent {
                button: MouseButton::Left,
                local: Vec2::new(1.0, 1.0),
                modifiers: Modifiers::SHIFT,
            });
        }
        self.report("Shared from content access");

        self.tap(KeyCode::Escape)?;
        self.tap(KeyCode::Escape)?;
        self.frame()?;
        self.report("Paused");

        self.tap(KeyCode::Escape)?;
        self.report("Resumed");

        if self.quit.get() {
            log::info!("Quit requested");
        }
        log::info!("Rendered {} frames", self.backend.frames);
        Ok(())
    }
}

fn create_level() -> Level {
    let content = Rc::new(Content::new(ContentIndices::new(
        vec![
            ItemDef::new("base:stone.item").with_icon(ItemIcon::Block("base:stone".to_string())),
            ItemDef::new("base:dirt.item").with_icon(ItemIcon::Block("base:dirt".to_string())),
            ItemDef::new("base:torch.item").with_icon(ItemIcon::Sprite("blocks:torch".to_string())),
            ItemDef::new("base:pickaxe")
                .with_stack_size(1)
                .with_icon(ItemIcon::Sprite("items:pickaxe".to_string())),
        ],
        vec![
            BlockDef::new("core:air"),
            BlockDef::new("base:stone"),
            BlockDef::new("base:dirt"),
            BlockDef::new("base:torch"),
        ],
    )));

    let mut inventory = Inventory::new(1, 40);
    let starting = [(0, ItemId(1), 64), (1, ItemId(2), 20), (2, ItemId(4), 1), (12, ItemId(3), 16)];
    for (index, item, count) in starting {
        if let Some(slot) = inventory.slot_mut(index) {
            slot.set(ItemStack::new(item, count));
        }
    }

    let player = Player::new(Vec3::new(0.5, 80.0, 0.5), inventory);
    let world = World {
        seed: 1_234_567,
        daytime: 0.25,
    };
    Level::new(world, player, content)
}

fn resources_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("resources")
}

fn main() {
    logging::init();
    log::info!("Starting HUD demo");

    let result = Demo::new(&resources_dir()).and_then(|mut demo| demo.run());
    if let Err(e) = result {
        log::error!("HUD demo failed: {}", e);
        std::process::exit(1);
    }
    log::info!("HUD demo finished");
}
