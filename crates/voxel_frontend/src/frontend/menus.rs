//! Pause and settings menu pages

use std::rc::Rc;

use crate::engine::Engine;
use crate::foundation::math::{Vec2, Vec4};
use crate::ui::node::{as_node, into_ref, UiNode};
use crate::ui::widgets::{Button, FullCheckBox, Label, Panel, TrackBar};

const PAGE_SIZE: Vec2 = Vec2::new(400.0, 200.0);
const PAGE_PADDING: Vec4 = Vec4::new(5.0, 5.0, 5.0, 5.0);
const BUTTON_PADDING: Vec4 = Vec4::new(10.0, 10.0, 10.0, 10.0);

/// Register page `pause`: continue, settings and quit
pub fn create_pause_panel(engine: &Engine, on_quit: impl FnMut() + 'static) {
    let menu = engine.gui().borrow().menu();
    let mut panel = Panel::new(PAGE_SIZE, PAGE_PADDING, 1.0);

    let target = Rc::downgrade(&menu);
    panel.add(into_ref(Button::new("Continue", BUTTON_PADDING).with_action(move || {
        if let Some(menu) = target.upgrade() {
            menu.borrow_mut().reset();
        }
    })));

    let target = Rc::downgrade(&menu);
    panel.add(into_ref(Button::new("Settings", BUTTON_PADDING).with_action(move || {
        if let Some(menu) = target.upgrade() {
            menu.borrow_mut().set_page("settings", true);
        }
    })));

    panel.add(into_ref(Button::new("Quit", BUTTON_PADDING).with_action(on_quit)));

    menu.borrow_mut().add_page("pause", as_node(&into_ref(panel)));
}

/// Register page `settings`: graphics and debug toggles bound to the engine settings
pub fn create_settings_panel(engine: &Engine) {
    let menu = engine.gui().borrow().menu();
    let settings = engine.settings();
    let mut panel = Panel::new(PAGE_SIZE, PAGE_PADDING, 1.0);

    let mut culling = FullCheckBox::new("Frustum Culling", settings.borrow().graphics.frustum_culling);
    let source = Rc::clone(settings);
    culling
        .checkbox_mut()
        .supplier(move || source.borrow().graphics.frustum_culling);
    let target = Rc::clone(settings);
    culling.checkbox_mut().consumer(move |checked| {
        log::info!("Frustum culling {}", if checked { "enabled" } else { "disabled" });
        target.borrow_mut().graphics.frustum_culling = checked;
    });
    panel.add(into_ref(culling));

    let mut borders = FullCheckBox::new("Show Chunk Borders", settings.borrow().debug.show_chunk_borders);
    let source = Rc::clone(settings);
    borders
        .checkbox_mut()
        .supplier(move || source.borrow().debug.show_chunk_borders);
    let target = Rc::clone(settings);
    borders
        .checkbox_mut()
        .consumer(move |checked| target.borrow_mut().debug.show_chunk_borders = checked);
    panel.add(into_ref(borders));

    let fog_source = Rc::clone(settings);
    panel.add(into_ref(Label::supplied(move || {
        format!("Fog: {:.2}", fog_source.borrow().graphics.fog)
    })));
    let mut fog = TrackBar::new(0.0, 1.0, f64::from(settings.borrow().graphics.fog), 0.05, 2);
    let source = Rc::clone(settings);
    fog.supplier(move || f64::from(source.borrow().graphics.fog));
    let target = Rc::clone(settings);
    fog.consumer(move |value| target.borrow_mut().graphics.fog = value as f32);
    panel.add(into_ref(fog));

    let target = Rc::downgrade(&menu);
    panel.add(into_ref(Button::new("Back", BUTTON_PADDING).with_action(move || {
        if let Some(menu) = target.upgrade() {
            menu.borrow_mut().back();
        }
    })));

    panel.refresh();
    menu.borrow_mut().add_page("settings", as_node(&into_ref(panel)));
}
