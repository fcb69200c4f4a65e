//! Button widget - clickable labelled panel

use super::text_size;
use crate::foundation::math::{Vec2, Vec4};
use crate::input::MouseButton;
use crate::render::Batch2D;
use crate::ui::node::{ClickEvent, NodeBase, UiNode};

/// Button state for visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Normal resting state
    Normal,
    /// Mouse is hovering over button
    Hovered,
    /// Button is being pressed
    Pressed,
    /// Button is disabled (non-interactive)
    Disabled,
}

/// Clickable button firing its actions when released over itself
pub struct Button {
    base: NodeBase,
    text: String,
    padding: Vec4,
    /// Pressed state color
    pub pressed_color: Vec4,
    /// Disabled state color
    pub disabled_color: Vec4,
    /// Label color
    pub text_color: Vec4,
    actions: Vec<Box<dyn FnMut()>>,
}

impl Button {
    /// Button sized to fit `text` plus `padding`
    pub fn new(text: impl Into<String>, padding: Vec4) -> Self {
        let text = text.into();
        let label = text_size(&text);
        let mut base = NodeBase::new(Vec2::new(
            label.x + padding.x + padding.z,
            label.y + padding.y + padding.w,
        ));
        base.color = Vec4::new(0.15, 0.17, 0.2, 0.75);
        base.hover_color = Vec4::new(0.24, 0.37, 0.5, 0.75);
        Self {
            base,
            text,
            padding,
            pressed_color: Vec4::new(0.0, 0.0, 0.0, 0.95),
            disabled_color: Vec4::new(0.2, 0.2, 0.2, 0.5),
            text_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            actions: Vec::new(),
        }
    }

    /// Builder: add an action
    pub fn with_action(mut self, action: impl FnMut() + 'static) -> Self {
        self.listen_action(action);
        self
    }

    /// Run `action` on every click
    pub fn listen_action(&mut self, action: impl FnMut() + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Label text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Visual state derived from the node flags
    pub fn state(&self) -> ButtonState {
        if !self.base.interactive {
            ButtonState::Disabled
        } else if self.base.pressed {
            ButtonState::Pressed
        } else if self.base.hover {
            ButtonState::Hovered
        } else {
            ButtonState::Normal
        }
    }

    /// Get the current color based on button state
    pub fn current_color(&self) -> Vec4 {
        match self.state() {
            ButtonState::Normal => self.base.color,
            ButtonState::Hovered => self.base.hover_color,
            ButtonState::Pressed => self.pressed_color,
            ButtonState::Disabled => self.disabled_color,
        }
    }

    fn fire(&mut self) {
        log::debug!("Button '{}' clicked", self.text);
        for action in &mut self.actions {
            action();
        }
    }
}

impl UiNode for Button {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn clicked(&mut self, event: &ClickEvent) {
        if event.button == MouseButton::Left {
            self.base.pressed = true;
        }
    }

    fn mouse_release(&mut self, local: Vec2) {
        let was_pressed = self.base.pressed;
        self.base.pressed = false;
        let inside = local.x >= 0.0 && local.y >= 0.0 && local.x <= self.base.size.x && local.y <= self.base.size.y;
        if was_pressed && inside {
            self.fire();
        }
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        batch.set_color(self.current_color());
        batch.rect(pos, self.base.size);

        let label = text_size(&self.text);
        let inner = self.base.size - Vec2::new(self.padding.x + self.padding.z, self.padding.y + self.padding.w);
        let offset = Vec2::new(
            self.padding.x + ((inner.x - label.x) * 0.5).max(0.0),
            self.padding.y + ((inner.y - label.y) * 0.5).max(0.0),
        );
        batch.set_color(self.text_color);
        batch.text(pos + offset, self.text.clone());
    }
}
