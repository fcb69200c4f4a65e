//! Check box widgets

use super::{text_size, LINE_HEIGHT};
use crate::foundation::math::{Vec2, Vec4};
use crate::input::MouseButton;
use crate::render::Batch2D;
use crate::ui::node::{ClickEvent, NodeBase, UiNode};

/// Side of the check box square
pub const CHECKBOX_SIZE: f32 = 32.0;

/// Spacing between a check box and its label
const LABEL_GAP: f32 = 8.0;

/// Two-state toggle
pub struct CheckBox {
    base: NodeBase,
    checked: bool,
    /// Fill color of the check mark
    pub check_color: Vec4,
    supplier: Option<Box<dyn Fn() -> bool>>,
    consumer: Option<Box<dyn FnMut(bool)>>,
}

impl CheckBox {
    /// Unbound check box
    pub fn new(checked: bool) -> Self {
        let mut base = NodeBase::new(Vec2::new(CHECKBOX_SIZE, CHECKBOX_SIZE));
        base.color = Vec4::new(0.0, 0.0, 0.0, 0.5);
        base.hover_color = Vec4::new(0.05, 0.1, 0.2, 0.75);
        Self {
            base,
            checked,
            check_color: Vec4::new(1.0, 1.0, 1.0, 0.4),
            supplier: None,
            consumer: None,
        }
    }

    /// Whether checked
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set state without notifying the consumer
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flip state and notify the consumer
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
        if let Some(consumer) = &mut self.consumer {
            consumer(self.checked);
        }
    }

    /// Mirror `supplier` every frame
    pub fn supplier(&mut self, supplier: impl Fn() -> bool + 'static) {
        self.supplier = Some(Box::new(supplier));
    }

    /// Receive toggles
    pub fn consumer(&mut self, consumer: impl FnMut(bool) + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    fn refresh_from_supplier(&mut self) {
        if let Some(supplier) = &self.supplier {
            self.checked = supplier();
        }
    }

    fn draw_box(&self, pos: Vec2, hover: bool, batch: &mut Batch2D) {
        batch.set_color(if hover { self.base.hover_color } else { self.base.color });
        batch.rect(pos, Vec2::new(CHECKBOX_SIZE, CHECKBOX_SIZE));
        if self.checked {
            batch.set_color(self.check_color);
            batch.rect(pos + Vec2::new(6.0, 6.0), Vec2::new(CHECKBOX_SIZE - 12.0, CHECKBOX_SIZE - 12.0));
        }
    }
}

impl UiNode for CheckBox {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn act(&mut self, _delta: f32) {
        self.refresh_from_supplier();
    }

    fn clicked(&mut self, event: &ClickEvent) {
        if event.button == MouseButton::Left {
            self.toggle();
        }
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        self.draw_box(pos, self.base.hover, batch);
    }
}

/// Check box followed by a text label, toggled by clicking either
pub struct FullCheckBox {
    base: NodeBase,
    checkbox: CheckBox,
    text: String,
}

impl FullCheckBox {
    /// Labelled check box
    pub fn new(text: impl Into<String>, checked: bool) -> Self {
        let text = text.into();
        let label = text_size(&text);
        let mut base = NodeBase::new(Vec2::new(
            CHECKBOX_SIZE + LABEL_GAP + label.x,
            CHECKBOX_SIZE.max(LINE_HEIGHT),
        ));
        base.color = Vec4::zeros();
        Self {
            base,
            checkbox: CheckBox::new(checked),
            text,
        }
    }

    /// Inner check box
    pub fn checkbox(&self) -> &CheckBox {
        &self.checkbox
    }

    /// Inner check box, mutable (bind supplier and consumer here)
    pub fn checkbox_mut(&mut self) -> &mut CheckBox {
        &mut self.checkbox
    }

    /// Label text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl UiNode for FullCheckBox {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn act(&mut self, _delta: f32) {
        self.checkbox.refresh_from_supplier();
    }

    fn clicked(&mut self, event: &ClickEvent) {
        if event.button == MouseButton::Left {
            self.checkbox.toggle();
        }
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        self.checkbox.draw_box(pos, self.base.hover, batch);
        batch.set_color(Vec4::new(1.0, 1.0, 1.0, 1.0));
        let text_y = (CHECKBOX_SIZE - LINE_HEIGHT) * 0.5;
        batch.text(pos + Vec2::new(CHECKBOX_SIZE + LABEL_GAP, text_y), self.text.clone());
    }
}
