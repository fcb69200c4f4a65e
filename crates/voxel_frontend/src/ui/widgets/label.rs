//! Text widget - labels and text display

use super::text_size;
use crate::foundation::math::Vec2;
use crate::render::Batch2D;
use crate::ui::node::{NodeBase, UiNode};

/// Single-line text label
pub struct Label {
    base: NodeBase,
    text: String,
    supplier: Option<Box<dyn Fn() -> String>>,
}

impl Label {
    /// Label showing fixed text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            base: NodeBase::new(text_size(&text)),
            text,
            supplier: None,
        }
    }

    /// Label whose text is pulled from `supplier` every frame
    pub fn supplied(supplier: impl Fn() -> String + 'static) -> Self {
        let mut label = Self::new("-");
        label.text_supplier(supplier);
        label
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Pull text from `supplier` every frame
    pub fn text_supplier(&mut self, supplier: impl Fn() -> String + 'static) {
        self.supplier = Some(Box::new(supplier));
    }
}

impl UiNode for Label {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn act(&mut self, _delta: f32) {
        if let Some(supplier) = &self.supplier {
            self.text = supplier();
        }
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        batch.set_color(self.base.color);
        batch.text(pos, self.text.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_size_follows_text() {
        let label = Label::new("fps: 60");
        assert_eq!(label.size(), Vec2::new(56.0, 15.0));
    }

    #[test]
    fn test_supplier_refreshes_on_act() {
        let value = Rc::new(Cell::new(1));
        let source = Rc::clone(&value);
        let mut label = Label::supplied(move || format!("seed: {}", source.get()));
        assert_eq!(label.text(), "-");
        label.act(0.0);
        assert_eq!(label.text(), "seed: 1");
        value.set(2);
        label.act(0.0);
        assert_eq!(label.text(), "seed: 2");
    }
}
