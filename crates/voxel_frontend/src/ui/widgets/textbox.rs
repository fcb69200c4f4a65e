//! Text box widget - single-line editable text

use super::{text_size, GLYPH_WIDTH, LINE_HEIGHT};
use crate::foundation::math::{Vec2, Vec4};
use crate::input::KeyCode;
use crate::render::Batch2D;
use crate::ui::node::{ClickEvent, NodeBase, UiNode};

/// Editable line of text bound to an optional supplier and consumer
///
/// While unfocused the box mirrors its supplier. Focusing optionally replaces
/// the text through the edit-start supplier; Enter or losing focus submits the
/// edited text to the consumer.
pub struct TextBox {
    base: NodeBase,
    input: String,
    placeholder: String,
    padding: f32,
    caret: usize,
    editing: bool,
    /// Color of the box while focused
    pub focused_color: Vec4,
    supplier: Option<Box<dyn Fn() -> String>>,
    consumer: Option<Box<dyn FnMut(&str)>>,
    edit_start: Option<Box<dyn Fn() -> String>>,
}

impl TextBox {
    /// Empty box showing `placeholder`
    pub fn new(placeholder: impl Into<String>, padding: f32) -> Self {
        let placeholder = placeholder.into();
        let mut size = text_size(&placeholder);
        size.x = size.x.max(GLYPH_WIDTH * 16.0) + padding * 2.0;
        size.y = LINE_HEIGHT + padding * 2.0;
        let mut base = NodeBase::new(size);
        base.color = Vec4::new(0.0, 0.0, 0.0, 0.2);
        base.hover_color = Vec4::new(0.05, 0.1, 0.2, 0.75);
        Self {
            base,
            input: String::new(),
            placeholder,
            padding,
            caret: 0,
            editing: false,
            focused_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            supplier: None,
            consumer: None,
            edit_start: None,
        }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.input
    }

    /// Replace text and move the caret to its end
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.caret = self.input.chars().count();
    }

    /// Text shown while empty
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Caret position in characters
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Mirror `supplier` while not being edited
    pub fn text_supplier(&mut self, supplier: impl Fn() -> String + 'static) {
        self.supplier = Some(Box::new(supplier));
    }

    /// Receive the submitted text
    pub fn text_consumer(&mut self, consumer: impl FnMut(&str) + 'static) {
        self.consumer = Some(Box::new(consumer));
    }

    /// Replace the text with `supplier`'s value when editing starts
    pub fn edit_start_supplier(&mut self, supplier: impl Fn() -> String + 'static) {
        self.edit_start = Some(Box::new(supplier));
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.input
            .char_indices()
            .nth(chars)
            .map_or(self.input.len(), |(index, _)| index)
    }

    fn submit(&mut self) {
        if let Some(consumer) = &mut self.consumer {
            consumer(&self.input);
        }
    }
}

impl UiNode for TextBox {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn act(&mut self, _delta: f32) {
        if self.base.focused {
            return;
        }
        if let Some(supplier) = &self.supplier {
            self.input = supplier();
            self.caret = self.input.chars().count();
        }
    }

    fn clicked(&mut self, event: &ClickEvent) {
        let column = ((event.local.x - self.padding) / GLYPH_WIDTH).round().max(0.0) as usize;
        self.caret = column.min(self.input.chars().count());
    }

    fn is_focuskeeper(&self) -> bool {
        true
    }

    fn focus(&mut self) {
        self.base.focused = true;
        if self.editing {
            return;
        }
        self.editing = true;
        if let Some(supplier) = &self.edit_start {
            self.input = supplier();
        }
        self.caret = self.input.chars().count();
    }

    fn defocus(&mut self) {
        self.base.focused = false;
        if self.editing {
            self.editing = false;
            self.submit();
        }
    }

    fn typed(&mut self, c: char) {
        if c.is_control() {
            return;
        }
        let index = self.byte_index(self.caret);
        self.input.insert(index, c);
        self.caret += 1;
    }

    fn key_pressed(&mut self, key: KeyCode) {
        match key {
            KeyCode::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    let index = self.byte_index(self.caret);
                    self.input.remove(index);
                }
            }
            KeyCode::Left => self.caret = self.caret.saturating_sub(1),
            KeyCode::Right => self.caret = (self.caret + 1).min(self.input.chars().count()),
            KeyCode::Enter => self.defocus(),
            _ => {}
        }
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        let color = if self.base.focused {
            self.focused_color
        } else if self.base.hover {
            self.base.hover_color
        } else {
            self.base.color
        };
        batch.set_color(color);
        batch.rect(pos, self.base.size);

        let text_pos = pos + Vec2::new(self.padding, self.padding);
        if self.input.is_empty() && !self.base.focused {
            batch.set_color(Vec4::new(0.75, 0.75, 0.75, 0.75));
            batch.text(text_pos, self.placeholder.clone());
        } else {
            batch.set_color(Vec4::new(1.0, 1.0, 1.0, 1.0));
            batch.text(text_pos, self.input.clone());
        }
        if self.base.focused {
            let caret_x = text_pos.x + self.caret as f32 * GLYPH_WIDTH;
            batch.rect(Vec2::new(caret_x, text_pos.y), Vec2::new(1.0, LINE_HEIGHT));
        }
    }
}
