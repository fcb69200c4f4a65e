//! UI widgets module
//!
//! Contains all widget types (containers, panels, labels, buttons, text boxes,
//! track bars, check boxes)

pub mod container;
pub mod panel;
pub mod label;
pub mod button;
pub mod textbox;
pub mod trackbar;
pub mod checkbox;

pub use container::Container;
pub use panel::{Panel, Orientation};
pub use label::Label;
pub use button::Button;
pub use textbox::TextBox;
pub use trackbar::TrackBar;
pub use checkbox::{CheckBox, FullCheckBox};

use crate::foundation::math::Vec2;

/// Width of one glyph of the default UI font
pub const GLYPH_WIDTH: f32 = 8.0;

/// Line height of the default UI font
pub const LINE_HEIGHT: f32 = 15.0;

/// Pixel size of a single text line
pub fn text_size(text: &str) -> Vec2 {
    Vec2::new(text.chars().count() as f32 * GLYPH_WIDTH, LINE_HEIGHT)
}
