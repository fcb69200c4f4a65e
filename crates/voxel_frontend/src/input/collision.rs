//! Hit testing for UI input
//!
//! Determining what the user pointed at is an input concern; the GUI calls
//! these helpers with absolute node rectangles.

use crate::foundation::math::Vec2;

/// Check if a point is inside a rectangular region (edges inclusive)
///
/// # Arguments
/// * `point` - Point in screen pixels
/// * `rect_pos` - Top-left corner of the rectangle
/// * `rect_size` - Width and height of the rectangle
pub fn point_in_rect(point: Vec2, rect_pos: Vec2, rect_size: Vec2) -> bool {
    point.x >= rect_pos.x
        && point.x <= rect_pos.x + rect_size.x
        && point.y >= rect_pos.y
        && point.y <= rect_pos.y + rect_size.y
}
