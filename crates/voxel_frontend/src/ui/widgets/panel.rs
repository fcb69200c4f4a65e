//! Panel widget - a container that lays its children out in a line

use super::container::Container;
use crate::foundation::math::{Vec2, Vec4};
use crate::render::Batch2D;
use crate::ui::node::{NodeBase, NodeRef, UiNode};

/// Direction children are stacked in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
}

/// Auto-layout container with a translucent background
pub struct Panel {
    container: Container,
    orientation: Orientation,
    padding: Vec4,
    interval: f32,
    max_length: f32,
    actual_length: f32,
}

impl Panel {
    /// Panel of `size` with inner `padding` and `interval` between children
    pub fn new(size: Vec2, padding: Vec4, interval: f32) -> Self {
        let mut container = Container::new(Vec2::zeros(), size);
        container.set_color(Vec4::new(0.0, 0.0, 0.0, 0.75));
        Self {
            container,
            orientation: Orientation::Vertical,
            padding,
            interval,
            max_length: 0.0,
            actual_length: size.y,
        }
    }

    /// Panel with default padding (2) and interval (2)
    pub fn sized(size: Vec2) -> Self {
        Self::new(size, Vec4::new(2.0, 2.0, 2.0, 2.0), 2.0)
    }

    /// Append a child and re-run layout
    pub fn add(&mut self, node: NodeRef) {
        self.container.add(node);
        self.refresh();
    }

    /// Remove a child and re-run layout
    pub fn remove(&mut self, node: &NodeRef) {
        self.container.remove(node);
        self.refresh();
    }

    /// Underlying container
    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Underlying container, mutable
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Children in layout order
    pub fn nodes(&self) -> &[NodeRef] {
        self.container.nodes()
    }

    /// Stack direction
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Change stack direction
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Inner padding (left, top, right, bottom)
    pub fn padding(&self) -> Vec4 {
        self.padding
    }

    /// Change inner padding
    pub fn set_padding(&mut self, padding: Vec4) {
        self.padding = padding;
    }

    /// Spacing between children
    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// Cap the height a vertical panel may grow to (0 = unlimited)
    pub fn set_max_length(&mut self, max_length: f32) {
        self.max_length = max_length;
    }

    /// Length of the laid out content
    pub fn actual_length(&self) -> f32 {
        self.actual_length
    }

    /// Allow wheel scrolling
    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.container.set_scrollable(scrollable);
    }

    /// Call `callback` every `interval` seconds
    pub fn listen_interval(&mut self, interval: f32, callback: impl FnMut() + 'static) {
        self.container.listen_interval(interval, callback);
    }

    fn layout_vertical(&mut self) {
        let size = self.container.size();
        let padding = self.padding;
        let x = padding.x;
        let mut y = padding.y;
        for node in self.container.nodes() {
            let mut node = node.borrow_mut();
            let margin = node.margin();
            y += margin.y;
            node.set_coord(Vec2::new(x + margin.x, y));
            if node.base().resizable {
                let width = size.x - padding.x - padding.z - margin.x - margin.z;
                let height = node.size().y;
                node.set_size(Vec2::new(width.max(0.0), height));
            }
            node.refresh();
            y += node.size().y + margin.w + self.interval;
        }
        self.actual_length = y + padding.w;
        let height = if self.max_length > 0.0 {
            self.actual_length.min(self.max_length)
        } else {
            self.actual_length
        };
        self.container.set_size(Vec2::new(size.x, height));
    }

    fn layout_horizontal(&mut self) {
        let size = self.container.size();
        let padding = self.padding;
        let mut x = padding.x;
        let y = padding.y;
        let mut max_height = size.y;
        for node in self.container.nodes() {
            let mut node = node.borrow_mut();
            let margin = node.margin();
            x += margin.x;
            node.set_coord(Vec2::new(x, y + margin.y));
            node.refresh();
            x += node.size().x + margin.z + self.interval;
            max_height = max_height.max(y + margin.y + node.size().y + margin.w + padding.w);
        }
        self.actual_length = max_height;
        self.container.set_size(Vec2::new(size.x, max_height));
    }
}

impl UiNode for Panel {
    fn base(&self) -> &NodeBase {
        self.container.base()
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        self.container.base_mut()
    }

    fn children(&self) -> Option<&[NodeRef]> {
        self.container.children()
    }

    fn content_offset(&self) -> Vec2 {
        self.container.content_offset()
    }

    fn act(&mut self, delta: f32) {
        self.container.act(delta);
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        self.container.draw(pos, batch);
    }

    fn refresh(&mut self) {
        match self.orientation {
            Orientation::Vertical => self.layout_vertical(),
            Orientation::Horizontal => self.layout_horizontal(),
        }
    }

    fn scrolled(&mut self, delta: i32) -> bool {
        let length = self.container.content_length().max(self.actual_length);
        self.container.scroll_by(delta, length)
    }
}
