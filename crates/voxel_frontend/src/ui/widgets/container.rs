//! Container widget - a scrollable group of child nodes

use crate::foundation::math::{Vec2, Vec4};
use crate::foundation::time::IntervalTimer;
use crate::render::Batch2D;
use crate::ui::node::{same_node, NodeBase, NodeRef, UiNode};

/// Pixels scrolled per wheel step
pub const SCROLL_STEP: f32 = 40.0;

struct IntervalEvent {
    timer: IntervalTimer,
    callback: Box<dyn FnMut()>,
}

/// Generic composite node
pub struct Container {
    base: NodeBase,
    nodes: Vec<NodeRef>,
    scrollable: bool,
    scroll: f32,
    intervals: Vec<IntervalEvent>,
}

impl Container {
    /// Transparent container at `coord`
    pub fn new(coord: Vec2, size: Vec2) -> Self {
        let mut base = NodeBase::new(size);
        base.coord = coord;
        base.color = Vec4::zeros();
        Self {
            base,
            nodes: Vec::new(),
            scrollable: false,
            scroll: 0.0,
            intervals: Vec::new(),
        }
    }

    /// Append a child on top of existing ones
    pub fn add(&mut self, node: NodeRef) {
        self.nodes.push(node);
    }

    /// Append a child at `coord`
    pub fn add_at(&mut self, node: NodeRef, coord: Vec2) {
        node.borrow_mut().set_coord(coord);
        self.add(node);
    }

    /// Remove a child by identity
    pub fn remove(&mut self, node: &NodeRef) {
        self.nodes.retain(|n| !same_node(n, node));
    }

    /// Remove every child
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.scroll = 0.0;
    }

    /// Children in draw order
    pub fn nodes(&self) -> &[NodeRef] {
        &self.nodes
    }

    /// Call `callback` every `interval` seconds while the container acts
    pub fn listen_interval(&mut self, interval: f32, callback: impl FnMut() + 'static) {
        self.intervals.push(IntervalEvent {
            timer: IntervalTimer::new(interval),
            callback: Box::new(callback),
        });
    }

    /// Allow wheel scrolling
    pub fn set_scrollable(&mut self, scrollable: bool) {
        self.scrollable = scrollable;
    }

    /// Whether wheel scrolling is enabled
    pub fn is_scrollable(&self) -> bool {
        self.scrollable
    }

    /// Current scroll offset (zero or negative)
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Height covered by children
    pub fn content_length(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| {
                let node = node.borrow();
                node.coord().y + node.size().y
            })
            .fold(0.0, f32::max)
    }

    /// Clamp the scroll offset so content never leaves a gap at the bottom
    pub fn clamp_scroll(&mut self, content_length: f32) {
        let max_scroll = (content_length - self.base.size.y).max(0.0);
        self.scroll = self.scroll.clamp(-max_scroll, 0.0);
    }

    pub(crate) fn scroll_by(&mut self, delta: i32, content_length: f32) -> bool {
        if !self.scrollable {
            return false;
        }
        self.scroll += delta as f32 * SCROLL_STEP;
        self.clamp_scroll(content_length);
        true
    }

    pub(crate) fn tick_intervals(&mut self, delta: f32) {
        for event in &mut self.intervals {
            if event.timer.tick(delta) {
                (event.callback)();
            }
        }
    }

    pub(crate) fn draw_background(base: &NodeBase, pos: Vec2, batch: &mut Batch2D) {
        let color = if base.hover && base.hover_color.w > 0.0 && base.interactive {
            base.hover_color
        } else {
            base.color
        };
        if color.w > 0.0 {
            batch.set_color(color);
            batch.rect(pos, base.size);
        }
    }
}

impl UiNode for Container {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn children(&self) -> Option<&[NodeRef]> {
        Some(&self.nodes)
    }

    fn content_offset(&self) -> Vec2 {
        Vec2::new(0.0, self.scroll)
    }

    fn act(&mut self, delta: f32) {
        self.tick_intervals(delta);
    }

    fn draw(&self, pos: Vec2, batch: &mut Batch2D) {
        Self::draw_background(&self.base, pos, batch);
    }

    fn scrolled(&mut self, delta: i32) -> bool {
        let length = self.content_length();
        self.scroll_by(delta, length)
    }
}
