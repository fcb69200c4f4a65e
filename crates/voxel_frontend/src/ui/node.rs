//! Retained node tree primitives
//!
//! Every widget implements [`UiNode`]. Composites expose their children
//! through [`UiNode::children`]; leaves return `None`. Nodes are shared as
//! [`NodeRef`] so documents, the GUI root and the HUD can all hold the same
//! node.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::{Vec2, Vec4};
use crate::input::{collision, KeyCode, Modifiers, MouseButton};
use crate::render::Batch2D;

/// Shared handle to any node
pub type NodeRef = Rc<RefCell<dyn UiNode>>;

/// Wrap a node for sharing
pub fn into_ref<T: UiNode>(node: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(node))
}

/// Type-erased handle to a concrete node
pub fn as_node<T: UiNode>(node: &Rc<RefCell<T>>) -> NodeRef {
    node.clone()
}

/// Identity comparison of two node handles
pub fn same_node(a: &NodeRef, b: &NodeRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a).cast::<()>(), Rc::as_ptr(b).cast::<()>())
}

/// Upcast helper so trait objects can be downcast to concrete widgets
pub trait AsAny: Any {
    /// `self` as `Any`
    fn as_any(&self) -> &dyn Any;
    /// `self` as mutable `Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Run `f` on the node if it is a `T`
pub fn downcast_node<T: UiNode, R>(node: &NodeRef, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    let mut guard = node.borrow_mut();
    (*guard).as_any_mut().downcast_mut::<T>().map(f)
}

/// Whether the node is a `T`
pub fn node_is<T: UiNode>(node: &NodeRef) -> bool {
    (*node.borrow()).as_any().is::<T>()
}

/// Properties shared by every node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeBase {
    /// Document id, empty when unnamed
    pub id: String,
    /// Position relative to the parent's content origin
    pub coord: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Background / main color
    pub color: Vec4,
    /// Color while hovered
    pub hover_color: Vec4,
    /// Outer spacing (left, top, right, bottom) used by panel layout
    pub margin: Vec4,
    /// Draw offset subtracted from `coord`
    pub origin: Vec2,
    /// Hidden nodes are neither drawn nor hit
    pub visible: bool,
    /// Non-interactive nodes (and their children) are never hit
    pub interactive: bool,
    /// Vertical panels may stretch this node to their inner width
    pub resizable: bool,
    /// Cursor is over the node
    pub hover: bool,
    /// Left button went down over the node and is still held
    pub pressed: bool,
    /// Node owns keyboard focus
    pub focused: bool,
}

impl NodeBase {
    /// Base with the given size and default flags
    pub fn new(size: Vec2) -> Self {
        Self {
            id: String::new(),
            coord: Vec2::zeros(),
            size,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            hover_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            margin: Vec4::new(1.0, 1.0, 1.0, 1.0),
            origin: Vec2::zeros(),
            visible: true,
            interactive: true,
            resizable: true,
            hover: false,
            pressed: false,
            focused: false,
        }
    }

    /// Whether `point` (absolute) lies inside the node placed at `pos`
    pub fn is_inside(&self, pos: Vec2, point: Vec2) -> bool {
        collision::point_in_rect(point, pos, self.size)
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new(Vec2::zeros())
    }
}

/// Mouse click delivered to a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Button that went down
    pub button: MouseButton,
    /// Cursor position relative to the node's top-left corner
    pub local: Vec2,
    /// Modifier keys held
    pub modifiers: Modifiers,
}

/// A widget in the retained tree
pub trait UiNode: AsAny {
    /// Shared properties
    fn base(&self) -> &NodeBase;

    /// Shared properties, mutable
    fn base_mut(&mut self) -> &mut NodeBase;

    /// Child nodes of composites, `None` for leaves
    fn children(&self) -> Option<&[NodeRef]> {
        None
    }

    /// Offset applied to children (scrolling)
    fn content_offset(&self) -> Vec2 {
        Vec2::zeros()
    }

    /// Per-frame update (suppliers, timers)
    fn act(&mut self, _delta: f32) {}

    /// Record the node itself at absolute position `pos`; children are drawn by the tree walk
    fn draw(&self, _pos: Vec2, _batch: &mut Batch2D) {}

    /// Recompute layout
    fn refresh(&mut self) {}

    /// Mouse button went down over the node
    fn clicked(&mut self, _event: &ClickEvent) {}

    /// Cursor moved while the node is pressed
    fn mouse_move(&mut self, _local: Vec2) {}

    /// Left button went up after pressing this node
    fn mouse_release(&mut self, _local: Vec2) {}

    /// Wheel moved over the node; returns true when consumed
    fn scrolled(&mut self, _delta: i32) -> bool {
        false
    }

    /// Nodes that capture the keyboard while focused
    fn is_focuskeeper(&self) -> bool {
        false
    }

    /// Gain keyboard focus
    fn focus(&mut self) {
        self.base_mut().focused = true;
    }

    /// Lose keyboard focus
    fn defocus(&mut self) {
        self.base_mut().focused = false;
    }

    /// Text input while focused
    fn typed(&mut self, _c: char) {}

    /// Key press while focused
    fn key_pressed(&mut self, _key: KeyCode) {}

    /// Document id
    fn id(&self) -> &str {
        &self.base().id
    }

    /// Set document id
    fn set_id(&mut self, id: &str) {
        self.base_mut().id = id.to_string();
    }

    /// Position relative to parent
    fn coord(&self) -> Vec2 {
        self.base().coord
    }

    /// Set position relative to parent
    fn set_coord(&mut self, coord: Vec2) {
        self.base_mut().coord = coord;
    }

    /// Size
    fn size(&self) -> Vec2 {
        self.base().size
    }

    /// Set size
    fn set_size(&mut self, size: Vec2) {
        self.base_mut().size = size;
    }

    /// Visibility
    fn is_visible(&self) -> bool {
        self.base().visible
    }

    /// Show or hide
    fn set_visible(&mut self, visible: bool) {
        self.base_mut().visible = visible;
    }

    /// Main color
    fn color(&self) -> Vec4 {
        self.base().color
    }

    /// Set main color
    fn set_color(&mut self, color: Vec4) {
        self.base_mut().color = color;
    }

    /// Set hover color
    fn set_hover_color(&mut self, color: Vec4) {
        self.base_mut().hover_color = color;
    }

    /// Layout margin
    fn margin(&self) -> Vec4 {
        self.base().margin
    }

    /// Set layout margin
    fn set_margin(&mut self, margin: Vec4) {
        self.base_mut().margin = margin;
    }

    /// Set draw origin
    fn set_origin(&mut self, origin: Vec2) {
        self.base_mut().origin = origin;
    }

    /// Whether the node receives input
    fn is_interactive(&self) -> bool {
        self.base().interactive
    }

    /// Enable or disable input
    fn set_interactive(&mut self, interactive: bool) {
        self.base_mut().interactive = interactive;
    }

    /// Whether the node is under the cursor
    fn is_hover(&self) -> bool {
        self.base().hover
    }

    /// Whether the node owns focus
    fn is_focused(&self) -> bool {
        self.base().focused
    }
}

/// Absolute position of a child given its parent's content origin
pub fn child_position(parent_content: Vec2, child: &dyn UiNode) -> Vec2 {
    parent_content + child.coord() - child.base().origin
}

/// Run `act` over a subtree, parents first
pub fn act_tree(node: &NodeRef, delta: f32) {
    let children: Vec<NodeRef> = {
        let mut guard = node.borrow_mut();
        guard.act(delta);
        guard.children().map(<[NodeRef]>::to_vec).unwrap_or_default()
    };
    for child in &children {
        act_tree(child, delta);
    }
}

/// Draw a visible subtree placed at absolute position `pos`
pub fn draw_tree(node: &NodeRef, pos: Vec2, batch: &mut Batch2D) {
    let guard = node.borrow();
    if !guard.is_visible() {
        return;
    }
    guard.draw(pos, batch);
    let Some(children) = guard.children() else {
        return;
    };
    if children.is_empty() {
        return;
    }
    let content = pos + guard.content_offset();
    batch.push_scissor(pos, guard.size());
    for child in children {
        let child_pos = child_position(content, &*child.borrow());
        draw_tree(child, child_pos, batch);
    }
    batch.pop_scissor();
}

/// Hit path from `node` down to the topmost interactive node under `point`
///
/// Composites only report hits inside their own bounds. The returned path
/// lists `(node, absolute position)` pairs, outermost first.
pub fn hit_path(node: &NodeRef, pos: Vec2, point: Vec2) -> Option<Vec<(NodeRef, Vec2)>> {
    let guard = node.borrow();
    if !guard.is_visible() || !guard.is_interactive() || !guard.base().is_inside(pos, point) {
        return None;
    }
    if let Some(children) = guard.children() {
        let content = pos + guard.content_offset();
        for child in children.iter().rev() {
            let child_pos = child_position(content, &*child.borrow());
            if let Some(mut path) = hit_path(child, child_pos, point) {
                path.insert(0, (Rc::clone(node), pos));
                return Some(path);
            }
        }
    }
    Some(vec![(Rc::clone(node), pos)])
}

/// Whether `target` is `node` or one of its descendants
pub fn contains_node(node: &NodeRef, target: &NodeRef) -> bool {
    if same_node(node, target) {
        return true;
    }
    let guard = node.borrow();
    guard
        .children()
        .is_some_and(|children| children.iter().any(|child| contains_node(child, target)))
}

/// Visit every node of a subtree, parents first
pub fn visit_tree(node: &NodeRef, f: &mut dyn FnMut(&NodeRef)) {
    f(node);
    let children: Vec<NodeRef> = node
        .borrow()
        .children()
        .map(<[NodeRef]>::to_vec)
        .unwrap_or_default();
    for child in &children {
        visit_tree(child, f);
    }
}
