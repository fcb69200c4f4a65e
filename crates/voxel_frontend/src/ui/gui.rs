//! GUI root - owns top-level nodes and routes input to them

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Vec2;
use crate::input::{InputState, KeyCode, MouseButton};
use crate::render::{Batch2D, Viewport};
use crate::ui::menu::Menu;
use crate::ui::node::{
    act_tree, child_position, contains_node, draw_tree, hit_path, same_node, ClickEvent, NodeRef, UiNode,
};

/// Top-level node list plus hover, press and focus tracking
///
/// Roots are drawn back to front and hit-tested front to back. The menu is
/// created with the GUI and kept centered in the window.
pub struct Gui {
    roots: Vec<NodeRef>,
    menu: Rc<RefCell<Menu>>,
    focus: Option<NodeRef>,
    hover: Option<NodeRef>,
    pressed: Option<(NodeRef, Vec2)>,
}

impl Gui {
    /// GUI holding only the (empty) menu
    pub fn new() -> Self {
        let menu = Rc::new(RefCell::new(Menu::new()));
        let menu_node: NodeRef = menu.clone();
        Self {
            roots: vec![menu_node],
            menu,
            focus: None,
            hover: None,
            pressed: None,
        }
    }

    /// Add a node in front of every other root
    pub fn add(&mut self, node: NodeRef) {
        self.roots.push(node);
    }

    /// Add a node behind every other root
    pub fn add_back(&mut self, node: NodeRef) {
        self.roots.insert(0, node);
    }

    /// Remove a root by identity, dropping focus, hover and press held inside it
    pub fn remove(&mut self, node: &NodeRef) {
        self.roots.retain(|root| !same_node(root, node));
        if let Some(focus) = self.focus.take() {
            if contains_node(node, &focus) {
                focus.borrow_mut().defocus();
            } else {
                self.focus = Some(focus);
            }
        }
        if self.hover.as_ref().is_some_and(|hover| contains_node(node, hover)) {
            self.set_hover(None);
        }
        if self.pressed.as_ref().is_some_and(|(pressed, _)| contains_node(node, pressed)) {
            if let Some((pressed, _)) = self.pressed.take() {
                pressed.borrow_mut().base_mut().pressed = false;
            }
        }
    }

    /// Top-level nodes, back to front
    pub fn roots(&self) -> &[NodeRef] {
        &self.roots
    }

    /// Whether `node` is one of the roots
    pub fn contains(&self, node: &NodeRef) -> bool {
        self.roots.iter().any(|root| same_node(root, node))
    }

    /// Shared menu
    pub fn menu(&self) -> Rc<RefCell<Menu>> {
        Rc::clone(&self.menu)
    }

    /// Node with keyboard focus
    pub fn focus(&self) -> Option<&NodeRef> {
        self.focus.as_ref()
    }

    /// Node under the cursor during the last `act`
    pub fn hover(&self) -> Option<&NodeRef> {
        self.hover.as_ref()
    }

    /// Whether a text-capturing node holds the keyboard
    pub fn is_focus_caught(&self) -> bool {
        self.focus.as_ref().is_some_and(|focus| {
            let focus = focus.borrow();
            focus.is_focuskeeper() && focus.is_focused()
        })
    }

    /// Topmost interactive node under `point`
    pub fn node_at(&self, point: Vec2) -> Option<NodeRef> {
        self.path_at(point)
            .and_then(|mut path| path.pop())
            .map(|(node, _)| node)
    }

    /// Update every node and route this frame's input
    pub fn act(&mut self, delta: f32, input: &InputState) {
        self.layout_menu(input.window_size);
        for root in self.roots.clone() {
            act_tree(&root, delta);
        }

        let path = if input.is_cursor_locked() {
            None
        } else {
            self.path_at(input.cursor)
        };
        let target = path.as_ref().and_then(|path| path.last().cloned());
        self.set_hover(target.as_ref().map(|(node, _)| Rc::clone(node)));

        self.route_mouse(input, target);
        if let Some(path) = &path {
            if input.scroll != 0 {
                for (node, _) in path.iter().rev() {
                    if node.borrow_mut().scrolled(input.scroll) {
                        break;
                    }
                }
            }
        }
        self.route_keyboard(input);
    }

    /// Record every visible root into `batch`
    pub fn draw(&self, viewport: Viewport, batch: &mut Batch2D) {
        self.layout_menu(Vec2::new(viewport.width_f(), viewport.height_f()));
        for root in &self.roots {
            let pos = child_position(Vec2::zeros(), &*root.borrow());
            draw_tree(root, pos, batch);
        }
    }

    fn layout_menu(&self, window: Vec2) {
        let mut menu = self.menu.borrow_mut();
        let size = menu.size();
        menu.set_coord(((window - size) * 0.5).map(f32::floor));
    }

    fn path_at(&self, point: Vec2) -> Option<Vec<(NodeRef, Vec2)>> {
        self.roots.iter().rev().find_map(|root| {
            let pos = child_position(Vec2::zeros(), &*root.borrow());
            hit_path(root, pos, point)
        })
    }

    fn set_hover(&mut self, node: Option<NodeRef>) {
        if let Some(old) = self.hover.take() {
            old.borrow_mut().base_mut().hover = false;
        }
        if let Some(node) = &node {
            node.borrow_mut().base_mut().hover = true;
        }
        self.hover = node;
    }

    fn route_mouse(&mut self, input: &InputState, target: Option<(NodeRef, Vec2)>) {
        if let Some((node, pos)) = &self.pressed {
            if input.clicked(MouseButton::Left) {
                node.borrow_mut().mouse_move(input.cursor - pos);
            }
        }
        if input.jreleased(MouseButton::Left) {
            if let Some((node, pos)) = self.pressed.take() {
                let mut node = node.borrow_mut();
                node.mouse_release(input.cursor - pos);
                node.base_mut().pressed = false;
            }
        }

        if input.jclicked(MouseButton::Left) {
            match &target {
                Some((node, pos)) => {
                    if let Some(old) = &self.focus {
                        if !same_node(old, node) {
                            old.borrow_mut().defocus();
                        }
                    }
                    let event = ClickEvent {
                        button: MouseButton::Left,
                        local: input.cursor - pos,
                        modifiers: input.modifiers(),
                    };
                    {
                        let mut target = node.borrow_mut();
                        target.base_mut().pressed = true;
                        if !target.is_focused() {
                            target.focus();
                        }
                        target.clicked(&event);
                    }
                    self.focus = Some(Rc::clone(node));
                    self.pressed = Some((Rc::clone(node), *pos));
                }
                None => {
                    if let Some(old) = self.focus.take() {
                        old.borrow_mut().defocus();
                    }
                }
            }
        }

        if input.jclicked(MouseButton::Right) {
            if let Some((node, pos)) = &target {
                let event = ClickEvent {
                    button: MouseButton::Right,
                    local: input.cursor - pos,
                    modifiers: input.modifiers(),
                };
                node.borrow_mut().clicked(&event);
            }
        }
    }

    fn route_keyboard(&mut self, input: &InputState) {
        let Some(focus) = self.focus.clone() else {
            return;
        };
        let mut node = focus.borrow_mut();
        if node.is_focused() {
            if node.is_focuskeeper() && input.jpressed(KeyCode::Escape) {
                node.defocus();
            } else {
                for &c in input.typed() {
                    node.typed(c);
                }
                for key in input.pressed_keys() {
                    node.key_pressed(key);
                }
            }
        }
        if !node.is_focused() {
            drop(node);
            self.focus = None;
        }
    }
}

impl Default for Gui {
    fn default() -> Self {
        Self::new()
    }
}
