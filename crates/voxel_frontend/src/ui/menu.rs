//! Page-switching menu control

use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::math::Vec2;
use crate::ui::node::{NodeBase, NodeRef, UiNode};

/// Named menu page
#[derive(Clone, Default)]
pub struct Page {
    /// Page name, empty when no page is open
    pub name: String,
    /// Page content, `None` when no page is open
    pub panel: Option<NodeRef>,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("name", &self.name)
            .field("open", &self.panel.is_some())
            .finish()
    }
}

/// Shows one page at a time and remembers the navigation history
pub struct Menu {
    base: NodeBase,
    pages: HashMap<String, Page>,
    history: Vec<Page>,
    current: Page,
    children: Vec<NodeRef>,
}

impl Menu {
    /// Empty menu without pages
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(Vec2::zeros()),
            pages: HashMap::new(),
            history: Vec::new(),
            current: Page::default(),
            children: Vec::new(),
        }
    }

    /// Register a page (replaces a page with the same name)
    pub fn add_page(&mut self, name: impl Into<String>, panel: NodeRef) {
        let name = name.into();
        self.pages.insert(
            name.clone(),
            Page {
                name,
                panel: Some(panel),
            },
        );
    }

    /// Whether a page is registered
    pub fn has_page(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    /// Open page `name`, pushing the current page to the history when `history` is set
    pub fn set_page(&mut self, name: &str, history: bool) {
        let Some(page) = self.pages.get(name).cloned() else {
            log::warn!("Menu page '{}' not found", name);
            return;
        };
        if history && self.current.panel.is_some() {
            self.history.push(std::mem::take(&mut self.current));
        }
        self.show(page);
    }

    /// Return to the previous page
    pub fn back(&mut self) {
        if let Some(page) = self.history.pop() {
            self.show(page);
        }
    }

    /// Close the current page and forget the history
    pub fn reset(&mut self) {
        self.history.clear();
        self.current = Page::default();
        self.children.clear();
        self.base.size = Vec2::zeros();
    }

    /// Current page
    pub fn current(&self) -> &Page {
        &self.current
    }

    /// Previous pages, oldest first
    pub fn history(&self) -> &[Page] {
        &self.history
    }

    fn show(&mut self, page: Page) {
        log::debug!("Menu page '{}'", page.name);
        self.children.clear();
        if let Some(panel) = &page.panel {
            let mut node = panel.borrow_mut();
            node.set_coord(Vec2::zeros());
            node.refresh();
            self.base.size = node.size();
            drop(node);
            self.children.push(Rc::clone(panel));
        }
        self.current = page;
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl UiNode for Menu {
    fn base(&self) -> &NodeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    fn children(&self) -> Option<&[NodeRef]> {
        Some(&self.children)
    }

    fn act(&mut self, _delta: f32) {
        if let Some(panel) = &self.current.panel {
            self.base.size = panel.borrow().size();
        }
    }
}
