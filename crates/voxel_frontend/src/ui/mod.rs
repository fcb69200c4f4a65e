//! Retained-mode user interface
//!
//! - [`node`]: the [`UiNode`] trait and tree walks (act, draw, hit test)
//! - [`widgets`]: stock leaf and composite widgets
//! - [`menu`]: page-switching menu
//! - [`gui`]: root node list and input routing
//! - [`xml`]: layout reader

pub mod node;
pub mod widgets;
pub mod menu;
pub mod gui;
pub mod xml;

pub use node::{as_node, downcast_node, into_ref, node_is, same_node, ClickEvent, NodeBase, NodeRef, UiNode};
pub use menu::{Menu, Page};
pub use gui::Gui;
pub use xml::{UiXmlReader, XmlError};
