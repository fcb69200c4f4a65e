//! Layout documents

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::assets::AssetError;
use super::inventory_view;
use crate::scripting::{DocumentScript, ScriptRuntime};
use crate::ui::node::{visit_tree, NodeRef};
use crate::ui::xml::UiXmlReader;

/// Node id to node index of a document
pub type NodesMap = HashMap<String, NodeRef>;

/// A parsed layout, its attached script and an id index of its nodes
pub struct UiDocument {
    id: String,
    script: DocumentScript,
    root: NodeRef,
    env: i32,
    map: NodesMap,
}

impl UiDocument {
    /// Wrap a node tree, indexing every node that has an id
    ///
    /// When several nodes share an id the last one in traversal order wins.
    pub fn new(id: impl Into<String>, script: DocumentScript, root: NodeRef, env: i32) -> Self {
        let mut map = NodesMap::new();
        visit_tree(&root, &mut |node| {
            let id = node.borrow().id().to_string();
            if !id.is_empty() {
                map.insert(id, Rc::clone(node));
            }
        });
        Self {
            id: id.into(),
            script,
            root,
            env,
            map,
        }
    }

    /// Read a layout file and the `<file>.lua` script next to it, if any
    pub fn read(
        env: i32,
        namespace: &str,
        path: &Path,
        scripting: &Rc<dyn ScriptRuntime>,
    ) -> Result<Self, AssetError> {
        let mut reader = UiXmlReader::new(env, Rc::clone(scripting));
        inventory_view::create_readers(&mut reader);
        let root = reader.read_file(path)?;

        let script_path = script_path(path);
        let script = if script_path.is_file() {
            scripting.load_layout_script(env, namespace, &script_path)?
        } else {
            DocumentScript::default()
        };
        log::info!("Loaded layout '{}' from {}", namespace, path.display());
        Ok(Self::new(namespace, script, root, env))
    }

    /// Document id (`namespace:name`)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Root node
    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Attached script hooks
    pub fn script(&self) -> &DocumentScript {
        &self.script
    }

    /// Script environment
    pub fn environment(&self) -> i32 {
        self.env
    }

    /// Id index
    pub fn map(&self) -> &NodesMap {
        &self.map
    }

    /// Node by id
    pub fn get(&self, id: &str) -> Option<&NodeRef> {
        self.map.get(id)
    }
}

fn script_path(layout: &Path) -> PathBuf {
    let mut path = OsString::from(layout.as_os_str());
    path.push(".lua");
    PathBuf::from(path)
}
