//! Contract with the scripting engine
//!
//! Layout documents may carry a script whose `on_open` / `on_close` hooks run
//! when the document is shown or hidden, and XML attributes such as `onclick`
//! or `consumer` hold script snippets. The engine behind [`ScriptRuntime`] is
//! provided by the host; [`NullScripting`] is used when none is available.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::frontend::UiDocument;
use crate::items::Inventory;

/// Errors raised by a script runtime
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    #[error("Failed to load script {path}: {message}")]
    Load { path: PathBuf, message: String },

    #[error("Failed to compile snippet from {file}: {message}")]
    Compile { file: String, message: String },

    #[error("Script error: {0}")]
    Runtime(String),
}

/// Hooks exported by a layout script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentScript {
    /// Environment the script was loaded into
    pub environment: i32,
    /// Script defines `on_open`
    pub onopen: bool,
    /// Script defines `on_close`
    pub onclose: bool,
}

/// Value handed to a script consumer
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    /// Text box contents
    String(String),
    /// Track bar position
    Number(f64),
    /// Check box state
    Bool(bool),
}

/// Callback compiled from a script snippet
pub type Runnable = Box<dyn FnMut()>;

/// Value sink compiled from a script snippet
pub type Consumer = Box<dyn FnMut(ScriptValue)>;

/// Scripting engine as seen by the UI
pub trait ScriptRuntime {
    /// Load the script attached to a layout
    fn load_layout_script(&self, env: i32, namespace: &str, path: &Path) -> Result<DocumentScript, ScriptError>;

    /// Document became visible, bound to `inventory`
    fn on_ui_open(&self, document: &UiDocument, inventory: &Rc<RefCell<Inventory>>);

    /// Document is about to be hidden
    fn on_ui_close(&self, document: &UiDocument, inventory: &Rc<RefCell<Inventory>>);

    /// Compile an action such as a button `onclick`
    fn create_runnable(&self, env: i32, source: &str, file: &str) -> Result<Runnable, ScriptError>;

    /// Compile a value consumer such as a text box `consumer`
    fn create_consumer(&self, env: i32, source: &str, file: &str) -> Result<Consumer, ScriptError>;
}

/// Runtime that loads nothing and runs nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScripting;

impl ScriptRuntime for NullScripting {
    fn load_layout_script(&self, env: i32, namespace: &str, path: &Path) -> Result<DocumentScript, ScriptError> {
        log::debug!("No script runtime: skipping {} for '{}'", path.display(), namespace);
        Ok(DocumentScript {
            environment: env,
            ..DocumentScript::default()
        })
    }

    fn on_ui_open(&self, _document: &UiDocument, _inventory: &Rc<RefCell<Inventory>>) {}

    fn on_ui_close(&self, _document: &UiDocument, _inventory: &Rc<RefCell<Inventory>>) {}

    fn create_runnable(&self, _env: i32, source: &str, file: &str) -> Result<Runnable, ScriptError> {
        let source = source.to_string();
        let file = file.to_string();
        Ok(Box::new(move || log::debug!("{}: ignored script action '{}'", file, source)))
    }

    fn create_consumer(&self, _env: i32, source: &str, file: &str) -> Result<Consumer, ScriptError> {
        let source = source.to_string();
        let file = file.to_string();
        Ok(Box::new(move |value| {
            log::debug!("{}: ignored script consumer '{}' ({:?})", file, source, value);
        }))
    }
}
