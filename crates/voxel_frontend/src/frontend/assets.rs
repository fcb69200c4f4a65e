//! Loaded frontend assets

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::document::UiDocument;
use crate::scripting::{ScriptError, ScriptRuntime};
use crate::ui::xml::XmlError;

/// Errors raised while loading assets
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Failed to scan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Xml(#[from] XmlError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Asset storage; only UI layouts are managed here
#[derive(Default)]
pub struct Assets {
    layouts: HashMap<String, Rc<UiDocument>>,
}

impl Assets {
    /// Empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a layout under `name` (`namespace:name`), replacing an older one
    pub fn add_layout(&mut self, name: impl Into<String>, document: UiDocument) {
        self.layouts.insert(name.into(), Rc::new(document));
    }

    /// Layout by name
    pub fn get_layout(&self, name: &str) -> Option<Rc<UiDocument>> {
        self.layouts.get(name).cloned()
    }

    /// Number of stored layouts
    pub fn layouts_count(&self) -> usize {
        self.layouts.len()
    }

    /// Load every `*.xml` file of `dir` as `namespace:<file stem>`
    ///
    /// Returns the number of layouts loaded.
    pub fn load_layouts(
        &mut self,
        dir: &Path,
        namespace: &str,
        env: i32,
        scripting: &Rc<dyn ScriptRuntime>,
    ) -> Result<usize, AssetError> {
        let io_error = |source| AssetError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "xml") {
                files.push(path);
            }
        }
        files.sort();

        for path in &files {
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                log::warn!("Skipping layout with non UTF-8 name: {}", path.display());
                continue;
            };
            let name = format!("{namespace}:{stem}");
            let document = UiDocument::read(env, &name, path, scripting)?;
            self.add_layout(name, document);
        }
        log::info!("Loaded {} layouts from {}", files.len(), dir.display());
        Ok(files.len())
    }
}
