//! XML layout reader
//!
//! Layout files describe a node tree with one element per node. Each tag is
//! handled by a registered reader; built-in readers cover the stock widgets
//! and other modules (the inventory view) register their own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::str::FromStr;

use roxmltree::Node;

use crate::foundation::math::{Vec2, Vec4};
use crate::scripting::{NullScripting, ScriptError, ScriptRuntime, ScriptValue};
use crate::ui::node::{into_ref, NodeRef, UiNode};
use crate::ui::widgets::{Button, CheckBox, Container, FullCheckBox, Label, Orientation, Panel, TextBox, TrackBar};

/// Errors raised while reading a layout
#[derive(thiserror::Error, Debug)]
pub enum XmlError {
    #[error("Failed to read layout {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed XML in {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("{file}: unknown element <{tag}>")]
    UnknownTag { file: String, tag: String },

    #[error("{file}: invalid value '{value}' for attribute '{name}' of <{tag}>")]
    InvalidAttribute {
        file: String,
        tag: String,
        name: String,
        value: String,
    },

    #[error(transparent)]
    Script(#[from] ScriptError),
}

/// Tag reader: turns one element into a node
pub type TagReader = Rc<dyn Fn(&UiXmlReader, Node<'_, '_>) -> Result<NodeRef, XmlError>>;

/// Builds node trees from layout XML
pub struct UiXmlReader {
    env: i32,
    scripting: Rc<dyn ScriptRuntime>,
    filename: String,
    readers: HashMap<String, TagReader>,
}

impl UiXmlReader {
    /// Reader for script environment `env` with the built-in tags registered
    pub fn new(env: i32, scripting: Rc<dyn ScriptRuntime>) -> Self {
        let mut reader = Self {
            env,
            scripting,
            filename: String::from("<memory>"),
            readers: HashMap::new(),
        };
        reader.add_reader("container", |reader, node| {
            let mut container = Container::new(Vec2::zeros(), Vec2::zeros());
            reader.read_base_attrs(node, &mut container)?;
            if let Some(scrollable) = reader.attr(node, "scrollable")? {
                container.set_scrollable(scrollable);
            }
            for child in element_children(node) {
                container.add(reader.read_node(child)?);
            }
            Ok(into_ref(container))
        });
        reader.add_reader("panel", read_panel);
        reader.add_reader("label", |reader, node| {
            let text = reader.text_of(node);
            let mut label = Label::new(text);
            reader.read_base_attrs(node, &mut label)?;
            Ok(into_ref(label))
        });
        reader.add_reader("button", read_button);
        reader.add_reader("textbox", read_textbox);
        reader.add_reader("trackbar", read_trackbar);
        reader.add_reader("checkbox", read_checkbox);
        reader
    }

    /// Reader without a script runtime
    pub fn without_scripting(env: i32) -> Self {
        Self::new(env, Rc::new(NullScripting))
    }

    /// Register (or replace) the reader for `tag`
    pub fn add_reader(
        &mut self,
        tag: &str,
        reader: impl Fn(&Self, Node<'_, '_>) -> Result<NodeRef, XmlError> + 'static,
    ) {
        self.readers.insert(tag.to_string(), Rc::new(reader));
    }

    /// Whether a reader exists for `tag`
    pub fn has_reader(&self, tag: &str) -> bool {
        self.readers.contains_key(tag)
    }

    /// Script environment used for snippets
    pub fn environment(&self) -> i32 {
        self.env
    }

    /// Name of the file being read, for diagnostics
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Script runtime used for snippets
    pub fn scripting(&self) -> &Rc<dyn ScriptRuntime> {
        &self.scripting
    }

    /// Read a layout file
    pub fn read_file(&mut self, path: &Path) -> Result<NodeRef, XmlError> {
        let text = std::fs::read_to_string(path).map_err(|source| XmlError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read_str(&path.display().to_string(), &text)
    }

    /// Read a layout from text; `filename` is used in errors and script snippets
    pub fn read_str(&mut self, filename: &str, text: &str) -> Result<NodeRef, XmlError> {
        filename.clone_into(&mut self.filename);
        let document = roxmltree::Document::parse(text).map_err(|source| XmlError::Parse {
            file: filename.to_string(),
            source,
        })?;
        log::debug!("Reading layout {}", filename);
        self.read_node(document.root_element())
    }

    /// Read one element with the reader registered for its tag
    pub fn read_node(&self, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
        let tag = node.tag_name().name();
        let Some(reader) = self.readers.get(tag) else {
            return Err(XmlError::UnknownTag {
                file: self.filename.clone(),
                tag: tag.to_string(),
            });
        };
        reader(self, node)
    }

    /// Apply the attributes every node understands
    pub fn read_base_attrs(&self, node: Node<'_, '_>, ui: &mut dyn UiNode) -> Result<(), XmlError> {
        if let Some(id) = node.attribute("id") {
            ui.set_id(id);
        }
        if let Some(coord) = self.attr_vec2(node, "coord")? {
            ui.set_coord(coord);
        }
        if let Some(pos) = self.attr_vec2(node, "pos")? {
            ui.set_coord(pos);
        }
        if let Some(size) = self.attr_vec2(node, "size")? {
            ui.set_size(size);
        }
        if let Some(color) = self.attr_color(node, "color")? {
            ui.set_color(color);
        }
        if let Some(color) = self.attr_color(node, "hover-color")? {
            ui.set_hover_color(color);
        }
        if let Some(margin) = self.attr_vec4(node, "margin")? {
            ui.set_margin(margin);
        }
        if let Some(visible) = self.attr(node, "visible")? {
            ui.set_visible(visible);
        }
        if let Some(interactive) = self.attr(node, "interactive")? {
            ui.set_interactive(interactive);
        }
        if let Some(resizable) = self.attr(node, "resizable")? {
            ui.base_mut().resizable = resizable;
        }
        Ok(())
    }

    /// Parse attribute `name` with `FromStr`
    pub fn attr<T: FromStr>(&self, node: Node<'_, '_>, name: &str) -> Result<Option<T>, XmlError> {
        node.attribute(name)
            .map(|value| value.trim().parse().map_err(|_| self.invalid(node, name, value)))
            .transpose()
    }

    /// Parse a 2D vector; a single number is used for both components
    pub fn attr_vec2(&self, node: Node<'_, '_>, name: &str) -> Result<Option<Vec2>, XmlError> {
        let Some(value) = node.attribute(name) else {
            return Ok(None);
        };
        match parse_floats(value).as_deref() {
            Some([v]) => Ok(Some(Vec2::new(*v, *v))),
            Some([x, y]) => Ok(Some(Vec2::new(*x, *y))),
            _ => Err(self.invalid(node, name, value)),
        }
    }

    /// Parse a 4D vector; one number broadcasts, two repeat as (x, y, x, y)
    pub fn attr_vec4(&self, node: Node<'_, '_>, name: &str) -> Result<Option<Vec4>, XmlError> {
        let Some(value) = node.attribute(name) else {
            return Ok(None);
        };
        match parse_floats(value).as_deref() {
            Some([v]) => Ok(Some(Vec4::new(*v, *v, *v, *v))),
            Some([x, y]) => Ok(Some(Vec4::new(*x, *y, *x, *y))),
            Some([x, y, z, w]) => Ok(Some(Vec4::new(*x, *y, *z, *w))),
            _ => Err(self.invalid(node, name, value)),
        }
    }

    /// Parse a color given as a vector or as `#rrggbb` / `#rrggbbaa`
    pub fn attr_color(&self, node: Node<'_, '_>, name: &str) -> Result<Option<Vec4>, XmlError> {
        match node.attribute(name) {
            Some(value) if value.starts_with('#') => parse_hex_color(value)
                .map(Some)
                .ok_or_else(|| self.invalid(node, name, value)),
            _ => self.attr_vec4(node, name),
        }
    }

    /// Element text, or the `text` attribute when present
    pub fn text_of(&self, node: Node<'_, '_>) -> String {
        node.attribute("text")
            .or_else(|| node.text())
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }

    /// Error for an attribute that failed to parse
    pub fn invalid(&self, node: Node<'_, '_>, name: &str, value: &str) -> XmlError {
        XmlError::InvalidAttribute {
            file: self.filename.clone(),
            tag: node.tag_name().name().to_string(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn consumer(&self, node: Node<'_, '_>) -> Result<Option<crate::scripting::Consumer>, XmlError> {
        node.attribute("consumer")
            .map(|source| self.scripting.create_consumer(self.env, source, &self.filename))
            .transpose()
            .map_err(XmlError::from)
    }
}

/// Child elements, skipping text and comments
pub fn element_children<'a, 'i>(node: Node<'a, 'i>) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(Node::is_element)
}

fn parse_floats(value: &str) -> Option<Vec<f32>> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse().ok())
        .collect()
}

fn parse_hex_color(value: &str) -> Option<Vec4> {
    let hex = value.strip_prefix('#')?;
    if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok().map(|c| f32::from(c) / 255.0);
    let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };
    Some(Vec4::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

fn read_panel(reader: &UiXmlReader, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
    let size = reader.attr_vec2(node, "size")?.unwrap_or_else(|| Vec2::new(100.0, 100.0));
    let padding = reader.attr_vec4(node, "padding")?.unwrap_or_else(|| Vec4::new(2.0, 2.0, 2.0, 2.0));
    let interval = reader.attr(node, "interval")?.unwrap_or(2.0);
    let mut panel = Panel::new(size, padding, interval);
    reader.read_base_attrs(node, &mut panel)?;
    if let Some(value) = node.attribute("orientation") {
        let orientation = match value {
            "vertical" => Orientation::Vertical,
            "horizontal" => Orientation::Horizontal,
            _ => return Err(reader.invalid(node, "orientation", value)),
        };
        panel.set_orientation(orientation);
    }
    if let Some(max_length) = reader.attr(node, "max-length")? {
        panel.set_max_length(max_length);
    }
    if let Some(scrollable) = reader.attr(node, "scrollable")? {
        panel.set_scrollable(scrollable);
    }
    for child in element_children(node) {
        panel.add(reader.read_node(child)?);
    }
    panel.refresh();
    Ok(into_ref(panel))
}

fn read_button(reader: &UiXmlReader, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
    let padding = reader.attr_vec4(node, "padding")?.unwrap_or_else(|| Vec4::new(10.0, 10.0, 10.0, 10.0));
    let mut button = Button::new(reader.text_of(node), padding);
    reader.read_base_attrs(node, &mut button)?;
    if let Some(source) = node.attribute("onclick") {
        let action = reader.scripting().create_runnable(reader.environment(), source, reader.filename())?;
        button.listen_action(action);
    }
    Ok(into_ref(button))
}

fn read_textbox(reader: &UiXmlReader, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
    let placeholder = node.attribute("placeholder").unwrap_or_default();
    let padding = reader.attr(node, "padding")?.unwrap_or(2.0);
    let mut textbox = TextBox::new(placeholder, padding);
    textbox.set_text(reader.text_of(node));
    reader.read_base_attrs(node, &mut textbox)?;
    if let Some(mut consumer) = reader.consumer(node)? {
        textbox.text_consumer(move |text| consumer(ScriptValue::String(text.to_string())));
    }
    Ok(into_ref(textbox))
}

fn read_trackbar(reader: &UiXmlReader, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
    let min = reader.attr(node, "min")?.unwrap_or(0.0);
    let max = reader.attr(node, "max")?.unwrap_or(1.0);
    let value = reader.attr(node, "value")?.unwrap_or(min);
    let step = reader.attr(node, "step")?.unwrap_or(1.0);
    let track_width = reader.attr(node, "track-width")?.unwrap_or(1);
    let mut trackbar = TrackBar::new(min, max, value, step, track_width);
    reader.read_base_attrs(node, &mut trackbar)?;
    if let Some(mut consumer) = reader.consumer(node)? {
        trackbar.consumer(move |value| consumer(ScriptValue::Number(value)));
    }
    Ok(into_ref(trackbar))
}

fn read_checkbox(reader: &UiXmlReader, node: Node<'_, '_>) -> Result<NodeRef, XmlError> {
    let checked = reader.attr(node, "checked")?.unwrap_or(false);
    let text = reader.text_of(node);
    let consumer = reader.consumer(node)?;
    if text.is_empty() {
        let mut checkbox = CheckBox::new(checked);
        reader.read_base_attrs(node, &mut checkbox)?;
        if let Some(mut consumer) = consumer {
            checkbox.consumer(move |checked| consumer(ScriptValue::Bool(checked)));
        }
        return Ok(into_ref(checkbox));
    }
    let mut checkbox = FullCheckBox::new(text, checked);
    reader.read_base_attrs(node, &mut checkbox)?;
    if let Some(mut consumer) = consumer {
        checkbox
            .checkbox_mut()
            .consumer(move |checked| consumer(ScriptValue::Bool(checked)));
    }
    Ok(into_ref(checkbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::UiDocument;
    use crate::items::Inventory;
    use crate::scripting::{Consumer, DocumentScript, Runnable};
    use crate::ui::node::{downcast_node, node_is};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingScripting {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl ScriptRuntime for RecordingScripting {
        fn load_layout_script(&self, env: i32, _namespace: &str, _path: &Path) -> Result<DocumentScript, ScriptError> {
            Ok(DocumentScript {
                environment: env,
                ..DocumentScript::default()
            })
        }

        fn on_ui_open(&self, _document: &UiDocument, _inventory: &Rc<RefCell<Inventory>>) {}

        fn on_ui_close(&self, _document: &UiDocument, _inventory: &Rc<RefCell<Inventory>>) {}

        fn create_runnable(&self, _env: i32, source: &str, _file: &str) -> Result<Runnable, ScriptError> {
            let calls = Rc::clone(&self.calls);
            let source = source.to_string();
            Ok(Box::new(move || calls.borrow_mut().push(source.clone())))
        }

        fn create_consumer(&self, _env: i32, source: &str, _file: &str) -> Result<Consumer, ScriptError> {
            let calls = Rc::clone(&self.calls);
            let source = source.to_string();
            Ok(Box::new(move |value| calls.borrow_mut().push(format!("{source}={value:?}"))))
        }
    }

    #[test]
    fn test_reads_panel_tree() {
        let mut reader = UiXmlReader::without_scripting(0);
        let root = reader
            .read_str(
                "menu.xml",
                r#"<panel id="root" size="200" padding="4" interval="3">
                    <label id="title">Settings</label>
                    <button id="back" padding="2">Back</button>
                    <checkbox checked="true">Fog</checkbox>
                </panel>"#,
            )
            .unwrap();
        assert!(node_is::<Panel>(&root));
        assert_eq!(root.borrow().id(), "root");
        let nodes = root.borrow().children().unwrap().to_vec();
        assert_eq!(nodes.len(), 3);
        assert_eq!(downcast_node::<Label, _>(&nodes[0], |l| l.text().to_string()).unwrap(), "Settings");
        assert_eq!(nodes[0].borrow().coord(), Vec2::new(5.0, 5.0));
        assert!(node_is::<Button>(&nodes[1]));
        assert_eq!(downcast_node::<FullCheckBox, _>(&nodes[2], |c| c.checkbox().is_checked()), Some(true));
    }

    #[test]
    fn test_vector_attributes() {
        let mut reader = UiXmlReader::without_scripting(0);
        let root = reader
            .read_str(
                "a.xml",
                r##"<container coord="10 20" size="30,40" color="#ff000080" margin="1,2"/>"##,
            )
            .unwrap();
        let node = root.borrow();
        assert_eq!(node.coord(), Vec2::new(10.0, 20.0));
        assert_eq!(node.size(), Vec2::new(30.0, 40.0));
        assert_eq!(node.margin(), Vec4::new(1.0, 2.0, 1.0, 2.0));
        assert_eq!(node.color().x, 1.0);
        assert!((node.color().w - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_tag() {
        let mut reader = UiXmlReader::without_scripting(0);
        let err = reader
            .read_str("bad.xml", "<container><widget/></container>")
            .err()
            .expect("unknown tag accepted");
        assert!(matches!(err, XmlError::UnknownTag { ref tag, .. } if tag == "widget"));
    }

    #[test]
    fn test_invalid_attribute() {
        let mut reader = UiXmlReader::without_scripting(0);
        let err = reader
            .read_str("bad.xml", r#"<container size="1,2,3"/>"#)
            .err()
            .expect("3D size accepted");
        assert!(matches!(err, XmlError::InvalidAttribute { ref name, .. } if name == "size"));
        let err = reader
            .read_str("bad.xml", r#"<checkbox checked="yes"/>"#)
            .err()
            .expect("non-bool flag accepted");
        assert!(matches!(err, XmlError::InvalidAttribute { ref name, .. } if name == "checked"));
    }

    #[test]
    fn test_malformed_xml() {
        let mut reader = UiXmlReader::without_scripting(0);
        assert!(matches!(reader.read_str("bad.xml", "<panel>"), Err(XmlError::Parse { .. })));
    }

    #[test]
    fn test_script_hooks_are_compiled() {
        let scripting = Rc::new(RecordingScripting::default());
        let calls = Rc::clone(&scripting.calls);
        let mut reader = UiXmlReader::new(3, scripting);
        let root = reader
            .read_str(
                "hooks.xml",
                r#"<container>
                    <button onclick="menu:reset()">Go</button>
                    <trackbar min="0" max="10" consumer="set_fog"/>
                </container>"#,
            )
            .unwrap();
        let nodes = root.borrow().children().unwrap().to_vec();
        downcast_node::<Button, _>(&nodes[0], |button| {
            button.base_mut().pressed = true;
            button.mouse_release(Vec2::new(1.0, 1.0));
        });
        downcast_node::<TrackBar, _>(&nodes[1], |bar| {
            bar.set_size(Vec2::new(110.0, 26.0));
            bar.mouse_move(Vec2::new(55.0, 0.0));
        });
        assert_eq!(
            calls.borrow().as_slice(),
            ["menu:reset()".to_string(), "set_fog=Number(5.0)".to_string()]
        );
    }

    #[test]
    fn test_custom_reader() {
        let mut reader = UiXmlReader::without_scripting(0);
        reader.add_reader("spacer", |reader, node| {
            let mut container = Container::new(Vec2::zeros(), Vec2::new(0.0, 8.0));
            reader.read_base_attrs(node, &mut container)?;
            Ok(into_ref(container))
        });
        assert!(reader.has_reader("spacer"));
        let root = reader.read_str("a.xml", r#"<spacer id="gap"/>"#).unwrap();
        assert_eq!(root.borrow().size(), Vec2::new(0.0, 8.0));
    }
}
