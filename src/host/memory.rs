//! In-memory document implementing [`Host`].
//!
//! [`MemoryHost`] models just enough of a document for the progress widget:
//! an element tree rooted at `<html>` with a `<body>`, per-element
//! attributes, class lists and inline styles. Templates are read with
//! `quick-xml` in a lenient mode that accepts void tags, and lookups understand the simple
//! selectors the widget is configured with: `#id`, `.class`, `[attr]`,
//! `[attr="value"]` and bare tag names.
//!
//! # Examples
//!
//! ```rust
//! use pagebar::host::{Host, MemoryHost};
//!
//! let host = MemoryHost::new();
//! let widget = host.create_element("widget", r#"<div class="bar" role="bar"></div>"#);
//! host.append_child(&host.body(), &widget);
//!
//! let bar = host.select(r#"[role="bar"]"#).unwrap();
//! assert!(host.has_class(bar, "bar"));
//! assert_eq!(host.element_by_id("widget"), Some(widget));
//! ```

use super::{Capabilities, Host};
use crate::style::Style;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

/// Elements that never have children.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source", "wbr"];

/// Handle to an element of a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
}

impl Document {
    fn new() -> Self {
        let mut doc = Document {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
        };
        doc.root = doc.push("html", Vec::new());
        doc.body = doc.push("body", Vec::new());
        doc.attach(doc.root, doc.body);
        doc
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn push(&mut self, tag: &str, attributes: Vec<(String, String)>) -> NodeId {
        let mut node = Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        };
        for (name, value) in attributes {
            if name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                node.attributes.insert(name, value);
            }
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node_mut(child).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != child);
        }
    }

    fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.node(current).parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Depth-first, document order search among the descendants of `scope`.
    fn find_descendant(&self, scope: NodeId, pred: &dyn Fn(&Node) -> bool) -> Option<NodeId> {
        for &child in &self.node(scope).children {
            if pred(self.node(child)) {
                return Some(child);
            }
            if let Some(found) = self.find_descendant(child, pred) {
                return Some(found);
            }
        }
        None
    }

    /// Build elements from `html` and append them under `parent`.
    ///
    /// Parsing stops at the first malformed construct, keeping the elements
    /// built so far.
    fn parse_fragment(&mut self, parent: NodeId, html: &str) {
        let mut reader = Reader::from_str(html);
        reader.config_mut().check_end_names = false;
        let mut stack = vec![parent];

        loop {
            let top = stack[stack.len() - 1];
            match reader.read_event() {
                Ok(Event::Start(tag)) => {
                    let (name, attributes) = tag_parts(&tag);
                    let id = self.push(&name, attributes);
                    self.attach(top, id);
                    if !VOID_ELEMENTS.contains(&self.node(id).tag.as_str()) {
                        stack.push(id);
                    }
                }
                Ok(Event::Empty(tag)) => {
                    let (name, attributes) = tag_parts(&tag);
                    let id = self.push(&name, attributes);
                    self.attach(top, id);
                }
                Ok(Event::End(tag)) => {
                    let name = String::from_utf8_lossy(tag.name().as_ref()).to_ascii_lowercase();
                    if !VOID_ELEMENTS.contains(&name.as_str()) && stack.len() > 1 {
                        stack.pop();
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    warn!(position = reader.error_position(), "malformed template: {}", e);
                    break;
                }
            }
        }
    }
}

/// Tag name and attributes of a start or empty tag.
fn tag_parts(tag: &BytesStart<'_>) -> (String, Vec<(String, String)>) {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let attributes = tag
        .html_attributes()
        .filter_map(|attribute| attribute.ok())
        .map(|attribute| {
            (
                String::from_utf8_lossy(attribute.key.as_ref()).to_ascii_lowercase(),
                String::from_utf8_lossy(&attribute.value).into_owned(),
            )
        })
        .collect();
    (name, attributes)
}

/// The subset of CSS selectors understood by [`MemoryHost`].
#[derive(Debug, PartialEq)]
enum Selector {
    Id(String),
    Class(String),
    Attribute(String, Option<String>),
    Tag(String),
}

impl Selector {
    fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return Some(Selector::Id(id.to_string()));
        }
        if let Some(class) = selector.strip_prefix('.') {
            return Some(Selector::Class(class.to_string()));
        }
        if let Some(inner) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Some(match inner.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
                    Selector::Attribute(name.trim().to_ascii_lowercase(), Some(value.to_string()))
                }
                None => Selector::Attribute(inner.trim().to_ascii_lowercase(), None),
            });
        }
        if !selector.is_empty() && selector.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Some(Selector::Tag(selector.to_ascii_lowercase()));
        }
        None
    }

    fn matches(&self, node: &Node) -> bool {
        match self {
            Selector::Id(id) => node.attributes.get("id") == Some(id),
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Attribute(name, None) if name == "class" => !node.classes.is_empty(),
            Selector::Attribute(name, None) => node.attributes.contains_key(name),
            Selector::Attribute(name, Some(value)) if name == "class" => node.classes.join(" ") == *value,
            Selector::Attribute(name, Some(value)) => node.attributes.get(name) == Some(value),
            Selector::Tag(tag) => node.tag == *tag,
        }
    }
}

/// An in-memory document.
#[derive(Debug)]
pub struct MemoryHost {
    document: Mutex<Document>,
    capabilities: Capabilities,
    probes: AtomicUsize,
    reflows: AtomicUsize,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::with_capabilities(Capabilities::default())
    }
}

impl MemoryHost {
    /// Creates an empty document supporting every transform.
    pub fn new() -> Self {
        MemoryHost::default()
    }

    /// Creates an empty document reporting the given style features.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            document: Mutex::new(Document::new()),
            capabilities,
            probes: AtomicUsize::new(0),
            reflows: AtomicUsize::new(0),
        }
    }

    fn document(&self) -> MutexGuard<'_, Document> {
        self.document.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an element and append it under `parent`.
    pub fn append_new(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut doc = self.document();
        let attributes = attributes
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value.to_string()))
            .collect();
        let id = doc.push(tag, attributes);
        doc.attach(parent, id);
        id
    }

    /// Inline value of a style property.
    pub fn style_of(&self, node: NodeId, property: &str) -> Option<String> {
        self.document().node(node).style.get(property).cloned()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.document().node(node).classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.document().node(node).attributes.get(name).cloned()
    }

    pub fn tag_of(&self, node: NodeId) -> String {
        self.document().node(node).tag.clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.document().node(node).children.clone()
    }

    pub fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.document().node(node).parent
    }

    /// Whether `node` is reachable from the document root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.document().is_attached(node)
    }

    /// Number of elements attached to the document carrying `id`.
    pub fn count_by_id(&self, id: &str) -> usize {
        let doc = self.document();
        doc.nodes
            .iter()
            .enumerate()
            .filter(|(i, n)| n.attributes.get("id").map(String::as_str) == Some(id) && doc.is_attached(NodeId(*i)))
            .count()
    }

    /// Number of times [`Host::capabilities`] was queried.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    /// Number of forced layouts.
    pub fn reflow_count(&self) -> usize {
        self.reflows.load(Ordering::SeqCst)
    }
}

impl Host for MemoryHost {
    type Element = NodeId;

    fn root(&self) -> NodeId {
        self.document().root
    }

    fn body(&self) -> NodeId {
        self.document().body
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let doc = self.document();
        doc.find_descendant(doc.root, &|node| node.attributes.get("id").map(String::as_str) == Some(id))
    }

    fn select(&self, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        let doc = self.document();
        if selector.matches(doc.node(doc.root)) {
            return Some(doc.root);
        }
        doc.find_descendant(doc.root, &|node| selector.matches(node))
    }

    fn query(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        let selector = Selector::parse(selector)?;
        self.document()
            .find_descendant(*scope, &|node| selector.matches(node))
    }

    fn create_element(&self, id: &str, inner_html: &str) -> NodeId {
        let mut doc = self.document();
        let element = doc.push("div", vec![("id".to_string(), id.to_string())]);
        doc.parse_fragment(element, inner_html);
        element
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.document().attach(*parent, *child);
    }

    fn remove_element(&self, element: &NodeId) {
        self.document().detach(*element);
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        let mut doc = self.document();
        let classes = &mut doc.node_mut(*element).classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        self.document()
            .node_mut(*element)
            .classes
            .retain(|c| c != class);
    }

    fn apply_style(&self, element: &NodeId, style: &Style) {
        let mut doc = self.document();
        let inline = &mut doc.node_mut(*element).style;
        for (property, value) in style.iter() {
            inline.insert(property.to_string(), value.to_string());
        }
    }

    fn reflow(&self, _element: &NodeId) {
        self.reflows.fetch_add(1, Ordering::SeqCst);
    }

    fn capabilities(&self) -> Capabilities {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.capabilities
    }
}
