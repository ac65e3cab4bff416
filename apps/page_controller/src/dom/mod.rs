//! Headless document model.
//!
//! An arena of elements standing in for the server-rendered page. It covers
//! the parts of the DOM the page controller touches: lookups by id and
//! selector, classes, attributes, text, form values, inline style, layout
//! rects and subtree mounting. A failed lookup is `None`, never an error.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::debug;

mod selector;

pub use selector::{AttrMatch, Selector, SelectorError};

/// Approximate glyph advance used when an element has no explicit layout.
const ESTIMATED_CHAR_WIDTH: f64 = 7.0;
const ESTIMATED_PADDING: f64 = 16.0;
const ESTIMATED_LINE_HEIGHT: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    #[cfg(test)]
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }
}

/// Detached element tree, mounted into a [`Document`] with [`Document::append`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeSpec {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub value: Option<String>,
    pub checked: bool,
    pub style: Vec<(String, String)>,
    pub children: Vec<NodeSpec>,
}

impl NodeSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class(mut self, class: &str) -> Self {
        self.classes
            .extend(class.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn style(mut self, property: &str, value: impl Into<String>) -> Self {
        self.style.push((property.to_string(), value.into()));
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Own text followed by every descendant's, depth first.
    pub fn text_content(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.text_content());
        }
        out
    }

    /// First node in the subtree (self included) carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&NodeSpec> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_class(class))
    }

    pub fn find_all_tag<'a>(&'a self, tag: &str, out: &mut Vec<&'a NodeSpec>) {
        if self.tag == tag {
            out.push(self);
        }
        for child in &self.children {
            child.find_all_tag(tag, out);
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    checked: bool,
    style: BTreeMap<String, String>,
    rect: Option<Rect>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed element tree for one page load.
///
/// Removed elements are detached but keep their slot, so `NodeId`s are never
/// reused and the arena only grows until the page is dropped.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
    body: NodeId,
    scroll: (f64, f64),
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut document = Self {
            nodes: vec![Element {
                tag: "html".to_string(),
                ..Element::default()
            }],
            root: NodeId(0),
            body: NodeId(0),
            scroll: (0.0, 0.0),
        };
        document.body = document.append(document.root, NodeSpec::new("body"));
        document
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    fn node(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.0)
    }

    /// Mounts `spec` as the last child of `parent` and returns the new subtree root.
    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut attributes: BTreeMap<String, String> = spec.attributes.into_iter().collect();
        if let Some(element_id) = spec.id {
            attributes.insert("id".to_string(), element_id);
        }
        self.nodes.push(Element {
            tag: spec.tag,
            classes: spec.classes,
            attributes,
            text: spec.text,
            value: spec.value.unwrap_or_default(),
            checked: spec.checked,
            style: spec.style.into_iter().collect(),
            rect: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.push(id);
        }
        for child in spec.children {
            self.append(id, child);
        }
        id
    }

    pub fn append_to_body(&mut self, spec: NodeSpec) -> NodeId {
        self.append(self.body, spec)
    }

    /// Detaches `id` (and its subtree) from the document.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.is_attached(id) {
            return false;
        }
        let parent = self.node(id).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|parent| self.node_mut(parent)) {
            parent.children.retain(|child| *child != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
        true
    }

    pub fn replace_children(&mut self, parent: NodeId, specs: Vec<NodeSpec>) -> Vec<NodeId> {
        let old = self
            .node(parent)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        for child in old {
            self.remove(child);
        }
        specs
            .into_iter()
            .map(|spec| self.append(parent, spec))
            .collect()
    }

    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == self.root {
                return true;
            }
            current = self.node(node_id).and_then(|node| node.parent);
        }
        false
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = &self.node(self.parent(id)?)?.children;
        let index = siblings.iter().position(|sibling| *sibling == id)?;
        siblings.get(index + 1).copied()
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &str) -> Option<NodeId> {
        let selector = parse_or_log(selector)?;
        let mut current = Some(id);
        while let Some(node_id) = current {
            if self.matches_parsed(node_id, &selector) {
                return Some(node_id);
            }
            current = self.parent(node_id);
        }
        None
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.tag.as_str())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.attributes.insert(name.to_string(), value.into());
        }
    }

    /// `data-*` attribute lookup by its dataset key (`career-id` for `data-career-id`).
    pub fn data(&self, id: NodeId, key: &str) -> Option<&str> {
        self.attr(id, &format!("data-{key}"))
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.node(id)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.node_mut(id) {
            node.classes.retain(|c| c != class);
        }
    }

    /// Returns whether the class is present afterwards.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        if self.has_class(id, class) {
            self.remove_class(id, class);
            false
        } else {
            self.add_class(id, class);
            true
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.text.as_str())
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.into();
        }
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.node(id) else {
            return String::new();
        };
        let mut out = node.text.clone();
        for child in &node.children {
            out.push_str(&self.text_content(*child));
        }
        out
    }

    pub fn value(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|node| node.value.as_str())
    }

    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.value = value.into();
        }
    }

    pub fn is_checked(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(|node| node.checked)
    }

    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        if let Some(node) = self.node_mut(id) {
            node.checked = checked;
        }
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.node(id)?.style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.style.insert(property.to_string(), value.into());
        }
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = Some(rect);
        }
    }

    /// Layout box of `id` in document coordinates: the explicit rect when one
    /// was assigned, otherwise a single-line estimate from the element's text.
    pub fn measure(&self, id: NodeId) -> Rect {
        match self.node(id) {
            Some(Element {
                rect: Some(rect), ..
            }) => *rect,
            Some(_) => {
                let chars = self.text_content(id).chars().count() as f64;
                Rect::new(
                    0.0,
                    0.0,
                    chars * ESTIMATED_CHAR_WIDTH + ESTIMATED_PADDING,
                    ESTIMATED_LINE_HEIGHT,
                )
            }
            None => Rect::default(),
        }
    }

    /// Layout box of `id` relative to the viewport, as `getBoundingClientRect`
    /// reports it for the current scroll offset.
    pub fn client_rect(&self, id: NodeId) -> Rect {
        let rect = self.measure(id);
        let (scroll_x, scroll_y) = self.scroll;
        Rect::new(rect.top - scroll_y, rect.left - scroll_x, rect.width, rect.height)
    }

    pub fn scroll_offset(&self) -> (f64, f64) {
        self.scroll
    }

    pub fn set_scroll_offset(&mut self, x: f64, y: f64) {
        self.scroll = (x, y);
    }

    pub fn get_element_by_id(&self, element_id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|id| self.attr(*id, "id") == Some(element_id))
    }

    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_within(self.root, selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.query_all_within(self.root, selector)
    }

    /// First descendant of `scope` (exclusive) matching `selector`, in document order.
    pub fn query_within(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        let selector = parse_or_log(selector)?;
        self.descendants(scope)
            .into_iter()
            .find(|id| self.matches_parsed(*id, &selector))
    }

    pub fn query_all_within(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = parse_or_log(selector) else {
            return Vec::new();
        };
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches_parsed(*id, &selector))
            .collect()
    }

    pub fn matches(&self, id: NodeId, selector: &str) -> bool {
        parse_or_log(selector).is_some_and(|selector| self.matches_parsed(id, &selector))
    }

    fn matches_parsed(&self, id: NodeId, selector: &Selector) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if selector.tag.as_deref().is_some_and(|tag| tag != node.tag) {
            return false;
        }
        if let Some(wanted) = &selector.id {
            if node.attributes.get("id") != Some(wanted) {
                return false;
            }
        }
        if !selector
            .classes
            .iter()
            .all(|class| node.classes.contains(class))
        {
            return false;
        }
        if selector.checked && !node.checked {
            return false;
        }
        selector.attrs.iter().all(|attr| match attr {
            AttrMatch::Exists(name) => node.attributes.contains_key(name),
            AttrMatch::Equals(name, value) => node.attributes.get(name) == Some(value),
            AttrMatch::Prefix(name, prefix) => node
                .attributes
                .get(name)
                .is_some_and(|value| value.starts_with(prefix.as_str())),
        })
    }

    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// Indented tree of the attached document, one element per line.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(self.root, 0, &mut out);
        out
    }

    fn write_outline(&self, id: NodeId, depth: usize, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };
        let _ = write!(out, "{}<{}", "  ".repeat(depth), node.tag);
        for (name, value) in &node.attributes {
            let _ = write!(out, " {name}=\"{value}\"");
        }
        if !node.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", node.classes.join(" "));
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect();
            let _ = write!(out, " style=\"{}\"", style.join("; "));
        }
        if !node.value.is_empty() {
            let _ = write!(out, " value=\"{}\"", node.value);
        }
        if node.checked {
            out.push_str(" checked");
        }
        out.push('>');
        if !node.text.is_empty() {
            let _ = write!(out, " {}", node.text);
        }
        out.push('\n');
        for child in &node.children {
            self.write_outline(*child, depth + 1, out);
        }
    }
}

fn parse_or_log(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(err) => {
            debug!(%selector, %err, "ignoring invalid selector");
            None
        }
    }
}

#[cfg(test)]
#[path = "../tests/dom_tests.rs"]
mod tests;
