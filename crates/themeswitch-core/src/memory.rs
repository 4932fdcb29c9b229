#![forbid(unsafe_code)]

//! In-memory document for native embedders and tests.
//!
//! Supports the selector subset the switcher relies on: `[attr]`,
//! `[attr=value]` (value optionally quoted), `#id`, `.class`, and bare tag
//! names. Compound selectors are not supported and match nothing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::RootTarget;
use crate::error::{ClassOp, HostError};
use crate::host::{ClassList, DomLookup};
use crate::mode::Mode;
use crate::theme::Theme;

#[derive(Default)]
struct NodeData {
    tag: String,
    id: Option<String>,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    children: Vec<MemoryNode>,
    reject_writes: bool,
    writes: usize,
}

/// Shared handle to one element. Clones alias the same element.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("MemoryNode")
            .field("tag", &data.tag)
            .field("id", &data.id)
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for MemoryNode {}

impl MemoryNode {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        })))
    }

    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.0.borrow_mut().id = Some(id.to_owned());
        self
    }

    #[must_use]
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        self.0.borrow_mut().classes.push(class.to_owned());
        self
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.attrs.iter().position(|(n, _)| n == name) {
            Some(idx) => data.attrs[idx].1 = value.to_owned(),
            None => data.attrs.push((name.to_owned(), value.to_owned())),
        }
    }

    #[must_use]
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.0.borrow().id.clone()
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        let data = self.0.borrow();
        match name {
            "id" => data.id.clone(),
            "class" => Some(data.classes.join(" ")),
            _ => data
                .attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone()),
        }
    }

    /// Class list in insertion order.
    #[must_use]
    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    /// Replace the class list without counting writes.
    pub fn set_classes<I, S>(&self, classes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.borrow_mut().classes = classes.into_iter().map(Into::into).collect();
    }

    /// Add/remove calls received through [`ClassList`].
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.0.borrow().writes
    }

    /// Make every subsequent class write fail.
    pub fn reject_writes(&self, reject: bool) {
        self.0.borrow_mut().reject_writes = reject;
    }

    pub fn append(&self, child: MemoryNode) {
        self.0.borrow_mut().children.push(child);
    }

    #[must_use]
    pub fn children(&self) -> Vec<MemoryNode> {
        self.0.borrow().children.clone()
    }

    /// Descendants in document order, excluding `self`.
    #[must_use]
    pub fn descendants(&self) -> Vec<MemoryNode> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants(&self, out: &mut Vec<MemoryNode>) {
        for child in self.children() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    /// Whether this element matches `selector`.
    #[must_use]
    pub fn matches(&self, selector: &str) -> bool {
        Selector::parse(selector).is_some_and(|sel| sel.matches(self))
    }

    fn remove_where(&self, pred: &dyn Fn(&MemoryNode) -> bool) -> usize {
        let mut removed = 0;
        self.0.borrow_mut().children.retain(|child| {
            let hit = pred(child);
            removed += usize::from(hit);
            !hit
        });
        for child in self.children() {
            removed += child.remove_where(pred);
        }
        removed
    }

    fn write(&self, op: ClassOp, class: &str) -> Result<(), HostError> {
        let mut data = self.0.borrow_mut();
        data.writes += 1;
        if data.reject_writes {
            return Err(HostError::new(op, class, "writes rejected"));
        }
        match op {
            ClassOp::Add => {
                if !data.classes.iter().any(|c| c == class) {
                    data.classes.push(class.to_owned());
                }
            }
            ClassOp::Remove => data.classes.retain(|c| c != class),
        }
        Ok(())
    }
}

impl ClassList for MemoryNode {
    fn contains(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add(&self, class: &str) -> Result<(), HostError> {
        self.write(ClassOp::Add, class)
    }

    fn remove(&self, class: &str) -> Result<(), HostError> {
        self.write(ClassOp::Remove, class)
    }
}

enum Selector {
    Attr { name: String, value: Option<String> },
    Id(String),
    Class(String),
    Tag(String),
}

impl Selector {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(inner) = raw.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            return Some(match inner.split_once('=') {
                Some((name, value)) => Self::Attr {
                    name: name.trim().to_owned(),
                    value: Some(value.trim().trim_matches(['"', '\'']).to_owned()),
                },
                None => Self::Attr {
                    name: inner.trim().to_owned(),
                    value: None,
                },
            });
        }
        if let Some(id) = raw.strip_prefix('#') {
            return Some(Self::Id(id.to_owned()));
        }
        if let Some(class) = raw.strip_prefix('.') {
            return Some(Self::Class(class.to_owned()));
        }
        let simple = !raw.is_empty() && raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        simple.then(|| Self::Tag(raw.to_ascii_lowercase()))
    }

    fn matches(&self, node: &MemoryNode) -> bool {
        match self {
            Self::Attr { name, value } => match (node.attr(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == *expected,
                (None, _) => false,
            },
            Self::Id(id) => node.id().as_deref() == Some(id.as_str()),
            Self::Class(class) => node.contains(class),
            Self::Tag(tag) => node.tag() == *tag,
        }
    }
}

/// `<html>` with a `<body>` child.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    html: MemoryNode,
    body: MemoryNode,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let html = MemoryNode::new("html");
        let body = MemoryNode::new("body");
        html.append(body.clone());
        Self { html, body }
    }

    /// Document with the stock switcher markup: a toggle button and a
    /// wrapper holding the slider, both mode options, and all eight theme
    /// options.
    #[must_use]
    pub fn dashboard() -> Self {
        let dom = Self::new();
        dom.body
            .append(MemoryNode::new("button").with_id("theme-switcher-button"));
        let wrapper = MemoryNode::new("div").with_id("theme-switcher-wrapper");
        wrapper.append(MemoryNode::new("span").with_attr("data-slider", ""));
        for mode in Mode::ALL {
            wrapper.append(MemoryNode::new("a").with_attr("data-mode", mode.as_str()));
        }
        for theme in Theme::ALL {
            wrapper.append(MemoryNode::new("a").with_attr("data-theme", theme.as_str()));
        }
        dom.body.append(wrapper);
        dom
    }

    #[must_use]
    pub fn body(&self) -> &MemoryNode {
        &self.body
    }

    #[must_use]
    pub fn document_element(&self) -> &MemoryNode {
        &self.html
    }

    /// Detach every element with `id`. Returns how many were removed.
    pub fn remove_by_id(&self, id: &str) -> usize {
        self.html
            .remove_where(&|node: &MemoryNode| node.id().as_deref() == Some(id))
    }

    /// Detach every element matching `selector`.
    pub fn remove_matching(&self, selector: &str) -> usize {
        self.html.remove_where(&|node: &MemoryNode| node.matches(selector))
    }
}

impl DomLookup for MemoryDom {
    type Node = MemoryNode;

    fn root(&self, target: RootTarget) -> Option<MemoryNode> {
        Some(match target {
            RootTarget::Body => self.body.clone(),
            RootTarget::DocumentElement => self.html.clone(),
        })
    }

    fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
        self.html
            .descendants()
            .into_iter()
            .find(|node| node.id().as_deref() == Some(id))
    }

    fn query(&self, scope: &MemoryNode, selector: &str) -> Option<MemoryNode> {
        let selector = Selector::parse(selector)?;
        scope
            .descendants()
            .into_iter()
            .find(|node| selector.matches(node))
    }

    fn query_all(&self, scope: &MemoryNode, selector: &str) -> Vec<MemoryNode> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        scope
            .descendants()
            .into_iter()
            .filter(|node| selector.matches(node))
            .collect()
    }

    fn attribute(&self, node: &MemoryNode, name: &str) -> Option<String> {
        node.attr(name)
    }
}
