#![forbid(unsafe_code)]

//! `web-sys` implementations of the core host seams.
//!
//! Only compiled on `wasm32` targets.

use themeswitch_core::{ClassList, ClassOp, DomLookup, HostError, RootTarget};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

/// A live DOM element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomNode(Element);

impl DomNode {
    #[must_use]
    pub fn element(&self) -> &Element {
        &self.0
    }
}

pub(crate) fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

impl ClassList for DomNode {
    fn contains(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn add(&self, class: &str) -> Result<(), HostError> {
        self.0
            .class_list()
            .add_1(class)
            .map_err(|err| HostError::new(ClassOp::Add, class, describe_js(&err)))
    }

    fn remove(&self, class: &str) -> Result<(), HostError> {
        self.0
            .class_list()
            .remove_1(class)
            .map_err(|err| HostError::new(ClassOp::Remove, class, describe_js(&err)))
    }
}

/// The page's `document`.
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    #[must_use]
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// `window.document`, if there is one.
    #[must_use]
    pub fn from_window() -> Option<Self> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
    }
}

impl DomLookup for WebDom {
    type Node = DomNode;

    fn root(&self, target: RootTarget) -> Option<DomNode> {
        match target {
            RootTarget::Body => self.document.body().map(|body| DomNode(body.into())),
            RootTarget::DocumentElement => self.document.document_element().map(DomNode),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<DomNode> {
        self.document.get_element_by_id(id).map(DomNode)
    }

    // Invalid selectors throw in the browser; they resolve to nothing here
    // and surface as a missing element.
    fn query(&self, scope: &DomNode, selector: &str) -> Option<DomNode> {
        scope.0.query_selector(selector).ok().flatten().map(DomNode)
    }

    fn query_all(&self, scope: &DomNode, selector: &str) -> Vec<DomNode> {
        let Ok(list) = scope.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|idx| list.item(idx))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(DomNode)
            .collect()
    }

    fn attribute(&self, node: &DomNode, name: &str) -> Option<String> {
        node.0.get_attribute(name)
    }
}
