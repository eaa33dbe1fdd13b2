//! Minimal element/page model the chrome behaviors operate on.
//!
//! All elements live in an append-only arena owned by [`Page`] and are
//! referenced by [`ElementId`]. The tree structure is encoded via a parent
//! link stored on each element; behaviors never remove nodes, so plain
//! indices are stable handles.
//!
//! The model carries exactly the state the behaviors read and write: tag
//! name, the `id` attribute, the class list, the inline `height` style, the
//! rendered height, visibility, and the anchor attributes (`href`,
//! `target`). Everything else a real document has is out of scope.

use std::fmt;

/// A handle into the page arena that uniquely identifies an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementId(usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single element: tag, cached `id`, class list, and the handful of
/// presentation fields the behaviors touch.
#[derive(Clone, Debug)]
pub struct Element {
    tag: String,
    dom_id: Option<String>,
    classes: Vec<String>,
    /// Inline `style.height` in pixels, when set by a behavior.
    height: Option<u32>,
    /// Rendered height as the browser would report it.
    offset_height: u32,
    hidden: bool,
    href: Option<String>,
    target: Option<String>,
    parent: Option<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            dom_id: None,
            classes: Vec::new(),
            height: None,
            offset_height: 0,
            hidden: false,
            href: None,
            target: None,
            parent: None,
        }
    }

    /// Set the `id` attribute.
    pub fn with_id(mut self, dom_id: impl Into<String>) -> Self {
        self.dom_id = Some(dom_id.into());
        self
    }

    /// Set the initial class list.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set the rendered height.
    pub fn with_offset_height(mut self, px: u32) -> Self {
        self.offset_height = px;
        self
    }

    /// Set the `href` attribute (anchors).
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class token. Idempotent: an element never carries duplicates.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Remove a class token if present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class token; returns whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Inline `style.height` in pixels, when set.
    pub fn height(&self) -> Option<u32> {
        self.height
    }

    pub fn set_height(&mut self, px: u32) {
        self.height = Some(px);
    }

    pub fn offset_height(&self) -> u32 {
        self.offset_height
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub fn set_target(&mut self, target: &str) {
        self.target = Some(target.to_string());
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }
}

/// The page: an element arena plus the ambient state behaviors consult —
/// the page host (for external-link checks) and the focused element.
#[derive(Clone, Debug, Default)]
pub struct Page {
    host: Option<String>,
    elements: Vec<Element>,
    focused: Option<ElementId>,
}

impl Page {
    /// An empty page with no host (host-dependent behaviors treat every
    /// parseable absolute link as external-host-unknown and leave it alone).
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty page served from `host`.
    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            elements: Vec::new(),
            focused: None,
        }
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Insert a top-level element.
    pub fn insert(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    /// Insert an element as a child of `parent`.
    pub fn insert_child(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        element.parent = Some(parent);
        self.insert(element)
    }

    pub fn get(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn get_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    /// Look up an element by its `id` attribute.
    pub fn by_id(&self, dom_id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.dom_id.as_deref() == Some(dom_id))
            .map(ElementId)
    }

    /// All elements with the given tag, in document order.
    pub fn by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.tag == tag)
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    /// All anchors, in document order.
    pub fn anchors(&self) -> Vec<ElementId> {
        self.by_tag("a")
    }

    /// First element carrying the given class, in document order.
    pub fn first_by_class(&self, class: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.has_class(class))
            .map(ElementId)
    }

    /// Elements with the given tag anywhere under `root`, in document order.
    pub fn descendants_by_tag(&self, root: ElementId, tag: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(i, e)| e.tag == tag && self.is_descendant(ElementId(*i), root))
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    fn is_descendant(&self, id: ElementId, root: ElementId) -> bool {
        let mut current = self.elements[id.0].parent;
        while let Some(p) = current {
            if p == root {
                return true;
            }
            current = self.elements[p.0].parent;
        }
        false
    }

    pub fn focus(&mut self, id: ElementId) {
        self.focused = Some(id);
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }
}
