//! Arena-backed output tree.
//!
//! Nodes live in a `Vec` arena and are addressed by [`NodeId`]; removal
//! detaches a subtree without deallocating it, so stale handles read as
//! detached rather than dangling. The document keeps mutation counters so
//! tests can assert the reconciler's minimal-delta and idempotence
//! properties.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tracing::trace;

use super::{NodeId, OutputSurface};
use crate::node::EventHandler;

// =============================================================================
// Node Storage
// =============================================================================

enum DomData {
    Element {
        tag_name: String,
        attributes: BTreeMap<String, String>,
        listeners: BTreeMap<String, EventHandler>,
    },
    Text(String),
    Comment(String),
}

struct DomNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: DomData,
}

/// Counts of structural mutations applied to a [`Document`].
///
/// Node creation counts realized nodes; the child counters count splices on
/// attached parents. Reset between patches to measure one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationCounters {
    pub nodes_created: usize,
    pub attributes_set: usize,
    pub attributes_removed: usize,
    pub children_appended: usize,
    pub children_removed: usize,
    pub children_replaced: usize,
}

// =============================================================================
// Document
// =============================================================================

/// The crate's live output tree: the mutable structure the reconciler
/// patches. Exclusively owned by the clock controller for the duration of a
/// mount.
#[derive(Default)]
pub struct Document {
    nodes: Vec<DomNode>,
    counters: MutationCounters,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, data: DomData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(DomNode {
            parent: None,
            children: Vec::new(),
            data,
        });
        self.counters.nodes_created += 1;
        id
    }

    fn node(&self, id: NodeId) -> &DomNode {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut DomNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes ever allocated, detached included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no node was ever allocated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The mutation counters accumulated so far.
    pub fn counters(&self) -> MutationCounters {
        self.counters
    }

    /// Zero the mutation counters.
    pub fn reset_counters(&mut self) {
        self.counters = MutationCounters::default();
    }

    /// Detach a node from its parent, leaving its subtree intact.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.remove_child(parent, id);
        }
    }

    /// All nodes of the subtree rooted at `id`, root first, depth-first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            for &child in self.node(current).children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// True if an element node carries the given class token.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|value| value.split_whitespace().any(|token| token == class))
    }

    /// Remove a class token from every element in the subtree rooted at
    /// `root`. Elements left with no tokens keep an empty `class` attribute,
    /// the way a class-list removal behaves.
    pub fn remove_class_all(&mut self, root: NodeId, class: &str) {
        for id in self.descendants(root) {
            if !self.has_class(id, class) {
                continue;
            }
            let remaining = self
                .attribute(id, "class")
                .map(|value| {
                    value
                        .split_whitespace()
                        .filter(|token| *token != class)
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            if let DomData::Element { attributes, .. } = &mut self.node_mut(id).data {
                attributes.insert("class".to_string(), remaining);
            }
        }
    }

    /// Invoke every listener bound to `event` on the node.
    pub fn dispatch_event(&self, id: NodeId, event: &str) {
        if let DomData::Element { listeners, .. } = &self.node(id).data {
            let handlers: Vec<EventHandler> = listeners
                .iter()
                .filter(|(name, _)| name.as_str() == event)
                .map(|(_, handler)| handler.clone())
                .collect();
            for handler in handlers {
                handler();
            }
        }
    }

    /// The concatenated text of the subtree rooted at `id`.
    pub fn text_of(&self, id: NodeId) -> String {
        match &self.node(id).data {
            DomData::Text(text) => text.clone(),
            DomData::Comment(_) => String::new(),
            DomData::Element { .. } => self
                .node(id)
                .children
                .iter()
                .map(|&child| self.text_of(child))
                .collect(),
        }
    }

    /// Serialize the subtree rooted at `id` as markup. Demo and test aid.
    pub fn to_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            DomData::Text(text) => out.push_str(text),
            DomData::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
            DomData::Element {
                tag_name,
                attributes,
                ..
            } => {
                let _ = write!(out, "<{tag_name}");
                for (name, value) in attributes {
                    let _ = write!(out, " {name}=\"{value}\"");
                }
                out.push('>');
                for &child in &self.node(id).children {
                    self.write_html(child, out);
                }
                let _ = write!(out, "</{tag_name}>");
            }
        }
    }
}

// =============================================================================
// OutputSurface Implementation
// =============================================================================

impl OutputSurface for Document {
    fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(DomData::Element {
            tag_name: tag_name.to_lowercase(),
            attributes: BTreeMap::new(),
            listeners: BTreeMap::new(),
        })
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(DomData::Text(text.to_string()))
    }

    fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(DomData::Comment(text.to_string()))
    }

    fn node_label(&self, node: NodeId) -> String {
        match &self.node(node).data {
            DomData::Element { tag_name, .. } => tag_name.clone(),
            DomData::Text(_) => "text".to_string(),
            DomData::Comment(_) => "comment".to_string(),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        match &self.node(node).data {
            DomData::Element { attributes, .. } => attributes.get(name).cloned(),
            _ => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let DomData::Element { attributes, .. } = &mut self.node_mut(node).data {
            trace!(node = node.0, name, value, "set attribute");
            attributes.insert(name.to_string(), value.to_string());
            self.counters.attributes_set += 1;
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let DomData::Element { attributes, .. } = &mut self.node_mut(node).data {
            if attributes.remove(name).is_some() {
                trace!(node = node.0, name, "remove attribute");
                self.counters.attributes_removed += 1;
            }
        }
    }

    fn attribute_names(&self, node: NodeId) -> Vec<String> {
        match &self.node(node).data {
            DomData::Element { attributes, .. } => attributes.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn add_event_listener(&mut self, node: NodeId, event: &str, handler: EventHandler) {
        if let DomData::Element { listeners, .. } = &mut self.node_mut(node).data {
            listeners.insert(event.to_string(), handler);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
        self.counters.children_appended += 1;
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.node_mut(parent).children;
        if let Some(index) = children.iter().position(|&c| c == child) {
            children.remove(index);
            self.node_mut(child).parent = None;
            self.counters.children_removed += 1;
        }
    }

    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        let children = &mut self.node_mut(parent).children;
        if let Some(index) = children.iter().position(|&c| c == old) {
            children[index] = new;
            self.node_mut(old).parent = None;
            self.node_mut(new).parent = Some(parent);
            self.counters.children_replaced += 1;
        }
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        if !self.node(node).children.is_empty() {
            return None;
        }
        match &self.node(node).data {
            DomData::Text(text) | DomData::Comment(text) => Some(text.clone()),
            DomData::Element { .. } => Some(String::new()),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_remove_track_parent() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_text("hi");

        doc.append_child(parent, child);
        assert_eq!(doc.parent(child), Some(parent));
        assert_eq!(doc.children(parent), vec![child]);

        doc.remove_child(parent, child);
        assert_eq!(doc.parent(child), None);
        assert!(doc.children(parent).is_empty());
    }

    #[test]
    fn replace_preserves_position() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let a = doc.create_text("a");
        let b = doc.create_text("b");
        let c = doc.create_text("c");
        doc.append_child(parent, a);
        doc.append_child(parent, b);

        doc.replace_child(parent, a, c);
        assert_eq!(doc.children(parent), vec![c, b]);
        assert_eq!(doc.parent(a), None);
        assert_eq!(doc.parent(c), Some(parent));
    }

    #[test]
    fn node_labels() {
        let mut doc = Document::new();
        let el = doc.create_element("DIV");
        let text = doc.create_text("x");
        let comment = doc.create_comment("y");
        assert_eq!(doc.node_label(el), "div");
        assert_eq!(doc.node_label(text), "text");
        assert_eq!(doc.node_label(comment), "comment");
    }

    #[test]
    fn text_content_is_none_with_children() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        assert_eq!(doc.text_content(parent), Some(String::new()));

        let child = doc.create_text("x");
        doc.append_child(parent, child);
        assert_eq!(doc.text_content(parent), None);
        assert_eq!(doc.text_content(child), Some("x".to_string()));
    }

    #[test]
    fn remove_class_all_strips_subtree() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        let card = doc.create_element("div");
        doc.set_attribute(card, "class", "flip-clock-card animate");
        doc.append_child(root, card);
        let inner = doc.create_element("div");
        doc.set_attribute(inner, "class", "animate");
        doc.append_child(card, inner);

        doc.remove_class_all(root, "animate");
        assert_eq!(doc.attribute(card, "class").unwrap(), "flip-clock-card");
        assert_eq!(doc.attribute(inner, "class").unwrap(), "");
        assert!(!doc.has_class(card, "animate"));
    }

    #[test]
    fn counters_accumulate_and_reset() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_text("x");
        doc.append_child(parent, child);
        doc.set_attribute(parent, "id", "p");
        doc.remove_attribute(parent, "id");
        doc.remove_attribute(parent, "missing");

        let counters = doc.counters();
        assert_eq!(counters.nodes_created, 2);
        assert_eq!(counters.children_appended, 1);
        assert_eq!(counters.attributes_set, 1);
        assert_eq!(counters.attributes_removed, 1);

        doc.reset_counters();
        assert_eq!(doc.counters(), MutationCounters::default());
    }

    #[test]
    fn to_html_round_trip() {
        let mut doc = Document::new();
        let root = doc.create_element("div");
        doc.set_attribute(root, "class", "flip-clock");
        let text = doc.create_text("3");
        doc.append_child(root, text);
        let comment = doc.create_comment("note");
        doc.append_child(root, comment);

        assert_eq!(
            doc.to_html(root),
            "<div class=\"flip-clock\">3<!--note--></div>"
        );
        assert_eq!(doc.text_of(root), "3");
    }

    #[test]
    fn dispatch_event_invokes_handlers() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut doc = Document::new();
        let el = doc.create_element("div");
        let fired = Rc::new(Cell::new(0));
        let fired_in = fired.clone();
        doc.add_event_listener(el, "click", Rc::new(move || fired_in.set(fired_in.get() + 1)));

        doc.dispatch_event(el, "click");
        doc.dispatch_event(el, "keydown");
        assert_eq!(fired.get(), 1);
    }
}
