//! Virtual node model.
//!
//! A [`VNode`] is an immutable-per-cycle description of one output node:
//! element, text, or comment. Every render cycle produces a brand-new tree;
//! the reconciler reads it, mutates the live output tree to match, and
//! discards it. The only write a `VNode` ever sees after construction is the
//! back-reference to the realized output node, recorded through a `Cell`.
//!
//! Attribute configuration is an explicit enum resolved by a single dispatch
//! in the constructor - class, style, text payload, event handlers and
//! arbitrary string attributes each have a dedicated variant.

mod builder;

pub use builder::{Child, component, h, h_component};

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::dom::NodeId;

// =============================================================================
// Node Kind
// =============================================================================

/// The kind of output node a [`VNode`] describes.
///
/// Derived from the reserved tag names `"text"` and `"comment"`; every other
/// tag is an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
}

// =============================================================================
// Attribute Configuration
// =============================================================================

/// Event handler bound to an output node.
pub type EventHandler = Rc<dyn Fn()>;

/// One recognized configuration entry for a [`VNode`].
///
/// Resolved by a single dispatch in [`VNode::new`] instead of reflective
/// property assignment: `Class`/`Style`/`Pair` land in the attribute map,
/// `Text` becomes the textual payload, `On` binds an event handler.
#[derive(Clone)]
pub enum Attr {
    /// The `class` attribute.
    Class(String),
    /// The `style` attribute.
    Style(String),
    /// The textual payload (text and comment kinds).
    Text(String),
    /// An event binding: event name and handler.
    On(String, EventHandler),
    /// An arbitrary string attribute.
    Pair(String, String),
}

impl Attr {
    /// Convenience constructor for [`Attr::Class`].
    pub fn class(value: impl Into<String>) -> Self {
        Attr::Class(value.into())
    }

    /// Convenience constructor for [`Attr::Style`].
    pub fn style(value: impl Into<String>) -> Self {
        Attr::Style(value.into())
    }

    /// Convenience constructor for [`Attr::Pair`].
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attr::Pair(name.into(), value.into())
    }

    /// Convenience constructor for [`Attr::On`].
    pub fn on(event: impl Into<String>, handler: impl Fn() + 'static) -> Self {
        Attr::On(event.into(), Rc::new(handler))
    }
}

impl fmt::Debug for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Class(v) => f.debug_tuple("Class").field(v).finish(),
            Attr::Style(v) => f.debug_tuple("Style").field(v).finish(),
            Attr::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Attr::On(name, _) => f.debug_tuple("On").field(name).finish(),
            Attr::Pair(name, v) => f.debug_tuple("Pair").field(name).field(v).finish(),
        }
    }
}

// =============================================================================
// Renderable
// =============================================================================

/// Anything that can produce a [`VNode`] tree on demand.
///
/// Leaf components (cards, dividers, labels, groups) and clock faces all
/// satisfy this capability; the tree builder resolves them inline.
pub trait Renderable {
    /// Produce the node tree describing this component.
    fn render(&self) -> VNode;
}

// =============================================================================
// VNode
// =============================================================================

/// An immutable-per-cycle description of one output node.
pub struct VNode {
    /// The node kind, derived from the tag name.
    pub kind: NodeKind,
    /// Lower-cased tag name. Routing only for text/comment kinds.
    pub tag_name: String,
    /// Attribute name -> string value. Keys unique, order irrelevant.
    pub attributes: BTreeMap<String, String>,
    /// Event name -> handler.
    pub events: BTreeMap<String, EventHandler>,
    /// Textual payload for text/comment kinds.
    pub text: Option<String>,
    /// Ordered children. Positionally significant, not keyed.
    pub children: Vec<VNode>,
    /// Back-reference to the realized output node, recorded on realize.
    /// Relation only - the live output tree owns the node.
    pub bound: Cell<Option<NodeId>>,
}

impl VNode {
    /// Create a node from a tag name, configuration entries, and children.
    ///
    /// The tag name is always stored lower-cased; the reserved tags `text`
    /// and `comment` select the corresponding node kinds.
    pub fn new(tag_name: &str, attrs: Vec<Attr>, children: Vec<VNode>) -> Self {
        let tag_name = tag_name.to_lowercase();
        let kind = match tag_name.as_str() {
            "text" => NodeKind::Text,
            "comment" => NodeKind::Comment,
            _ => NodeKind::Element,
        };

        let mut node = VNode {
            kind,
            tag_name,
            attributes: BTreeMap::new(),
            events: BTreeMap::new(),
            text: None,
            children,
            bound: Cell::new(None),
        };

        for attr in attrs {
            node.apply(attr);
        }

        node
    }

    /// Resolve one configuration entry. The single dispatch point for all
    /// recognized fields.
    fn apply(&mut self, attr: Attr) {
        match attr {
            Attr::Class(value) => {
                self.attributes.insert("class".to_string(), value);
            }
            Attr::Style(value) => {
                self.attributes.insert("style".to_string(), value);
            }
            Attr::Text(value) => {
                self.text = Some(value);
            }
            Attr::On(event, handler) => {
                self.events.insert(event, handler);
            }
            Attr::Pair(name, value) => {
                self.attributes.insert(name, value);
            }
        }
    }

    /// The observed label of this node: `"text"`/`"comment"` for those
    /// kinds, otherwise the tag name. Replacement in the reconciler compares
    /// this label against the live node's.
    pub fn label(&self) -> &str {
        match self.kind {
            NodeKind::Text => "text",
            NodeKind::Comment => "comment",
            NodeKind::Element => &self.tag_name,
        }
    }

    /// The textual payload as a string slice, empty when absent.
    pub fn text_content(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("kind", &self.kind)
            .field("tag_name", &self.tag_name)
            .field("attributes", &self.attributes)
            .field("events", &self.events.keys().collect::<Vec<_>>())
            .field("text", &self.text)
            .field("children", &self.children)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
