//! Live output tree.
//!
//! The reconciler mutates a tree-structured output surface through the
//! [`OutputSurface`] capability set: create nodes, sync attributes, bind
//! events, and splice children. Any surface satisfying the set is a valid
//! target; [`Document`] is the crate's arena-backed implementation.

mod document;

pub use document::{Document, MutationCounters};

use crate::node::EventHandler;

// =============================================================================
// Node Handle
// =============================================================================

/// Handle to one node in an output surface.
///
/// Plain index into the surface's arena; cheap to copy, never dangles while
/// the surface is alive (removed nodes stay allocated but detached).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

// =============================================================================
// Output Surface Capability Set
// =============================================================================

/// The capability set the reconciler requires of a live output tree.
pub trait OutputSurface {
    /// Create a detached element node.
    fn create_element(&mut self, tag_name: &str) -> NodeId;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Create a detached comment node.
    fn create_comment(&mut self, text: &str) -> NodeId;

    /// The observed label of a node: `"text"`, `"comment"`, or the
    /// lower-cased tag name.
    fn node_label(&self, node: NodeId) -> String;

    /// Read one attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Set one attribute, inserting or overwriting.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Remove one attribute if present.
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// The names of all attributes currently on the node.
    fn attribute_names(&self, node: NodeId) -> Vec<String>;

    /// Bind an event handler to the node.
    fn add_event_listener(&mut self, node: NodeId, event: &str, handler: EventHandler);

    /// The parent of a node, if attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The ordered children of a node.
    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Append a child at the tail.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Remove a child, detaching its subtree.
    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Replace a child in place, preserving its position.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId);

    /// The textual payload of a childless node. `None` when the node has
    /// children.
    fn text_content(&self, node: NodeId) -> Option<String>;
}
