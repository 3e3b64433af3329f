//! Reconciler: realize and patch.
//!
//! Given a freshly-built [`VNode`] tree and a live output tree, either
//! replace the live subtree (kind mismatch or changed text payload) or sync
//! attributes, trim surplus children, and recurse positionally. Diffing is
//! strictly positional - no key-based matching - so a reordered list is
//! observed as N positional replacements, not a move. Known limitation,
//! preserved for compatibility.
//!
//! Side effects are confined to the output surface; the vnode tree is
//! read-only here apart from the back-reference recorded on realize.

use tracing::{debug, trace};

use crate::dom::{NodeId, OutputSurface};
use crate::node::{NodeKind, VNode};

// =============================================================================
// Realize
// =============================================================================

/// Create a fresh output node matching the vnode: attributes applied, event
/// handlers bound, children realized and appended in order.
///
/// Used for first mount and for any subtree requiring full replacement.
pub fn realize<S: OutputSurface>(surface: &mut S, vnode: &VNode) -> NodeId {
    let node = match vnode.kind {
        NodeKind::Text => surface.create_text(vnode.text_content()),
        NodeKind::Comment => surface.create_comment(vnode.text_content()),
        NodeKind::Element => {
            let el = surface.create_element(&vnode.tag_name);
            for (name, value) in &vnode.attributes {
                surface.set_attribute(el, name, value);
            }
            for (event, handler) in &vnode.events {
                surface.add_event_listener(el, event, handler.clone());
            }
            el
        }
    };

    for child in &vnode.children {
        let realized = realize(surface, child);
        surface.append_child(node, realized);
    }

    vnode.bound.set(Some(node));
    trace!(node = ?node, label = vnode.label(), "realized node");
    node
}

// =============================================================================
// Patch
// =============================================================================

/// True if the live node must be discarded and replaced: label mismatch, or
/// both text with differing payloads.
fn should_replace<S: OutputSurface>(surface: &S, vnode: &VNode, node: NodeId) -> bool {
    vnode.label() != surface.node_label(node)
        || (vnode.kind == NodeKind::Text
            && surface.text_content(node).as_deref() != Some(vnode.text_content()))
}

/// Sync the vnode's attributes onto the live element with a minimal delta:
/// set absent or different attributes, then remove every live attribute the
/// vnode does not name.
fn patch_attributes<S: OutputSurface>(surface: &mut S, vnode: &VNode, node: NodeId) {
    for (name, value) in &vnode.attributes {
        if surface.attribute(node, name).as_deref() != Some(value.as_str()) {
            surface.set_attribute(node, name, value);
        }
    }

    for name in surface.attribute_names(node) {
        if !vnode.attributes.contains_key(&name) {
            surface.remove_attribute(node, &name);
        }
    }
}

/// Diff the vnode against the live node and sync the changes into the
/// output surface.
///
/// Replacement stops recursion: once a subtree is discarded, nothing else is
/// synced into it. Otherwise attributes are delta-synced, surplus live
/// children are trimmed from the tail, and each remaining index pair is
/// patched recursively (missing live children are realized and appended).
pub fn patch<S: OutputSurface>(surface: &mut S, vnode: &VNode, node: NodeId) {
    // Replacement test. The discarded subtree gets no attribute or child
    // sync. A detached live root (no parent) has nowhere to swap the fresh
    // node into, matching a replace against a parentless node upstream.
    if should_replace(surface, vnode, node) {
        debug!(
            live = %surface.node_label(node),
            next = vnode.label(),
            "replacing live node"
        );
        let fresh = realize(surface, vnode);
        if let Some(parent) = surface.parent(node) {
            surface.replace_child(parent, node, fresh);
        }
        return;
    }

    vnode.bound.set(Some(node));

    if vnode.kind == NodeKind::Element {
        patch_attributes(surface, vnode, node);
    }

    // Trim surplus live children from the tail end down to the vnode's
    // child count.
    let live = surface.children(node);
    for &surplus in live.iter().skip(vnode.children.len()).rev() {
        surface.remove_child(node, surplus);
    }

    // Positional recursion; missing live children are realized and appended.
    for (index, child) in vnode.children.iter().enumerate() {
        match live.get(index) {
            Some(&live_child) => patch(surface, child, live_child),
            None => {
                let realized = realize(surface, child);
                surface.append_child(node, realized);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
