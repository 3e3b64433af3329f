//! Tree builder.
//!
//! [`h`] constructs a [`VNode`] from a declarative call, normalizing its
//! children: omitted entries are dropped, nested renderables are resolved
//! inline, and loose text is routed to text or comment nodes. A value
//! wrapped the way a comment literal would be (`<!--...-->`) becomes a
//! comment node carrying the inner payload.
//!
//! [`h_component`] resolves a renderable directly. Note that any caller
//! attributes are discarded in that path - current behavior, kept as is.

use super::{Attr, Renderable, VNode};

// =============================================================================
// Child Normalization
// =============================================================================

/// One entry in a builder child list, before normalization.
pub enum Child {
    /// An already-built node; passes through unchanged.
    Node(VNode),
    /// A renderable component; resolved via `render()` at build time.
    Component(Box<dyn Renderable>),
    /// Loose text; routed to a text or comment node.
    Text(String),
    /// An omitted entry; dropped during normalization.
    Omit,
}

impl From<VNode> for Child {
    fn from(node: VNode) -> Self {
        Child::Node(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<Option<Child>> for Child {
    fn from(child: Option<Child>) -> Self {
        child.unwrap_or(Child::Omit)
    }
}

/// Box a renderable into a [`Child`].
pub fn component<R: Renderable + 'static>(renderable: R) -> Child {
    Child::Component(Box::new(renderable))
}

// =============================================================================
// Comment Literals
// =============================================================================

/// True if the string contains a comment literal (`<!--` ... `-->` with a
/// non-empty body).
fn is_comment(text: &str) -> bool {
    match text.find("<!--") {
        Some(open) => match text[open + 4..].find("-->") {
            Some(close) => close > 0,
            None => false,
        },
        None => false,
    }
}

/// Strip every comment marker pair, keeping the inner payload and any
/// surrounding text.
fn strip_comment_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("<!--") {
        match rest[open + 4..].find("-->") {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push_str(&rest[open + 4..open + 4 + close]);
                rest = &rest[open + 4 + close + 3..];
            }
            _ => break,
        }
    }

    out.push_str(rest);
    out
}

// =============================================================================
// Builder
// =============================================================================

/// Create a [`VNode`] with the given tag, configuration, and children.
///
/// Children are normalized per the rules above. Pure with respect to its
/// inputs except for the one-time `render()` resolution of nested
/// renderables.
pub fn h(tag_name: &str, attrs: Vec<Attr>, children: Vec<Child>) -> VNode {
    let children = children
        .into_iter()
        .filter_map(|child| match child {
            Child::Omit => None,
            Child::Node(node) => Some(node),
            Child::Component(renderable) => Some(renderable.render()),
            Child::Text(text) => {
                if is_comment(&text) {
                    Some(h(
                        "comment",
                        vec![Attr::Text(strip_comment_markers(&text))],
                        vec![],
                    ))
                } else {
                    Some(h("text", vec![Attr::Text(text)], vec![]))
                }
            }
        })
        .collect();

    VNode::new(tag_name, attrs, children)
}

/// Resolve a renderable into its node tree.
///
/// Returns the produced [`VNode`] directly; no caller attributes are merged
/// into it.
pub fn h_component(renderable: &dyn Renderable) -> VNode {
    renderable.render()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    struct Probe;

    impl Renderable for Probe {
        fn render(&self) -> VNode {
            h("span", vec![Attr::class("probe")], vec![])
        }
    }

    #[test]
    fn omitted_children_are_dropped() {
        let node = h(
            "div",
            vec![],
            vec![Child::Omit, Child::from("a"), Child::Omit],
        );
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn loose_text_becomes_text_node() {
        let node = h("div", vec![], vec![Child::from("12")]);
        assert_eq!(node.children[0].kind, NodeKind::Text);
        assert_eq!(node.children[0].text_content(), "12");
    }

    #[test]
    fn comment_literal_becomes_comment_node() {
        let node = h("div", vec![], vec![Child::from("<!--note-->")]);
        assert_eq!(node.children[0].kind, NodeKind::Comment);
        assert_eq!(node.children[0].text_content(), "note");
    }

    #[test]
    fn comment_markers_are_stripped_around_text() {
        assert_eq!(strip_comment_markers("a<!--b-->c"), "abc");
        assert!(is_comment("x <!--y--> z"));
        assert!(!is_comment("<!---->"));
        assert!(!is_comment("plain"));
    }

    #[test]
    fn renderable_children_are_resolved() {
        let node = h("div", vec![], vec![component(Probe)]);
        assert_eq!(node.children[0].tag_name, "span");
        assert_eq!(node.children[0].attributes.get("class").unwrap(), "probe");
    }

    #[test]
    fn h_component_returns_rendered_tree() {
        let node = h_component(&Probe);
        assert_eq!(node.tag_name, "span");
    }

    #[test]
    fn nested_builders_compose() {
        let node = h(
            "div",
            vec![Attr::class("outer")],
            vec![Child::from(h("div", vec![], vec![Child::from("1")]))],
        );
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].children[0].text_content(), "1");
    }
}
