//! Separator between digit groups.

use crate::node::{Attr, Child, Renderable, VNode, h};

/// A single-character separator, `:` by default.
pub struct Divider {
    character: char,
}

impl Divider {
    pub fn new(character: char) -> Self {
        Divider { character }
    }
}

impl Default for Divider {
    fn default() -> Self {
        Divider::new(':')
    }
}

impl Renderable for Divider {
    fn render(&self) -> VNode {
        h(
            "div",
            vec![Attr::class("flip-clock-divider")],
            vec![Child::from(h(
                "div",
                vec![Attr::class("flip-clock-divider-inner")],
                vec![Child::from(self.character.to_string())],
            ))],
        )
    }
}
