//! Caption under a digit group.

use crate::node::{Attr, Child, Renderable, VNode, h};

/// A short text caption.
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Label { text: text.into() }
    }
}

impl Renderable for Label {
    fn render(&self) -> VNode {
        h(
            "div",
            vec![Attr::class("flip-clock-label")],
            vec![Child::from(self.text.as_str())],
        )
    }
}
