//! Digit group.
//!
//! A run of pieces rendered side by side, with an optional caption above.

use crate::node::{Attr, Child, Renderable, VNode, h};

use super::Label;

/// An ordered run of pieces with an optional caption.
pub struct Group {
    label: Option<String>,
    items: Vec<Box<dyn Renderable>>,
}

impl Group {
    pub fn new(items: Vec<Box<dyn Renderable>>) -> Self {
        Group { label: None, items }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Renderable for Group {
    fn render(&self) -> VNode {
        let caption = self
            .label
            .as_ref()
            .map(|text| Child::from(Label::new(text.clone()).render()));

        let items = h(
            "div",
            vec![Attr::class("flip-clock-group-items")],
            self.items
                .iter()
                .map(|item| Child::from(item.render()))
                .collect(),
        );

        h(
            "div",
            vec![Attr::class("flip-clock-group")],
            vec![Child::from(caption), Child::from(items)],
        )
    }
}
