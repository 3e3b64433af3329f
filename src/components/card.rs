//! The flip card.
//!
//! One digit position of a face. The card stacks two [`CardItem`] faces,
//! active in front of before, and adds the animate class whenever the
//! current digit differs from the previous one so CSS can turn the card.

use crate::node::{Attr, Child, Renderable, VNode, h};
use crate::types::ANIMATE_CLASS;

/// One digit position with its previous digit for change detection.
pub struct Card {
    current_digit: String,
    last_digit: Option<String>,
    animation_rate_ms: u64,
}

impl Card {
    pub fn new(current_digit: impl Into<String>, last_digit: Option<String>) -> Self {
        Card {
            current_digit: current_digit.into(),
            last_digit,
            animation_rate_ms: 225,
        }
    }

    /// Override the per-card turn duration in milliseconds.
    pub fn with_animation_rate(mut self, ms: u64) -> Self {
        self.animation_rate_ms = ms;
        self
    }

    fn is_changed(&self) -> bool {
        match &self.last_digit {
            Some(last) => *last != self.current_digit,
            None => false,
        }
    }
}

impl Renderable for Card {
    fn render(&self) -> VNode {
        let class = if self.is_changed() {
            format!("flip-clock-card {ANIMATE_CLASS}")
        } else {
            "flip-clock-card".to_string()
        };
        let style = format!(
            "animation-delay: {0}ms; animation-duration: {0}ms",
            self.animation_rate_ms
        );

        let behind = self
            .last_digit
            .clone()
            .unwrap_or_else(|| self.current_digit.clone());

        h(
            "div",
            vec![Attr::class(class), Attr::style(style)],
            vec![
                Child::from(CardItem::new(&self.current_digit, "active").render()),
                Child::from(CardItem::new(&behind, "before").render()),
            ],
        )
    }
}

/// One face of a card: top and bottom halves of a digit.
pub struct CardItem {
    value: String,
    class_name: String,
}

impl CardItem {
    pub fn new(value: impl Into<String>, class_name: impl Into<String>) -> Self {
        CardItem {
            value: value.into(),
            class_name: class_name.into(),
        }
    }
}

impl Renderable for CardItem {
    fn render(&self) -> VNode {
        let half = |name: &str| {
            h(
                "div",
                vec![Attr::class(name)],
                vec![Child::from(self.value.as_str())],
            )
        };

        h(
            "div",
            vec![Attr::class(format!(
                "flip-clock-card-item {}",
                self.class_name
            ))],
            vec![Child::from(h(
                "div",
                vec![Attr::class("flip-clock-card-item-inner")],
                vec![Child::from(half("top")), Child::from(half("bottom"))],
            ))],
        )
    }
}
