//! Counter face.
//!
//! Displays an integer as a row of flip cards. Counters do not auto-start;
//! when the driver runs, every interval steps the value up (or down with the
//! countdown flag). `increment`/`decrement` step it manually either way.

use crate::components::{Card, Group};
use crate::face::{Face, FaceCtx, FaceState};
use crate::face_value::FaceValue;
use crate::node::{Attr, Child, Renderable, VNode, h};

/// Integer face stepping by a fixed amount.
pub struct Counter {
    state: FaceState,
    countdown: bool,
    step: i64,
}

impl Counter {
    /// Counter starting at `initial`, stepping by one. Manual by default;
    /// call [`FaceState::set_auto_start`] to drive it from the timer.
    pub fn new(initial: i64) -> Self {
        let mut state = FaceState::new(FaceValue::new(initial));
        state.set_auto_start(false);
        Counter {
            state,
            countdown: false,
            step: 1,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn with_countdown(mut self, countdown: bool) -> Self {
        self.countdown = countdown;
        self
    }

    fn current(&self) -> i64 {
        self.state.value().value().as_int().unwrap_or(0)
    }

    /// Step the value up. The digit minimum carries over, so `100 -> 99`
    /// keeps three cards.
    pub fn increment(&mut self) {
        let next = self.state.value().copy(self.current() + self.step);
        self.state.set_value(next);
    }

    /// Step the value down.
    pub fn decrement(&mut self) {
        let next = self.state.value().copy(self.current() - self.step);
        self.state.set_value(next);
    }
}

impl Face for Counter {
    fn state(&self) -> &FaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FaceState {
        &mut self.state
    }

    fn interval(&mut self, _ctx: &mut FaceCtx<'_>) {
        if self.countdown {
            self.decrement();
        } else {
            self.increment();
        }
    }

    fn render(&self) -> VNode {
        let value = self.state.value();
        let last = self.state.last_value();
        let rate = self.state.animation_rate().as_millis() as u64;

        let cards: Vec<Box<dyn Renderable>> = value
            .digits()
            .iter()
            .enumerate()
            .map(|(index, digit)| {
                let last_digit = last.and_then(|v| v.digit(index)).map(str::to_string);
                Box::new(Card::new(digit.clone(), last_digit).with_animation_rate(rate))
                    as Box<dyn Renderable>
            })
            .collect();

        h(
            "div",
            vec![Attr::class("flip-clock")],
            vec![Child::from(Group::new(cards).render())],
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ANIMATE_CLASS;

    fn card_digits(node: &VNode) -> Vec<String> {
        // flip-clock > group > group-items > cards; active item's top half
        // carries the shown digit.
        let group = &node.children[0];
        let items = &group.children[0];
        items
            .children
            .iter()
            .map(|card| {
                let active = &card.children[0];
                let inner = &active.children[0];
                inner.children[0].children[0].text_content().to_string()
            })
            .collect()
    }

    #[test]
    fn counter_does_not_auto_start() {
        let counter = Counter::new(0);
        assert!(!counter.state().auto_start());
    }

    #[test]
    fn increment_steps_and_keeps_digit_minimum() {
        let mut counter = Counter::new(100);
        counter.decrement();
        assert_eq!(counter.current(), 99);
        assert_eq!(card_digits(&counter.render()), ["0", "9", "9"]);
    }

    #[test]
    fn countdown_interval_decrements() {
        let mut counter = Counter::new(5).with_countdown(true).with_step(2);
        let mut document = crate::dom::Document::new();
        let timer = crate::pipeline::Timer::default();
        let mut ctx = FaceCtx {
            document: &mut document,
            root: None,
            timer: &timer,
            now: std::time::Instant::now(),
        };
        counter.interval(&mut ctx);
        assert_eq!(counter.current(), 3);
    }

    #[test]
    fn only_changed_cards_animate() {
        let mut counter = Counter::new(0);
        counter.increment();

        // 00 -> 01: the tens card is unchanged, the ones card flips.
        let node = counter.render();
        let group = &node.children[0];
        let items = &group.children[0];
        let classes: Vec<&String> = items
            .children
            .iter()
            .map(|card| card.attributes.get("class").unwrap())
            .collect();
        assert!(!classes[0].contains(ANIMATE_CLASS));
        assert!(classes[1].contains(ANIMATE_CLASS));
    }
}
