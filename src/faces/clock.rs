//! Wall-clock face.
//!
//! Re-reads the system clock on every fired interval and shows it through a
//! chrono format string: digits become flip cards, everything else becomes
//! dividers. Per-digit change detection compares against the previously
//! shown instant, so only the positions that actually moved animate.

use chrono::{Local, NaiveDateTime};

use crate::components::{Card, Divider, Group};
use crate::face::{Face, FaceCtx, FaceState};
use crate::face_value::FaceValue;
use crate::node::{Attr, Child, Renderable, VNode, h};
use crate::types::Value;

/// Formatted wall-clock time.
pub struct ClockFace {
    state: FaceState,
    format: String,
}

impl ClockFace {
    /// A 24-hour clock, `HH:MM:SS`, starting from the current system time.
    pub fn new() -> Self {
        Self::with_format("%H:%M:%S")
    }

    /// A clock using a chrono strftime format string.
    pub fn with_format(format: impl Into<String>) -> Self {
        ClockFace {
            state: FaceState::new(FaceValue::new(Value::Time(Local::now().naive_local()))),
            format: format.into(),
        }
    }

    /// Render a timestamp through the configured format.
    fn formatted(&self, time: NaiveDateTime) -> String {
        time.format(&self.format).to_string()
    }

    fn shown(&self, value: &FaceValue) -> Option<String> {
        value.value().as_time().map(|t| self.formatted(t))
    }
}

impl Default for ClockFace {
    fn default() -> Self {
        ClockFace::new()
    }
}

impl Face for ClockFace {
    fn state(&self) -> &FaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FaceState {
        &mut self.state
    }

    fn interval(&mut self, _ctx: &mut FaceCtx<'_>) {
        let now = Local::now().naive_local();
        let next = self.state.value().copy(Value::Time(now));
        self.state.set_value(next);
    }

    fn render(&self) -> VNode {
        let current = self.state.value();
        let shown = self.shown(&current).unwrap_or_default();
        let last = self
            .state
            .last_value()
            .and_then(|v| self.shown(v))
            .unwrap_or_default();
        let last_chars: Vec<char> = last.chars().collect();
        let rate = self.state.animation_rate().as_millis() as u64;

        let pieces: Vec<Box<dyn Renderable>> = shown
            .chars()
            .enumerate()
            .map(|(index, c)| {
                if c.is_ascii_digit() {
                    let last_digit = last_chars
                        .get(index)
                        .filter(|l| l.is_ascii_digit())
                        .map(char::to_string);
                    Box::new(Card::new(c.to_string(), last_digit).with_animation_rate(rate))
                        as Box<dyn Renderable>
                } else {
                    Box::new(Divider::new(c)) as Box<dyn Renderable>
                }
            })
            .collect();

        h(
            "div",
            vec![Attr::class("flip-clock")],
            vec![Child::from(Group::new(pieces).render())],
        )
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn digits_become_cards_and_separators_dividers() {
        let mut face = ClockFace::new();
        face.state_mut().set_value(FaceValue::new(Value::Time(at(12, 34, 56))));

        let node = face.render();
        let group = &node.children[0];
        let items = &group.children[0];
        // HH:MM:SS -> six cards, two dividers.
        assert_eq!(items.children.len(), 8);
        let classes: Vec<&str> = items
            .children
            .iter()
            .map(|piece| piece.attributes.get("class").unwrap().as_str())
            .collect();
        assert!(classes[0].starts_with("flip-clock-card"));
        assert_eq!(classes[2], "flip-clock-divider");
        assert_eq!(classes[5], "flip-clock-divider");
    }

    #[test]
    fn interval_moves_the_shown_time_forward() {
        let mut face = ClockFace::new();
        let before = face.state().value().value().as_time().unwrap();

        let mut document = crate::dom::Document::new();
        let timer = crate::pipeline::Timer::default();
        let mut ctx = FaceCtx {
            document: &mut document,
            root: None,
            timer: &timer,
            now: std::time::Instant::now(),
        };
        face.interval(&mut ctx);

        let after = face.state().value().value().as_time().unwrap();
        assert!(after >= before);
    }

    #[test]
    fn custom_format_changes_the_layout() {
        let mut face = ClockFace::with_format("%M.%S");
        face.state_mut().set_value(FaceValue::new(Value::Time(at(0, 7, 9))));

        let node = face.render();
        let items = &node.children[0].children[0];
        assert_eq!(items.children.len(), 5);
    }
}
