//! Elapsed-time face.
//!
//! A stopwatch (or countdown) measured from a fixed start timestamp. Every
//! fired interval advances the shown timestamp by the driver's cadence; the
//! span back to the start is broken down calendar-correctly and expanded
//! through a duration token pattern. Whitespace in the pattern separates
//! digit groups; each group can carry a caption keyed by its token letter.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;

use crate::components::{Card, Divider, Group};
use crate::duration::Duration;
use crate::error::ClockError;
use crate::face::{Face, FaceCtx, FaceState};
use crate::face_value::FaceValue;
use crate::node::{Attr, Child, Renderable, VNode, h};
use crate::types::Value;

/// Duration-formatted stopwatch or countdown.
pub struct ElapsedTime {
    state: FaceState,
    start: NaiveDateTime,
    countdown: bool,
    format: String,
    labels: BTreeMap<char, String>,
}

// `FaceState` holds boxed watcher closures, so `Debug` cannot be derived.
impl fmt::Debug for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElapsedTime")
            .field("start", &self.start)
            .field("countdown", &self.countdown)
            .field("format", &self.format)
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl ElapsedTime {
    /// Count up from `start` with the default `mm:ss` pattern.
    ///
    /// The pattern is validated once here; an unknown token letter is a
    /// hard failure.
    pub fn new(start: NaiveDateTime) -> Result<Self, ClockError> {
        Self::with_format(start, "mm:ss")
    }

    /// Count up from `start` with a duration token pattern.
    pub fn with_format(start: NaiveDateTime, format: impl Into<String>) -> Result<Self, ClockError> {
        let format = format.into();
        Duration::default().format(&format)?;
        Ok(ElapsedTime {
            state: FaceState::new(FaceValue::new(Value::Time(start))),
            start,
            countdown: false,
            format,
            labels: BTreeMap::new(),
        })
    }

    /// Run backwards: each interval moves the shown timestamp toward the
    /// start instead of away from it.
    pub fn with_countdown(mut self, countdown: bool) -> Self {
        self.countdown = countdown;
        self
    }

    /// Caption a digit group by its token letter (`'m'` -> "minutes").
    pub fn with_label(mut self, token: char, label: impl Into<String>) -> Self {
        self.labels.insert(token, label.into());
        self
    }

    fn shown_time(value: &FaceValue) -> Option<NaiveDateTime> {
        value.value().as_time()
    }

    /// Expand the pattern for a shown timestamp. The pattern was validated
    /// at construction, so expansion cannot fail here.
    fn formatted(&self, time: NaiveDateTime) -> String {
        Duration::between(self.start, time)
            .format(&self.format)
            .unwrap_or_default()
    }
}

impl Face for ElapsedTime {
    fn state(&self) -> &FaceState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut FaceState {
        &mut self.state
    }

    fn interval(&mut self, ctx: &mut FaceCtx<'_>) {
        let Some(current) = Self::shown_time(&self.state.value()) else {
            return;
        };
        let step = chrono::Duration::from_std(ctx.timer.interval())
            .unwrap_or_else(|_| chrono::Duration::seconds(1));
        let next = if self.countdown {
            current - step
        } else {
            current + step
        };
        let next = self.state.value().copy(Value::Time(next));
        self.state.set_value(next);
    }

    fn render(&self) -> VNode {
        let shown = Self::shown_time(&self.state.value())
            .map(|t| self.formatted(t))
            .unwrap_or_default();
        let last = self
            .state
            .last_value()
            .and_then(Self::shown_time)
            .map(|t| self.formatted(t))
            .unwrap_or_default();
        let last_chars: Vec<char> = last.chars().collect();
        let rate = self.state.animation_rate().as_millis() as u64;

        // Pattern whitespace separates groups; character positions inside
        // the expanded strings line up because both come from one pattern.
        let mut groups: Vec<Child> = Vec::new();
        let mut pieces: Vec<Box<dyn Renderable>> = Vec::new();
        let mut group_token: Option<char> = None;
        let mut index = 0usize;

        let format_chars: Vec<char> = self.format.chars().collect();
        let mut format_pos = 0usize;

        for c in shown.chars() {
            // Track which pattern token produced this position.
            let token = format_chars.get(format_pos).copied();
            if format_pos + 1 < format_chars.len() {
                format_pos += 1;
            }

            if c.is_whitespace() {
                if !pieces.is_empty() {
                    groups.push(finish_group(
                        std::mem::take(&mut pieces),
                        group_token.take(),
                        &self.labels,
                    ));
                }
                index += 1;
                continue;
            }

            if c.is_ascii_digit() {
                if group_token.is_none() {
                    group_token = token.filter(|t| t.is_ascii_alphabetic());
                }
                let last_digit = last_chars
                    .get(index)
                    .filter(|l| l.is_ascii_digit())
                    .map(char::to_string);
                pieces.push(Box::new(
                    Card::new(c.to_string(), last_digit).with_animation_rate(rate),
                ));
            } else {
                pieces.push(Box::new(Divider::new(c)));
            }
            index += 1;
        }

        if !pieces.is_empty() {
            groups.push(finish_group(pieces, group_token, &self.labels));
        }

        h("div", vec![Attr::class("flip-clock")], groups)
    }
}

fn finish_group(
    pieces: Vec<Box<dyn Renderable>>,
    token: Option<char>,
    labels: &BTreeMap<char, String>,
) -> Child {
    let mut group = Group::new(pieces);
    if let Some(label) = token.and_then(|t| labels.get(&t)) {
        group = group.with_label(label.clone());
    }
    Child::from(group.render())
}

// =============================================================================
// Tests
// =============================================================================
