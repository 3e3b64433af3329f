//! Phase scheduler.
//!
//! The deferred half of a render cycle - reconcile, after-render,
//! after-animation, plus the driver auto-start scheduled at mount - is held
//! here as named steps with due instants rather than as an implicit chain of
//! timer callbacks. The ordering guarantee is first-class:
//! [`Scheduler::take_due`] snapshots the due set,
//! so a step enqueued while executing (after-render is enqueued by the
//! reconcile step itself) runs on the *next* scheduling turn, never the
//! current one.
//!
//! There is no cancellation. Steps from overlapping cycles coexist in the
//! queue and each run when due.

use std::rc::Rc;
use std::time::Instant;

use crate::node::VNode;

// =============================================================================
// Steps
// =============================================================================

/// One named deferred step of the render pipeline.
#[derive(Clone)]
pub enum Step {
    /// Patch the cycle's vnode tree against the mount target.
    Reconcile(Rc<VNode>),
    /// Dispatch the after-render hook point.
    AfterRender(Rc<VNode>),
    /// Dispatch the after-animation hook point.
    AfterAnimation(Rc<VNode>),
    /// Start the periodic driver (auto-start after mount).
    StartDriver,
}

impl Step {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Step::Reconcile(_) => "reconcile",
            Step::AfterRender(_) => "afterRender",
            Step::AfterAnimation(_) => "afterAnimation",
            Step::StartDriver => "startDriver",
        }
    }
}

/// A step queued for execution at or after its due instant.
#[derive(Clone)]
pub struct ScheduledStep {
    pub step: Step,
    /// The render cycle that scheduled this step.
    pub cycle: u64,
    pub due: Instant,
}

// =============================================================================
// Scheduler
// =============================================================================

/// Task queue for deferred render steps.
///
/// Steps keep their enqueue order among those due on the same turn, so two
/// steps scheduled for "now" execute first-in first-out.
#[derive(Default)]
pub struct Scheduler {
    queue: Vec<ScheduledStep>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a step due immediately (the next scheduling turn).
    pub fn defer(&mut self, step: Step, cycle: u64, now: Instant) {
        self.defer_at(step, cycle, now);
    }

    /// Queue a step due at a specific instant.
    pub fn defer_at(&mut self, step: Step, cycle: u64, due: Instant) {
        self.queue.push(ScheduledStep { step, cycle, due });
    }

    /// Remove and return every step due at `now`, in enqueue order.
    ///
    /// Snapshot semantics: steps enqueued while the caller executes the
    /// returned batch are not part of it.
    pub fn take_due(&mut self, now: Instant) -> Vec<ScheduledStep> {
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.queue.len());
        for entry in self.queue.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.queue = remaining;
        due
    }

    /// The earliest due instant among queued steps, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.queue.iter().map(|entry| entry.due).min()
    }

    /// True when nothing is queued.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued steps.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn text_step() -> Step {
        Step::StartDriver
    }

    #[test]
    fn due_steps_are_taken_in_enqueue_order() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.defer(Step::Reconcile(Rc::new(crate::node::VNode::new("div", vec![], vec![]))), 1, now);
        scheduler.defer(text_step(), 1, now);

        let batch = scheduler.take_due(now);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].step.name(), "reconcile");
        assert_eq!(batch[1].step.name(), "startDriver");
        assert!(scheduler.is_idle());
    }

    #[test]
    fn future_steps_stay_queued() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.defer_at(text_step(), 1, now + Duration::from_millis(500));

        assert!(scheduler.take_due(now).is_empty());
        assert_eq!(scheduler.len(), 1);
        assert_eq!(scheduler.next_due(), Some(now + Duration::from_millis(500)));

        let later = now + Duration::from_millis(500);
        assert_eq!(scheduler.take_due(later).len(), 1);
    }

    #[test]
    fn take_due_does_not_include_steps_enqueued_after_snapshot() {
        let mut scheduler = Scheduler::new();
        let now = Instant::now();
        scheduler.defer(text_step(), 1, now);

        let batch = scheduler.take_due(now);
        assert_eq!(batch.len(), 1);

        // A step enqueued while "executing" the batch waits for next turn.
        scheduler.defer(text_step(), 1, now);
        assert_eq!(scheduler.len(), 1);
    }
}
