//! Clock face contract.
//!
//! A face owns the reactive displayed value, decides how it changes on every
//! driver interval, and renders the vnode tree describing it. The optional
//! lifecycle hook methods default to no-ops, except `before_animation`,
//! whose default strips the animate class from every live node so the next
//! reconcile re-triggers CSS transitions reliably.
//!
//! Hook dispatch order is fixed: the face method runs first, then external
//! emitter listeners. The controller owns that ordering; faces only supply
//! the method bodies.

use std::time::{Duration, Instant};

use crate::dom::{Document, NodeId};
use crate::face_value::FaceValue;
use crate::node::VNode;
use crate::pipeline::Timer;
use crate::state::{ReactiveCell, Unwatch};
use crate::types::ANIMATE_CLASS;

// =============================================================================
// Hook Context
// =============================================================================

/// What a face can reach during a hook call: the live output tree, the
/// mount root, the driver, and the pump instant.
pub struct FaceCtx<'a> {
    pub document: &'a mut Document,
    pub root: Option<NodeId>,
    pub timer: &'a Timer,
    pub now: Instant,
}

// =============================================================================
// Face State
// =============================================================================

/// The reactive state every face carries: the displayed value cell, the
/// previously displayed value, animation configuration, and the cell
/// subscriptions to release on unmount.
pub struct FaceState {
    value: ReactiveCell<FaceValue>,
    prev: Option<FaceValue>,
    animation_rate: Duration,
    auto_start: bool,
    watchers: Vec<Unwatch<FaceValue>>,
}

impl FaceState {
    /// Wrap an initial displayed value. Defaults: 500ms animation rate,
    /// auto-start on mount.
    pub fn new(initial: FaceValue) -> Self {
        FaceState {
            value: ReactiveCell::new(initial),
            prev: None,
            animation_rate: Duration::from_millis(500),
            auto_start: true,
            watchers: Vec::new(),
        }
    }

    /// The current displayed value.
    pub fn value(&self) -> FaceValue {
        self.value.get()
    }

    /// The underlying cell, for read access without cloning.
    pub fn cell(&self) -> &ReactiveCell<FaceValue> {
        &self.value
    }

    /// The previously displayed value, if any assignment happened.
    pub fn last_value(&self) -> Option<&FaceValue> {
        self.prev.as_ref()
    }

    /// Replace the displayed value, remembering the current one as the
    /// previous value. Subscribers fire only if the value actually changed.
    pub fn set_value(&mut self, value: FaceValue) {
        self.prev = Some(self.value.get());
        self.value.assign(value);
    }

    /// Subscribe to value changes. The handle is retained so
    /// [`FaceState::reset_watchers`] can release it on unmount.
    pub fn watch(&mut self, callback: impl Fn(&FaceValue, &FaceValue) + 'static) {
        let handle = self.value.watch(callback);
        self.watchers.push(handle);
    }

    /// Release every subscription registered through [`FaceState::watch`].
    pub fn reset_watchers(&mut self) {
        for watcher in self.watchers.drain(..) {
            watcher.unwatch();
        }
    }

    /// Milliseconds one card turn takes to animate.
    pub fn animation_rate(&self) -> Duration {
        self.animation_rate
    }

    pub fn set_animation_rate(&mut self, rate: Duration) {
        self.animation_rate = rate;
    }

    /// Should the driver start automatically on mount.
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    pub fn set_auto_start(&mut self, auto_start: bool) {
        self.auto_start = auto_start;
    }
}

// =============================================================================
// Face Trait
// =============================================================================

/// A clock face: reactive value, per-interval behavior, and rendering.
pub trait Face {
    /// The face's reactive state.
    fn state(&self) -> &FaceState;

    /// Mutable access to the face's reactive state.
    fn state_mut(&mut self) -> &mut FaceState;

    /// Produce the vnode tree for the current value.
    fn render(&self) -> VNode;

    /// Called on every fired driver interval; handles the actual advance of
    /// the displayed value.
    fn interval(&mut self, ctx: &mut FaceCtx<'_>);

    // Lifecycle hooks. Absence of an override is not an error; the
    // controller simply runs the default.

    fn before_mount(&mut self, _ctx: &mut FaceCtx<'_>) {}

    fn mounted(&mut self, _ctx: &mut FaceCtx<'_>) {}

    /// Hook to adjust face state before the cycle's tree is built.
    fn before_create(&mut self, _ctx: &mut FaceCtx<'_>) {}

    /// Hook to inspect the freshly built tree before it hits the output.
    fn after_create(&mut self, _ctx: &mut FaceCtx<'_>, _vnode: &VNode) {}

    /// Runs before the deferred reconcile. The default strips the animate
    /// class from every previously-animating live node, so no stale
    /// animation markers leak into the next cycle.
    fn before_animation(&mut self, ctx: &mut FaceCtx<'_>, _vnode: &VNode) {
        if let Some(root) = ctx.root {
            ctx.document.remove_class_all(root, ANIMATE_CLASS);
        }
    }

    fn after_render(&mut self, _ctx: &mut FaceCtx<'_>, _vnode: &VNode) {}

    fn after_animation(&mut self, _ctx: &mut FaceCtx<'_>, _vnode: &VNode) {}

    fn started(&mut self, _ctx: &mut FaceCtx<'_>) {}

    fn stopped(&mut self, _ctx: &mut FaceCtx<'_>) {}

    fn before_unmount(&mut self, _ctx: &mut FaceCtx<'_>) {}

    fn unmounted(&mut self, _ctx: &mut FaceCtx<'_>) {}
}

// =============================================================================
// Tests
// =============================================================================
