//! Clock controller.
//!
//! Owns one face, the periodic driver, the live output tree, the phase
//! scheduler and the lifecycle emitter, and wires them into the render
//! pipeline. Time always arrives as an explicit instant through
//! [`FlipClock::tick`], so the whole lifecycle is deterministic under test.
//!
//! One render cycle runs `beforeCreate` -> build tree -> `afterCreate` ->
//! `beforeAnimation` synchronously, then defers the reconcile to the next
//! pump turn; executing the reconcile enqueues `afterRender` for the turn
//! after and `afterAnimation` for when the face's animation rate has
//! elapsed. Every hook point dispatches the face's method first, then the
//! emitter's listeners.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::dom::{Document, NodeId, OutputSurface};
use crate::error::ClockError;
use crate::face::{Face, FaceCtx};
use crate::node::VNode;
use crate::pipeline::{Scheduler, Step, Timer};
use crate::reconciler;
use crate::state::{EventEmitter, HookEvent, ListenerId};
use crate::types::{HookPoint, RenderPhase};

// =============================================================================
// Builder
// =============================================================================

/// Configures and constructs a [`FlipClock`]. A face is mandatory.
#[derive(Default)]
pub struct FlipClockBuilder {
    face: Option<Box<dyn Face>>,
    interval: Option<Duration>,
    animation_rate: Option<Duration>,
    auto_start: Option<bool>,
}

impl FlipClockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(mut self, face: impl Face + 'static) -> Self {
        self.face = Some(Box::new(face));
        self
    }

    /// Driver cadence; one second when unset.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Override the face's animation rate.
    pub fn animation_rate(mut self, rate: Duration) -> Self {
        self.animation_rate = Some(rate);
        self
    }

    /// Override whether the driver starts automatically on mount.
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = Some(auto_start);
        self
    }

    /// Build the controller. Fails when no face was supplied.
    pub fn build(self) -> Result<FlipClock, ClockError> {
        let mut face = self.face.ok_or(ClockError::MissingFace)?;
        if let Some(rate) = self.animation_rate {
            face.state_mut().set_animation_rate(rate);
        }
        if let Some(auto_start) = self.auto_start {
            face.state_mut().set_auto_start(auto_start);
        }
        let interval = self.interval.unwrap_or(Duration::from_millis(1000));

        Ok(FlipClock {
            face,
            timer: Timer::new(interval),
            document: Document::new(),
            scheduler: Scheduler::new(),
            emitter: EventEmitter::new(),
            render_pending: Rc::new(Cell::new(false)),
            interval_callback: None,
            target: None,
            root: None,
            cycle: 0,
            phase: RenderPhase::Idle,
        })
    }
}

// =============================================================================
// Controller
// =============================================================================

/// The clock: one face, one driver, one live output tree.
pub struct FlipClock {
    face: Box<dyn Face>,
    timer: Timer,
    document: Document,
    scheduler: Scheduler,
    emitter: EventEmitter,
    /// Set by the face's value cell watcher; consumed on the next pump turn.
    render_pending: Rc<Cell<bool>>,
    interval_callback: Option<Rc<dyn Fn()>>,
    /// The mount point inside the document.
    target: Option<NodeId>,
    /// The realized root of the face's tree, once reconciled.
    root: Option<NodeId>,
    cycle: u64,
    phase: RenderPhase,
}

impl FlipClock {
    /// Start configuring a clock.
    pub fn builder() -> FlipClockBuilder {
        FlipClockBuilder::new()
    }

    pub fn face(&self) -> &dyn Face {
        self.face.as_ref()
    }

    pub fn face_mut(&mut self) -> &mut dyn Face {
        self.face.as_mut()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// The live output tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the live output tree, for creating the mount
    /// target and for host-side inspection.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The realized root of the face's tree, once the first reconcile ran.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn phase(&self) -> RenderPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_mounted(&self) -> bool {
        self.target.is_some()
    }

    // ===== Lifecycle listeners =====

    /// Listen for a lifecycle point.
    pub fn on(&mut self, point: HookPoint, callback: impl Fn(&HookEvent) + 'static) -> ListenerId {
        self.emitter.on(point, callback)
    }

    /// Listen for a lifecycle point exactly once.
    pub fn once(
        &mut self,
        point: HookPoint,
        callback: impl Fn(&HookEvent) + 'static,
    ) -> ListenerId {
        self.emitter.once(point, callback)
    }

    /// Stop listening; without a handle, removes every listener for the
    /// point.
    pub fn off(&mut self, point: HookPoint, id: Option<ListenerId>) {
        self.emitter.off(point, id);
    }

    /// Invoked after every fired driver interval, after the face's own
    /// interval handling.
    pub fn set_interval_callback(&mut self, callback: impl Fn() + 'static) {
        self.interval_callback = Some(Rc::new(callback));
    }

    // ===== Hook dispatch =====

    /// Dispatch one hook point: the face's method first, then the emitter's
    /// listeners, in registration order.
    fn dispatch(&mut self, point: HookPoint, vnode: Option<Rc<VNode>>, now: Instant) {
        trace!(point = %point, cycle = self.cycle, "hook");
        {
            let mut ctx = FaceCtx {
                document: &mut self.document,
                root: self.root,
                timer: &self.timer,
                now,
            };
            match point {
                HookPoint::BeforeMount => self.face.before_mount(&mut ctx),
                HookPoint::Mounted => self.face.mounted(&mut ctx),
                HookPoint::BeforeCreate => self.face.before_create(&mut ctx),
                HookPoint::AfterCreate => {
                    if let Some(vnode) = vnode.as_deref() {
                        self.face.after_create(&mut ctx, vnode);
                    }
                }
                HookPoint::BeforeAnimation => {
                    if let Some(vnode) = vnode.as_deref() {
                        self.face.before_animation(&mut ctx, vnode);
                    }
                }
                HookPoint::AfterRender => {
                    if let Some(vnode) = vnode.as_deref() {
                        self.face.after_render(&mut ctx, vnode);
                    }
                }
                HookPoint::AfterAnimation => {
                    if let Some(vnode) = vnode.as_deref() {
                        self.face.after_animation(&mut ctx, vnode);
                    }
                }
                HookPoint::Interval => self.face.interval(&mut ctx),
                HookPoint::Started => self.face.started(&mut ctx),
                HookPoint::Stopped => self.face.stopped(&mut ctx),
                HookPoint::BeforeUnmount => self.face.before_unmount(&mut ctx),
                HookPoint::Unmounted => self.face.unmounted(&mut ctx),
            }
        }
        self.emitter.emit(&HookEvent {
            point,
            cycle: self.cycle,
            vnode,
        });
    }

    // ===== Mount / unmount =====

    /// Attach the clock to a node of its document and run the first render
    /// cycle. The tree is realized when the deferred reconcile executes on
    /// the next pump turn; with auto-start on, the driver starts on that
    /// turn too.
    pub fn mount(&mut self, target: NodeId, now: Instant) {
        self.target = Some(target);
        self.dispatch(HookPoint::BeforeMount, None, now);

        // Any change to the face's value flags a render for the next turn.
        let pending = self.render_pending.clone();
        self.face
            .state_mut()
            .watch(move |_, _| pending.set(true));

        self.render(now);
        self.dispatch(HookPoint::Mounted, None, now);

        if self.face.state().auto_start() && self.timer.is_stopped() {
            self.scheduler.defer(Step::StartDriver, self.cycle, now);
        }
        debug!(cycle = self.cycle, "mounted");
    }

    /// Detach from the mount point and release the face's cell
    /// subscriptions. Already-queued steps against the detached root become
    /// harmless no-ops when they run.
    pub fn unmount(&mut self, now: Instant) {
        self.dispatch(HookPoint::BeforeUnmount, None, now);
        self.timer.stop();
        if let Some(root) = self.root.take() {
            self.document.detach(root);
        }
        self.target = None;
        self.face.state_mut().reset_watchers();
        self.render_pending.set(false);
        self.dispatch(HookPoint::Unmounted, None, now);
        debug!("unmounted");
    }

    // ===== Driver control =====

    /// Start the periodic driver.
    pub fn start(&mut self, now: Instant) {
        if self.timer.is_running() {
            return;
        }
        self.timer.start(now);
        self.dispatch(HookPoint::Started, None, now);
    }

    /// Start the driver with a per-interval callback, invoked after the
    /// face's own interval handling on every firing.
    pub fn start_with(&mut self, now: Instant, callback: impl Fn() + 'static) {
        self.set_interval_callback(callback);
        self.start(now);
    }

    /// Stop the driver. Deferred render steps already queued still run.
    pub fn stop(&mut self, now: Instant) {
        if self.timer.is_stopped() {
            return;
        }
        self.timer.stop();
        self.dispatch(HookPoint::Stopped, None, now);
    }

    // ===== Render pipeline =====

    /// Run the synchronous half of one render cycle and defer the rest.
    fn render(&mut self, now: Instant) {
        self.cycle += 1;
        self.render_pending.set(false);
        debug!(cycle = self.cycle, "render cycle");

        self.phase = RenderPhase::BeforeCreate;
        self.dispatch(HookPoint::BeforeCreate, None, now);

        self.phase = RenderPhase::BuildTree;
        let vnode = Rc::new(self.face.render());

        self.phase = RenderPhase::AfterCreate;
        self.dispatch(HookPoint::AfterCreate, Some(vnode.clone()), now);

        self.phase = RenderPhase::BeforeAnimation;
        self.dispatch(HookPoint::BeforeAnimation, Some(vnode.clone()), now);

        self.scheduler
            .defer(Step::Reconcile(vnode), self.cycle, now);
        self.phase = RenderPhase::Idle;
    }

    /// Execute every scheduler step due at `now`. Steps a step enqueues
    /// while running wait for the next turn.
    fn pump(&mut self, now: Instant) {
        for entry in self.scheduler.take_due(now) {
            trace!(step = entry.step.name(), cycle = entry.cycle, "step");
            let cycle = entry.cycle;
            match entry.step {
                Step::Reconcile(vnode) => self.reconcile(vnode, cycle, now),
                Step::AfterRender(vnode) => {
                    self.phase = RenderPhase::AfterRender;
                    self.dispatch(HookPoint::AfterRender, Some(vnode), now);
                    self.phase = RenderPhase::Idle;
                }
                Step::AfterAnimation(vnode) => {
                    self.phase = RenderPhase::AfterAnimation;
                    self.dispatch(HookPoint::AfterAnimation, Some(vnode), now);
                    self.phase = RenderPhase::Idle;
                }
                Step::StartDriver => self.start(now),
            }
        }
    }

    /// Apply one cycle's tree to the output, then queue the trailing hooks.
    fn reconcile(&mut self, vnode: Rc<VNode>, cycle: u64, now: Instant) {
        self.phase = RenderPhase::Reconcile;
        match self.root {
            Some(root) => reconciler::patch(&mut self.document, &vnode, root),
            None => {
                let root = reconciler::realize(&mut self.document, &vnode);
                if let Some(target) = self.target {
                    self.document.append_child(target, root);
                }
            }
        }
        self.root = vnode.bound.get();
        self.phase = RenderPhase::Idle;

        self.scheduler
            .defer(Step::AfterRender(vnode.clone()), cycle, now);
        let rate = self.face.state().animation_rate();
        self.scheduler
            .defer_at(Step::AfterAnimation(vnode), cycle, now + rate);
    }

    // ===== Pump loop =====

    /// One frame-grained turn: poll the driver, render if the reactive
    /// state flagged one, then execute due deferred steps.
    pub fn tick(&mut self, now: Instant) {
        if self.timer.tick(now) {
            self.dispatch(HookPoint::Interval, None, now);
            if let Some(callback) = self.interval_callback.clone() {
                callback();
            }
        }
        if self.render_pending.get() {
            self.render(now);
        }
        self.pump(now);
    }

    /// Tick repeatedly at `now` until no due work remains. Each pass is one
    /// scheduling turn, so a step enqueued by a step runs on the next pass.
    pub fn flush(&mut self, now: Instant) {
        loop {
            if self.render_pending.get() {
                self.render(now);
            }
            let due = self
                .scheduler
                .next_due()
                .is_some_and(|due| due <= now);
            if !due && !self.render_pending.get() {
                break;
            }
            self.pump(now);
        }
    }

    /// Blocking convenience loop: tick on real time every `frame` until
    /// `total` has elapsed.
    pub fn run_for(&mut self, total: Duration, frame: Duration) {
        let started = Instant::now();
        loop {
            let now = Instant::now();
            if now.duration_since(started) >= total {
                break;
            }
            self.tick(now);
            std::thread::sleep(frame);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
