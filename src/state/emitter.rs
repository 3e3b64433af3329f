//! Lifecycle event emitter.
//!
//! External subscribers hook into the controller's lifecycle points through
//! this emitter. Dispatch order is fixed: the face's own hook method runs
//! first (it is entry zero of the ordered dispatch), then the listeners
//! registered here, in registration order.

use std::rc::Rc;

use crate::node::VNode;
use crate::types::HookPoint;

// =============================================================================
// Events and Listeners
// =============================================================================

/// Payload delivered to hook listeners.
#[derive(Clone)]
pub struct HookEvent {
    /// Which lifecycle point fired.
    pub point: HookPoint,
    /// The render cycle counter at dispatch time.
    pub cycle: u64,
    /// The cycle's vnode tree, for the points that carry one.
    pub vnode: Option<Rc<VNode>>,
}

/// Listener callback.
pub type HookListener = Rc<dyn Fn(&HookEvent)>;

/// Handle identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    point: HookPoint,
    callback: HookListener,
    once: bool,
}

// =============================================================================
// EventEmitter
// =============================================================================

/// Ordered listener registry keyed by [`HookPoint`].
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &mut self,
        point: HookPoint,
        callback: impl Fn(&HookEvent) + 'static,
        once: bool,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            point,
            callback: Rc::new(callback),
            once,
        });
        id
    }

    /// Start listening for a lifecycle point.
    pub fn on(&mut self, point: HookPoint, callback: impl Fn(&HookEvent) + 'static) -> ListenerId {
        self.register(point, callback, false)
    }

    /// Listen for a lifecycle point exactly once.
    pub fn once(&mut self, point: HookPoint, callback: impl Fn(&HookEvent) + 'static) -> ListenerId {
        self.register(point, callback, true)
    }

    /// Stop listening. With a listener handle, removes exactly that
    /// listener; without one, removes every listener for the point.
    pub fn off(&mut self, point: HookPoint, id: Option<ListenerId>) {
        self.listeners
            .retain(|l| l.point != point || id.is_some_and(|id| id != l.id));
    }

    /// Number of listeners registered for a point.
    pub fn listener_count(&self, point: HookPoint) -> usize {
        self.listeners.iter().filter(|l| l.point == point).count()
    }

    /// Fire an event: every listener for its point runs in registration
    /// order, from a snapshot taken before the first call; `once` listeners
    /// are dropped afterwards.
    pub fn emit(&mut self, event: &HookEvent) {
        let snapshot: Vec<(ListenerId, HookListener, bool)> = self
            .listeners
            .iter()
            .filter(|l| l.point == event.point)
            .map(|l| (l.id, l.callback.clone(), l.once))
            .collect();

        let mut spent = Vec::new();
        for (id, callback, once) in snapshot {
            callback(event);
            if once {
                spent.push(id);
            }
        }

        self.listeners.retain(|l| !spent.contains(&l.id));
    }
}

// =============================================================================
// Tests
// =============================================================================
