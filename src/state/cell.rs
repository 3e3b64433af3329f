//! Reactive value cell.
//!
//! Wraps one value and fans out to subscribers on structural change:
//! `get`, `assign`, `watch`, with change detection by deep value equality
//! rather than write interception.
//!
//! Notification passes snapshot the watcher list first, so a watcher removed
//! from inside a callback still runs for the pass already in flight.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

// =============================================================================
// Cell Internals
// =============================================================================

struct Watcher<T> {
    id: u64,
    callback: Rc<dyn Fn(&T, &T)>,
}

struct CellInner<T> {
    value: T,
    watchers: Vec<Watcher<T>>,
    next_id: u64,
}

// =============================================================================
// ReactiveCell
// =============================================================================

/// A value holder with change-detecting subscriber notification.
///
/// Cloning the handle shares the same cell; distinct cells never share
/// subscriber state. Watchers receive `(new, old)` on every assignment whose
/// value differs structurally from the current one; assigning an equal value
/// notifies nobody.
pub struct ReactiveCell<T> {
    inner: Rc<RefCell<CellInner<T>>>,
}

impl<T> Clone for ReactiveCell<T> {
    fn clone(&self) -> Self {
        ReactiveCell {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + 'static> ReactiveCell<T> {
    /// Wrap an initial value.
    pub fn new(value: T) -> Self {
        ReactiveCell {
            inner: Rc::new(RefCell::new(CellInner {
                value,
                watchers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Read the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the wrapped value.
    ///
    /// Never fails; any value is acceptable. When the new value is
    /// structurally equal to the current one, no notification occurs -
    /// normal operation, not an error.
    pub fn assign(&self, value: T) {
        let (old, new, callbacks) = {
            let mut inner = self.inner.borrow_mut();
            if inner.value == value {
                return;
            }
            let old = std::mem::replace(&mut inner.value, value.clone());
            // Snapshot so removal during notification cannot affect this pass.
            let callbacks: Vec<Rc<dyn Fn(&T, &T)>> = inner
                .watchers
                .iter()
                .map(|w| w.callback.clone())
                .collect();
            (old, value, callbacks)
        };

        for callback in callbacks {
            callback(&new, &old);
        }
    }

    /// Register a subscriber; returns a handle that removes exactly that
    /// subscriber. Invoking the handle more than once is a no-op.
    pub fn watch(&self, callback: impl Fn(&T, &T) + 'static) -> Unwatch<T> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.watchers.push(Watcher {
            id,
            callback: Rc::new(callback),
        });
        Unwatch {
            cell: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered subscribers.
    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }
}

// =============================================================================
// Unwatch Handle
// =============================================================================

/// Unsubscribe handle returned by [`ReactiveCell::watch`].
pub struct Unwatch<T> {
    cell: Weak<RefCell<CellInner<T>>>,
    id: u64,
}

impl<T> Unwatch<T> {
    /// Remove the subscriber this handle was issued for. Subsequent calls
    /// are no-ops, as is calling after the cell itself is gone.
    pub fn unwatch(&self) {
        if let Some(inner) = self.cell.upgrade() {
            inner.borrow_mut().watchers.retain(|w| w.id != self.id);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
