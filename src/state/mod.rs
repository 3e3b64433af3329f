//! Reactive state and event glue.
//!
//! - [`ReactiveCell`] - change-detecting value holder with subscriber fan-out
//! - [`EventEmitter`] - typed lifecycle event dispatch for external listeners

mod cell;
mod emitter;

pub use cell::{ReactiveCell, Unwatch};
pub use emitter::{EventEmitter, HookEvent, HookListener, ListenerId};
