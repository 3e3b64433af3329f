//! Render pipeline plumbing.
//!
//! - [`Scheduler`] - the explicit phase scheduler holding deferred render
//!   steps as named, inspectable entries
//! - [`Timer`] - the frame-polling periodic driver

mod scheduler;
mod timer;

pub use scheduler::{ScheduledStep, Scheduler, Step};
pub use timer::Timer;
