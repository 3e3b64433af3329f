//! Built-in clock faces.
//!
//! Three ready-made [`Face`](crate::face::Face) implementations: a manual or
//! timed [`Counter`], a wall-clock [`ClockFace`], and a duration-formatted
//! [`ElapsedTime`] stopwatch/countdown.

mod clock;
mod counter;
mod elapsed;

pub use clock::ClockFace;
pub use counter::Counter;
pub use elapsed::ElapsedTime;
