//! # flipclock
//!
//! A flip-clock widget engine: declarative node trees, a positional
//! reconciler over a pluggable output surface, reactive face state, and a
//! deterministic render-phase pipeline driven by explicit instants.
//!
//! ## Architecture
//!
//! ```text
//! Face (reactive value) --> h() vnode tree --> reconciler --> Document
//!        ^                                                       |
//!        '-- Timer interval <-- FlipClock tick/pump loop <-------'
//! ```
//!
//! A [`Face`] owns a [`ReactiveCell`] holding its [`FaceValue`] and renders
//! a [`VNode`] tree from it each cycle. The [`FlipClock`] controller watches
//! the cell, runs the render phases in order, and applies the tree to the
//! live [`Document`] through the positional reconciler. All deferred work
//! flows through the phase [`Scheduler`], and all time arrives as explicit
//! [`std::time::Instant`]s, so every lifecycle is reproducible under test.
//!
//! ## Quick start
//!
//! ```
//! use std::time::{Duration, Instant};
//! use flipclock::{Counter, FlipClock, OutputSurface};
//!
//! let mut clock = FlipClock::builder()
//!     .face(Counter::new(0))
//!     .interval(Duration::from_millis(100))
//!     .build()
//!     .expect("a counter face is set");
//!
//! let now = Instant::now();
//! let target = clock.document_mut().create_element("div");
//! clock.mount(target, now);
//! clock.flush(now);
//!
//! let root = clock.root().expect("realized on the first flush");
//! assert!(clock.document().has_class(root, "flip-clock"));
//! ```

pub mod clock;
pub mod components;
pub mod digitize;
pub mod dom;
pub mod duration;
pub mod error;
pub mod face;
pub mod face_value;
pub mod faces;
pub mod node;
pub mod pipeline;
pub mod reconciler;
pub mod state;
pub mod types;

pub use clock::{FlipClock, FlipClockBuilder};
pub use components::{Card, CardItem, Divider, Group, Label};
pub use digitize::{DigitizeOptions, digitize};
pub use dom::{Document, MutationCounters, NodeId, OutputSurface};
pub use duration::Duration;
pub use error::ClockError;
pub use face::{Face, FaceCtx, FaceState};
pub use face_value::FaceValue;
pub use faces::{ClockFace, Counter, ElapsedTime};
pub use node::{Attr, Child, NodeKind, Renderable, VNode, component, h, h_component};
pub use pipeline::{Scheduler, Step, Timer};
pub use state::{EventEmitter, HookEvent, ListenerId, ReactiveCell, Unwatch};
pub use types::{ANIMATE_CLASS, HookPoint, RenderPhase, Value};
