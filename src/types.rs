//! Core types for flipclock.
//!
//! These types define the foundation that everything builds on: the value a
//! face displays, the named lifecycle hook points, and the per-cycle render
//! phase markers.

use std::fmt;

use chrono::NaiveDateTime;

// =============================================================================
// Display Value
// =============================================================================

/// A value a clock face can display.
///
/// Faces wrap one of these in a [`FaceValue`](crate::FaceValue); the digitizer
/// turns it into an ordered list of single-character digit strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A signed integer (counters).
    Int(i64),
    /// An arbitrary string (pre-formatted values).
    Str(String),
    /// A timestamp (clock and elapsed-time faces).
    Time(NaiveDateTime),
    /// A nested sequence of values (grouped displays).
    List(Vec<Value>),
}

impl Value {
    /// True if this value is a sequence.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// The integer payload, if this value is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The timestamp payload, if this value is one.
    pub fn as_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Time(t) => write!(f, "{}", t.format("%Y-%m-%d %H:%M:%S")),
            Value::List(items) => {
                for item in items {
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(t: NaiveDateTime) -> Self {
        Value::Time(t)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

// =============================================================================
// Lifecycle Hook Points
// =============================================================================

/// The named lifecycle points of the clock controller and render pipeline.
///
/// Every hook point dual-dispatches: the face's same-named method runs first,
/// then external listeners registered on the controller's emitter, always in
/// that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookPoint {
    BeforeMount,
    Mounted,
    BeforeCreate,
    AfterCreate,
    BeforeAnimation,
    AfterRender,
    AfterAnimation,
    Interval,
    Started,
    Stopped,
    BeforeUnmount,
    Unmounted,
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HookPoint::BeforeMount => "beforeMount",
            HookPoint::Mounted => "mounted",
            HookPoint::BeforeCreate => "beforeCreate",
            HookPoint::AfterCreate => "afterCreate",
            HookPoint::BeforeAnimation => "beforeAnimation",
            HookPoint::AfterRender => "afterRender",
            HookPoint::AfterAnimation => "afterAnimation",
            HookPoint::Interval => "interval",
            HookPoint::Started => "started",
            HookPoint::Stopped => "stopped",
            HookPoint::BeforeUnmount => "beforeUnmount",
            HookPoint::Unmounted => "unmounted",
        };
        write!(f, "{name}")
    }
}

// =============================================================================
// Render Phases
// =============================================================================

/// The phase markers of one render cycle, in execution order.
///
/// `BeforeCreate` through `BeforeAnimation` run synchronously within one
/// turn; `Reconcile` and `AfterRender` run on following scheduler turns;
/// `AfterAnimation` runs after the face's animation rate has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Idle,
    BeforeCreate,
    BuildTree,
    AfterCreate,
    BeforeAnimation,
    Reconcile,
    AfterRender,
    AfterAnimation,
}

/// The class name marking a live node as currently animating.
///
/// The default `BeforeAnimation` hook strips it from every live node so the
/// next reconcile can re-trigger CSS transitions reliably.
pub const ANIMATE_CLASS: &str = "animate";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display() {
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Str("ab".into()).to_string(), "ab");
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Int(2)]).to_string(),
            "12"
        );
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(7), Value::Int(7));
        assert_eq!(Value::from("x"), Value::Str("x".into()));
        assert!(Value::from(vec![Value::Int(1)]).is_list());
    }
}
