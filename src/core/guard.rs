//! Guard predicates for controlling transitions.
//!
//! Guards decide whether a transition is eligible for a given host object
//! and call arguments. They only ever see the object by shared reference.

use crate::host::Stateful;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Boxed guard body.
pub type Predicate<O> =
    Arc<dyn Fn(&O, &[Value]) -> Result<bool, <O as Stateful>::Error> + Send + Sync>;

/// Predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use statehook::{Guard, Stateful, StateValue, UnknownMethod};
/// use serde_json::{json, Value};
///
/// struct Tank {
///     state: Value,
///     fuel: u32,
/// }
///
/// impl Stateful for Tank {
///     type Error = UnknownMethod;
///
///     fn read_state(&self, _attribute: &str) -> Option<StateValue> {
///         Some(self.state.clone())
///     }
///
///     fn write_state(&mut self, _attribute: &str, value: StateValue) {
///         self.state = value;
///     }
/// }
///
/// let has_fuel = Guard::new(|tank: &Tank, _args: &[Value]| tank.fuel > 0);
///
/// let tank = Tank { state: json!("parked"), fuel: 3 };
/// assert!(has_fuel.check(&tank, &[]).unwrap());
/// ```
pub enum Guard<O: Stateful> {
    /// Ask the host object through a named method.
    Method(String),

    /// Evaluate a closure.
    Predicate(Predicate<O>),
}

impl<O: Stateful> Guard<O> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O, &[Value]) -> bool + Send + Sync + 'static,
    {
        Guard::Predicate(Arc::new(move |obj: &O, args: &[Value]| {
            Ok::<bool, O::Error>(predicate(obj, args))
        }))
    }

    /// Create a guard whose errors propagate to the caller.
    pub fn try_new<F>(predicate: F) -> Self
    where
        F: Fn(&O, &[Value]) -> Result<bool, O::Error> + Send + Sync + 'static,
    {
        Guard::Predicate(Arc::new(predicate))
    }

    /// Refer to a host guard method by name.
    pub fn method(name: impl Into<String>) -> Self {
        Guard::Method(name.into())
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, obj: &O, args: &[Value]) -> Result<bool, O::Error> {
        match self {
            Guard::Method(name) => obj.call_guard(name, args),
            Guard::Predicate(predicate) => predicate(obj, args),
        }
    }
}

impl<O: Stateful> Clone for Guard<O> {
    fn clone(&self) -> Self {
        match self {
            Guard::Method(name) => Guard::Method(name.clone()),
            Guard::Predicate(predicate) => Guard::Predicate(Arc::clone(predicate)),
        }
    }
}

impl<O: Stateful> fmt::Debug for Guard<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::Method(name) => f.debug_tuple("Method").field(name).finish(),
            Guard::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl<O: Stateful> From<&str> for Guard<O> {
    fn from(name: &str) -> Self {
        Guard::method(name)
    }
}

impl<O: Stateful> From<String> for Guard<O> {
    fn from(name: String) -> Self {
        Guard::Method(name)
    }
}
