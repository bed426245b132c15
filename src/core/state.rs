//! States registered on a machine.
//!
//! A state pairs a label with the value written into the host object's
//! state attribute. Lookups from a host object go through the value, so
//! values must be unique within a machine.

use super::callback::{invoke_all, Callback};
use crate::host::{StateValue, Stateful};
use serde_json::Value;
use std::fmt;

/// Registration options for a [`State`].
pub struct StateOptions<O: Stateful> {
    /// Value stored on the host. Defaults to the label as a JSON string.
    pub value: Option<StateValue>,
    pub on_enter: Vec<Callback<O>>,
    pub on_exit: Vec<Callback<O>>,
}

impl<O: Stateful> StateOptions<O> {
    pub fn new() -> Self {
        Self {
            value: None,
            on_enter: Vec::new(),
            on_exit: Vec::new(),
        }
    }

    /// Store `value` on the host instead of the label.
    pub fn value(mut self, value: impl Into<StateValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn on_enter(mut self, callback: impl Into<Callback<O>>) -> Self {
        self.on_enter.push(callback.into());
        self
    }

    pub fn on_exit(mut self, callback: impl Into<Callback<O>>) -> Self {
        self.on_exit.push(callback.into());
        self
    }
}

impl<O: Stateful> Default for StateOptions<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// A named, valued node of a machine.
///
/// # Example
///
/// ```rust
/// use statehook::{State, StateOptions, Stateful, StateValue, UnknownMethod};
/// use serde_json::{json, Value};
///
/// struct Pump {
///     state: Value,
/// }
///
/// impl Stateful for Pump {
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
/// let idle: State<Pump> = State::new("idle", StateOptions::new());
/// assert_eq!(idle.value(), &json!("idle"));
///
/// let running: State<Pump> = State::new("running", StateOptions::new().value(2));
/// assert_eq!(running.value(), &json!(2));
/// ```
pub struct State<O: Stateful> {
    label: String,
    value: StateValue,
    on_enter: Vec<Callback<O>>,
    on_exit: Vec<Callback<O>>,
}

impl<O: Stateful> State<O> {
    pub fn new(label: impl Into<String>, options: StateOptions<O>) -> Self {
        let label = label.into();
        let value = options
            .value
            .unwrap_or_else(|| Value::String(label.clone()));
        Self {
            label,
            value,
            on_enter: options.on_enter,
            on_exit: options.on_exit,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Value written into the host's state attribute.
    pub fn value(&self) -> &StateValue {
        &self.value
    }

    /// Append an on-enter callback.
    pub fn add_on_enter(&mut self, callback: impl Into<Callback<O>>) -> &mut Self {
        self.on_enter.push(callback.into());
        self
    }

    /// Append an on-exit callback.
    pub fn add_on_exit(&mut self, callback: impl Into<Callback<O>>) -> &mut Self {
        self.on_exit.push(callback.into());
        self
    }

    /// Run the on-enter callbacks in registration order.
    ///
    /// Returns whether any callback fired.
    pub fn fire_on_enter(&self, obj: &mut O, args: &[Value]) -> Result<bool, O::Error> {
        invoke_all(&self.on_enter, obj, args)
    }

    /// Run the on-exit callbacks in registration order.
    ///
    /// Returns whether any callback fired.
    pub fn fire_on_exit(&self, obj: &mut O, args: &[Value]) -> Result<bool, O::Error> {
        invoke_all(&self.on_exit, obj, args)
    }
}

impl<O: Stateful> fmt::Debug for State<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("label", &self.label)
            .field("value", &self.value)
            .field("on_enter", &self.on_enter)
            .field("on_exit", &self.on_exit)
            .finish()
    }
}
