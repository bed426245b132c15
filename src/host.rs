//! The boundary between the engine and the objects it drives.
//!
//! The engine never owns host objects. It reads and writes a single state
//! attribute and dispatches named guards and callbacks through the
//! [`Stateful`] trait.

use crate::error::UnknownMethod;
use serde_json::Value;

/// Value stored in a host object's state attribute.
pub type StateValue = Value;

/// A host object that can be driven by a [`Machine`](crate::Machine).
///
/// Only `read_state` and `write_state` are required. Hosts that register
/// guards or callbacks by method name override `call_guard` and
/// `call_method`; the defaults report [`UnknownMethod`].
///
/// # Example
///
/// ```rust
/// use statehook::{Stateful, StateValue, UnknownMethod};
/// use serde_json::Value;
///
/// struct Door {
///     status: Value,
///     locked: bool,
/// }
///
/// impl Stateful for Door {
///     type Error = UnknownMethod;
///
///     fn read_state(&self, attribute: &str) -> Option<StateValue> {
///         (attribute == "status").then(|| self.status.clone())
///     }
///
///     fn write_state(&mut self, attribute: &str, value: StateValue) {
///         if attribute == "status" {
///             self.status = value;
///         }
///     }
///
///     fn call_guard(&self, name: &str, _args: &[Value]) -> Result<bool, Self::Error> {
///         match name {
///             "is_unlocked" => Ok(!self.locked),
///             _ => Err(UnknownMethod::new(name)),
///         }
///     }
/// }
/// ```
pub trait Stateful {
    /// Error raised by host guards and callbacks.
    type Error: From<UnknownMethod>;

    /// Read the attribute holding the current state value.
    fn read_state(&self, attribute: &str) -> Option<StateValue>;

    /// Overwrite the attribute holding the current state value.
    fn write_state(&mut self, attribute: &str, value: StateValue);

    /// Evaluate a guard registered by method name.
    fn call_guard(&self, name: &str, _args: &[Value]) -> Result<bool, Self::Error> {
        Err(UnknownMethod::new(name).into())
    }

    /// Run a callback registered by method name.
    fn call_method(&mut self, name: &str, _args: &[Value]) -> Result<(), Self::Error> {
        Err(UnknownMethod::new(name).into())
    }
}
