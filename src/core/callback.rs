//! Lifecycle callbacks attached to states, events and transitions.

use crate::host::Stateful;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Boxed callback body. Receives the host object and the extra trigger
/// arguments.
pub type CallbackFn<O> =
    Arc<dyn Fn(&mut O, &[Value]) -> Result<(), <O as Stateful>::Error> + Send + Sync>;

/// A callback registered on a lifecycle hook.
///
/// Callbacks come in three shapes: a method exposed by the host object, a
/// closure, or an ordered group of either. Groups are dispatched
/// recursively, in order.
///
/// # Example
///
/// ```rust
/// use statehook::{Callback, Stateful, StateValue, UnknownMethod};
/// use serde_json::{json, Value};
///
/// #[derive(Default)]
/// struct Lamp {
///     state: Value,
///     flips: usize,
/// }
///
/// impl Stateful for Lamp {
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
/// let count = Callback::new(|lamp: &mut Lamp, _args: &[Value]| lamp.flips += 1);
/// let both = Callback::group([count.clone(), count]);
///
/// let mut lamp = Lamp::default();
/// assert!(both.invoke(&mut lamp, &[json!("ignored")]).unwrap());
/// assert_eq!(lamp.flips, 2);
/// ```
pub enum Callback<O: Stateful> {
    /// Call a method on the host object by name.
    Method(String),

    /// Call a closure with the host object.
    Function(CallbackFn<O>),

    /// Dispatch each member in order.
    Group(Vec<Callback<O>>),
}

impl<O: Stateful> Callback<O> {
    /// Wrap an infallible closure.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&mut O, &[Value]) + Send + Sync + 'static,
    {
        Callback::Function(Arc::new(move |obj: &mut O, args: &[Value]| {
            callback(obj, args);
            Ok::<(), O::Error>(())
        }))
    }

    /// Wrap a closure whose errors propagate to the trigger caller.
    pub fn try_new<F>(callback: F) -> Self
    where
        F: Fn(&mut O, &[Value]) -> Result<(), O::Error> + Send + Sync + 'static,
    {
        Callback::Function(Arc::new(callback))
    }

    /// Refer to a host method by name.
    pub fn method(name: impl Into<String>) -> Self {
        Callback::Method(name.into())
    }

    /// Group callbacks so they dispatch as one, in order.
    pub fn group(callbacks: impl IntoIterator<Item = Callback<O>>) -> Self {
        Callback::Group(callbacks.into_iter().collect())
    }

    /// Dispatch this callback.
    ///
    /// Returns whether anything fired. An empty group fires nothing.
    pub fn invoke(&self, obj: &mut O, args: &[Value]) -> Result<bool, O::Error> {
        match self {
            Callback::Method(name) => {
                trace!(method = %name, "invoking host method callback");
                obj.call_method(name, args)?;
                Ok(true)
            }
            Callback::Function(callback) => {
                callback(obj, args)?;
                Ok(true)
            }
            Callback::Group(callbacks) => invoke_all(callbacks, obj, args),
        }
    }
}

/// Dispatch a callback list in registration order, stopping at the first
/// error.
pub(crate) fn invoke_all<O: Stateful>(
    callbacks: &[Callback<O>],
    obj: &mut O,
    args: &[Value],
) -> Result<bool, O::Error> {
    let mut fired = false;
    for callback in callbacks {
        fired |= callback.invoke(obj, args)?;
    }
    Ok(fired)
}

impl<O: Stateful> Clone for Callback<O> {
    fn clone(&self) -> Self {
        match self {
            Callback::Method(name) => Callback::Method(name.clone()),
            Callback::Function(callback) => Callback::Function(Arc::clone(callback)),
            Callback::Group(callbacks) => Callback::Group(callbacks.clone()),
        }
    }
}

impl<O: Stateful> fmt::Debug for Callback<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callback::Method(name) => f.debug_tuple("Method").field(name).finish(),
            Callback::Function(_) => f.write_str("Function(..)"),
            Callback::Group(callbacks) => f.debug_tuple("Group").field(callbacks).finish(),
        }
    }
}

impl<O: Stateful> From<&str> for Callback<O> {
    fn from(name: &str) -> Self {
        Callback::method(name)
    }
}

impl<O: Stateful> From<String> for Callback<O> {
    fn from(name: String) -> Self {
        Callback::Method(name)
    }
}

impl<O: Stateful> From<Vec<Callback<O>>> for Callback<O> {
    fn from(callbacks: Vec<Callback<O>>) -> Self {
        Callback::Group(callbacks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UnknownMethod;
    use crate::host::StateValue;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        state: Value,
        log: Vec<String>,
    }

    impl Stateful for Recorder {
        type Error = UnknownMethod;

        fn read_state(&self, _attribute: &str) -> Option<StateValue> {
            Some(self.state.clone())
        }

        fn write_state(&mut self, _attribute: &str, value: StateValue) {
            self.state = value;
        }

        fn call_method(&mut self, name: &str, args: &[Value]) -> Result<(), Self::Error> {
            match name {
                "note" => {
                    self.log.push(format!("note{}", args.len()));
                    Ok(())
                }
                _ => Err(UnknownMethod::new(name)),
            }
        }
    }

    fn push(tag: &'static str) -> Callback<Recorder> {
        Callback::new(move |r: &mut Recorder, _args: &[Value]| r.log.push(tag.to_string()))
    }

    #[test]
    fn closure_receives_object_and_args() {
        let callback = Callback::new(|r: &mut Recorder, args: &[Value]| {
            r.log.push(args[0].to_string());
        });

        let mut recorder = Recorder::default();
        assert!(callback.invoke(&mut recorder, &[json!(7)]).unwrap());
        assert_eq!(recorder.log, vec!["7"]);
    }

    #[test]
    fn method_dispatches_to_host() {
        let callback: Callback<Recorder> = "note".into();

        let mut recorder = Recorder::default();
        callback.invoke(&mut recorder, &[json!(1), json!(2)]).unwrap();
        assert_eq!(recorder.log, vec!["note2"]);
    }

    #[test]
    fn unknown_method_propagates() {
        let callback: Callback<Recorder> = Callback::method("missing");

        let mut recorder = Recorder::default();
        let err = callback.invoke(&mut recorder, &[]).unwrap_err();
        assert_eq!(err, UnknownMethod::new("missing"));
    }

    #[test]
    fn nested_groups_preserve_order() {
        let callback = Callback::group([
            push("a"),
            Callback::group([push("b"), "note".into()]),
            push("c"),
        ]);

        let mut recorder = Recorder::default();
        callback.invoke(&mut recorder, &[]).unwrap();
        assert_eq!(recorder.log, vec!["a", "b", "note0", "c"]);
    }

    #[test]
    fn empty_group_fires_nothing() {
        let callback: Callback<Recorder> = Callback::group([]);

        let mut recorder = Recorder::default();
        assert!(!callback.invoke(&mut recorder, &[]).unwrap());
    }

    #[test]
    fn error_stops_remaining_callbacks() {
        let callbacks = vec![push("a"), Callback::method("missing"), push("b")];

        let mut recorder = Recorder::default();
        assert!(invoke_all(&callbacks, &mut recorder, &[]).is_err());
        assert_eq!(recorder.log, vec!["a"]);
    }
}
