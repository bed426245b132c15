//! Guarded edges between two state labels.

use super::callback::{invoke_all, Callback};
use super::guard::Guard;
use crate::host::Stateful;
use serde_json::Value;
use std::fmt;

/// Registration options for a [`Transition`].
///
/// Cloned once per source label when a transition is registered from
/// several states at once.
pub struct TransitionOptions<O: Stateful> {
    pub guards: Vec<Guard<O>>,
    pub on_transition: Vec<Callback<O>>,
}

impl<O: Stateful> TransitionOptions<O> {
    pub fn new() -> Self {
        Self {
            guards: Vec::new(),
            on_transition: Vec::new(),
        }
    }

    /// Append a guard. All guards must pass for the transition to run.
    pub fn guard(mut self, guard: impl Into<Guard<O>>) -> Self {
        self.guards.push(guard.into());
        self
    }

    /// Append several guards, keeping their order.
    pub fn guards<G>(mut self, guards: impl IntoIterator<Item = G>) -> Self
    where
        G: Into<Guard<O>>,
    {
        self.guards.extend(guards.into_iter().map(Into::into));
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(&O, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    pub fn on_transition(mut self, callback: impl Into<Callback<O>>) -> Self {
        self.on_transition.push(callback.into());
        self
    }
}

impl<O: Stateful> Default for TransitionOptions<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Stateful> Clone for TransitionOptions<O> {
    fn clone(&self) -> Self {
        Self {
            guards: self.guards.clone(),
            on_transition: self.on_transition.clone(),
        }
    }
}

/// A directed edge from one state label to another.
///
/// Selection and commit are separate: [`can_execute`](Self::can_execute)
/// only evaluates guards, [`execute`](Self::execute) only fires the
/// on-transition callbacks. Writing the new state value is the machine's job.
pub struct Transition<O: Stateful> {
    from: String,
    to: String,
    guards: Vec<Guard<O>>,
    on_transition: Vec<Callback<O>>,
}

impl<O: Stateful> Transition<O> {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        options: TransitionOptions<O>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            guards: options.guards,
            on_transition: options.on_transition,
        }
    }

    /// Source state label.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Destination state label.
    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn guards(&self) -> &[Guard<O>] {
        &self.guards
    }

    /// Evaluate every guard in order, stopping at the first that fails.
    ///
    /// A transition without guards is always eligible.
    pub fn can_execute(&self, obj: &O, args: &[Value]) -> Result<bool, O::Error> {
        for guard in &self.guards {
            if !guard.check(obj, args)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fire the on-transition callbacks.
    pub fn execute(&self, obj: &mut O, args: &[Value]) -> Result<bool, O::Error> {
        invoke_all(&self.on_transition, obj, args)
    }
}

impl<O: Stateful> fmt::Debug for Transition<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guards", &self.guards)
            .field("on_transition", &self.on_transition)
            .finish()
    }
}
