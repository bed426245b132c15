//! Events and first-match transition selection.

use super::callback::{invoke_all, Callback};
use super::state::State;
use super::transition::{Transition, TransitionOptions};
use crate::host::Stateful;
use serde_json::Value;
use std::fmt;

/// Registration options for an [`Event`].
pub struct EventOptions<O: Stateful> {
    pub before: Vec<Callback<O>>,
    pub after: Vec<Callback<O>>,
}

impl<O: Stateful> EventOptions<O> {
    pub fn new() -> Self {
        Self {
            before: Vec::new(),
            after: Vec::new(),
        }
    }

    pub fn before(mut self, callback: impl Into<Callback<O>>) -> Self {
        self.before.push(callback.into());
        self
    }

    pub fn after(mut self, callback: impl Into<Callback<O>>) -> Self {
        self.after.push(callback.into());
        self
    }
}

impl<O: Stateful> Default for EventOptions<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// A named trigger owning an ordered list of transitions.
///
/// Transitions are matched in registration order and the first eligible
/// one wins, so order them from the most specific guard to the catch-all.
pub struct Event<O: Stateful> {
    label: String,
    transitions: Vec<Transition<O>>,
    before: Vec<Callback<O>>,
    after: Vec<Callback<O>>,
}

impl<O: Stateful> Event<O> {
    pub fn new(label: impl Into<String>, options: EventOptions<O>) -> Self {
        Self {
            label: label.into(),
            transitions: Vec::new(),
            before: options.before,
            after: options.after,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn transitions(&self) -> &[Transition<O>] {
        &self.transitions
    }

    /// Append a transition from a single source state.
    pub fn transition(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        options: TransitionOptions<O>,
    ) -> &mut Self {
        self.transitions.push(Transition::new(from, to, options));
        self
    }

    /// Append one transition per source state, all sharing `to` and
    /// `options`.
    pub fn transitions_from<I, S>(
        &mut self,
        from: I,
        to: impl Into<String>,
        options: TransitionOptions<O>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let to = to.into();
        for source in from {
            self.transitions
                .push(Transition::new(source, to.clone(), options.clone()));
        }
        self
    }

    pub fn add_before(&mut self, callback: impl Into<Callback<O>>) -> &mut Self {
        self.before.push(callback.into());
        self
    }

    pub fn add_after(&mut self, callback: impl Into<Callback<O>>) -> &mut Self {
        self.after.push(callback.into());
        self
    }

    /// First transition leaving `current` whose guards all pass.
    ///
    /// Candidates are tried in registration order. An absent current state
    /// matches nothing.
    pub fn first_available_transition(
        &self,
        obj: &O,
        current: Option<&State<O>>,
        args: &[Value],
    ) -> Result<Option<&Transition<O>>, O::Error> {
        let Some(current) = current else {
            return Ok(None);
        };
        let candidates = self
            .transitions
            .iter()
            .filter(|t| t.from() == current.label());
        for transition in candidates {
            if transition.can_execute(obj, args)? {
                return Ok(Some(transition));
            }
        }
        Ok(None)
    }

    pub fn can_be_triggered(
        &self,
        obj: &O,
        current: Option<&State<O>>,
        args: &[Value],
    ) -> Result<bool, O::Error> {
        Ok(self
            .first_available_transition(obj, current, args)?
            .is_some())
    }

    pub fn fire_before_callbacks(&self, obj: &mut O, args: &[Value]) -> Result<bool, O::Error> {
        invoke_all(&self.before, obj, args)
    }

    pub fn fire_after_callbacks(&self, obj: &mut O, args: &[Value]) -> Result<bool, O::Error> {
        invoke_all(&self.after, obj, args)
    }
}

impl<O: Stateful> fmt::Debug for Event<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("label", &self.label)
            .field("transitions", &self.transitions)
            .field("before", &self.before)
            .field("after", &self.after)
            .finish()
    }
}
