//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Event, EventOptions, State, StateOptions};
use crate::error::ConfigError;
use crate::host::Stateful;
use crate::machine::Machine;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::warn;

/// Builder for constructing machines with a fluent API.
///
/// Unlike registering directly on a [`Machine`], the builder reports every
/// configuration error at once instead of stopping at the first.
///
/// # Example
///
/// ```rust
/// use statehook::builder::MachineBuilder;
/// use statehook::{EventOptions, Stateful, StateValue, TransitionOptions, UnknownMethod};
/// use serde_json::{json, Value};
///
/// struct Light {
///     state: Value,
/// }
///
/// impl Stateful for Light {
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
/// let machine = MachineBuilder::<Light>::new()
///     .state("off")
///     .state("on")
///     .event("toggle", EventOptions::new(), |e| {
///         e.transition("off", "on", TransitionOptions::new())
///             .transition("on", "off", TransitionOptions::new());
///     })
///     .build()
///     .unwrap();
///
/// let mut light = Light { state: json!("off") };
/// assert!(machine.trigger_event(&mut light, "toggle", false, &[]).unwrap());
/// assert_eq!(light.state, json!("on"));
/// ```
pub struct MachineBuilder<O: Stateful> {
    config: MachineConfig,
    states: Vec<State<O>>,
    events: Vec<Event<O>>,
}

impl<O: Stateful> MachineBuilder<O> {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            config: MachineConfig::default(),
            states: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Replace all machine options.
    pub fn options(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the host attribute holding the state value.
    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.config.attribute = attribute.into();
        self
    }

    pub fn helpers(mut self, helpers: bool) -> Self {
        self.config.helpers = helpers;
        self
    }

    /// Add a state whose value is its label.
    pub fn state(self, label: impl Into<String>) -> Self {
        self.state_with(label, StateOptions::new())
    }

    /// Add a state with options.
    pub fn state_with(mut self, label: impl Into<String>, options: StateOptions<O>) -> Self {
        self.states.push(State::new(label, options));
        self
    }

    /// Add an event and describe its transitions in `define`.
    pub fn event<F>(mut self, label: impl Into<String>, options: EventOptions<O>, define: F) -> Self
    where
        F: FnOnce(&mut Event<O>),
    {
        let mut event = Event::new(label, options);
        define(&mut event);
        self.events.push(event);
        self
    }

    /// Check the whole definition, accumulating ALL configuration errors.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        for (i, state) in self.states.iter().enumerate() {
            let earlier = &self.states[..i];
            let check = if earlier.iter().any(|s| s.label() == state.label()) {
                Validation::fail(ConfigError::DuplicateState {
                    label: state.label().to_string(),
                })
            } else if let Some(existing) = earlier.iter().find(|s| s.value() == state.value()) {
                Validation::fail(ConfigError::DuplicateStateValue {
                    label: state.label().to_string(),
                    value: state.value().to_string(),
                    existing: existing.label().to_string(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        for (i, event) in self.events.iter().enumerate() {
            let check = if self.events[..i].iter().any(|e| e.label() == event.label()) {
                Validation::fail(ConfigError::DuplicateEvent {
                    label: event.label().to_string(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// Build the machine.
    /// Returns every configuration error if the definition is invalid.
    pub fn build(self) -> Result<Machine<O>, BuildError> {
        if let Validation::Failure(errors) = self.validate() {
            return Err(BuildError::Invalid {
                errors: errors.iter().cloned().collect(),
            });
        }
        self.warn_dangling_labels();

        let mut machine = Machine::new(self.config);
        for state in self.states {
            machine.insert_state(state)?;
        }
        for event in self.events {
            machine.insert_event(event)?;
        }
        Ok(machine)
    }

    /// Transitions naming unknown states are legal but can never run.
    fn warn_dangling_labels(&self) {
        let labels: HashSet<&str> = self.states.iter().map(State::label).collect();
        for event in &self.events {
            for transition in event.transitions() {
                for label in [transition.from(), transition.to()] {
                    if !labels.contains(label) {
                        warn!(
                            event = %event.label(),
                            state = %label,
                            "transition refers to an unregistered state"
                        );
                    }
                }
            }
        }
    }
}

impl<O: Stateful> Default for MachineBuilder<O> {
    fn default() -> Self {
        Self::new()
    }
}
