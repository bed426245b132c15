//! The machine: registration surface and triggering protocol.
//!
//! A [`Machine`] is defined once per host type and shared by every
//! instance of that type. It keeps no per-object data: the current state
//! lives in the host's state attribute and is read on every call.

use crate::config::MachineConfig;
use crate::core::{Event, EventOptions, State, StateOptions};
use crate::error::ConfigError;
use crate::host::{StateValue, Stateful};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

mod proxy;
mod registry;

pub use proxy::MachineProxy;
pub use registry::MachineRegistry;

/// States and events bound to one host type.
///
/// # Example
///
/// ```rust
/// use statehook::{EventOptions, Machine, MachineConfig, StateOptions, Stateful, StateValue,
///     TransitionOptions, UnknownMethod};
/// use serde_json::{json, Value};
///
/// struct Motor {
///     status: Value,
/// }
///
/// impl Stateful for Motor {
///     type Error = UnknownMethod;
///
///     fn read_state(&self, _attribute: &str) -> Option<StateValue> {
///         Some(self.status.clone())
///     }
///
///     fn write_state(&mut self, _attribute: &str, value: StateValue) {
///         self.status = value;
///     }
/// }
///
/// let mut machine = Machine::new(MachineConfig::default().with_attribute("status"));
/// machine.add_state("stopped", StateOptions::new().value(1)).unwrap();
/// machine.add_state("running", StateOptions::new().value(2)).unwrap();
/// machine
///     .add_event("start", EventOptions::new())
///     .unwrap()
///     .transition("stopped", "running", TransitionOptions::new());
///
/// let mut motor = Motor { status: json!(1) };
/// assert!(machine.can_trigger_event(&motor, "start", &[]).unwrap());
/// assert!(machine.trigger_event(&mut motor, "start", false, &[]).unwrap());
/// assert_eq!(motor.status, json!(2));
/// ```
pub struct Machine<O: Stateful> {
    config: MachineConfig,
    states: HashMap<String, State<O>>,
    events: HashMap<String, Event<O>>,
}

impl<O: Stateful> Machine<O> {
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            states: HashMap::new(),
            events: HashMap::new(),
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Name of the host attribute holding the current state value.
    pub fn attribute(&self) -> &str {
        &self.config.attribute
    }

    pub fn helpers_enabled(&self) -> bool {
        self.config.helpers
    }

    /// Register a state.
    ///
    /// Labels and values must both be unique within the machine.
    pub fn add_state(
        &mut self,
        label: impl Into<String>,
        options: StateOptions<O>,
    ) -> Result<&mut State<O>, ConfigError> {
        self.insert_state(State::new(label, options))
    }

    pub(crate) fn insert_state(&mut self, state: State<O>) -> Result<&mut State<O>, ConfigError> {
        if self.states.contains_key(state.label()) {
            return Err(ConfigError::DuplicateState {
                label: state.label().to_string(),
            });
        }
        if let Some(existing) = self.states.values().find(|s| s.value() == state.value()) {
            return Err(ConfigError::DuplicateStateValue {
                label: state.label().to_string(),
                value: state.value().to_string(),
                existing: existing.label().to_string(),
            });
        }

        debug!(state = %state.label(), value = %state.value(), "registered state");
        let label = state.label().to_string();
        Ok(self.states.entry(label).or_insert(state))
    }

    /// Register an event and return it so transitions can be added.
    pub fn add_event(
        &mut self,
        label: impl Into<String>,
        options: EventOptions<O>,
    ) -> Result<&mut Event<O>, ConfigError> {
        self.insert_event(Event::new(label, options))
    }

    pub(crate) fn insert_event(&mut self, event: Event<O>) -> Result<&mut Event<O>, ConfigError> {
        if self.events.contains_key(event.label()) {
            return Err(ConfigError::DuplicateEvent {
                label: event.label().to_string(),
            });
        }

        debug!(event = %event.label(), "registered event");
        let label = event.label().to_string();
        Ok(self.events.entry(label).or_insert(event))
    }

    pub fn state(&self, label: &str) -> Option<&State<O>> {
        self.states.get(label)
    }

    pub fn state_mut(&mut self, label: &str) -> Option<&mut State<O>> {
        self.states.get_mut(label)
    }

    pub fn states(&self) -> impl Iterator<Item = &State<O>> {
        self.states.values()
    }

    pub fn event(&self, label: &str) -> Option<&Event<O>> {
        self.events.get(label)
    }

    /// Reopen an event to append transitions or hooks.
    pub fn event_mut(&mut self, label: &str) -> Option<&mut Event<O>> {
        self.events.get_mut(label)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event<O>> {
        self.events.values()
    }

    /// Raw value of the host's state attribute.
    pub fn current_state_value(&self, obj: &O) -> Option<StateValue> {
        obj.read_state(&self.config.attribute)
    }

    /// State whose value matches the host's state attribute.
    pub fn current_state(&self, obj: &O) -> Option<&State<O>> {
        let value = self.current_state_value(obj)?;
        self.states.values().find(|state| state.value() == &value)
    }

    /// Write `state`'s value into the host without firing any callbacks.
    pub fn set_state(&self, obj: &mut O, state: &State<O>) {
        obj.write_state(&self.config.attribute, state.value().clone());
    }

    /// Whether the host currently sits in the state labeled `label`.
    pub fn is_in_state(&self, obj: &O, label: &str) -> bool {
        match (self.states.get(label), self.current_state_value(obj)) {
            (Some(state), Some(value)) => state.value() == &value,
            _ => false,
        }
    }

    /// Whether triggering `label` would select a transition.
    ///
    /// Evaluates guards only; no callback runs and the host is untouched.
    /// Unknown events answer `false`.
    pub fn can_trigger_event(&self, obj: &O, label: &str, args: &[Value]) -> Result<bool, O::Error> {
        let Some(event) = self.events.get(label) else {
            return Ok(false);
        };
        event.can_be_triggered(obj, self.current_state(obj), args)
    }

    /// Trigger `label` on the host.
    ///
    /// Returns `Ok(false)` without side effects when the event is unknown,
    /// no transition is eligible, or the destination state is not
    /// registered. Otherwise runs, in order: the event's before hooks, the
    /// old state's exit hooks, the state write, the transition's hooks, the
    /// new state's enter hooks and the event's after hooks.
    ///
    /// `should_persist` is a hint for the caller's persistence layer and
    /// does not change the outcome. Host errors propagate as-is; an error
    /// raised after the state write leaves the host transitioned.
    pub fn trigger_event(
        &self,
        obj: &mut O,
        label: &str,
        should_persist: bool,
        args: &[Value],
    ) -> Result<bool, O::Error> {
        let Some(event) = self.events.get(label) else {
            debug!(event = %label, "ignoring unknown event");
            return Ok(false);
        };

        let Some(old_state) = self.current_state(obj) else {
            debug!(event = %label, "host is not in a registered state");
            return Ok(false);
        };

        let Some(transition) = event.first_available_transition(obj, Some(old_state), args)?
        else {
            debug!(event = %label, from = %old_state.label(), "no eligible transition");
            return Ok(false);
        };

        let Some(new_state) = self.states.get(transition.to()) else {
            warn!(
                event = %label,
                to = %transition.to(),
                "transition targets an unregistered state"
            );
            return Ok(false);
        };

        event.fire_before_callbacks(obj, args)?;
        old_state.fire_on_exit(obj, args)?;
        self.set_state(obj, new_state);
        transition.execute(obj, args)?;
        new_state.fire_on_enter(obj, args)?;
        event.fire_after_callbacks(obj, args)?;

        debug!(
            event = %label,
            from = %old_state.label(),
            to = %new_state.label(),
            persist = should_persist,
            "transition committed"
        );
        Ok(true)
    }

    /// Bind the machine to one host instance.
    pub fn bind<'a>(&'a self, obj: &'a mut O) -> MachineProxy<'a, O> {
        MachineProxy::new(self, obj)
    }
}

impl<O: Stateful> Default for Machine<O> {
    fn default() -> Self {
        Self::new(MachineConfig::default())
    }
}

impl<O: Stateful> fmt::Debug for Machine<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("config", &self.config)
            .field("states", &self.states)
            .field("events", &self.events)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Callback, TransitionOptions};
    use crate::error::UnknownMethod;
    use serde_json::json;

    #[derive(Default)]
    struct Valve {
        position: Value,
        log: String,
    }

    impl Stateful for Valve {
        type Error = UnknownMethod;

        fn read_state(&self, attribute: &str) -> Option<StateValue> {
            (attribute == "position").then(|| self.position.clone())
        }

        fn write_state(&mut self, attribute: &str, value: StateValue) {
            if attribute == "position" {
                self.position = value;
            }
        }
    }

    fn machine() -> Machine<Valve> {
        let mut machine: Machine<Valve> =
            Machine::new(MachineConfig::default().with_attribute("position"));
        machine.add_state("shut", StateOptions::new()).unwrap();
        machine.add_state("open", StateOptions::new()).unwrap();
        machine
            .add_event("turn", EventOptions::new())
            .unwrap()
            .transition("shut", "open", TransitionOptions::new());
        machine
    }

    #[test]
    fn duplicate_state_label_is_rejected() {
        let mut machine = machine();
        let err = machine.add_state("shut", StateOptions::new()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateState {
                label: "shut".to_string()
            }
        );
    }

    #[test]
    fn duplicate_state_value_is_rejected() {
        let mut machine = machine();
        let err = machine
            .add_state("closed", StateOptions::new().value("shut"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateStateValue { ref existing, .. } if existing == "shut"
        ));
        assert!(machine.state("closed").is_none());
    }

    #[test]
    fn duplicate_event_is_rejected() {
        let mut machine = machine();
        assert!(matches!(
            machine.add_event("turn", EventOptions::new()),
            Err(ConfigError::DuplicateEvent { .. })
        ));
    }

    #[test]
    fn current_state_reads_configured_attribute() {
        let machine = machine();
        let valve = Valve {
            position: json!("open"),
            ..Valve::default()
        };

        assert_eq!(machine.attribute(), "position");
        assert_eq!(machine.current_state(&valve).unwrap().label(), "open");
        assert!(machine.is_in_state(&valve, "open"));
        assert!(!machine.is_in_state(&valve, "shut"));
        assert!(!machine.is_in_state(&valve, "missing"));
    }

    #[test]
    fn unknown_value_has_no_current_state() {
        let machine = machine();
        let valve = Valve {
            position: json!("half"),
            ..Valve::default()
        };

        assert!(machine.current_state(&valve).is_none());
        assert!(!machine.can_trigger_event(&valve, "turn", &[]).unwrap());
    }

    #[test]
    fn set_state_skips_callbacks() {
        let mut machine = machine();
        machine
            .state_mut("open")
            .unwrap()
            .add_on_enter(Callback::new(|v: &mut Valve, _args: &[Value]| {
                v.log.push_str("entered")
            }));

        let mut valve = Valve::default();
        let open = machine.state("open").unwrap();
        machine.set_state(&mut valve, open);

        assert_eq!(valve.position, json!("open"));
        assert!(valve.log.is_empty());
    }

    #[test]
    fn event_can_be_reopened() {
        let mut machine = machine();
        machine
            .event_mut("turn")
            .unwrap()
            .transition("open", "shut", TransitionOptions::new());

        let mut valve = Valve {
            position: json!("shut"),
            ..Valve::default()
        };
        assert!(machine.trigger_event(&mut valve, "turn", false, &[]).unwrap());
        assert!(machine.trigger_event(&mut valve, "turn", false, &[]).unwrap());
        assert_eq!(valve.position, json!("shut"));
    }

    #[test]
    fn unregistered_destination_fails_before_callbacks() {
        let mut machine = machine();
        machine
            .add_event("vent", EventOptions::new().before(Callback::new(
                |v: &mut Valve, _args: &[Value]| v.log.push_str("before"),
            )))
            .unwrap()
            .transition("shut", "nowhere", TransitionOptions::new());

        let mut valve = Valve {
            position: json!("shut"),
            ..Valve::default()
        };
        assert!(machine.can_trigger_event(&valve, "vent", &[]).unwrap());
        assert!(!machine.trigger_event(&mut valve, "vent", false, &[]).unwrap());
        assert_eq!(valve.position, json!("shut"));
        assert!(valve.log.is_empty());
    }

    #[test]
    fn machine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Machine<Valve>>();
    }
}
