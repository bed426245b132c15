//! Per-instance view of a shared machine.

use super::Machine;
use crate::core::State;
use crate::host::{StateValue, Stateful};
use serde_json::Value;

/// A machine bound to a single host instance.
///
/// Forwards every call to the shared [`Machine`] with the bound object, so
/// callers do not have to thread both through their code.
pub struct MachineProxy<'a, O: Stateful> {
    machine: &'a Machine<O>,
    object: &'a mut O,
}

impl<'a, O: Stateful> MachineProxy<'a, O> {
    pub fn new(machine: &'a Machine<O>, object: &'a mut O) -> Self {
        Self { machine, object }
    }

    pub fn machine(&self) -> &'a Machine<O> {
        self.machine
    }

    pub fn object(&self) -> &O {
        &*self.object
    }

    pub fn current_state_value(&self) -> Option<StateValue> {
        self.machine.current_state_value(self.object)
    }

    pub fn current_state(&self) -> Option<&'a State<O>> {
        self.machine.current_state(self.object)
    }

    /// Jump to the state labeled `label` without running callbacks.
    ///
    /// Returns `false` if no such state is registered.
    pub fn set_state(&mut self, label: &str) -> bool {
        match self.machine.state(label) {
            Some(state) => {
                self.machine.set_state(self.object, state);
                true
            }
            None => false,
        }
    }

    pub fn is_in_state(&self, label: &str) -> bool {
        self.machine.is_in_state(self.object, label)
    }

    pub fn can_trigger_event(&self, label: &str, args: &[Value]) -> Result<bool, O::Error> {
        self.machine.can_trigger_event(self.object, label, args)
    }

    pub fn trigger_event(
        &mut self,
        label: &str,
        should_persist: bool,
        args: &[Value],
    ) -> Result<bool, O::Error> {
        self.machine
            .trigger_event(self.object, label, should_persist, args)
    }
}
