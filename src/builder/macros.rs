//! Macros for generating per-type accessor methods.

/// Generate state and event accessors on a host type.
///
/// The machine expression is evaluated on every call and may yield anything
/// that dereferences to a [`Machine`](crate::Machine) for the host type, such
/// as a `&'static Machine<T>` or an `Arc<Machine<T>>`.
///
/// For each state entry `is_x => "x"` the macro generates
/// `fn is_x(&self) -> bool`. For each event entry
/// `"go" => can_go, go, go_and_save` it generates
/// `fn can_go(&self, args)`, `fn go(&mut self, args)` and
/// `fn go_and_save(&mut self, args)`, the last one passing the persist hint.
///
/// # Example
///
/// ```
/// use statehook::builder::MachineBuilder;
/// use statehook::{machine_helpers, EventOptions, Machine, Stateful, StateValue,
///     TransitionOptions, UnknownMethod};
/// use serde_json::{json, Value};
/// use std::sync::OnceLock;
///
/// struct Door {
///     state: Value,
/// }
///
/// impl Stateful for Door {
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
/// fn door_machine() -> &'static Machine<Door> {
///     static MACHINE: OnceLock<Machine<Door>> = OnceLock::new();
///     MACHINE.get_or_init(|| {
///         MachineBuilder::<Door>::new()
///             .state("closed")
///             .state("open")
///             .event("open", EventOptions::new(), |e| {
///                 e.transition("closed", "open", TransitionOptions::new());
///             })
///             .build()
///             .expect("door machine is valid")
///     })
/// }
///
/// machine_helpers! {
///     impl Door => door_machine();
///     states {
///         is_closed => "closed",
///         is_open => "open",
///     }
///     events {
///         "open" => can_open, open, open_and_save;
///     }
/// }
///
/// let mut door = Door { state: json!("closed") };
/// assert!(door.is_closed());
/// assert!(door.can_open(&[]).unwrap());
/// assert!(door.open(&[]).unwrap());
/// assert!(door.is_open());
/// ```
#[macro_export]
macro_rules! machine_helpers {
    (
        impl $host:ty => $machine:expr;
        $(states {
            $($is_fn:ident => $state:literal),* $(,)?
        })?
        $(events {
            $($event:literal => $can_fn:ident, $trigger_fn:ident, $save_fn:ident);* $(;)?
        })?
    ) => {
        impl $host {
            $($(
                #[allow(dead_code)]
                pub fn $is_fn(&self) -> bool {
                    let machine = $machine;
                    machine.is_in_state(self, $state)
                }
            )*)?

            $($(
                #[allow(dead_code)]
                pub fn $can_fn(
                    &self,
                    args: &[$crate::StateValue],
                ) -> ::core::result::Result<bool, <$host as $crate::Stateful>::Error> {
                    let machine = $machine;
                    machine.can_trigger_event(self, $event, args)
                }

                #[allow(dead_code)]
                pub fn $trigger_fn(
                    &mut self,
                    args: &[$crate::StateValue],
                ) -> ::core::result::Result<bool, <$host as $crate::Stateful>::Error> {
                    let machine = $machine;
                    machine.trigger_event(self, $event, false, args)
                }

                #[allow(dead_code)]
                pub fn $save_fn(
                    &mut self,
                    args: &[$crate::StateValue],
                ) -> ::core::result::Result<bool, <$host as $crate::Stateful>::Error> {
                    let machine = $machine;
                    machine.trigger_event(self, $event, true, args)
                }
            )*)?
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{EventOptions, StateOptions, TransitionOptions};
    use crate::error::UnknownMethod;
    use crate::host::{StateValue, Stateful};
    use crate::machine::{Machine, MachineRegistry};
    use serde_json::{json, Value};
    use std::sync::Arc;

    struct Kettle {
        state: Value,
        water: bool,
    }

    impl Stateful for Kettle {
        type Error = UnknownMethod;

        fn read_state(&self, _attribute: &str) -> Option<StateValue> {
            Some(self.state.clone())
        }

        fn write_state(&mut self, _attribute: &str, value: StateValue) {
            self.state = value;
        }

        fn call_guard(&self, name: &str, _args: &[Value]) -> Result<bool, Self::Error> {
            match name {
                "has_water" => Ok(self.water),
                _ => Err(UnknownMethod::new(name)),
            }
        }
    }

    fn kettle_machine() -> Arc<Machine<Kettle>> {
        let registry = MachineRegistry::global();
        if let Some(machine) = registry.get::<Kettle>() {
            return machine;
        }

        let mut machine: Machine<Kettle> = Machine::default();
        machine.add_state("cold", StateOptions::new().value(0)).unwrap();
        machine.add_state("boiling", StateOptions::new().value(100)).unwrap();
        machine
            .add_event("boil", EventOptions::new())
            .unwrap()
            .transition("cold", "boiling", TransitionOptions::new().guard("has_water"));
        registry.register(machine)
    }

    machine_helpers! {
        impl Kettle => kettle_machine();
        states {
            is_cold => "cold",
            is_boiling => "boiling"
        }
        events {
            "boil" => can_boil, boil, boil_and_save
        }
    }

    #[test]
    fn generated_helpers_drive_the_machine() {
        let mut kettle = Kettle {
            state: json!(0),
            water: false,
        };

        assert!(kettle.is_cold());
        assert!(!kettle.can_boil(&[]).unwrap());
        assert!(!kettle.boil(&[]).unwrap());

        kettle.water = true;
        assert!(kettle.can_boil(&[]).unwrap());
        assert!(kettle.boil_and_save(&[]).unwrap());
        assert!(kettle.is_boiling());
        assert_eq!(kettle.state, json!(100));
    }
}
