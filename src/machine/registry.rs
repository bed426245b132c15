//! Lookup from a host type to its machine.
//!
//! Machines are registered once, when a host type is set up, and read many
//! times afterwards. [`MachineRegistry::global`] is the process-wide
//! instance; tests and embedders can create isolated registries with
//! [`MachineRegistry::new`].

use super::Machine;
use crate::host::Stateful;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tracing::{debug, warn};

type ErasedMachine = Arc<dyn Any + Send + Sync>;

/// Registry of machines keyed by host type.
#[derive(Default)]
pub struct MachineRegistry {
    machines: RwLock<HashMap<TypeId, ErasedMachine>>,
}

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static MachineRegistry {
        static GLOBAL: OnceLock<MachineRegistry> = OnceLock::new();
        GLOBAL.get_or_init(MachineRegistry::new)
    }

    /// Register the machine for `O`, replacing any previous one.
    pub fn register<O>(&self, machine: Machine<O>) -> Arc<Machine<O>>
    where
        O: Stateful + 'static,
    {
        let machine = Arc::new(machine);
        let erased: ErasedMachine = machine.clone();
        let type_name = std::any::type_name::<O>();

        let mut machines = self.machines.write().unwrap_or_else(PoisonError::into_inner);
        if machines.insert(TypeId::of::<O>(), erased).is_some() {
            warn!(host = type_name, "replaced existing machine registration");
        } else {
            debug!(host = type_name, "registered machine");
        }
        machine
    }

    /// Machine registered for `O`, if any.
    pub fn get<O>(&self) -> Option<Arc<Machine<O>>>
    where
        O: Stateful + 'static,
    {
        let machines = self.machines.read().unwrap_or_else(PoisonError::into_inner);
        let erased = machines.get(&TypeId::of::<O>())?.clone();
        erased.downcast::<Machine<O>>().ok()
    }

    pub fn contains<O>(&self) -> bool
    where
        O: Stateful + 'static,
    {
        self.machines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&TypeId::of::<O>())
    }

    /// Remove the machine registered for `O`.
    pub fn unregister<O>(&self) -> Option<Arc<Machine<O>>>
    where
        O: Stateful + 'static,
    {
        let erased = self
            .machines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&TypeId::of::<O>())?;
        erased.downcast::<Machine<O>>().ok()
    }

    pub fn len(&self) -> usize {
        self.machines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
