//! Configuration and dispatch errors.
//!
//! Unmet runtime preconditions (unknown event, no eligible transition,
//! unregistered destination) are not errors: they surface as `Ok(false)`.

use thiserror::Error;

/// Errors raised while registering states and events.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("State '{label}' is already registered")]
    DuplicateState { label: String },

    #[error("State '{label}' reuses value {value} already held by state '{existing}'")]
    DuplicateStateValue {
        label: String,
        value: String,
        existing: String,
    },

    #[error("Event '{label}' is already registered")]
    DuplicateEvent { label: String },
}

/// A guard or callback named a method the host object does not expose.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Host object has no method '{name}'")]
pub struct UnknownMethod {
    pub name: String,
}

impl UnknownMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
