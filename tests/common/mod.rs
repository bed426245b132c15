//! Shared host type for integration tests.

#![allow(dead_code)]

use serde_json::Value;
use statehook::{StateValue, Stateful, UnknownMethod};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Unknown(#[from] UnknownMethod),

    #[error("Model refused '{0}'")]
    Refused(String),
}

/// A record-like host with a `status` attribute and a few named methods.
#[derive(Debug, Default)]
pub struct Model {
    pub status: Value,
    pub transition_can_happen: bool,
    pub trail: String,
    pub calls: Vec<String>,
    pub seen_args: Vec<Vec<Value>>,
}

impl Model {
    pub fn in_status(status: impl Into<Value>) -> Self {
        Self {
            status: status.into(),
            ..Self::default()
        }
    }
}

impl Stateful for Model {
    type Error = ModelError;

    fn read_state(&self, attribute: &str) -> Option<StateValue> {
        match attribute {
            "status" => Some(self.status.clone()),
            _ => None,
        }
    }

    fn write_state(&mut self, attribute: &str, value: StateValue) {
        if attribute == "status" {
            self.status = value;
        }
    }

    fn call_guard(&self, name: &str, _args: &[Value]) -> Result<bool, Self::Error> {
        match name {
            "check_condition" => Ok(self.transition_can_happen),
            _ => Err(UnknownMethod::new(name).into()),
        }
    }

    fn call_method(&mut self, name: &str, args: &[Value]) -> Result<(), Self::Error> {
        match name {
            "record" | "notify" => {
                self.calls.push(name.to_string());
                self.seen_args.push(args.to_vec());
                Ok(())
            }
            "explode" => Err(ModelError::Refused(name.to_string())),
            _ => Err(UnknownMethod::new(name).into()),
        }
    }
}
