//! Machine-level options.

use serde::{Deserialize, Serialize};

/// Default name of the host attribute holding the current state value.
pub const DEFAULT_STATE_ATTRIBUTE: &str = "state";

/// Options applied to a whole machine.
///
/// Deserializes from the same shape the registration surface accepts:
/// `{"attribute": "status", "helpers": false}`. Missing keys keep their
/// defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Host attribute read and written by the machine.
    pub attribute: String,

    /// Whether generated accessor helpers are wanted for the host type.
    /// The engine behaves identically either way.
    pub helpers: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            attribute: DEFAULT_STATE_ATTRIBUTE.to_string(),
            helpers: true,
        }
    }
}

impl MachineConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    pub fn with_helpers(mut self, helpers: bool) -> Self {
        self.helpers = helpers;
        self
    }
}
