//! Build errors for machine builders.

use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Machine definition is invalid ({} error(s)): {}", .errors.len(), summary(.errors))]
    Invalid { errors: Vec<ConfigError> },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BuildError {
    /// Every configuration error behind this failure.
    pub fn errors(&self) -> Vec<ConfigError> {
        match self {
            BuildError::Invalid { errors } => errors.clone(),
            BuildError::Config(err) => vec![err.clone()],
        }
    }
}

fn summary(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
