//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder that validates a whole machine
//! definition at once, and a macro that generates typed accessors on host
//! types in place of runtime method injection.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::MachineBuilder;
