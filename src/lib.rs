//! Statehook: declarative state machines for plain host objects
//!
//! A [`Machine`] is defined once per host type and shared by all of its
//! instances. Host objects keep their current state in an ordinary
//! attribute; the machine reads that attribute, picks the first eligible
//! transition for an event, and drives the object through a fixed sequence
//! of lifecycle callbacks.
//!
//! # Core Concepts
//!
//! - **State**: a label plus the value stored on the host, with enter/exit hooks
//! - **Event**: a named trigger owning ordered transitions, with before/after hooks
//! - **Transition**: a guarded edge between two state labels
//! - **Guard**: a predicate over the host object and the trigger arguments
//! - **Callback**: a host method name, a closure, or an ordered group of both
//!
//! # Triggering
//!
//! A successful trigger always runs, in this order: the event's `before`
//! hooks, the old state's `on_exit` hooks, the state write, the
//! transition's `on_transition` hooks, the new state's `on_enter` hooks and
//! the event's `after` hooks. When nothing can fire the call returns
//! `Ok(false)` and no hook runs.
//!
//! # Example
//!
//! ```rust
//! use statehook::builder::MachineBuilder;
//! use statehook::{Callback, EventOptions, StateOptions, Stateful, StateValue,
//!     TransitionOptions, UnknownMethod};
//! use serde_json::{json, Value};
//!
//! #[derive(Default)]
//! struct Player {
//!     state: Value,
//!     log: Vec<String>,
//! }
//!
//! impl Stateful for Player {
//!     type Error = UnknownMethod;
//!
//!     fn read_state(&self, _attribute: &str) -> Option<StateValue> {
//!         Some(self.state.clone())
//!     }
//!
//!     fn write_state(&mut self, _attribute: &str, value: StateValue) {
//!         self.state = value;
//!     }
//! }
//!
//! fn note(tag: &'static str) -> Callback<Player> {
//!     Callback::new(move |p: &mut Player, _args: &[Value]| p.log.push(tag.to_string()))
//! }
//!
//! let machine = MachineBuilder::<Player>::new()
//!     .state_with("stopped", StateOptions::new().value(1).on_exit(note("exit")))
//!     .state_with("playing", StateOptions::new().value(2).on_enter(note("enter")))
//!     .event("play", EventOptions::new().before(note("before")), |e| {
//!         e.transition("stopped", "playing", TransitionOptions::new());
//!     })
//!     .build()
//!     .unwrap();
//!
//! let mut player = Player { state: json!(1), ..Player::default() };
//! assert!(machine.trigger_event(&mut player, "play", false, &[]).unwrap());
//! assert_eq!(player.state, json!(2));
//! assert_eq!(player.log, vec!["before", "exit", "enter"]);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod host;
pub mod machine;

// Re-export commonly used types
pub use crate::core::{
    Callback, Event, EventOptions, Guard, State, StateOptions, Transition, TransitionOptions,
};
pub use config::MachineConfig;
pub use error::{ConfigError, UnknownMethod};
pub use host::{StateValue, Stateful};
pub use machine::{Machine, MachineProxy, MachineRegistry};
