//! Core machine model.
//!
//! This module contains the pieces a machine is assembled from:
//! - `State`: labeled, valued nodes with enter/exit hooks
//! - `Event`: named triggers with first-match transition selection
//! - `Transition`: guarded edges with on-transition hooks
//! - `Guard` and `Callback`: the predicate and hook shapes
//!
//! None of these types hold a reference to the machine or to a host
//! object; both are passed in on every call.

mod callback;
mod event;
mod guard;
mod state;
mod transition;

pub use callback::{Callback, CallbackFn};
pub use event::{Event, EventOptions};
pub use guard::{Guard, Predicate};
pub use state::{State, StateOptions};
pub use transition::{Transition, TransitionOptions};
