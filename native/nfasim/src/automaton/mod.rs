//! Editable epsilon-NFA and its acceptance check.
//!
//! This module provides:
//! - An arena-backed automaton graph whose mutations never leave dangling
//!   transitions
//! - Epsilon closure and on-the-fly subset simulation
//! - Edge label grouping for front ends that draw the graph
//! - PyO3 bindings for Python front ends (feature `python`)

mod error;
mod graph;
mod labels;
#[cfg(feature = "python")]
mod python_bindings;
mod simulation;
mod state;
mod symbol;

pub use error::AutomatonError;
pub use graph::{AutomatonGraph, State, Transition, TransitionId};
pub use labels::{format_label, group_labels};
#[cfg(feature = "python")]
pub use python_bindings::automaton;
pub use simulation::{Verdict, epsilon_closure, run, step, trace};
pub use state::{Role, StateId, StateSet};
pub use symbol::{EPSILON, EPSILON_CHAR, Symbol, sanitize_input};
