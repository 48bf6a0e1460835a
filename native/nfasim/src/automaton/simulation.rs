//! Acceptance check by on-the-fly subset simulation.
//!
//! The current set of active states is tracked directly; no DFA is built.

use crate::automaton::graph::AutomatonGraph;
use crate::automaton::state::{Role, StateSet};
use std::fmt;
use tracing::trace;

/// The outcome of running an input through the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Accepted,
    Rejected,
    /// No state has the `Initial` role, so nothing could be simulated.
    NoInitialState,
}

impl Verdict {
    pub fn is_accepted(self) -> bool {
        self == Verdict::Accepted
    }

    pub fn message(self) -> &'static str {
        match self {
            Verdict::Accepted => "accepted",
            Verdict::Rejected => "rejected",
            Verdict::NoInitialState => "no initial state configured",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Compute the epsilon closure of a set of states using DFS.
pub fn epsilon_closure(graph: &AutomatonGraph, states: &StateSet) -> StateSet {
    let mut closure = states.clone();
    let mut stack: Vec<_> = states.iter().collect();

    while let Some(s) = stack.pop() {
        for t in graph.outgoing(s) {
            if t.symbol().is_epsilon() && closure.insert(t.target()) {
                stack.push(t.target());
            }
        }
    }

    closure
}

/// Consume `c` from every state in `states`, then close over epsilon moves.
pub fn step(graph: &AutomatonGraph, states: &StateSet, c: char) -> StateSet {
    let mut reached = StateSet::with_capacity(graph.capacity_hint());

    for state in states.iter() {
        reached.extend(
            graph
                .outgoing(state)
                .iter()
                .filter(|t| t.symbol().matches(c))
                .map(|t| t.target()),
        );
    }

    epsilon_closure(graph, &reached)
}

/// Decide whether the automaton accepts `input`.
pub fn run(graph: &AutomatonGraph, input: &str) -> Verdict {
    let initial = graph.states_with_role(Role::Initial);
    if initial.is_empty() {
        return Verdict::NoInitialState;
    }

    let mut current = epsilon_closure(graph, &initial);
    for c in input.chars() {
        if current.is_empty() {
            break;
        }
        current = step(graph, &current, c);
        trace!(symbol = %c, active = ?current, "stepped");
    }

    if current.intersects(&graph.states_with_role(Role::Final)) {
        Verdict::Accepted
    } else {
        Verdict::Rejected
    }
}

/// The active state sets while consuming `input`.
///
/// Element 0 is the closure of the initial states and element `i` is the set
/// after the `i`-th character, so the result has one more entry than `input`
/// has characters. Returns `None` when there is no initial state.
pub fn trace(graph: &AutomatonGraph, input: &str) -> Option<Vec<StateSet>> {
    let initial = graph.states_with_role(Role::Initial);
    if initial.is_empty() {
        return None;
    }

    let mut sets = Vec::with_capacity(input.chars().count() + 1);
    sets.push(epsilon_closure(graph, &initial));
    for c in input.chars() {
        let next = sets
            .last()
            .map(|current| step(graph, current, c))
            .unwrap_or_default();
        sets.push(next);
    }
    Some(sets)
}
