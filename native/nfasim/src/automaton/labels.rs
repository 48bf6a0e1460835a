//! Edge labels for drawing the graph.
//!
//! Several transitions between the same pair of states are drawn as one
//! arrow; this groups their symbols. Nothing here affects acceptance.

use crate::automaton::graph::AutomatonGraph;
use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;
use indexmap::IndexMap;

/// Symbols of every transition, keyed by `(source, target)` in the order
/// each pair first appears.
pub fn group_labels(graph: &AutomatonGraph) -> IndexMap<(StateId, StateId), Vec<Symbol>> {
    let mut labels: IndexMap<(StateId, StateId), Vec<Symbol>> = IndexMap::new();

    for (source, transition) in graph.transitions() {
        labels
            .entry((source, transition.target()))
            .or_default()
            .push(transition.symbol());
    }

    labels
}

pub fn format_label(symbols: &[Symbol]) -> String {
    symbols
        .iter()
        .map(Symbol::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
