use crate::automaton::state::StateId;
use crate::automaton::symbol::Symbol;

/// Structural problems reported by graph mutations.
///
/// None of these leave the graph in a partially modified state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AutomatonError {
    #[error("state {0} is not part of the automaton")]
    UnknownState(StateId),
    #[error("transition {from} --{symbol}--> {to} already exists")]
    DuplicateTransition {
        from: StateId,
        to: StateId,
        symbol: Symbol,
    },
    #[error("symbol text {0:?} contains no usable character")]
    InvalidSymbol(String),
    #[error("unknown role {0:?}")]
    InvalidRole(String),
    #[error("no {0} ids left in this automaton")]
    IdsExhausted(&'static str),
}
