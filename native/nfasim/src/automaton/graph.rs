//! The editable automaton graph.
//!
//! States live in an arena indexed by [`StateId`]. Deleted slots are left
//! empty and never handed out again, so a transition target either resolves
//! to a live state or the transition has already been removed.

use crate::automaton::error::AutomatonError;
use crate::automaton::simulation::{self, Verdict};
use crate::automaton::state::{Role, StateId, StateSet};
use crate::automaton::symbol::Symbol;
use tracing::{debug, trace};

/// A transition identifier, unique for the lifetime of a graph.
pub type TransitionId = u32;

/// An outgoing edge of a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    id: TransitionId,
    symbol: Symbol,
    target: StateId,
}

impl Transition {
    pub fn id(&self) -> TransitionId {
        self.id
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn target(&self) -> StateId {
        self.target
    }
}

/// A state and the transitions it owns, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct State {
    role: Role,
    outgoing: Vec<Transition>,
}

impl State {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn outgoing(&self) -> &[Transition] {
        &self.outgoing
    }
}

/// An epsilon-NFA under construction.
#[derive(Debug, Clone, Default)]
pub struct AutomatonGraph {
    /// State arena; `None` marks a deleted state
    slots: Vec<Option<State>>,
    /// Number of live states
    live: usize,
    next_transition: TransitionId,
}

impl AutomatonGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with room for `capacity` states.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Add a `Normal` state with no transitions.
    ///
    /// # Panics
    ///
    /// Panics once `u32::MAX` states have been created over the graph's
    /// lifetime; see [`AutomatonGraph::try_create_state`].
    pub fn create_state(&mut self) -> StateId {
        match self.try_create_state() {
            Ok(id) => id,
            Err(err) => panic!("{err}"),
        }
    }

    /// Add a `Normal` state, failing when every state id has been used.
    pub fn try_create_state(&mut self) -> Result<StateId, AutomatonError> {
        let id = StateId::try_from(self.slots.len())
            .ok()
            .filter(|&id| id != StateId::MAX)
            .ok_or(AutomatonError::IdsExhausted("state"))?;
        self.slots.push(Some(State::default()));
        self.live += 1;
        debug!(state = id, "created state");
        Ok(id)
    }

    /// Remove a state along with every transition pointing at it.
    ///
    /// Returns `false` when `id` is not a live state, in which case nothing
    /// changes.
    pub fn delete_state(&mut self, id: StateId) -> bool {
        let Some(slot) = self.slots.get_mut(id as usize) else {
            trace!(state = id, "delete of unknown state ignored");
            return false;
        };
        if slot.take().is_none() {
            trace!(state = id, "delete of removed state ignored");
            return false;
        }
        self.live -= 1;

        let mut removed = 0;
        for state in self.slots.iter_mut().flatten() {
            let before = state.outgoing.len();
            state.outgoing.retain(|t| t.target != id);
            removed += before - state.outgoing.len();
        }
        debug!(state = id, removed_transitions = removed, "deleted state");
        true
    }

    /// Overwrite the role of a state, returning the previous role.
    ///
    /// No check is made on how many states share a role.
    pub fn set_role(&mut self, id: StateId, role: Role) -> Option<Role> {
        let Some(state) = self.state_mut(id) else {
            trace!(state = id, %role, "role change of unknown state ignored");
            return None;
        };
        let previous = std::mem::replace(&mut state.role, role);
        debug!(state = id, from = %previous, to = %role, "changed role");
        Some(previous)
    }

    /// Add a transition, or return `None` if either state is unknown or the
    /// same transition already exists.
    pub fn create_transition(
        &mut self,
        from: StateId,
        to: StateId,
        symbol: Symbol,
    ) -> Option<TransitionId> {
        self.try_create_transition(from, to, symbol).ok()
    }

    /// Add a transition, reporting why nothing was added.
    pub fn try_create_transition(
        &mut self,
        from: StateId,
        to: StateId,
        symbol: Symbol,
    ) -> Result<TransitionId, AutomatonError> {
        if !self.contains(to) {
            trace!(from, to, %symbol, "transition to unknown state ignored");
            return Err(AutomatonError::UnknownState(to));
        }
        let id = self.next_transition;
        let next = id
            .checked_add(1)
            .ok_or(AutomatonError::IdsExhausted("transition"))?;
        let state = self
            .state_mut(from)
            .ok_or(AutomatonError::UnknownState(from))?;

        if state
            .outgoing
            .iter()
            .any(|t| t.target == to && t.symbol == symbol)
        {
            trace!(from, to, %symbol, "duplicate transition ignored");
            return Err(AutomatonError::DuplicateTransition { from, to, symbol });
        }

        state.outgoing.push(Transition {
            id,
            symbol,
            target: to,
        });
        self.next_transition = next;
        debug!(transition = id, from, to, %symbol, "created transition");
        Ok(id)
    }

    /// Normalize `text` with [`Symbol::normalize`] and add the transition.
    pub fn create_transition_from_text(
        &mut self,
        from: StateId,
        to: StateId,
        text: &str,
    ) -> Result<TransitionId, AutomatonError> {
        let symbol = Symbol::normalize(text)?;
        self.try_create_transition(from, to, symbol)
    }

    pub fn contains(&self, id: StateId) -> bool {
        self.state(id).is_some()
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    fn state_mut(&mut self, id: StateId) -> Option<&mut State> {
        self.slots.get_mut(id as usize).and_then(Option::as_mut)
    }

    pub fn role(&self, id: StateId) -> Option<Role> {
        self.state(id).map(State::role)
    }

    /// Outgoing transitions of a state; empty for an unknown id.
    pub fn outgoing(&self, id: StateId) -> &[Transition] {
        self.state(id).map(State::outgoing).unwrap_or_default()
    }

    /// Live states in creation order.
    pub fn states(&self) -> impl Iterator<Item = StateId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| i as StateId)
    }

    /// Every transition in the graph with its source state.
    pub fn transitions(&self) -> impl Iterator<Item = (StateId, &Transition)> + '_ {
        self.slots.iter().enumerate().flat_map(|(i, slot)| {
            slot.iter()
                .flat_map(|state| state.outgoing.iter())
                .map(move |t| (i as StateId, t))
        })
    }

    pub fn states_with_role(&self, role: Role) -> StateSet {
        let mut set = StateSet::with_capacity(self.capacity_hint());
        set.extend(self.states().filter(|&id| self.role(id) == Some(role)));
        set
    }

    /// Position of a live state among the live states, as shown in labels
    /// like `q0`, `q1`.
    pub fn display_index(&self, id: StateId) -> Option<usize> {
        self.states().position(|s| s == id)
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Upper bound on state ids handed out so far, for sizing state sets.
    pub fn capacity_hint(&self) -> usize {
        self.slots.len()
    }

    /// Run `input` through the automaton.
    pub fn run(&self, input: &str) -> Verdict {
        simulation::run(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_state_defaults() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();

        assert_ne!(q0, q1);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.role(q0), Some(Role::Normal));
        assert!(graph.outgoing(q0).is_empty());
    }

    #[test]
    fn test_duplicate_transition_is_ignored() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();

        assert!(graph.create_transition(q0, q1, 'a'.into()).is_some());
        assert!(graph.create_transition(q0, q1, 'a'.into()).is_none());
        assert_eq!(
            graph.try_create_transition(q0, q1, 'a'.into()),
            Err(AutomatonError::DuplicateTransition {
                from: q0,
                to: q1,
                symbol: 'a'.into()
            })
        );
        assert_eq!(graph.outgoing(q0).len(), 1);

        // Same pair, different symbol is a new edge.
        assert!(graph.create_transition(q0, q1, Symbol::Epsilon).is_some());
        assert_eq!(graph.outgoing(q0).len(), 2);
    }

    #[test]
    fn test_transition_requires_live_states() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();
        graph.delete_state(q1);

        assert_eq!(
            graph.try_create_transition(q0, q1, 'a'.into()),
            Err(AutomatonError::UnknownState(q1))
        );
        assert_eq!(
            graph.try_create_transition(q1, q0, 'a'.into()),
            Err(AutomatonError::UnknownState(q1))
        );
        assert_eq!(
            graph.try_create_transition(q0, 99, 'a'.into()),
            Err(AutomatonError::UnknownState(99))
        );
        assert_eq!(graph.transitions().count(), 0);
    }

    #[test]
    fn test_delete_state_removes_incoming_transitions() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();
        let q2 = graph.create_state();

        graph.create_transition(q0, q1, 'a'.into());
        graph.create_transition(q0, q2, 'b'.into());
        graph.create_transition(q2, q1, Symbol::Epsilon);
        graph.create_transition(q1, q1, 'c'.into());

        assert!(graph.delete_state(q1));
        assert!(!graph.contains(q1));
        assert!(graph.transitions().all(|(_, t)| t.target() != q1));
        assert_eq!(graph.transitions().count(), 1);
        assert_eq!(graph.outgoing(q0)[0].target(), q2);

        // Idempotent.
        assert!(!graph.delete_state(q1));
        assert!(!graph.delete_state(42));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        graph.delete_state(q0);
        let q1 = graph.create_state();

        assert_ne!(q0, q1);
        assert!(!graph.contains(q0));
        assert_eq!(graph.states().collect::<Vec<_>>(), vec![q1]);
    }

    #[test]
    fn test_set_role() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();

        assert_eq!(graph.set_role(q0, Role::Initial), Some(Role::Normal));
        assert_eq!(graph.set_role(q1, Role::Initial), Some(Role::Normal));
        assert_eq!(graph.set_role(q0, Role::Final), Some(Role::Initial));
        assert_eq!(graph.set_role(7, Role::Final), None);

        assert_eq!(graph.states_with_role(Role::Initial).to_vec(), vec![q1]);
        assert_eq!(graph.states_with_role(Role::Final).to_vec(), vec![q0]);
    }

    #[test]
    fn test_create_transition_from_text() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();

        graph.create_transition_from_text(q0, q1, "").unwrap();
        graph.create_transition_from_text(q0, q1, "xy").unwrap();
        assert_eq!(
            graph.create_transition_from_text(q0, q1, "y"),
            Err(AutomatonError::DuplicateTransition {
                from: q0,
                to: q1,
                symbol: 'y'.into()
            })
        );
        assert!(matches!(
            graph.create_transition_from_text(q0, q1, "?"),
            Err(AutomatonError::InvalidSymbol(_))
        ));

        let symbols: Vec<Symbol> = graph.outgoing(q0).iter().map(Transition::symbol).collect();
        assert_eq!(symbols, vec![Symbol::Epsilon, 'y'.into()]);
    }

    #[test]
    fn test_transition_ids_exhausted() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();
        graph.next_transition = TransitionId::MAX - 1;

        assert_eq!(
            graph.try_create_transition(q0, q1, 'a'.into()),
            Ok(TransitionId::MAX - 1)
        );
        assert_eq!(
            graph.try_create_transition(q0, q1, 'b'.into()),
            Err(AutomatonError::IdsExhausted("transition"))
        );
        assert_eq!(graph.outgoing(q0).len(), 1);
        assert_eq!(graph.next_transition, TransitionId::MAX);
    }

    #[test]
    fn test_display_index_skips_deleted_states() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();
        let q2 = graph.create_state();
        graph.delete_state(q1);

        assert_eq!(graph.display_index(q0), Some(0));
        assert_eq!(graph.display_index(q2), Some(1));
        assert_eq!(graph.display_index(q1), None);
    }

    #[test]
    fn test_transition_ids_are_unique() {
        let mut graph = AutomatonGraph::new();
        let q0 = graph.create_state();
        let q1 = graph.create_state();

        let a = graph.create_transition(q0, q1, 'a'.into()).unwrap();
        let b = graph.create_transition(q1, q0, 'a'.into()).unwrap();
        assert_ne!(a, b);
        assert_eq!(graph.outgoing(q1)[0].id(), b);
    }
}
