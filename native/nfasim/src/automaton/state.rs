//! State handles, roles and state sets.

use fixedbitset::FixedBitSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A state handle into the graph's arena, represented as a u32.
///
/// Handles are never reused once their state is deleted.
pub type StateId = u32;

/// The role a state plays in the automaton.
///
/// A state has exactly one role at a time, so a state cannot be both
/// `Initial` and `Final`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Normal,
    Initial,
    Final,
}

impl Role {
    /// Every role, in the order an editor lists them.
    pub const ALL: [Role; 3] = [Role::Normal, Role::Initial, Role::Final];

    pub fn label(self) -> &'static str {
        match self {
            Role::Normal => "Normal",
            Role::Initial => "Initial",
            Role::Final => "Final",
        }
    }

    /// Parse a role from its label, ignoring ASCII case.
    pub fn from_label(label: &str) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A set of states implemented using a fixed-size bit set for efficiency.
///
/// Two sets are equal when they hold the same states, whatever their
/// backing capacity.
#[derive(Clone, Default)]
pub struct StateSet {
    bits: FixedBitSet,
}

impl StateSet {
    /// Create a new empty state set with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(capacity),
        }
    }

    /// Create a state set containing a single state.
    pub fn singleton(state: StateId, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        set.insert(state);
        set
    }

    /// Insert a state, returning `true` if it was not already present.
    pub fn insert(&mut self, state: StateId) -> bool {
        let idx = state as usize;
        if idx >= self.bits.len() {
            self.bits.grow(idx + 1);
        }
        !self.bits.put(idx)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.bits.contains(state as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }

    /// Get the number of states in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones(..)
    }

    /// Iterate over all states in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.bits.ones().map(|i| i as StateId)
    }

    /// Union this set with another, modifying self in place.
    pub fn union_with(&mut self, other: &StateSet) {
        if other.bits.len() > self.bits.len() {
            self.bits.grow(other.bits.len());
        }
        self.bits.union_with(&other.bits);
    }

    /// Check if this set intersects with another.
    pub fn intersects(&self, other: &StateSet) -> bool {
        self.bits.intersection(&other.bits).next().is_some()
    }

    /// Check if every state of this set is in `other`.
    pub fn is_subset(&self, other: &StateSet) -> bool {
        self.iter().all(|state| other.contains(state))
    }

    pub fn to_vec(&self) -> Vec<StateId> {
        self.iter().collect()
    }
}

impl PartialEq for StateSet {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for StateSet {}

impl Hash for StateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for id in self.iter() {
            id.hash(state);
        }
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = Self::default();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<I: IntoIterator<Item = StateId>>(&mut self, iter: I) {
        for state in iter {
            self.insert(state);
        }
    }
}
