//! PyO3 bindings for the automaton module.
//!
//! Roles and verdicts cross the boundary as their string labels.

use crate::automaton::error::AutomatonError;
use crate::automaton::graph::AutomatonGraph;
use crate::automaton::labels::{format_label, group_labels};
use crate::automaton::simulation::Verdict;
use crate::automaton::state::{Role, StateId};
use crate::automaton::symbol::sanitize_input;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

impl From<AutomatonError> for PyErr {
    fn from(err: AutomatonError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn parse_role(label: &str) -> PyResult<Role> {
    Role::from_label(label).ok_or_else(|| AutomatonError::InvalidRole(label.to_owned()).into())
}

/// A read-only view of one transition.
#[pyclass(name = "Transition", module = "nfasim.automaton", frozen)]
#[derive(Clone)]
pub struct PyTransition {
    #[pyo3(get)]
    id: u32,
    #[pyo3(get)]
    source: StateId,
    #[pyo3(get)]
    target: StateId,
    #[pyo3(get)]
    symbol: String,
    #[pyo3(get)]
    epsilon: bool,
}

#[pymethods]
impl PyTransition {
    fn __repr__(&self) -> String {
        format!(
            "Transition({} --{}--> {})",
            self.source, self.symbol, self.target
        )
    }
}

/// An editable epsilon-NFA.
#[pyclass(name = "Automaton", module = "nfasim.automaton")]
pub struct PyAutomaton {
    graph: AutomatonGraph,
}

#[pymethods]
impl PyAutomaton {
    #[new]
    fn new() -> Self {
        Self {
            graph: AutomatonGraph::new(),
        }
    }

    fn create_state(&mut self) -> StateId {
        self.graph.create_state()
    }

    /// Delete a state and every transition into it.
    /// Returns False if the state did not exist.
    fn delete_state(&mut self, state: StateId) -> bool {
        self.graph.delete_state(state)
    }

    /// Change a state's role. Returns the new role label, or None if the
    /// state does not exist.
    fn set_role(&mut self, state: StateId, role: &str) -> PyResult<Option<&'static str>> {
        let role = parse_role(role)?;
        Ok(self.graph.set_role(state, role).map(|_| role.label()))
    }

    fn role(&self, state: StateId) -> Option<&'static str> {
        self.graph.role(state).map(Role::label)
    }

    /// Add a transition labelled by the normalized `symbol` text.
    /// Returns the transition id, or None if it already exists or a state
    /// is unknown.
    #[pyo3(signature = (source, target, symbol = ""))]
    fn create_transition(
        &mut self,
        source: StateId,
        target: StateId,
        symbol: &str,
    ) -> PyResult<Option<u32>> {
        match self.graph.create_transition_from_text(source, target, symbol) {
            Ok(id) => Ok(Some(id)),
            Err(AutomatonError::UnknownState(_) | AutomatonError::DuplicateTransition { .. }) => {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Run an input string and return "accepted", "rejected" or
    /// "no initial state configured".
    #[pyo3(signature = (input, sanitize = true))]
    fn run(&self, input: &str, sanitize: bool) -> &'static str {
        self.verdict(input, sanitize).message()
    }

    #[pyo3(signature = (input, sanitize = true))]
    fn accepts(&self, input: &str, sanitize: bool) -> bool {
        self.verdict(input, sanitize).is_accepted()
    }

    /// Active state sets after each character, or None without an initial
    /// state.
    fn trace(&self, input: &str) -> Option<Vec<Vec<StateId>>> {
        crate::automaton::simulation::trace(&self.graph, input)
            .map(|sets| sets.iter().map(|set| set.to_vec()).collect())
    }

    #[getter]
    fn states(&self) -> Vec<StateId> {
        self.graph.states().collect()
    }

    fn state_label(&self, state: StateId) -> Option<String> {
        self.graph.display_index(state).map(|i| format!("q{i}"))
    }

    fn outgoing(&self, state: StateId) -> Vec<PyTransition> {
        self.graph
            .outgoing(state)
            .iter()
            .map(|t| PyTransition {
                id: t.id(),
                source: state,
                target: t.target(),
                symbol: t.symbol().to_string(),
                epsilon: t.symbol().is_epsilon(),
            })
            .collect()
    }

    /// Edge labels grouped by (source, target), in first-seen order.
    fn labels(&self) -> Vec<(StateId, StateId, String)> {
        group_labels(&self.graph)
            .iter()
            .map(|(&(source, target), symbols)| (source, target, format_label(symbols)))
            .collect()
    }

    fn __len__(&self) -> usize {
        self.graph.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Automaton(states={}, transitions={})",
            self.graph.len(),
            self.graph.transitions().count()
        )
    }
}

impl PyAutomaton {
    fn verdict(&self, input: &str, sanitize: bool) -> Verdict {
        if sanitize {
            self.graph.run(&sanitize_input(input))
        } else {
            self.graph.run(input)
        }
    }
}

/// Register the automaton submodule.
pub fn automaton(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTransition>()?;
    m.add_class::<PyAutomaton>()?;
    Ok(())
}
