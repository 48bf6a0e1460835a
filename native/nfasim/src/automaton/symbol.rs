//! Symbol types for automata transitions.

use crate::automaton::error::AutomatonError;
use std::fmt;

/// Character used to display epsilon, and accepted as epsilon in symbol text.
pub const EPSILON_CHAR: char = 'ε';

/// A transition label: a single input character or the epsilon sentinel.
///
/// `Epsilon` never equals `Char(_)`, not even `Char('ε')`, so input text can
/// never trigger an epsilon move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Char(char),
    Epsilon,
}

/// The epsilon sentinel.
pub const EPSILON: Symbol = Symbol::Epsilon;

impl Symbol {
    #[inline]
    pub fn is_epsilon(self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Check whether this symbol consumes the input character `c`.
    #[inline]
    pub fn matches(self, c: char) -> bool {
        self == Symbol::Char(c)
    }

    /// Normalize user-entered symbol text.
    ///
    /// Empty text and text ending in whitespace or `ε` become epsilon.
    /// Anything else is reduced to its last alphanumeric character other
    /// than `ε`, so `Char('ε')` is never produced.
    pub fn normalize(text: &str) -> Result<Symbol, AutomatonError> {
        let Some(last) = text.chars().next_back() else {
            return Ok(Symbol::Epsilon);
        };
        if last.is_whitespace() || last == EPSILON_CHAR {
            return Ok(Symbol::Epsilon);
        }
        text.chars()
            .rev()
            .find(|&c| c.is_alphanumeric() && c != EPSILON_CHAR)
            .map(Symbol::Char)
            .ok_or_else(|| AutomatonError::InvalidSymbol(text.to_owned()))
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{c}"),
            Symbol::Epsilon => write!(f, "{EPSILON_CHAR}"),
        }
    }
}

/// Keep only the alphanumeric characters of a test string.
pub fn sanitize_input(input: &str) -> String {
    input.chars().filter(|c| c.is_alphanumeric()).collect()
}
