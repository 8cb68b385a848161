//! Grammar vocabulary.
//!
//! Every grammar symbol is either a [`Terminal`] (an input-token category,
//! including the distinguished end-of-input marker [`Terminal::End`]) or a
//! [`NonTerminal`] (a syntactic category defined by productions). [`Symbol`]
//! is the closed sum of the two.
//!
//! Symbols are small immutable values identified by their tag and name. They
//! are totally ordered, so every set and map built from them in this crate is
//! a `BTreeSet`/`BTreeMap` and iterates deterministically.

use smartstring::alias::String;
use std::fmt;

/// An input-token category.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    /// A named terminal such as `id` or `;`.
    Named(String),
    /// End of input. Every lexer must eventually produce it.
    End,
}

impl Terminal {
    /// Creates a named terminal.
    pub fn new(name: &str) -> Self {
        Terminal::Named(name.into())
    }

    /// Returns the terminal's name; `$end` for [`Terminal::End`].
    pub fn name(&self) -> &str {
        match self {
            Terminal::Named(name) => name,
            Terminal::End => "$end",
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, Terminal::End)
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A syntactic category defined by one or more productions.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonTerminal(String);

impl NonTerminal {
    pub fn new(name: &str) -> Self {
        NonTerminal(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A grammar symbol.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
}

impl Symbol {
    /// Shorthand for a named terminal symbol.
    pub fn terminal(name: &str) -> Self {
        Symbol::Terminal(Terminal::new(name))
    }

    /// Shorthand for a non-terminal symbol.
    pub fn non_terminal(name: &str) -> Self {
        Symbol::NonTerminal(NonTerminal::new(name))
    }

    /// The end-of-input symbol.
    pub const fn end() -> Self {
        Symbol::Terminal(Terminal::End)
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(t) => t.name(),
            Symbol::NonTerminal(n) => n.name(),
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Symbol::Terminal(Terminal::End))
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::NonTerminal(_) => None,
        }
    }

    pub fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::Terminal(_) => None,
            Symbol::NonTerminal(n) => Some(n),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<NonTerminal> for Symbol {
    fn from(n: NonTerminal) -> Self {
        Symbol::NonTerminal(n)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn end_is_a_terminal_singleton() {
        assert!(Symbol::end().is_end());
        assert_eq!(Symbol::end(), Symbol::Terminal(Terminal::End));
        assert_eq!(Symbol::end().as_terminal(), Some(&Terminal::End));
        assert!(Symbol::end().as_non_terminal().is_none());
        assert!(!Terminal::new("id").is_end());
    }

    #[test]
    fn kinds_with_equal_names_differ() {
        assert_ne!(Symbol::terminal("E"), Symbol::non_terminal("E"));
        let set: BTreeSet<Symbol> = [
            Symbol::terminal("E"),
            Symbol::non_terminal("E"),
            Symbol::terminal("E"),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_uses_names() {
        assert_eq!(Symbol::terminal(";").to_string(), ";");
        assert_eq!(Symbol::non_terminal("Expr").to_string(), "Expr");
        assert_eq!(Terminal::End.to_string(), "$end");
    }
}
