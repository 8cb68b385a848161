//! Dotted productions.

use crate::grammar::{Grammar, ProdId, Production};
use crate::symbol::Symbol;
use std::fmt;

/// A production with a dot position: `A -> x . y z` is production
/// `A -> x y z` at position 1.
///
/// The value refers to its production by [`ProdId`], so queries take the
/// owning [`Grammar`]. `0 <= position <= production.len()` always holds for
/// states created through [`ProductionState::start`] and
/// [`ProductionState::advance`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductionState {
    pub production: ProdId,
    pub position: usize,
}

impl ProductionState {
    /// The state with the dot before the first symbol.
    pub const fn start(production: ProdId) -> Self {
        Self {
            production,
            position: 0,
        }
    }

    #[inline]
    pub fn at_end(&self, grammar: &Grammar) -> bool {
        self.position == grammar.production(self.production).len()
    }

    /// The symbol right after the dot, or `None` when [`at_end`](Self::at_end).
    #[inline]
    pub fn next_symbol<'g>(&self, grammar: &'g Grammar) -> Option<&'g Symbol> {
        grammar.production(self.production).right.get(self.position)
    }

    /// The symbols after the one following the dot.
    pub fn remaining<'g>(&self, grammar: &'g Grammar) -> &'g [Symbol] {
        let right = &grammar.production(self.production).right;
        right.get(self.position + 1..).unwrap_or(&[])
    }

    /// Moves the dot one symbol to the right.
    ///
    /// Callers check [`at_end`](Self::at_end) first; advancing past the end
    /// is a logic error and panics in debug builds.
    pub fn advance(&self, grammar: &Grammar) -> Self {
        debug_assert!(!self.at_end(grammar), "advance past end of production");
        Self {
            production: self.production,
            position: self.position + 1,
        }
    }

    /// Pairs the state with its grammar for display.
    pub fn display<'g>(&self, grammar: &'g Grammar) -> DisplayState<'g> {
        DisplayState {
            production: grammar.production(self.production),
            position: self.position,
        }
    }
}

/// Renders `A -> x . y`.
pub struct DisplayState<'g> {
    production: &'g Production,
    position: usize,
}

impl fmt::Display for DisplayState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.production.left)?;
        for (i, sym) in self.production.right.iter().enumerate() {
            if i == self.position {
                write!(f, " .")?;
            }
            write!(f, " {}", sym)?;
        }
        if self.position == self.production.right.len() {
            write!(f, " .")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::grammar;

    #[test]
    fn walks_a_production() {
        let g = grammar("P", &["P -> id -> R", "R ->"]);
        let p = g.productions_of(g.start())[0];
        let s0 = ProductionState::start(p);
        assert!(!s0.at_end(&g));
        assert_eq!(s0.next_symbol(&g), Some(&Symbol::terminal("id")));
        assert_eq!(s0.remaining(&g), &[Symbol::terminal("->"), Symbol::non_terminal("R")]);
        assert_eq!(s0.display(&g).to_string(), "P -> . id -> R");

        let s2 = s0.advance(&g).advance(&g);
        assert_eq!(s2.next_symbol(&g), Some(&Symbol::non_terminal("R")));
        assert!(s2.remaining(&g).is_empty());

        let s3 = s2.advance(&g);
        assert!(s3.at_end(&g));
        assert_eq!(s3.next_symbol(&g), None);
        assert!(s3.remaining(&g).is_empty());
        assert_eq!(s3.display(&g).to_string(), "P -> id -> R .");
    }

    #[test]
    fn epsilon_production_starts_at_end() {
        let g = grammar("R", &["R ->"]);
        let s = ProductionState::start(g.productions_of(g.start())[0]);
        assert!(s.at_end(&g));
        assert_eq!(s.display(&g).to_string(), "R -> .");
    }
}
