//! Source locations and the token contract.
//!
//! Tokens flowing through the [`Parser`](crate::Parser) only need to expose
//! their grammar [`Symbol`] and, optionally, the [`Span`] of source text they
//! cover. Terminal tokens come from a [`Lexer`](crate::Lexer); non-terminal
//! tokens are built by a [`TokenFactory`](crate::TokenFactory) on reduction.
//!
//! # Examples
//!
//! ```rust
//! # use lrkit::{Position, Span, span};
//! let sp = Span::new(Position::new(3, 5), Position::new(3, 10));
//! assert!(!sp.is_empty());
//! assert_eq!(sp.line_range(), (3, 3));
//!
//! let sp_opt = span!(1, 1, 1, 5);
//! assert!(sp_opt.is_some());
//! ```

use crate::symbol::Symbol;

/// A 1-based line/column position in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open source range: `[start, end)`.
///
/// It is conventional for `start <= end` in `(line, column)` order; this is
/// not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Starting position (inclusive).
    pub start: Position,
    /// Ending position (exclusive).
    pub end: Position,
}

impl Span {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span at `at`.
    #[inline]
    pub const fn collapse(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// The smallest span covering both.
    #[inline]
    pub fn merge(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The inclusive line range covered.
    #[inline]
    pub fn line_range(&self) -> (usize, usize) {
        (self.start.line, self.end.line)
    }

    /// Pretty-print for diagnostics.
    pub fn display(&self) -> String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Merges optional spans; `None` acts as the identity.
pub fn merge_spans(a: Option<Span>, b: Option<Span>) -> Option<Span> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.merge(&b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Builds an `Option<Span>` inline from 1-based line/column coordinates.
///
/// ```rust
/// # use lrkit::span;
/// let s = span!(1, 1, 1, 5);
/// assert_eq!(s.map(|s| s.line_range()), Some((1, 1)));
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position { line: $line_start, column: $col_start },
            end:   $crate::Position { line: $line_end,   column: $col_end   },
        })
    };
}

/// A grammar-tagged token.
pub trait Token {
    /// The grammar symbol this token stands for. Lexers tag terminals, with
    /// [`Terminal::End`](crate::Terminal::End) marking end of input; factory
    /// tokens carry the reduced non-terminal.
    fn symbol(&self) -> &Symbol;

    /// Source text covered, when known.
    fn span(&self) -> Option<Span> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_covers_both() {
        let a = Span::new(Position::new(1, 4), Position::new(1, 9));
        let b = Span::new(Position::new(1, 1), Position::new(1, 3));
        let m = a.merge(&b);
        assert_eq!(m, Span::new(Position::new(1, 1), Position::new(1, 9)));
        assert_eq!(m, b.merge(&a));
        assert_eq!(m.display(), "span 1:1 to 1:9");
    }

    #[test]
    fn merge_orders_by_line_then_column() {
        let a = Span::new(Position::new(1, 40), Position::new(1, 50));
        let b = Span::new(Position::new(2, 1), Position::new(3, 2));
        let m = a.merge(&b);
        assert_eq!(m.start, Position::new(1, 40));
        assert_eq!(m.end, Position::new(3, 2));
        assert_eq!(m.line_range(), (1, 3));
    }

    #[test]
    fn optional_merge_and_collapse() {
        let a = span!(2, 1, 2, 4);
        assert_eq!(merge_spans(a, None), a);
        assert_eq!(merge_spans(None, a), a);
        assert_eq!(merge_spans(None, None), None);
        let c = Span::collapse(Position::new(7, 3));
        assert!(c.is_empty());
        assert_eq!(c.line_range(), (7, 7));
    }
}
