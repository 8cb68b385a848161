//! The lexer contract consumed by the [`Parser`](crate::Parser).

use crate::symbol::{Symbol, Terminal};
use crate::token::{Span, Token};
use std::convert::Infallible;

/// A pull-based token source.
///
/// The parser calls [`try_next`](Lexer::try_next) exactly when it needs a
/// new lookahead and never reads ahead further. A lexer must eventually yield
/// a token whose symbol is [`Terminal::End`]; errors are handed back to the
/// caller unmodified.
pub trait Lexer {
    type Token: Token;
    type Error;

    fn try_next(&mut self) -> Result<Self::Token, Self::Error>;
}

impl<L: Lexer + ?Sized> Lexer for &mut L {
    type Token = L::Token;
    type Error = L::Error;

    #[inline]
    fn try_next(&mut self) -> Result<Self::Token, Self::Error> {
        (**self).try_next()
    }
}

/// Tokens that can stand for a bare terminal.
pub trait FromTerminal: Sized {
    fn from_terminal(terminal: Terminal, span: Option<Span>) -> Self;
}

/// A lexer over an already tokenised input.
///
/// Yields the tokens in order, then an end-of-input token with an empty span
/// at the end of the last token, forever.
#[derive(Debug, Clone)]
pub struct VecLexer<T> {
    tokens: std::vec::IntoIter<T>,
    last_span: Option<Span>,
}

impl<T: Token + FromTerminal> VecLexer<T> {
    pub fn new(tokens: Vec<T>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            last_span: None,
        }
    }

    /// Tokens not yet handed out.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl<T: Token + FromTerminal> FromIterator<T> for VecLexer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T: Token + FromTerminal> Lexer for VecLexer<T> {
    type Token = T;
    type Error = Infallible;

    fn try_next(&mut self) -> Result<T, Infallible> {
        match self.tokens.next() {
            Some(token) => {
                if let Some(span) = token.span() {
                    self.last_span = Some(span);
                }
                Ok(token)
            }
            None => {
                let span = self.last_span.map(|s| Span::collapse(s.end));
                Ok(T::from_terminal(Terminal::End, span))
            }
        }
    }
}

/// A minimal terminal-only token, handy for feeding symbol streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalToken {
    pub symbol: Symbol,
    pub span: Option<Span>,
}

impl TerminalToken {
    pub fn new(terminal: Terminal, span: Option<Span>) -> Self {
        Self {
            symbol: Symbol::Terminal(terminal),
            span,
        }
    }
}

impl Token for TerminalToken {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl FromTerminal for TerminalToken {
    fn from_terminal(terminal: Terminal, span: Option<Span>) -> Self {
        Self::new(terminal, span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;
    use crate::token::Position;

    #[test]
    fn yields_end_after_last_token() {
        let mut lexer = VecLexer::new(vec![
            TerminalToken::new(Terminal::new("a"), span!(1, 1, 1, 2)),
            TerminalToken::new(Terminal::new("b"), span!(1, 3, 1, 4)),
        ]);
        assert_eq!(lexer.remaining(), 2);
        assert_eq!(lexer.try_next().unwrap().symbol, Symbol::terminal("a"));
        assert_eq!(lexer.try_next().unwrap().symbol, Symbol::terminal("b"));
        for _ in 0..2 {
            let end = lexer.try_next().unwrap();
            assert!(end.symbol.is_end());
            assert_eq!(end.span, Some(Span::collapse(Position::new(1, 4))));
        }
    }

    #[test]
    fn empty_input_is_just_end() {
        let mut lexer: VecLexer<TerminalToken> = std::iter::empty().collect();
        let end = lexer.try_next().unwrap();
        assert!(end.symbol.is_end());
        assert_eq!(end.span, None);

        let by_ref = &mut lexer;
        assert!(by_ref.try_next().unwrap().symbol.is_end());
    }
}
