//! The shift-reduce engine.
//!
//! A [`Parser`] drives a [`TransitionTable`] over tokens pulled one at a time
//! from a [`Lexer`]. Reductions are handed to a [`TokenFactory`], which builds
//! the token standing for the reduced non-terminal (a tree node, an evaluated
//! value, anything). The parser holds no state of its own between calls, so
//! one table may serve any number of parses, sequentially or concurrently.

use crate::grammar::{ProdId, Production};
use crate::lexer::Lexer;
use crate::policy::StateId;
use crate::symbol::{Symbol, Terminal};
use crate::table::TransitionTable;
use crate::token::{Span, Token, merge_spans};
use std::collections::BTreeSet;
use std::fmt::Write;
use thiserror::Error;

/// Builds non-terminal tokens on reduction.
pub trait TokenFactory {
    type Token: Token;
    type Error;

    /// Called once per reduction with the reduced production, the span
    /// covered by `children` and the children themselves, in source order.
    fn make_token(
        &mut self,
        id: ProdId,
        production: &Production,
        span: Option<Span>,
        children: Vec<Self::Token>,
    ) -> Result<Self::Token, Self::Error>;
}

impl<F: TokenFactory + ?Sized> TokenFactory for &mut F {
    type Token = F::Token;
    type Error = F::Error;

    fn make_token(
        &mut self,
        id: ProdId,
        production: &Production,
        span: Option<Span>,
        children: Vec<Self::Token>,
    ) -> Result<Self::Token, Self::Error> {
        (**self).make_token(id, production, span, children)
    }
}

/// Why a parse failed.
///
/// `L` is the lexer's error type, `F` the token factory's, `T` the token.
#[derive(Debug, Error)]
pub enum ParserError<L, F, T: Token> {
    /// The lexer failed; the error is passed through unchanged.
    #[error("lexical error: {0}")]
    Lexer(L),
    /// A semantic action failed.
    #[error("token factory error: {0}")]
    Factory(F),
    /// The current state can neither shift nor reduce the lookahead.
    #[error(
        "unexpected {}; expected one of: {}",
        describe(.token),
        list_terminals(.expected)
    )]
    UnexpectedToken {
        token: T,
        expected: BTreeSet<Terminal>,
    },
}

fn describe<T: Token>(token: &T) -> String {
    match token.span() {
        Some(span) => format!("`{}` at {}", token.symbol(), span.display()),
        None => format!("`{}`", token.symbol()),
    }
}

fn list_terminals(terminals: &BTreeSet<Terminal>) -> String {
    let mut out = String::new();
    for (i, t) in terminals.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "`{}`", t);
    }
    out
}

/// Counters collected during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserStats {
    /// Tokens pulled from the lexer, end of input included.
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

type ParseResult<L, F> = Result<
    <F as TokenFactory>::Token,
    ParserError<<L as Lexer>::Error, <F as TokenFactory>::Error, <F as TokenFactory>::Token>,
>;

/// A shift-reduce parser over a borrowed table.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'t> {
    table: &'t TransitionTable,
}

impl<'t> Parser<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t TransitionTable {
        self.table
    }

    /// Parses the whole token stream of `lexer` and returns the token of
    /// the start symbol.
    ///
    /// # Errors
    ///
    /// Lexer and factory errors abort the parse as they are;
    /// [`ParserError::UnexpectedToken`] carries the offending lookahead and
    /// every terminal the current state would have accepted.
    ///
    /// # Panics
    ///
    /// Panics when the table and the token stack disagree (a child symbol
    /// does not match the production being reduced, or a goto is missing).
    pub fn parse<L, F>(&self, lexer: L, factory: F) -> ParseResult<L, F>
    where
        L: Lexer,
        F: TokenFactory<Token = L::Token>,
    {
        self.parse_with_stats(lexer, factory).map(|(token, _)| token)
    }

    /// Like [`parse`](Self::parse), also returning counters.
    #[allow(clippy::type_complexity)]
    pub fn parse_with_stats<L, F>(
        &self,
        mut lexer: L,
        mut factory: F,
    ) -> Result<(F::Token, ParserStats), ParserError<L::Error, F::Error, F::Token>>
    where
        L: Lexer,
        F: TokenFactory<Token = L::Token>,
    {
        let table = self.table;
        let grammar = table.grammar();
        let start = table.start_state();
        let accept = table.accept_state();

        let mut stats = ParserStats::default();
        let mut states: Vec<StateId> = vec![start];
        let mut output: Vec<F::Token> = Vec::new();
        let mut pending: Option<F::Token> = None;

        loop {
            let Some(&state) = states.last() else {
                unreachable!("state stack is never empty");
            };
            let token = match pending.take() {
                Some(token) => token,
                None => {
                    stats.tokens += 1;
                    lexer.try_next().map_err(ParserError::Lexer)?
                }
            };
            if log::log_enabled!(log::Level::Trace) {
                dump_state(&states, &output, &token);
            }

            let Symbol::Terminal(terminal) = token.symbol() else {
                return Err(ParserError::UnexpectedToken {
                    token,
                    expected: table.next_terminals(state),
                });
            };

            if state == accept && terminal.is_end() && states.as_slice() == [start, accept] {
                log::trace!("accept");
                let Some(result) = output.pop() else {
                    unreachable!("accept with an empty output stack");
                };
                assert!(output.is_empty(), "accept with {} extra tokens", output.len());
                return Ok((result, stats));
            }

            if let Some(next) = table.transition(state, token.symbol()) {
                log::trace!("shift {}", next);
                states.push(next);
                output.push(token);
                stats.shifts += 1;
                continue;
            }

            let Some(prod_id) = table.reduction_id(state, terminal) else {
                let expected = table.next_terminals(state);
                return Err(ParserError::UnexpectedToken { token, expected });
            };
            let production = grammar.production(prod_id);
            log::trace!("reduce {}", production);

            let n = production.len();
            assert!(
                output.len() >= n && states.len() > n,
                "stack underflow reducing {}",
                production
            );
            let children = output.split_off(output.len() - n);
            states.truncate(states.len() - n);
            for (child, expected) in children.iter().zip(&production.right) {
                assert_eq!(
                    child.symbol(),
                    expected,
                    "child symbol mismatch reducing {}",
                    production
                );
            }

            let span = if children.is_empty() {
                token.span().map(|s| Span::collapse(s.start))
            } else {
                children.iter().map(Token::span).fold(None, merge_spans)
            };
            let reduced = factory
                .make_token(prod_id, production, span, children)
                .map_err(ParserError::Factory)?;

            let Some(&top) = states.last() else {
                unreachable!("state stack is never empty");
            };
            let left = Symbol::NonTerminal(production.left.clone());
            let Some(goto) = table.transition(top, &left) else {
                panic!("no goto on {} from state {}", left, top);
            };
            states.push(goto);
            output.push(reduced);
            stats.reductions += 1;
            pending = Some(token);
        }
    }
}

fn dump_state<T: Token>(states: &[StateId], output: &[T], incoming: &T) {
    let mut line = String::new();
    for (i, state) in states.iter().enumerate() {
        let _ = write!(line, "<{}>  ", state);
        if let Some(token) = output.get(i) {
            let _ = write!(line, "{}  ", token.symbol());
        }
    }
    let _ = write!(line, "<-  {}", incoming.symbol());
    log::trace!("{}", line);
}
