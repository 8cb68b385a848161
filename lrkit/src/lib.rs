//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! LR(1) and LALR(1) parser construction and a table-driven shift-reduce
//! parser.
//!
//! The pipeline:
//!
//! - a [`Grammar`] is built from [`Production`]s and a start symbol and
//!   computes its nullable, FIRST and NEXT sets,
//! - a [`TransitionTable`] explores the item sets ([`ParserItem`]) of the
//!   grammar under a [`StatePolicy`] ([`Lr1`] or [`Lalr1`]) and either
//!   succeeds or fails with a [`ConflictError`] listing every conflict,
//! - a [`Parser`] runs the table over tokens from a [`Lexer`], building
//!   non-terminal tokens through a [`TokenFactory`] such as [`TreeFactory`].
//!
//! ## Example
//!
//! ```rust
//! use lrkit::{
//!     Grammar, NonTerminal, Parser, Production, Symbol, Terminal, TerminalToken,
//!     TransitionTable, TreeFactory, VecLexer,
//! };
//!
//! // S -> a S b | ε
//! let s = NonTerminal::new("S");
//! let grammar = Grammar::new(
//!     [
//!         Production::new(
//!             s.clone(),
//!             vec![Symbol::terminal("a"), Symbol::NonTerminal(s.clone()), Symbol::terminal("b")],
//!         ),
//!         Production::new(s.clone(), vec![]),
//!     ],
//!     s,
//! );
//! let table = TransitionTable::lalr1(grammar).unwrap();
//!
//! let input = ["a", "a", "b", "b"].map(|t| lrkit::ParseTree::leaf(Terminal::new(t), None));
//! let tree = Parser::new(&table)
//!     .parse(VecLexer::new(input.to_vec()), TreeFactory)
//!     .unwrap();
//! assert_eq!(tree.derivation().len(), 3);
//!
//! let short = vec![TerminalToken::new(Terminal::new("a"), None)];
//! let err = Parser::new(&table)
//!     .parse(VecLexer::new(short), UnitFactory)
//!     .unwrap_err();
//! assert!(err.to_string().contains("expected one of: `a`, `b`"));
//!
//! # use lrkit::{ProdId, Span, TokenFactory};
//! # struct UnitFactory;
//! # impl TokenFactory for UnitFactory {
//! #     type Token = TerminalToken;
//! #     type Error = std::convert::Infallible;
//! #     fn make_token(&mut self, _: ProdId, p: &Production, span: Option<Span>, _: Vec<TerminalToken>)
//! #         -> Result<TerminalToken, Self::Error> {
//! #         Ok(TerminalToken { symbol: Symbol::NonTerminal(p.left.clone()), span })
//! #     }
//! # }
//! ```

mod conflict;
mod grammar;
mod item;
mod lexer;
mod parser;
mod policy;
mod state;
mod symbol;
mod table;
mod token;
mod tree;

#[cfg(test)]
mod testing;

pub use crate::conflict::{Conflict, ConflictError, ConflictKind};
pub use crate::grammar::{Grammar, ProdId, Production};
pub use crate::item::{Core, Lookaheads, ParserItem};
pub use crate::lexer::{FromTerminal, Lexer, TerminalToken, VecLexer};
pub use crate::parser::{Parser, ParserError, ParserStats, TokenFactory};
pub use crate::policy::{Lalr1, Lr1, StateId, StatePolicy};
pub use crate::state::{DisplayState, ProductionState};
pub use crate::symbol::{NonTerminal, Symbol, Terminal};
pub use crate::table::{TableKind, TransitionTable};
pub use crate::token::{Position, Span, Token, merge_spans};
pub use crate::tree::{DisplayTree, ParseTree, TreeFactory};
