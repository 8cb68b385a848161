//! Reading grammars from `.g` files.
//!
//! The format is line oriented:
//!
//! ```text
//! -- comment
//! G -> id Q
//! Q -> Q P ;
//! Q -> ;
//! R ->
//! ```
//!
//! Capitalised identifiers are non-terminals; lowercase identifiers and single
//! punctuation characters are terminals. The first `->` on a line separates
//! the sides, any later one is a terminal. An empty right side is an epsilon
//! production. The start symbol is the left side of the first rule unless
//! given explicitly.

mod lexer;
mod parser;

use anyhow::{Context, Result, anyhow, bail};
use chumsky::Parser;
use lrkit::{Grammar, NonTerminal, Production, Symbol};
use std::path::Path;

use lexer::Token;

/// Parses grammar source text.
pub fn parse_grammar(source: &str, start: Option<&str>) -> Result<Grammar> {
    let (tokens, lines): (Vec<Token>, Vec<usize>) = lexer::tokenize(source)?.into_iter().unzip();
    let rules = parser::parser()
        .parse(&tokens)
        .into_result()
        .map_err(|errs| {
            let Some(err) = errs.first() else {
                return anyhow!("invalid grammar");
            };
            let at = err.span().start;
            let line = lines.get(at).or(lines.last()).copied().unwrap_or(1);
            let found = match err.found() {
                Some(token) => describe(token),
                None => "end of input".to_owned(),
            };
            anyhow!("line {}: unexpected {}", line, found)
        })?;

    let Some(first) = rules.first() else {
        bail!("grammar has no productions");
    };
    let start = match start {
        Some(name) => {
            if !rules.iter().any(|r| r.lhs.as_str() == name) {
                bail!("start symbol `{}` has no production", name);
            }
            NonTerminal::new(name)
        }
        None => NonTerminal::new(&first.lhs),
    };

    let productions: Vec<Production> = rules
        .into_iter()
        .map(|rule| {
            let rhs = rule
                .rhs
                .into_iter()
                .map(|sym| match sym {
                    parser::Symbol::Term(t) => Symbol::terminal(&t),
                    parser::Symbol::NonTerm(n) => Symbol::non_terminal(&n),
                })
                .collect();
            Production::new(NonTerminal::new(&rule.lhs), rhs)
        })
        .collect();
    log::debug!("read {} productions, start symbol {}", productions.len(), start);
    Ok(Grammar::new(productions, start))
}

/// Reads and parses a grammar file.
pub fn read_grammar<P: AsRef<Path>>(path: P, start: Option<&str>) -> Result<Grammar> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading grammar {}", path.display()))?;
    parse_grammar(&source, start).with_context(|| format!("in grammar {}", path.display()))
}

fn describe(token: &Token) -> String {
    match token {
        Token::NonTerm(n) => format!("non-terminal `{}`", n),
        Token::Term(t) => format!("terminal `{}`", t),
        Token::Prod => "`->`".to_owned(),
        Token::LineFeed => "end of line".to_owned(),
    }
}
