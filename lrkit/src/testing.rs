//! Shared test fixtures.

use crate::grammar::{Grammar, Production};
use crate::symbol::{NonTerminal, Symbol, Terminal};
use crate::token::{Position, Span};
use crate::tree::ParseTree;
use std::collections::BTreeSet;

pub fn nt(name: &str) -> NonTerminal {
    NonTerminal::new(name)
}

/// Capitalised names are non-terminals, everything else is a terminal.
pub fn sym(name: &str) -> Symbol {
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        Symbol::non_terminal(name)
    } else {
        Symbol::terminal(name)
    }
}

pub fn prod(left: &str, right: &[&str]) -> Production {
    Production::new(nt(left), right.iter().map(|s| sym(s)).collect())
}

pub fn terms(names: &[&str]) -> BTreeSet<Terminal> {
    names.iter().map(|n| Terminal::new(n)).collect()
}

/// Builds a grammar from `"A -> x y"` rules. Only the first `->` separates
/// the sides, so `->` may itself appear as a terminal on the right.
pub fn grammar(start: &str, rules: &[&str]) -> Grammar {
    let productions = rules.iter().map(|rule| {
        let (left, right) = rule
            .split_once("->")
            .unwrap_or_else(|| panic!("rule without `->`: {}", rule));
        let right: Vec<&str> = right.split_whitespace().collect();
        prod(left.trim(), &right)
    });
    Grammar::new(productions, nt(start))
}

/// Whitespace-separated terminals on line 1, spanned by column.
pub fn tokens(input: &str) -> Vec<ParseTree> {
    let mut out = Vec::new();
    let mut offset = 0;
    for word in input.split(' ') {
        if !word.is_empty() {
            let start = Position::new(1, offset + 1);
            let end = Position::new(1, offset + 1 + word.len());
            out.push(ParseTree::leaf(
                Terminal::new(word),
                Some(Span::new(start, end)),
            ));
        }
        offset += word.len() + 1;
    }
    out
}
