//! Terminal streams for trial parses.
//!
//! An input file is a whitespace-separated list of terminal names, e.g.
//! `id ; id -> id ;`. Every word becomes one leaf token spanned by its line
//! and columns.

use anyhow::{Result, bail};
use lrkit::{Grammar, ParseTree, Position, Span, Terminal, VecLexer};

/// Splits `text` into terminal tokens.
///
/// With a grammar, words that are not terminals of it are rejected up front
/// instead of surfacing as parse errors.
pub fn tokenize(text: &str, grammar: Option<&Grammar>) -> Result<Vec<ParseTree>> {
    let mut out = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let mut column = 1;
        let mut rest = line;
        while let Some(pos) = rest.find(|c: char| !c.is_whitespace()) {
            column += rest[..pos].chars().count();
            rest = &rest[pos..];
            let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..len];
            let width = word.chars().count();

            let terminal = Terminal::new(word);
            if let Some(g) = grammar {
                if !g.terminals().any(|t| *t == terminal) {
                    bail!("line {}, column {}: `{}` is not a terminal", line_no + 1, column, word);
                }
            }
            let start = Position::new(line_no + 1, column);
            let end = Position::new(line_no + 1, column + width);
            out.push(ParseTree::leaf(terminal, Some(Span::new(start, end))));

            column += width;
            rest = &rest[len..];
        }
    }
    log::debug!("input: {} tokens", out.len());
    Ok(out)
}

/// A lexer over the terminals of `text`.
pub fn lexer(text: &str, grammar: Option<&Grammar>) -> Result<VecLexer<ParseTree>> {
    Ok(VecLexer::new(tokenize(text, grammar)?))
}
