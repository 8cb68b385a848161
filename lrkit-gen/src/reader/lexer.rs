//! Tokenizer for `.g` grammar files.
//!
//! Built on [`logos`]. Whitespace and `--` comments are skipped; line feeds
//! are kept because they end productions.

use anyhow::{Result, bail};
use logos::Logos;
use smartstring::alias::String;

/// Tokens of a grammar file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A capitalised identifier (e.g. `Expr`).
    NonTerm(String),

    /// A lowercase identifier or a single punctuation character.
    Term(String),

    /// The production separator `->`.
    Prod,

    /// End of a line.
    LineFeed,
}

#[derive(Logos, Debug, PartialEq)]
#[logos(skip r"[ \t\f\r]+")]
enum LogosToken {
    #[regex(r"\n")]
    LineFeed,

    #[regex(r"--[^\n]*")]
    Comment,

    #[token("->")]
    Prod,

    #[regex(r"[a-z][a-zA-Z0-9_]*")]
    Atom,

    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    Var,

    #[regex(r###"[-~`!@#$%^&*+=|\\<>?/;\(\)\[\]{},\.'":]"###)]
    Sym,
}

/// Tokenizes `input`. Every token carries its 1-based line number, and the
/// result always ends with a [`Token::LineFeed`].
pub fn tokenize(input: &str) -> Result<Vec<(Token, usize)>> {
    let mut lex = LogosToken::lexer(input);
    let mut out = Vec::new();
    let mut line = 1;
    while let Some(kind) = lex.next() {
        let slice = lex.slice();
        let token = match kind {
            Ok(LogosToken::LineFeed) => Token::LineFeed,
            Ok(LogosToken::Comment) => continue,
            Ok(LogosToken::Prod) => Token::Prod,
            Ok(LogosToken::Atom) | Ok(LogosToken::Sym) => Token::Term(slice.into()),
            Ok(LogosToken::Var) => Token::NonTerm(slice.into()),
            Err(()) => bail!("line {}: unexpected character(s) {:?}", line, slice),
        };
        let is_lf = token == Token::LineFeed;
        out.push((token, line));
        if is_lf {
            line += 1;
        }
    }
    if !matches!(out.last(), Some((Token::LineFeed, _))) {
        out.push((Token::LineFeed, line));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn classifies_symbols() {
        let toks = kinds("P -> id -> R ; -- trailing comment\n");
        assert_eq!(
            toks,
            [
                Token::NonTerm("P".into()),
                Token::Prod,
                Token::Term("id".into()),
                Token::Prod,
                Token::NonTerm("R".into()),
                Token::Term(";".into()),
                Token::LineFeed,
            ]
        );
    }

    #[test]
    fn tracks_lines_and_appends_final_line_feed() {
        let toks = tokenize("\n-- only a comment\nS -> a").unwrap();
        assert_eq!(toks.len(), 6);
        assert_eq!(toks[2], (Token::NonTerm("S".into()), 3));
        assert_eq!(toks.last(), Some(&(Token::LineFeed, 3)));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = tokenize("S -> a\nS -> 9\n").unwrap_err();
        assert!(err.to_string().starts_with("line 2:"));
    }
}
