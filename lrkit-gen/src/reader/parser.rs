use super::lexer::Token;
use chumsky::prelude::*;
use smartstring::alias::String;

/// A right-hand-side symbol as written in the file.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Term(String),
    NonTerm(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

/// One rule per line: `Lhs -> sym*`. After the separator, a further `->`
/// is the terminal `->`.
pub fn parser<'a>() -> impl Parser<'a, &'a [Token], Vec<Rule>, extra::Err<Rich<'a, Token>>> {
    let symbol = select! {
        Token::Term(t) => Symbol::Term(t),
        Token::NonTerm(n) => Symbol::NonTerm(n),
        Token::Prod => Symbol::Term("->".into()),
    }
    .labelled("symbol");

    let rhs = symbol.repeated().collect::<Vec<_>>();

    let lhs = select! {
        Token::NonTerm(n) => n,
    }
    .labelled("non-terminal");

    let prod_kw = select! { Token::Prod => () }.labelled("`->`");
    let lf = select! { Token::LineFeed => () }.labelled("end of line");

    let rule = lhs
        .then_ignore(prod_kw)
        .then(rhs)
        .then_ignore(lf.clone())
        .map(|(lhs, rhs)| Some(Rule { lhs, rhs }));

    let empty_line = lf.map(|_| None::<Rule>);

    rule.or(empty_line)
        .repeated()
        .collect::<Vec<_>>()
        .map(|rules| rules.into_iter().flatten().collect::<Vec<_>>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rule() {
        let tokens = vec![
            Token::NonTerm("Q".into()),
            Token::Prod,
            Token::NonTerm("Q".into()),
            Token::NonTerm("P".into()),
            Token::Term(";".into()),
            Token::LineFeed,
        ];
        let rules = parser().parse(&tokens).into_result().unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].lhs.as_str(), "Q");
        assert_eq!(
            rules[0].rhs,
            vec![
                Symbol::NonTerm("Q".into()),
                Symbol::NonTerm("P".into()),
                Symbol::Term(";".into()),
            ]
        );
    }

    #[test]
    fn empty_lines_and_empty_rhs() {
        let tokens = vec![
            Token::LineFeed,
            Token::NonTerm("R".into()),
            Token::Prod,
            Token::LineFeed,
            Token::LineFeed,
        ];
        let rules = parser().parse(&tokens).into_result().unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules[0].rhs.is_empty());
    }

    #[test]
    fn arrow_after_separator_is_a_terminal() {
        let tokens = vec![
            Token::NonTerm("P".into()),
            Token::Prod,
            Token::Term("id".into()),
            Token::Prod,
            Token::NonTerm("R".into()),
            Token::LineFeed,
        ];
        let rules = parser().parse(&tokens).into_result().unwrap();
        assert_eq!(rules[0].rhs[1], Symbol::Term("->".into()));
    }

    #[test]
    fn rule_must_start_with_non_terminal() {
        let tokens = vec![Token::Term("a".into()), Token::Prod, Token::LineFeed];
        assert!(parser().parse(&tokens).into_result().is_err());
    }
}
