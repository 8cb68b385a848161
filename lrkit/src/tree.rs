//! Generic parse trees.

use crate::grammar::{Grammar, ProdId, Production};
use crate::lexer::FromTerminal;
use crate::parser::TokenFactory;
use crate::symbol::{Symbol, Terminal};
use crate::token::{Span, Token};
use std::convert::Infallible;
use std::fmt;

/// A concrete syntax tree. Leaves are the terminals read from the lexer;
/// inner nodes record the production they were reduced by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    pub symbol: Symbol,
    pub span: Option<Span>,
    pub production: Option<ProdId>,
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn leaf(terminal: Terminal, span: Option<Span>) -> Self {
        Self {
            symbol: Symbol::Terminal(terminal),
            span,
            production: None,
            children: Vec::new(),
        }
    }

    pub fn node(
        symbol: Symbol,
        span: Option<Span>,
        production: ProdId,
        children: Vec<ParseTree>,
    ) -> Self {
        Self {
            symbol,
            span,
            production: Some(production),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.production.is_none()
    }

    /// Productions of the tree in post-order, which is the order the parser
    /// reduced them in.
    pub fn derivation(&self) -> Vec<ProdId> {
        let mut out = Vec::new();
        self.collect_derivation(&mut out);
        out
    }

    fn collect_derivation(&self, out: &mut Vec<ProdId>) {
        for child in &self.children {
            child.collect_derivation(out);
        }
        if let Some(id) = self.production {
            out.push(id);
        }
    }

    /// Terminal leaves, left to right.
    pub fn leaves(&self) -> Box<dyn Iterator<Item = &ParseTree> + '_> {
        if self.is_leaf() {
            Box::new(std::iter::once(self))
        } else {
            Box::new(self.children.iter().flat_map(ParseTree::leaves))
        }
    }

    /// Pairs the tree with its grammar for an indented rendering.
    pub fn display<'a>(&'a self, grammar: &'a Grammar) -> DisplayTree<'a> {
        DisplayTree {
            tree: self,
            grammar,
        }
    }
}

impl Token for ParseTree {
    fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    fn span(&self) -> Option<Span> {
        self.span
    }
}

impl FromTerminal for ParseTree {
    fn from_terminal(terminal: Terminal, span: Option<Span>) -> Self {
        Self::leaf(terminal, span)
    }
}

/// Builds a [`ParseTree`] node for every reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeFactory;

impl TokenFactory for TreeFactory {
    type Token = ParseTree;
    type Error = Infallible;

    fn make_token(
        &mut self,
        id: ProdId,
        production: &Production,
        span: Option<Span>,
        children: Vec<ParseTree>,
    ) -> Result<ParseTree, Infallible> {
        Ok(ParseTree::node(
            Symbol::NonTerminal(production.left.clone()),
            span,
            id,
            children,
        ))
    }
}

/// Renders one node per line, indented by depth.
pub struct DisplayTree<'a> {
    tree: &'a ParseTree,
    grammar: &'a Grammar,
}

impl DisplayTree<'_> {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, node: &ParseTree, depth: usize) -> fmt::Result {
        write!(f, "{:width$}", "", width = depth * 2)?;
        match node.production {
            Some(id) => write!(f, "{}", self.grammar.production(id))?,
            None => write!(f, "{}", node.symbol)?,
        }
        if let Some(span) = node.span {
            write!(f, "  @{}:{}", span.start.line, span.start.column)?;
        }
        writeln!(f)?;
        for child in &node.children {
            self.write_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for DisplayTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.tree, 0)
    }
}
