//! Grammars and their derived sets.
//!
//! A [`Grammar`] is a finite set of [`Production`]s plus a start symbol. On
//! construction it computes three fixpoints that the automaton builder relies
//! on:
//!
//! - the **nullable** non-terminals (those deriving the empty string),
//! - **FIRST** sets: terminals that can begin a string derived from a
//!   non-terminal,
//! - **NEXT** (FOLLOW) sets: terminals, including [`Terminal::End`], that can
//!   immediately follow a non-terminal.
//!
//! A grammar is immutable once built. Unreachable or unproductive
//! non-terminals are kept as they are; nothing is pruned.

use crate::symbol::{NonTerminal, Symbol, Terminal};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// A rewrite rule `left -> right...`. An empty `right` is an epsilon
/// production.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production {
    pub left: NonTerminal,
    pub right: Vec<Symbol>,
}

impl Production {
    pub fn new(left: NonTerminal, right: Vec<Symbol>) -> Self {
        Self { left, right }
    }

    /// Number of symbols on the right-hand side.
    #[inline]
    pub fn len(&self) -> usize {
        self.right.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right.is_empty()
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ->", self.left)?;
        if self.right.is_empty() {
            return write!(f, " ε");
        }
        for sym in &self.right {
            write!(f, " {}", sym)?;
        }
        Ok(())
    }
}

/// Index of a production within its [`Grammar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProdId(pub usize);

impl From<ProdId> for usize {
    fn from(id: ProdId) -> Self {
        id.0
    }
}

/// A context-free grammar with its nullable, FIRST and NEXT sets.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: NonTerminal,
    productions: Vec<Production>,
    by_left: BTreeMap<NonTerminal, Vec<ProdId>>,
    symbols: BTreeSet<Symbol>,
    nullable: BTreeSet<NonTerminal>,
    first: BTreeMap<NonTerminal, BTreeSet<Terminal>>,
    next: BTreeMap<NonTerminal, BTreeSet<Terminal>>,
}

impl Grammar {
    /// Builds a grammar and computes its derived sets.
    ///
    /// Duplicate productions are collapsed; the first occurrence keeps its
    /// position, so [`ProdId`]s follow the input order of distinct
    /// productions. Several productions may share a left-hand side.
    pub fn new<I>(productions: I, start: NonTerminal) -> Self
    where
        I: IntoIterator<Item = Production>,
    {
        let mut seen = BTreeSet::new();
        let mut prods = Vec::new();
        for prod in productions {
            if seen.insert(prod.clone()) {
                prods.push(prod);
            }
        }

        let mut by_left: BTreeMap<NonTerminal, Vec<ProdId>> = BTreeMap::new();
        let mut symbols = BTreeSet::new();
        symbols.insert(Symbol::NonTerminal(start.clone()));
        for (i, prod) in prods.iter().enumerate() {
            by_left.entry(prod.left.clone()).or_default().push(ProdId(i));
            symbols.insert(Symbol::NonTerminal(prod.left.clone()));
            symbols.extend(prod.right.iter().cloned());
        }

        let mut grammar = Self {
            start,
            productions: prods,
            by_left,
            symbols,
            nullable: BTreeSet::new(),
            first: BTreeMap::new(),
            next: BTreeMap::new(),
        };
        grammar.nullable = grammar.compute_nullable();
        grammar.first = grammar.compute_first();
        grammar.next = grammar.compute_next();
        log::debug!(
            "grammar: {} productions, {} symbols, {} nullable",
            grammar.productions.len(),
            grammar.symbols.len(),
            grammar.nullable.len()
        );
        grammar
    }

    pub fn start(&self) -> &NonTerminal {
        &self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns the production with the given id.
    ///
    /// Panics if `id` does not belong to this grammar.
    pub fn production(&self, id: ProdId) -> &Production {
        &self.productions[id.0]
    }

    /// Ids of all productions whose left side is `nt`, in grammar order.
    pub fn productions_of(&self, nt: &NonTerminal) -> &[ProdId] {
        self.by_left.get(nt).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Looks up the id of a production by value.
    pub fn find_production(&self, prod: &Production) -> Option<ProdId> {
        self.productions_of(&prod.left)
            .iter()
            .copied()
            .find(|&id| self.production(id) == prod)
    }

    /// Every symbol that occurs in some production, plus the start symbol.
    pub fn symbols(&self) -> &BTreeSet<Symbol> {
        &self.symbols
    }

    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.symbols.iter().filter_map(Symbol::as_terminal)
    }

    pub fn non_terminals(&self) -> impl Iterator<Item = &NonTerminal> {
        self.symbols.iter().filter_map(Symbol::as_non_terminal)
    }

    pub fn nullable_symbols(&self) -> &BTreeSet<NonTerminal> {
        &self.nullable
    }

    pub fn first_symbols(&self) -> &BTreeMap<NonTerminal, BTreeSet<Terminal>> {
        &self.first
    }

    pub fn next_symbols(&self) -> &BTreeMap<NonTerminal, BTreeSet<Terminal>> {
        &self.next
    }

    /// Terminals are never nullable.
    pub fn is_nullable(&self, sym: &Symbol) -> bool {
        match sym {
            Symbol::Terminal(_) => false,
            Symbol::NonTerminal(nt) => self.nullable.contains(nt),
        }
    }

    /// FIRST set of `nt`; empty for non-terminals that derive no terminal
    /// string prefix.
    pub fn first(&self, nt: &NonTerminal) -> &BTreeSet<Terminal> {
        static EMPTY: BTreeSet<Terminal> = BTreeSet::new();
        self.first.get(nt).unwrap_or(&EMPTY)
    }

    /// NEXT (FOLLOW) set of `nt`.
    pub fn next(&self, nt: &NonTerminal) -> &BTreeSet<Terminal> {
        static EMPTY: BTreeSet<Terminal> = BTreeSet::new();
        self.next.get(nt).unwrap_or(&EMPTY)
    }

    /// Terminals that can begin `symbols`, followed by `fallback` when the
    /// whole sequence is nullable.
    ///
    /// Scans left to right: a terminal is added and ends the scan; a
    /// non-terminal contributes its FIRST set and ends the scan unless it is
    /// nullable.
    pub fn first_of_sequence(
        &self,
        symbols: &[Symbol],
        fallback: &BTreeSet<Terminal>,
    ) -> BTreeSet<Terminal> {
        let mut out = BTreeSet::new();
        if self.scan_first(symbols, &self.first, &mut out) {
            out.extend(fallback.iter().cloned());
        }
        out
    }

    /// Adds FIRST(`symbols`) to `out` using `first`; returns whether the
    /// sequence is entirely nullable.
    fn scan_first(
        &self,
        symbols: &[Symbol],
        first: &BTreeMap<NonTerminal, BTreeSet<Terminal>>,
        out: &mut BTreeSet<Terminal>,
    ) -> bool {
        for sym in symbols {
            match sym {
                Symbol::Terminal(t) => {
                    out.insert(t.clone());
                    return false;
                }
                Symbol::NonTerminal(nt) => {
                    if let Some(set) = first.get(nt) {
                        out.extend(set.iter().cloned());
                    }
                    if !self.nullable.contains(nt) {
                        return false;
                    }
                }
            }
        }
        true
    }

    fn compute_nullable(&self) -> BTreeSet<NonTerminal> {
        let mut nullable = BTreeSet::new();
        let mut changed = true;
        while changed {
            changed = false;
            for prod in &self.productions {
                if nullable.contains(&prod.left) {
                    continue;
                }
                let all_nullable = prod.right.iter().all(|sym| match sym {
                    Symbol::Terminal(_) => false,
                    Symbol::NonTerminal(nt) => nullable.contains(nt),
                });
                if all_nullable {
                    nullable.insert(prod.left.clone());
                    changed = true;
                }
            }
        }
        nullable
    }

    fn compute_first(&self) -> BTreeMap<NonTerminal, BTreeSet<Terminal>> {
        let mut first: BTreeMap<NonTerminal, BTreeSet<Terminal>> = self
            .non_terminals()
            .map(|nt| (nt.clone(), BTreeSet::new()))
            .collect();
        let mut changed = true;
        while changed {
            changed = false;
            for prod in &self.productions {
                let mut found = BTreeSet::new();
                self.scan_first(&prod.right, &first, &mut found);
                let set = first.entry(prod.left.clone()).or_default();
                let before = set.len();
                set.extend(found);
                if set.len() != before {
                    changed = true;
                }
            }
        }
        first
    }

    fn compute_next(&self) -> BTreeMap<NonTerminal, BTreeSet<Terminal>> {
        let mut next: BTreeMap<NonTerminal, BTreeSet<Terminal>> = self
            .non_terminals()
            .map(|nt| (nt.clone(), BTreeSet::new()))
            .collect();
        next.entry(self.start.clone())
            .or_default()
            .insert(Terminal::End);
        let mut changed = true;
        while changed {
            changed = false;
            for prod in &self.productions {
                for (i, sym) in prod.right.iter().enumerate() {
                    let Symbol::NonTerminal(s) = sym else {
                        continue;
                    };
                    let mut found = BTreeSet::new();
                    if self.scan_first(&prod.right[i + 1..], &self.first, &mut found) {
                        if let Some(left_next) = next.get(&prod.left) {
                            found.extend(left_next.iter().cloned());
                        }
                    }
                    let set = next.entry(s.clone()).or_default();
                    let before = set.len();
                    set.extend(found);
                    if set.len() != before {
                        changed = true;
                    }
                }
            }
        }
        next
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for prod in &self.productions {
            writeln!(f, "{}", prod)?;
        }
        Ok(())
    }
}
