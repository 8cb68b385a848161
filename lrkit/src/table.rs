//! The parsing automaton.
//!
//! [`TransitionTable::build`] explores every state reachable from the initial
//! item, records the transition function, then fills in reductions from the
//! completed production states of each item. Any shift/reduce or
//! reduce/reduce collision is collected; if there is at least one, the whole
//! construction fails with a [`ConflictError`] listing all of them. No
//! conflict is ever resolved implicitly.
//!
//! How items are identified with states is delegated to a [`StatePolicy`]:
//! [`Lr1`] for canonical LR(1) tables and [`Lalr1`] for LALR(1) tables.
//!
//! A finished table is immutable and `Send + Sync`; one table can serve any
//! number of concurrent parses.

use crate::conflict::{Conflict, ConflictError, ConflictKind};
use crate::grammar::{Grammar, ProdId, Production};
use crate::item::{Lookaheads, ParserItem};
use crate::policy::{Lalr1, Lr1, StateId, StatePolicy};
use crate::symbol::{Symbol, Terminal};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

/// Runtime choice of state-identity policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TableKind {
    Lr1,
    #[default]
    Lalr1,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Lr1 => f.write_str("LR(1)"),
            TableKind::Lalr1 => f.write_str("LALR(1)"),
        }
    }
}

/// States, transitions and reductions of an LR automaton.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    grammar: Arc<Grammar>,
    start: StateId,
    accept: StateId,
    items: Vec<Lookaheads>,
    transitions: Vec<BTreeMap<Symbol, StateId>>,
    reductions: Vec<BTreeMap<Terminal, ProdId>>,
}

impl TransitionTable {
    /// Builds a canonical LR(1) table.
    pub fn lr1(grammar: impl Into<Arc<Grammar>>) -> Result<Self, ConflictError> {
        Self::build::<Lr1>(grammar)
    }

    /// Builds an LALR(1) table.
    pub fn lalr1(grammar: impl Into<Arc<Grammar>>) -> Result<Self, ConflictError> {
        Self::build::<Lalr1>(grammar)
    }

    pub fn with_kind(
        kind: TableKind,
        grammar: impl Into<Arc<Grammar>>,
    ) -> Result<Self, ConflictError> {
        match kind {
            TableKind::Lr1 => Self::lr1(grammar),
            TableKind::Lalr1 => Self::lalr1(grammar),
        }
    }

    /// Builds the table with the state-identity policy `P`.
    ///
    /// The start state is the closure of the start symbol followed by
    /// [`Terminal::End`]; the accept state is the item reached from it on the
    /// start symbol, and the start state's transition on the start symbol
    /// always targets it (even when that item is empty).
    ///
    /// # Errors
    ///
    /// Returns a [`ConflictError`] carrying every conflict found.
    pub fn build<P: StatePolicy>(grammar: impl Into<Arc<Grammar>>) -> Result<Self, ConflictError> {
        let grammar: Arc<Grammar> = grammar.into();
        let g: &Grammar = &grammar;
        let mut policy = P::default();

        let initial = ParserItem::initial(g);
        let start_symbol = Symbol::NonTerminal(g.start().clone());
        let (start, _) = policy.item_to_state(initial.lookaheads());
        let (accept, _) = policy.item_to_state(initial.next(&start_symbol).lookaheads());

        let mut transitions: Vec<BTreeMap<Symbol, StateId>> = Vec::new();
        transitions.resize_with(policy.state_count(), BTreeMap::new);

        let mut explorations = 0usize;
        let mut stack = vec![accept, start];
        while let Some(state) = stack.pop() {
            explorations += 1;
            let item = ParserItem::from_lookaheads(g, policy.state_to_item(state).clone());
            log::trace!("exploring state {} ({} production states)", state, item.len());
            for (symbol, next) in item.next_all() {
                // Must be checked before `item_to_state` merges followers.
                let mapped = policy.mapped_item(next.lookaheads());
                let (target, fresh) = policy.item_to_state(next.lookaheads());
                transitions.resize_with(policy.state_count(), BTreeMap::new);
                let target = if state == start && symbol == start_symbol {
                    accept
                } else {
                    target
                };
                transitions[state.0].insert(symbol, target);
                if fresh || !mapped {
                    stack.push(target);
                }
            }
        }
        transitions[start.0].insert(start_symbol, accept);

        let items = policy.into_items();
        log::debug!(
            "automaton: {} states, {} explorations",
            items.len(),
            explorations
        );

        let mut reductions: Vec<BTreeMap<Terminal, ProdId>> = vec![BTreeMap::new(); items.len()];
        let mut conflicts = Vec::new();
        for (i, lookaheads) in items.iter().enumerate() {
            let state = StateId(i);
            for (ps, followers) in lookaheads {
                if !ps.at_end(g) {
                    continue;
                }
                for t in followers {
                    if transitions[i].contains_key(&Symbol::Terminal(t.clone())) {
                        conflicts.push(Conflict {
                            kind: ConflictKind::ShiftReduce,
                            state,
                            item: lookaheads.clone(),
                            terminal: t.clone(),
                            productions: vec![ps.production],
                        });
                    }
                    match reductions[i].get(t) {
                        Some(&recorded) if recorded != ps.production => {
                            conflicts.push(Conflict {
                                kind: ConflictKind::ReduceReduce,
                                state,
                                item: lookaheads.clone(),
                                terminal: t.clone(),
                                productions: vec![recorded, ps.production],
                            });
                        }
                        Some(_) => {}
                        None => {
                            reductions[i].insert(t.clone(), ps.production);
                        }
                    }
                }
            }
        }

        if !conflicts.is_empty() {
            log::debug!("automaton: {} conflicts", conflicts.len());
            return Err(ConflictError::new(grammar, conflicts));
        }

        Ok(Self {
            grammar,
            start,
            accept,
            items,
            transitions,
            reductions,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// The shared grammar handle.
    pub fn grammar_arc(&self) -> Arc<Grammar> {
        Arc::clone(&self.grammar)
    }

    pub fn start_state(&self) -> StateId {
        self.start
    }

    pub fn accept_state(&self) -> StateId {
        self.accept
    }

    pub fn state_count(&self) -> usize {
        self.items.len()
    }

    pub fn states(&self) -> impl Iterator<Item = StateId> + use<> {
        (0..self.items.len()).map(StateId)
    }

    /// The final lookahead map of `state`.
    pub fn lookaheads(&self, state: StateId) -> &Lookaheads {
        &self.items[state.0]
    }

    /// The item of `state` as a [`ParserItem`].
    pub fn item(&self, state: StateId) -> ParserItem<'_> {
        ParserItem::from_lookaheads(&self.grammar, self.items[state.0].clone())
    }

    pub fn transition(&self, state: StateId, symbol: &Symbol) -> Option<StateId> {
        self.transitions[state.0].get(symbol).copied()
    }

    pub fn transitions(&self, state: StateId) -> &BTreeMap<Symbol, StateId> {
        &self.transitions[state.0]
    }

    pub fn reduction(&self, state: StateId, terminal: &Terminal) -> Option<&Production> {
        self.reduction_id(state, terminal)
            .map(|id| self.grammar.production(id))
    }

    pub fn reduction_id(&self, state: StateId, terminal: &Terminal) -> Option<ProdId> {
        self.reductions[state.0].get(terminal).copied()
    }

    pub fn reductions(&self, state: StateId) -> &BTreeMap<Terminal, ProdId> {
        &self.reductions[state.0]
    }

    /// Terminals acceptable in `state`: every reduction lookahead and every
    /// terminal with a transition, plus end of input in the accept state.
    pub fn next_terminals(&self, state: StateId) -> BTreeSet<Terminal> {
        let mut out: BTreeSet<Terminal> = self.reductions[state.0].keys().cloned().collect();
        out.extend(
            self.transitions[state.0]
                .keys()
                .filter_map(Symbol::as_terminal)
                .cloned(),
        );
        if state == self.accept {
            out.insert(Terminal::End);
        }
        out
    }
}
