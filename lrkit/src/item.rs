//! LR(1) item sets.
//!
//! A [`ParserItem`] is one automaton configuration: a set of
//! [`ProductionState`]s, each with the set of terminals that may follow it
//! (its lookaheads, or *followers*). Items are values; [`ParserItem::next`]
//! and [`ParserItem::fusion`] build new items instead of mutating.

use crate::grammar::{Grammar, Production};
use crate::state::ProductionState;
use crate::symbol::{Symbol, Terminal};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Followers per production state: the owned payload of a [`ParserItem`].
pub type Lookaheads = BTreeMap<ProductionState, BTreeSet<Terminal>>;

/// The production states of an item without their followers.
pub type Core = BTreeSet<ProductionState>;

/// An LR(1) item set over a borrowed grammar.
#[derive(Clone, Debug)]
pub struct ParserItem<'g> {
    grammar: &'g Grammar,
    lookaheads: Lookaheads,
}

impl<'g> ParserItem<'g> {
    /// The empty item.
    pub fn empty(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            lookaheads: Lookaheads::new(),
        }
    }

    /// Wraps an existing lookahead map.
    pub fn from_lookaheads(grammar: &'g Grammar, lookaheads: Lookaheads) -> Self {
        Self {
            grammar,
            lookaheads,
        }
    }

    /// The closure of `symbol` followed by `followers`.
    pub fn closure(
        grammar: &'g Grammar,
        symbol: &Symbol,
        followers: BTreeSet<Terminal>,
    ) -> Self {
        let mut item = Self::empty(grammar);
        item.populate_starters(symbol.clone(), followers);
        item
    }

    /// The start item: closure of the start symbol followed by end of input.
    pub fn initial(grammar: &'g Grammar) -> Self {
        let start = Symbol::NonTerminal(grammar.start().clone());
        Self::closure(grammar, &start, BTreeSet::from([Terminal::End]))
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn lookaheads(&self) -> &Lookaheads {
        &self.lookaheads
    }

    pub fn into_lookaheads(self) -> Lookaheads {
        self.lookaheads
    }

    pub fn core(&self) -> Core {
        self.lookaheads.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lookaheads.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lookaheads.len()
    }

    /// Followers recorded for `state`, if it belongs to this item.
    pub fn followers(&self, state: &ProductionState) -> Option<&BTreeSet<Terminal>> {
        self.lookaheads.get(state)
    }

    /// Adds the start states of every production of `symbol`, and everything
    /// they transitively need, with `followers` as lookaheads.
    ///
    /// Terminates because the production states are finite and follower sets
    /// only grow: a state is expanded again only when its set changed.
    fn populate_starters(&mut self, symbol: Symbol, followers: BTreeSet<Terminal>) {
        let grammar = self.grammar;
        let mut stack = vec![(symbol, followers)];
        while let Some((symbol, followers)) = stack.pop() {
            let Symbol::NonTerminal(nt) = symbol else {
                continue;
            };
            for &prod in grammar.productions_of(&nt) {
                let state = ProductionState::start(prod);
                let changed = match self.lookaheads.get_mut(&state) {
                    Some(set) => {
                        let before = set.len();
                        set.extend(followers.iter().cloned());
                        set.len() != before
                    }
                    None => {
                        self.lookaheads.insert(state, followers.clone());
                        true
                    }
                };
                if !changed {
                    continue;
                }
                if let Some(next) = state.next_symbol(grammar).filter(|s| is_non_terminal(s)) {
                    let nested = grammar.first_of_sequence(state.remaining(grammar), &followers);
                    stack.push((next.clone(), nested));
                }
            }
        }
    }

    /// The item reached by consuming `symbol`: every state expecting `symbol`
    /// is advanced with its followers, then closed over its new next symbol.
    /// The result is empty when nothing here expects `symbol`.
    pub fn next(&self, symbol: &Symbol) -> ParserItem<'g> {
        let grammar = self.grammar;
        let mut item = Self::empty(grammar);
        let mut kernel = Vec::new();
        for (state, followers) in &self.lookaheads {
            if state.next_symbol(grammar) != Some(symbol) {
                continue;
            }
            let advanced = state.advance(grammar);
            item.lookaheads
                .entry(advanced)
                .or_default()
                .extend(followers.iter().cloned());
            kernel.push(advanced);
        }
        for state in kernel {
            if let Some(next) = state.next_symbol(grammar).filter(|s| is_non_terminal(s)) {
                let followers = &item.lookaheads[&state];
                let nested = grammar.first_of_sequence(state.remaining(grammar), followers);
                item.populate_starters(next.clone(), nested);
            }
        }
        item
    }

    /// Every non-empty successor item, keyed by the symbol consumed.
    pub fn next_all(&self) -> BTreeMap<Symbol, ParserItem<'g>> {
        let symbols: BTreeSet<&Symbol> = self
            .lookaheads
            .keys()
            .filter_map(|state| state.next_symbol(self.grammar))
            .collect();
        symbols
            .into_iter()
            .map(|sym| (sym.clone(), self.next(sym)))
            .filter(|(_, item)| !item.is_empty())
            .collect()
    }

    /// The reduce candidates: completed productions with their followers.
    pub fn ending_productions(&self) -> BTreeMap<&'g Production, BTreeSet<Terminal>> {
        let mut out: BTreeMap<&'g Production, BTreeSet<Terminal>> = BTreeMap::new();
        for (state, followers) in &self.lookaheads {
            if state.at_end(self.grammar) {
                out.entry(self.grammar.production(state.production))
                    .or_default()
                    .extend(followers.iter().cloned());
            }
        }
        out
    }

    /// The completed production states with their followers.
    pub fn ending_states(&self) -> impl Iterator<Item = (&ProductionState, &BTreeSet<Terminal>)> {
        self.lookaheads
            .iter()
            .filter(|(state, _)| state.at_end(self.grammar))
    }

    /// Union of both items' followers, state by state.
    pub fn fusion(&self, other: &ParserItem<'g>) -> ParserItem<'g> {
        let mut lookaheads = self.lookaheads.clone();
        merge_lookaheads(&mut lookaheads, &other.lookaheads);
        Self::from_lookaheads(self.grammar, lookaheads)
    }

    /// Whether every non-empty follower set here is contained in `other`'s
    /// set for the same state.
    pub fn is_follower_subset_of(&self, other: &ParserItem<'g>) -> bool {
        lookaheads_subset(&self.lookaheads, &other.lookaheads)
    }
}

impl PartialEq for ParserItem<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.grammar, other.grammar) && self.lookaheads == other.lookaheads
    }
}

impl Eq for ParserItem<'_> {}

impl fmt::Display for ParserItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_lookaheads(f, self.grammar, &self.lookaheads)
    }
}

fn is_non_terminal(sym: &Symbol) -> bool {
    matches!(sym, Symbol::NonTerminal(_))
}

/// Unions `from` into `into`; returns whether anything was added.
pub(crate) fn merge_lookaheads(into: &mut Lookaheads, from: &Lookaheads) -> bool {
    let mut grown = false;
    for (state, followers) in from {
        let set = into.entry(*state).or_default();
        let before = set.len();
        set.extend(followers.iter().cloned());
        grown |= set.len() != before;
    }
    grown
}

pub(crate) fn lookaheads_subset(sub: &Lookaheads, sup: &Lookaheads) -> bool {
    sub.iter()
        .filter(|(_, followers)| !followers.is_empty())
        .all(|(state, followers)| {
            sup.get(state)
                .is_some_and(|other| followers.is_subset(other))
        })
}

/// Writes one `[A -> x . y, {a, b}]` line per production state.
pub(crate) fn write_lookaheads<W: fmt::Write>(
    out: &mut W,
    grammar: &Grammar,
    lookaheads: &Lookaheads,
) -> fmt::Result {
    for (state, followers) in lookaheads {
        write!(out, "[{}, {{", state.display(grammar))?;
        for (i, t) in followers.iter().enumerate() {
            if i > 0 {
                write!(out, ", ")?;
            }
            write!(out, "{}", t)?;
        }
        writeln!(out, "}}]")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{grammar, nt, prod, terms};

    fn with_end(names: &[&str]) -> BTreeSet<Terminal> {
        let mut set = terms(names);
        set.insert(Terminal::End);
        set
    }

    #[test]
    fn initial_item_closes_over_nested_non_terminals() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let item = ParserItem::initial(&g);
        assert_eq!(item.len(), 3);
        let rendered = item.to_string();
        assert_eq!(
            rendered,
            "[S -> . C C, {$end}]\n[C -> . c C, {c, d}]\n[C -> . d, {c, d}]\n"
        );
    }

    #[test]
    fn closure_uses_outer_followers_for_nullable_remainder() {
        let g = grammar("S", &["S -> A B x", "A -> a", "B -> b", "B ->"]);
        let item = ParserItem::initial(&g);
        let a = g.find_production(&prod("A", &["a"])).unwrap();
        assert_eq!(
            item.followers(&ProductionState::start(a)),
            Some(&terms(&["b", "x"]))
        );

        let g = grammar("S", &["S -> A B", "A -> a", "B -> b", "B ->"]);
        let item = ParserItem::initial(&g);
        let a = g.find_production(&prod("A", &["a"])).unwrap();
        assert_eq!(
            item.followers(&ProductionState::start(a)),
            Some(&with_end(&["b"]))
        );
    }

    #[test]
    fn left_recursion_accumulates_followers() {
        let g = grammar("E", &["E -> E + n", "E -> n"]);
        let item = ParserItem::initial(&g);
        for state in item.lookaheads().keys() {
            assert_eq!(item.followers(state), Some(&with_end(&["+"])));
        }
    }

    #[test]
    fn next_advances_and_closes() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let item = ParserItem::initial(&g);
        let after_c = item.next(&Symbol::non_terminal("C"));
        assert_eq!(
            after_c.to_string(),
            "[S -> C . C, {$end}]\n[C -> . c C, {$end}]\n[C -> . d, {$end}]\n"
        );
        let after_d = after_c.next(&Symbol::terminal("d"));
        assert_eq!(after_d.to_string(), "[C -> d ., {$end}]\n");
        assert!(after_d.next(&Symbol::terminal("d")).is_empty());
    }

    #[test]
    fn next_all_omits_empty_successors() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let item = ParserItem::initial(&g);
        let succ = item.next_all();
        let keys: Vec<_> = succ.keys().map(|s| s.to_string()).collect();
        assert_eq!(keys, ["c", "d", "C"]);
        assert!(succ.values().all(|i| !i.is_empty()));
        assert!(item.next(&Symbol::terminal("zzz")).is_empty());
    }

    #[test]
    fn ending_productions_are_reduce_candidates() {
        let g = grammar("S", &["S -> a S b", "S ->"]);
        let item = ParserItem::initial(&g);
        let ending = item.ending_productions();
        assert_eq!(ending.len(), 1);
        assert_eq!(ending.get(&prod("S", &[])), Some(&BTreeSet::from([Terminal::End])));
        assert_eq!(item.ending_states().count(), 1);

        let inner = item.next(&Symbol::terminal("a"));
        assert_eq!(inner.ending_productions().get(&prod("S", &[])), Some(&terms(&["b"])));
    }

    #[test]
    fn fusion_with_self_is_identity() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let item = ParserItem::initial(&g);
        assert_eq!(item.fusion(&item), item);
        let succ = item.next(&Symbol::terminal("c"));
        assert_eq!(succ.fusion(&succ), succ);
    }

    #[test]
    fn fusion_and_subset_over_shared_core() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let first = ParserItem::initial(&g).next(&Symbol::terminal("d"));
        let second = ParserItem::initial(&g)
            .next(&Symbol::non_terminal("C"))
            .next(&Symbol::terminal("d"));
        assert_eq!(first.core(), second.core());
        assert_ne!(first, second);
        assert!(!first.is_follower_subset_of(&second));
        assert!(!second.is_follower_subset_of(&first));

        let fused = first.fusion(&second);
        assert_eq!(fused.core(), first.core());
        assert!(first.is_follower_subset_of(&fused));
        assert!(second.is_follower_subset_of(&fused));
        assert_eq!(fused.to_string(), "[C -> d ., {c, d, $end}]\n");
        assert!(ParserItem::empty(&g).is_follower_subset_of(&first));
    }

    #[test]
    fn closure_from_arbitrary_symbol() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let item = ParserItem::closure(&g, &Symbol::non_terminal("C"), terms(&["x"]));
        assert_eq!(item.len(), 2);
        assert!(item.lookaheads().values().all(|f| *f == terms(&["x"])));
        assert!(ParserItem::closure(&g, &Symbol::terminal("c"), terms(&["x"])).is_empty());
        assert_eq!(item.grammar().start(), &nt("S"));
    }
}
