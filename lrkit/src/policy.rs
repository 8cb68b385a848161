//! State-identity policies.
//!
//! A [`StatePolicy`] decides when two items are the same automaton state.
//! [`Lr1`] identifies states by the whole item (production states *and*
//! followers); [`Lalr1`] identifies them by the item core and merges followers
//! into the existing state.

use crate::item::{Core, Lookaheads, lookaheads_subset, merge_lookaheads};
use std::collections::BTreeMap;
use std::fmt;

/// Handle of an automaton state: an index into the table's state arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub usize);

impl From<StateId> for usize {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps items to states and back during table construction.
pub trait StatePolicy: Default {
    /// Returns the state for `item`, allocating one if its identity is new.
    /// The flag is `true` for a freshly allocated state. Policies that merge
    /// fold `item`'s followers into the existing state.
    fn item_to_state(&mut self, item: &Lookaheads) -> (StateId, bool);

    /// The item currently stored for `state`.
    fn state_to_item(&self, state: StateId) -> &Lookaheads;

    /// Whether `item`'s identity is known and its followers are already
    /// covered by the stored item.
    fn mapped_item(&self, item: &Lookaheads) -> bool;

    fn state_count(&self) -> usize;

    /// The stored items, indexed by state.
    fn into_items(self) -> Vec<Lookaheads>;
}

/// Canonical LR(1): one state per distinct item.
#[derive(Debug, Default)]
pub struct Lr1 {
    items: Vec<Lookaheads>,
    index: BTreeMap<Lookaheads, StateId>,
}

impl StatePolicy for Lr1 {
    fn item_to_state(&mut self, item: &Lookaheads) -> (StateId, bool) {
        if let Some(&state) = self.index.get(item) {
            return (state, false);
        }
        let state = StateId(self.items.len());
        self.items.push(item.clone());
        self.index.insert(item.clone(), state);
        (state, true)
    }

    fn state_to_item(&self, state: StateId) -> &Lookaheads {
        &self.items[state.0]
    }

    fn mapped_item(&self, item: &Lookaheads) -> bool {
        self.index.contains_key(item)
    }

    fn state_count(&self) -> usize {
        self.items.len()
    }

    fn into_items(self) -> Vec<Lookaheads> {
        self.items
    }
}

/// LALR(1): one state per item core, followers merged.
#[derive(Debug, Default)]
pub struct Lalr1 {
    items: Vec<Lookaheads>,
    index: BTreeMap<Core, StateId>,
}

impl Lalr1 {
    fn core_of(item: &Lookaheads) -> Core {
        item.keys().copied().collect()
    }
}

impl StatePolicy for Lalr1 {
    fn item_to_state(&mut self, item: &Lookaheads) -> (StateId, bool) {
        let core = Self::core_of(item);
        if let Some(&state) = self.index.get(&core) {
            if merge_lookaheads(&mut self.items[state.0], item) {
                log::trace!("lalr: followers of state {} grew", state);
            }
            return (state, false);
        }
        let state = StateId(self.items.len());
        self.items.push(item.clone());
        self.index.insert(core, state);
        (state, true)
    }

    fn state_to_item(&self, state: StateId) -> &Lookaheads {
        &self.items[state.0]
    }

    fn mapped_item(&self, item: &Lookaheads) -> bool {
        match self.index.get(&Self::core_of(item)) {
            Some(state) => lookaheads_subset(item, &self.items[state.0]),
            None => false,
        }
    }

    fn state_count(&self) -> usize {
        self.items.len()
    }

    fn into_items(self) -> Vec<Lookaheads> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ParserItem;
    use crate::symbol::Symbol;
    use crate::testing::grammar;

    #[test]
    fn lr1_keeps_distinct_followers_apart() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let first = ParserItem::initial(&g).next(&Symbol::terminal("d"));
        let second = ParserItem::initial(&g)
            .next(&Symbol::non_terminal("C"))
            .next(&Symbol::terminal("d"));

        let mut policy = Lr1::default();
        assert!(!policy.mapped_item(first.lookaheads()));
        let (s1, new1) = policy.item_to_state(first.lookaheads());
        let (s2, new2) = policy.item_to_state(second.lookaheads());
        let (s3, new3) = policy.item_to_state(first.lookaheads());
        assert!(new1 && new2 && !new3);
        assert_ne!(s1, s2);
        assert_eq!(s1, s3);
        assert!(policy.mapped_item(first.lookaheads()));
        assert_eq!(policy.state_count(), 2);
        assert_eq!(policy.state_to_item(s2), second.lookaheads());
    }

    #[test]
    fn lalr1_merges_same_core() {
        let g = grammar("S", &["S -> C C", "C -> c C", "C -> d"]);
        let first = ParserItem::initial(&g).next(&Symbol::terminal("d"));
        let second = ParserItem::initial(&g)
            .next(&Symbol::non_terminal("C"))
            .next(&Symbol::terminal("d"));

        let mut policy = Lalr1::default();
        let (s1, new1) = policy.item_to_state(first.lookaheads());
        assert!(new1);
        assert!(policy.mapped_item(first.lookaheads()));
        assert!(!policy.mapped_item(second.lookaheads()));

        let (s2, new2) = policy.item_to_state(second.lookaheads());
        assert!(!new2);
        assert_eq!(s1, s2);
        assert!(policy.mapped_item(second.lookaheads()));
        assert_eq!(policy.state_count(), 1);
        let merged = ParserItem::from_lookaheads(&g, policy.state_to_item(s1).clone());
        assert_eq!(merged, first.fusion(&second));
        assert_eq!(policy.into_items().len(), 1);
    }
}
