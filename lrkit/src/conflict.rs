//! Shift/reduce and reduce/reduce conflicts.

use crate::grammar::{Grammar, ProdId};
use crate::item::{Lookaheads, write_lookaheads};
use crate::policy::StateId;
use crate::symbol::Terminal;
use std::fmt::{self, Write};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConflictKind {
    /// A state both shifts and reduces on the same terminal.
    ShiftReduce,
    /// A state reduces by two different productions on the same terminal.
    ReduceReduce,
}

impl ConflictKind {
    pub fn to_str(self) -> &'static str {
        match self {
            ConflictKind::ShiftReduce => "shift/reduce",
            ConflictKind::ReduceReduce => "reduce/reduce",
        }
    }
}

/// One conflict found while filling in reductions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    /// The state whose item triggered the conflict.
    pub state: StateId,
    /// That state's item.
    pub item: Lookaheads,
    /// The lookahead on which the actions collide.
    pub terminal: Terminal,
    /// The reducing production for shift/reduce; the already recorded and the
    /// competing production for reduce/reduce.
    pub productions: Vec<ProdId>,
}

impl Conflict {
    /// Writes a human-readable trace of the conflict: the offending item,
    /// state by state, followed by the competing productions.
    pub fn write_trace<W: Write>(&self, out: &mut W, grammar: &Grammar) -> fmt::Result {
        writeln!(
            out,
            "{} conflict in state {} on `{}`:",
            self.kind.to_str(),
            self.state,
            self.terminal
        )?;
        let mut item = String::new();
        write_lookaheads(&mut item, grammar, &self.item)?;
        for line in item.lines() {
            writeln!(out, "    {}", line)?;
        }
        if self.kind == ConflictKind::ShiftReduce {
            writeln!(out, "  shift `{}`", self.terminal)?;
        }
        for &prod in &self.productions {
            writeln!(out, "  reduce {}", grammar.production(prod))?;
        }
        Ok(())
    }
}

/// Table construction failed: the grammar has conflicts under the chosen
/// state-identity policy. Carries every conflict found, not just the first.
#[derive(Debug, Error)]
#[error(
    "{} conflict(s) in grammar ({} shift/reduce, {} reduce/reduce)",
    .conflicts.len(),
    count_kind(.conflicts, ConflictKind::ShiftReduce),
    count_kind(.conflicts, ConflictKind::ReduceReduce)
)]
pub struct ConflictError {
    grammar: Arc<Grammar>,
    conflicts: Vec<Conflict>,
}

impl ConflictError {
    pub(crate) fn new(grammar: Arc<Grammar>, conflicts: Vec<Conflict>) -> Self {
        Self { grammar, conflicts }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn count(&self, kind: ConflictKind) -> usize {
        count_kind(&self.conflicts, kind)
    }

    /// The full report: one trace per conflict.
    pub fn trace(&self) -> String {
        let mut out = String::new();
        for conflict in &self.conflicts {
            // Writing into a String cannot fail.
            let _ = conflict.write_trace(&mut out, &self.grammar);
        }
        out
    }
}

fn count_kind(conflicts: &[Conflict], kind: ConflictKind) -> usize {
    conflicts.iter().filter(|c| c.kind == kind).count()
}
