//! Human-readable table reports.
//!
//! Each writer emits a block of comma-separated records, one per line:
//!
//! ```text
//! PS,<number of productions>
//! P,<index>,<production>
//! FIRST,<non-terminal>,{`empty', a, b, }
//! FOLLOW,<non-terminal>,{a, $end, }
//! CS,<number of states>
//! C,<state>,[<item>, {<lookaheads>}]
//! T,<state>,<symbol>,<target>
//! R,<state>,<terminal>,<production index>
//! ```

use lrkit::{ConflictError, Grammar, TransitionTable};
use std::io::{self, Write};

/// Writes the productions of `grammar`, numbered by [`lrkit::ProdId`].
pub fn write_productions<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "PS,{}\n", grammar.productions().len())?;
    for (i, prod) in grammar.productions().iter().enumerate() {
        writeln!(out, "P,{},{}", i, prod)?;
    }
    Ok(())
}

/// Writes FIRST then FOLLOW sets of every non-terminal. Nullable
/// non-terminals get `` `empty' `` in their FIRST set.
pub fn write_first_follow<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    for nt in grammar.non_terminals() {
        write!(out, "FIRST,{},{{", nt)?;
        if grammar.nullable_symbols().contains(nt) {
            write!(out, "`empty', ")?;
        }
        for t in grammar.first(nt) {
            write!(out, "{}, ", t)?;
        }
        writeln!(out, "}}")?;
    }
    for nt in grammar.non_terminals() {
        write!(out, "FOLLOW,{},{{", nt)?;
        for t in grammar.next(nt) {
            write!(out, "{}, ", t)?;
        }
        writeln!(out, "}}")?;
    }
    Ok(())
}

/// Writes every state: its item, then its transitions and reductions.
pub fn write_states<W: Write>(out: &mut W, table: &TransitionTable) -> io::Result<()> {
    writeln!(
        out,
        "CS,{},start,{},accept,{}\n",
        table.state_count(),
        table.start_state(),
        table.accept_state()
    )?;
    for state in table.states() {
        for line in table.item(state).to_string().lines() {
            writeln!(out, "C,{},{}", state, line)?;
        }
        for (sym, target) in table.transitions(state) {
            writeln!(out, "T,{},{},{}", state, sym, target)?;
        }
        for (t, prod) in table.reductions(state) {
            writeln!(out, "R,{},{},{}", state, t, prod.0)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the summary line and the trace of every conflict.
pub fn write_conflicts<W: Write>(out: &mut W, err: &ConflictError) -> io::Result<()> {
    writeln!(out, "{}\n", err)?;
    out.write_all(err.trace().as_bytes())
}

/// The full report: productions, FIRST/FOLLOW sets and states.
pub fn write_table<W: Write>(out: &mut W, table: &TransitionTable) -> io::Result<()> {
    write_productions(out, table.grammar())?;
    writeln!(out)?;
    write_first_follow(out, table.grammar())?;
    writeln!(out)?;
    write_states(out, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_grammar;

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn productions_and_sets() {
        let g = parse_grammar("S -> a S b\nS ->\n", None).unwrap();
        let text = render(|out| write_productions(out, &g));
        assert_eq!(text, "PS,2\n\nP,0,S -> a S b\nP,1,S -> ε\n");
        let text = render(|out| write_first_follow(out, &g));
        assert_eq!(text, "FIRST,S,{`empty', a, }\nFOLLOW,S,{b, $end, }\n");
    }

    #[test]
    fn states_list_items_and_actions() {
        let g = parse_grammar("S -> a S b\nS ->\n", None).unwrap();
        let table = TransitionTable::lr1(g).unwrap();
        let text = render(|out| write_states(out, &table));
        assert!(text.starts_with(&format!("CS,{},start,0,accept,1\n", table.state_count())));
        assert!(text.contains("C,0,[S -> . a S b, {$end}]\n"));
        assert!(text.contains("T,0,a,"));
        assert!(text.contains("T,0,S,1\n"));
        assert!(text.contains("R,0,$end,1\n"));
        let full = render(|out| write_table(out, &table));
        assert!(full.contains("PS,2"));
        assert!(full.contains("FOLLOW,S"));
    }

    #[test]
    fn conflicts_are_traced() {
        let g = parse_grammar("E -> E + E\nE -> n\n", None).unwrap();
        let err = TransitionTable::lalr1(g).unwrap_err();
        let text = render(|out| write_conflicts(out, &err));
        assert!(text.contains("shift/reduce conflict in state"));
        assert!(text.contains("reduce E -> E + E"));
    }
}
