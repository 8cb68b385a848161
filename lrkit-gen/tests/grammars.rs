use lrkit::{ConflictKind, Parser, TableKind, TransitionTable, TreeFactory};
use lrkit_gen::{input, read_grammar, report};
use std::path::PathBuf;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("grammars")
        .join(name)
}

fn table(name: &str, kind: TableKind) -> TransitionTable {
    let grammar = read_grammar(path(name), None).unwrap();
    TransitionTable::with_kind(kind, grammar).unwrap()
}

#[test]
fn sample_grammars_build_under_both_policies() {
    init_logger();
    for name in ["grammars.g", "brackets.g", "expr.g", "lvalue.g"] {
        let lr1 = table(name, TableKind::Lr1);
        let lalr1 = table(name, TableKind::Lalr1);
        assert!(lalr1.state_count() <= lr1.state_count(), "{}", name);
    }
}

#[test]
fn sample_inputs_parse() {
    init_logger();
    for (g, i, root) in [("grammars.g", "grammars.in", "G"), ("expr.g", "expr.in", "E")] {
        for kind in [TableKind::Lr1, TableKind::Lalr1] {
            let table = table(g, kind);
            let text = std::fs::read_to_string(path(i)).unwrap();
            let lexer = input::lexer(&text, Some(table.grammar())).unwrap();
            let tree = Parser::new(&table).parse(lexer, TreeFactory).unwrap();
            assert_eq!(tree.symbol.name(), root);
            let rendered = tree.display(table.grammar()).to_string();
            assert!(rendered.starts_with(&format!("{} -> ", root)), "{}", rendered);
        }
    }
}

#[test]
fn conflicting_samples_are_rejected() {
    init_logger();
    let grammar = read_grammar(path("dangling_else.g"), None).unwrap();
    let err = TransitionTable::lr1(grammar).unwrap_err();
    assert!(err.count(ConflictKind::ShiftReduce) > 0);

    let grammar = read_grammar(path("lalr_conflict.g"), None).unwrap();
    assert!(TransitionTable::lr1(grammar.clone()).is_ok());
    let err = TransitionTable::lalr1(grammar).unwrap_err();
    assert_eq!(err.count(ConflictKind::ReduceReduce), 2);

    let mut buf = Vec::new();
    report::write_conflicts(&mut buf, &err).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.starts_with("2 conflict(s) in grammar (0 shift/reduce, 2 reduce/reduce)"));
}

#[test]
fn missing_files_carry_context() {
    let err = read_grammar(path("no_such.g"), None).unwrap_err();
    assert!(err.to_string().starts_with("reading grammar "));
}
