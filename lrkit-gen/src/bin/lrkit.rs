//! Command-line interface for `lrkit`.
//!
//! `lrkit table` builds an LR(1) or LALR(1) table from a `.g` grammar file and
//! prints its report, exiting with an error when the grammar has conflicts.
//! `lrkit parse` additionally runs the table over a terminal stream and prints
//! the parse tree.

#[cfg(feature = "cli")]
mod real {
    use anyhow::{Context, Result, bail};
    use clap::{Parser, Subcommand};
    use lrkit::{TableKind, TransitionTable, TreeFactory};
    use lrkit_gen::{input, read_grammar, report};
    use std::io::Write;
    use std::path::{Path, PathBuf};

    #[derive(Parser)]
    #[command(about = "Build LR(1)/LALR(1) tables and run trial parses")]
    struct Args {
        #[command(subcommand)]
        command: Command,

        /// Enable debug logging (off by default).
        #[arg(short = 'd', long, global = true)]
        debug: bool,
    }

    #[derive(Subcommand)]
    enum Command {
        /// Print productions, FIRST/FOLLOW sets and the state table.
        Table {
            /// Path to the grammar file.
            #[arg(short = 'g', long)]
            grammar: PathBuf,

            /// Build an LALR(1) table instead of a canonical LR(1) one.
            #[arg(long)]
            lalr: bool,

            /// Start symbol (defaults to the left side of the first rule).
            #[arg(short = 's', long)]
            start: Option<String>,
        },

        /// Parse a whitespace-separated terminal stream and print the tree.
        Parse {
            /// Path to the grammar file.
            #[arg(short = 'g', long)]
            grammar: PathBuf,

            /// Path to the input file.
            #[arg(short = 'i', long)]
            input: PathBuf,

            /// Build an LALR(1) table instead of a canonical LR(1) one.
            #[arg(long)]
            lalr: bool,

            /// Start symbol (defaults to the left side of the first rule).
            #[arg(short = 's', long)]
            start: Option<String>,
        },
    }

    fn kind(lalr: bool) -> TableKind {
        if lalr { TableKind::Lalr1 } else { TableKind::Lr1 }
    }

    fn build(grammar: &Path, start: Option<&str>, lalr: bool) -> Result<TransitionTable> {
        let grammar = read_grammar(grammar, start)?;
        match TransitionTable::with_kind(kind(lalr), grammar) {
            Ok(table) => Ok(table),
            Err(err) => {
                let stderr = std::io::stderr();
                report::write_conflicts(&mut stderr.lock(), &err)?;
                bail!("{} table not built", kind(lalr));
            }
        }
    }

    pub fn main() -> Result<()> {
        let args = Args::parse();
        let mut logger = env_logger::Builder::from_default_env();
        if args.debug {
            logger.filter_level(log::LevelFilter::Debug);
        }
        logger.init();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        match args.command {
            Command::Table {
                grammar,
                lalr,
                start,
            } => {
                let table = build(&grammar, start.as_deref(), lalr)?;
                report::write_table(&mut out, &table)?;
            }
            Command::Parse {
                grammar,
                input: input_path,
                lalr,
                start,
            } => {
                let table = build(&grammar, start.as_deref(), lalr)?;
                let text = std::fs::read_to_string(&input_path)
                    .with_context(|| format!("reading input {}", input_path.display()))?;
                let lexer = input::lexer(&text, Some(table.grammar()))?;
                let (tree, stats) = lrkit::Parser::new(&table)
                    .parse_with_stats(lexer, TreeFactory)
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
                write!(out, "{}", tree.display(table.grammar()))?;
                log::debug!(
                    "parsed {} tokens: {} shifts, {} reductions",
                    stats.tokens,
                    stats.shifts,
                    stats.reductions
                );
            }
        }
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    real::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("lrkit disabled (compiled without `cli` feature)");
}
