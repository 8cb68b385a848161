//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Tooling around [`lrkit`].
//!
//! * [`reader`]: reads `.g` grammar files into a [`lrkit::Grammar`]
//! * [`report`]: writes productions, FIRST/FOLLOW sets, item sets, actions
//!   and conflicts of a table
//! * [`input`]: turns whitespace-separated terminal streams into tokens for
//!   trial parses
//!
//! The `lrkit` binary (feature `cli`) puts the three together.

pub mod input;
pub mod reader;
pub mod report;

pub use reader::{parse_grammar, read_grammar};
