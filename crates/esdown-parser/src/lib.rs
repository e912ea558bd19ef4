//! JavaScript parser and arena AST for the esdown downleveler.
//!
//! The tree is data-oriented: every node lives in a `NodeArena` and is
//! addressed by a `NodeIndex`. Nodes are never mutated after parsing; the
//! lowering phases only read them and record text edits.

pub mod parser;
pub mod syntax;

pub use parser::{NodeIndex, NodeList, ParserState};
