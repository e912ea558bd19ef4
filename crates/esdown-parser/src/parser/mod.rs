//! Parser, node arena, and node kinds.

mod base;
pub mod node;
mod node_access;
mod state;
mod state_expressions;
mod state_statements;
pub mod syntax_kind_ext;

pub use base::{NodeIndex, NodeList};
pub use node::{NodeArena, node_flags};
pub use state::{ParseDiagnostic, ParserState};

#[cfg(test)]
#[path = "../../tests/tests.rs"]
mod tests;
