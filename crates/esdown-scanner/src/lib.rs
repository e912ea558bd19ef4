//! JavaScript scanner for the esdown downleveler.
//!
//! Token kinds live in [`SyntaxKind`]; the parser extends the same `u16`
//! space with node kinds (`esdown_parser::syntax_kind_ext`).

mod scanner_impl;
mod syntax_kind;

pub use scanner_impl::{Scanner, ScannerDiagnostic};
pub use syntax_kind::{SyntaxKind, text_to_keyword, token_to_string};
