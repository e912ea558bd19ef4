//! Scope analysis for the esdown downleveler.
//!
//! The binder records one scope per function and one for the program,
//! resolves the per-scope [`ScopeOptions`] capability record, and keeps the
//! side tables the lowering pass needs: the scope of every `for...of` node,
//! each scope's helper insertion offset, and the set of identifier names
//! used anywhere in the file.

mod scopes;
mod state;

pub use scopes::{Scope, ScopeId, ScopeOptions, ScopeTable};
pub use state::Binder;
