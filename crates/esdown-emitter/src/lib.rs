//! ES5 lowering for the esdown downleveler.
//!
//! The pipeline for one file is parse → bind → lower:
//! - `LoweringPass` walks the tree children-first and hands every
//!   `for...of` to the `ForOfLowerer`
//! - transforms record position-based edits in an `EditBuffer`
//! - `TempVariablePool` hands out temps and collects bubbled helpers
//!
//! `transpile` runs the whole pipeline for a source string.

pub mod edit_buffer;
pub mod emit_context;
pub mod error;
pub mod lowering_pass;
pub mod temp_vars;
pub mod transforms;
mod transpile;

pub use edit_buffer::{EditBuffer, EditError, EditOptions};
pub use emit_context::EmitContext;
pub use error::LoweringError;
pub use lowering_pass::LoweringPass;
pub use temp_vars::{HelperDeclaration, TempVariablePool};
pub use transforms::destructuring_es5::{PatternError, PatternLowerer};
pub use transforms::for_of_es5::{ForOfFragments, ForOfLowerer, ForOfTarget};
pub use transpile::{TranspileOutput, transpile};
