//! Lowering errors and their diagnostic form.

use crate::edit_buffer::EditError;
use crate::transforms::destructuring_es5::PatternError;
use esdown_common::diagnostics::diagnostic_codes;
use esdown_common::{Diagnostic, TextRange};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoweringError {
    /// The loop head binds something other than a name, a single
    /// declarator, or a binding pattern.
    #[error("'{target}' is not a valid 'for...of' binding target")]
    InvalidForOfTarget { target: String, range: TextRange },
    #[error("'{construct}' cannot be lowered to ES5")]
    UnsupportedConstruct {
        construct: &'static str,
        range: TextRange,
    },
    #[error("statement nesting exceeds {limit} levels")]
    NestingTooDeep { limit: u32, range: TextRange },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

impl LoweringError {
    #[must_use]
    pub fn code(&self) -> u32 {
        match self {
            LoweringError::InvalidForOfTarget { .. } => diagnostic_codes::INVALID_FOR_OF_TARGET,
            LoweringError::UnsupportedConstruct { .. } | LoweringError::NestingTooDeep { .. } => {
                diagnostic_codes::UNSUPPORTED_CONSTRUCT
            }
            LoweringError::Pattern(_) => diagnostic_codes::UNSUPPORTED_BINDING_PATTERN,
            LoweringError::Edit(EditError::UnbalancedState) => diagnostic_codes::UNBALANCED_EDIT_STATE,
            LoweringError::Edit(_) => diagnostic_codes::CONFLICTING_EDIT,
        }
    }

    /// Source range of the offending node or edit.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            LoweringError::InvalidForOfTarget { range, .. }
            | LoweringError::UnsupportedConstruct { range, .. }
            | LoweringError::NestingTooDeep { range, .. } => *range,
            LoweringError::Pattern(err) => err.range(),
            LoweringError::Edit(err) => err.range(),
        }
    }

    #[must_use]
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let range = self.range();
        let file = file.to_string();
        match self {
            LoweringError::InvalidForOfTarget { target, .. } => {
                Diagnostic::from_code(file, range.pos, range.len(), self.code(), &[target.as_str()])
            }
            LoweringError::UnsupportedConstruct { construct, .. } => {
                Diagnostic::from_code(file, range.pos, range.len(), self.code(), &[*construct])
            }
            LoweringError::NestingTooDeep { .. } => Diagnostic::from_code(
                file,
                range.pos,
                range.len(),
                self.code(),
                &["deeply nested statement"],
            ),
            LoweringError::Pattern(err) => Diagnostic::from_code(
                file,
                range.pos,
                range.len(),
                self.code(),
                &[&err.to_string()],
            ),
            LoweringError::Edit(EditError::Conflict { range, existing }) => Diagnostic::from_code(
                file,
                range.pos,
                range.len(),
                self.code(),
                &[&range.to_string(), &existing.to_string()],
            ),
            LoweringError::Edit(err) => Diagnostic::from_code(
                file,
                range.pos,
                range.len(),
                self.code(),
                &[&err.to_string()],
            ),
        }
    }
}
