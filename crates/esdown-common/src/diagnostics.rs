//! Diagnostic types and message lookup.
//!
//! Every phase reports problems as `Diagnostic`s built from the static
//! message table below. Templates use `{0}`, `{1}`, ... placeholders filled
//! by `format_message`.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// Related information for a diagnostic (e.g., "see also" locations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A diagnostic message with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information spans
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create a diagnostic from a table entry, filling its placeholders.
    #[must_use]
    pub fn from_code(file: String, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let (template, category) = get_diagnostic_message(code)
            .map(|m| (m.message, m.category))
            .unwrap_or(("{0}", DiagnosticCategory::Error));
        Self {
            file,
            start,
            length,
            message_text: format_message(template, args),
            category,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: String, start: u32, length: u32, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Scanner
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const UNTERMINATED_COMMENT: u32 = 1010;
    pub const INVALID_CHARACTER: u32 = 1127;
    // Parser
    pub const EXPECTED: u32 = 1005;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const ONLY_ONE_VARIABLE_DECLARATION_IN_FOR_OF: u32 = 1188;
    pub const FOR_OF_DECLARATION_CANNOT_HAVE_INITIALIZER: u32 = 1190;
    // Lowering
    pub const INVALID_FOR_OF_TARGET: u32 = 9001;
    pub const UNSUPPORTED_CONSTRUCT: u32 = 9002;
    pub const UNSUPPORTED_BINDING_PATTERN: u32 = 9003;
    pub const CONFLICTING_EDIT: u32 = 9004;
    pub const UNBALANCED_EDIT_STATE: u32 = 9005;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Identifier expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED,
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_COMMENT,
        category: DiagnosticCategory::Error,
        message: "'*/' expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Expression expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: "Invalid character.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        category: DiagnosticCategory::Error,
        message: "Declaration or statement expected.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ONLY_ONE_VARIABLE_DECLARATION_IN_FOR_OF,
        category: DiagnosticCategory::Error,
        message: "Only a single variable declaration is allowed in a 'for...of' statement.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::FOR_OF_DECLARATION_CANNOT_HAVE_INITIALIZER,
        category: DiagnosticCategory::Error,
        message: "The variable declaration of a 'for...of' statement cannot have an initializer.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_FOR_OF_TARGET,
        category: DiagnosticCategory::Error,
        message: "'{0}' is not a valid 'for...of' binding target.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNSUPPORTED_CONSTRUCT,
        category: DiagnosticCategory::Error,
        message: "'{0}' cannot be lowered to ES5.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNSUPPORTED_BINDING_PATTERN,
        category: DiagnosticCategory::Error,
        message: "Binding pattern cannot be lowered: {0}.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONFLICTING_EDIT,
        category: DiagnosticCategory::Error,
        message: "Edit at {0} conflicts with an existing edit at {1}.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNBALANCED_EDIT_STATE,
        category: DiagnosticCategory::Error,
        message: "Edit state stack is unbalanced: {0}.",
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;
