//! Parser state: token cursor, diagnostics, and shared helpers used by the
//! statement and expression grammars.

use super::base::NodeIndex;
use super::node::{IdentifierData, NodeArena, node_flags};
use esdown_common::diagnostics::{diagnostic_codes, format_message, get_message_template};
use esdown_common::limits::MAX_PARSE_DEPTH;
use esdown_scanner::{Scanner, SyntaxKind, token_to_string};
use tracing::trace;

/// A parse error with its byte span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

/// Recursive descent parser over a single source file.
///
/// Nodes are written into `arena`; `parse_source_file` returns the root.
pub struct ParserState {
    pub(crate) scanner: Scanner,
    pub arena: NodeArena,
    pub(crate) file_name: String,
    pub parse_diagnostics: Vec<ParseDiagnostic>,
    pub(crate) current_token: SyntaxKind,
    /// End of the previously consumed token; node ends are taken from here.
    pub(crate) prev_token_end: u32,
    /// Position of the last reported error, used to suppress cascades.
    pub(crate) last_error_pos: Option<u32>,
    pub(crate) recursion_depth: u32,
    /// Set while parsing a `for` initializer so `in` is not read as a binary operator.
    pub(crate) disallow_in: bool,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> ParserState {
        ParserState {
            scanner: Scanner::new(source_text),
            arena: NodeArena::new(),
            file_name,
            parse_diagnostics: Vec::new(),
            current_token: SyntaxKind::Unknown,
            prev_token_end: 0,
            last_error_pos: None,
            recursion_depth: 0,
            disallow_in: false,
        }
    }

    // =========================================================================
    // Results
    // =========================================================================

    #[must_use]
    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    #[must_use]
    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn get_source_text(&self) -> &str {
        self.scanner.source_text()
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.token_end()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    /// True when the current token is the identifier `text` (contextual keyword).
    pub(crate) fn is_contextual(&self, text: &str) -> bool {
        self.current_token == SyntaxKind::Identifier && self.scanner.token_value() == text
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.scanner.token_end();
        self.current_token = self.scanner.scan();
        self.current_token
    }

    /// Peek at the token after the current one.
    pub(crate) fn look_ahead_token(&mut self) -> SyntaxKind {
        self.scanner.look_ahead(|scanner| scanner.scan())
    }

    /// Peek at the token after the current one and whether a line break precedes it.
    pub(crate) fn look_ahead_token_and_line_break(&mut self) -> (SyntaxKind, bool) {
        self.scanner.look_ahead(|scanner| {
            let kind = scanner.scan();
            (kind, scanner.has_preceding_line_break())
        })
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." at the current token.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_expected(token_to_string(kind));
        false
    }

    pub(crate) fn error_expected(&mut self, what: &str) {
        let message = get_message_template(diagnostic_codes::EXPECTED)
            .map(|template| format_message(template, &[what]))
            .unwrap_or_else(|| format!("'{what}' expected."));
        self.parse_error_at_current_token(&message, diagnostic_codes::EXPECTED);
    }

    /// A statement may end here: `;`, `}`, end of file, or a preceding line break.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.current_token,
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    /// Consume a statement terminator, applying automatic semicolon insertion.
    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return true;
        }
        if self.can_parse_semicolon() {
            return true;
        }
        self.error_expected(";");
        false
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn parse_error_at(&mut self, start: u32, length: u32, message: &str, code: u32) {
        if self.last_error_pos == Some(start) {
            return;
        }
        trace!(start, code, message, "parse error");
        self.last_error_pos = Some(start);
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message: message.to_string(),
            code,
        });
    }

    pub(crate) fn parse_error_at_current_token(&mut self, message: &str, code: u32) {
        let start = self.token_pos();
        let length = self.token_end().saturating_sub(start);
        self.parse_error_at(start, length, message, code);
    }

    pub(crate) fn parse_error_for_code(&mut self, start: u32, length: u32, code: u32) {
        let message = get_message_template(code).unwrap_or("Syntax error.");
        self.parse_error_at(start, length, message, code);
    }

    /// Merge scanner diagnostics and order everything by position.
    pub(crate) fn collect_scanner_diagnostics(&mut self) {
        for diag in self.scanner.get_scanner_diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Returns false (and reports) when nesting exceeds `MAX_PARSE_DEPTH`.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSE_DEPTH {
            self.parse_error_at_current_token(
                "Expression or statement nested too deeply.",
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    pub(crate) fn is_identifier(&self) -> bool {
        self.current_token == SyntaxKind::Identifier
    }

    /// Identifier or reserved word, as allowed after `.` and as a property key.
    pub(crate) fn is_identifier_or_keyword(&self) -> bool {
        self.current_token == SyntaxKind::Identifier || self.current_token.is_keyword()
    }

    /// Parse an identifier, or synthesize an empty missing one after reporting.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_identifier() {
            return self.parse_identifier_name();
        }
        self.parse_error_for_code(
            self.token_pos(),
            self.token_end().saturating_sub(self.token_pos()),
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        self.create_missing_identifier()
    }

    /// Parse an identifier name, allowing reserved words.
    pub(crate) fn parse_identifier_name(&mut self) -> NodeIndex {
        if !self.is_identifier_or_keyword() {
            return self.parse_identifier();
        }
        let start = self.token_pos();
        let end = self.token_end();
        let escaped_text = self.scanner.token_value().to_string();
        self.next_token();
        self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            start,
            end,
            IdentifierData { escaped_text },
        )
    }

    pub(crate) fn create_missing_identifier(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let index = self.arena.add_identifier(
            SyntaxKind::Identifier as u16,
            pos,
            pos,
            IdentifierData {
                escaped_text: String::new(),
            },
        );
        self.arena.set_flags(index, node_flags::MISSING);
        index
    }
}
