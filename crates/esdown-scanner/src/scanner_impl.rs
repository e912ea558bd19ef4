//! Scanner implementation.
//!
//! Produces one token at a time over an immutable source. Trivia
//! (whitespace, line breaks, comments) is skipped; comments are recorded as
//! `CommentRange`s and line breaks set `has_preceding_line_break` for ASI.

use crate::syntax_kind::{SyntaxKind, text_to_keyword};
use esdown_common::CommentRange;
use esdown_common::diagnostics::diagnostic_codes;
use std::sync::Arc;

/// A problem found while scanning (unterminated literal, stray character).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
    pub code: u32,
}

/// Snapshot used by `look_ahead`.
#[derive(Clone)]
struct ScannerState {
    pos: usize,
    token: SyntaxKind,
    token_pos: usize,
    token_value: String,
    preceding_line_break: bool,
    comment_count: usize,
    diagnostic_count: usize,
}

pub struct Scanner {
    source: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_pos: usize,
    token_value: String,
    preceding_line_break: bool,
    comments: Vec<CommentRange>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl Scanner {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Scanner {
            source: source.into(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_pos: 0,
            token_value: String::new(),
            preceding_line_break: false,
            comments: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn source_text(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.source)
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_pos(&self) -> u32 {
        self.token_pos as u32
    }

    #[inline]
    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Identifier name, numeric text, or string contents (without quotes).
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        &self.source[self.token_pos..self.pos]
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn comments(&self) -> &[CommentRange] {
        &self.comments
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    /// Run `f` against the scanner and rewind everything it consumed.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Scanner) -> T) -> T {
        let saved = self.save_state();
        let result = f(self);
        self.restore_state(saved);
        result
    }

    fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token: self.token,
            token_pos: self.token_pos,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            comment_count: self.comments.len(),
            diagnostic_count: self.diagnostics.len(),
        }
    }

    fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token = state.token;
        self.token_pos = state.token_pos;
        self.token_value = state.token_value;
        self.preceding_line_break = state.preceding_line_break;
        self.comments.truncate(state.comment_count);
        self.diagnostics.truncate(state.diagnostic_count);
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> Option<u8> {
        self.source.as_bytes().get(pos).copied()
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.token_value.clear();
        self.skip_trivia();
        self.token_pos = self.pos;

        let Some(ch) = self.byte_at(self.pos) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            b'"' | b'\'' => self.scan_string(ch),
            b'0'..=b'9' => self.scan_number(),
            b'.' if matches!(self.byte_at(self.pos + 1), Some(b'0'..=b'9')) => self.scan_number(),
            _ if is_identifier_start(ch) => self.scan_identifier(),
            _ if ch >= 0x80 => {
                let c = self.source[self.pos..].chars().next().unwrap_or('\u{0}');
                if c.is_alphabetic() {
                    self.scan_identifier()
                } else {
                    self.pos += c.len_utf8();
                    self.error(
                        self.token_pos,
                        c.len_utf8(),
                        "Invalid character.",
                        diagnostic_codes::INVALID_CHARACTER,
                    );
                    SyntaxKind::Unknown
                }
            }
            _ => self.scan_punctuation(ch),
        };
        self.token
    }

    fn skip_trivia(&mut self) {
        let source = Arc::clone(&self.source);
        let bytes = source.as_bytes();
        while self.pos < bytes.len() {
            match bytes[self.pos] {
                b' ' | b'\t' | 0x0b | 0x0c => self.pos += 1,
                b'\n' | b'\r' => {
                    self.preceding_line_break = true;
                    self.pos += 1;
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'/') => {
                    let start = self.pos;
                    let rest = &bytes[self.pos..];
                    let len = memchr::memchr2(b'\n', b'\r', rest).unwrap_or(rest.len());
                    self.pos += len;
                    self.comments
                        .push(CommentRange::new(start as u32, self.pos as u32, false));
                }
                b'/' if bytes.get(self.pos + 1) == Some(&b'*') => {
                    let start = self.pos;
                    let body = &bytes[self.pos + 2..];
                    match memchr::memmem::find(body, b"*/") {
                        Some(off) => {
                            if memchr::memchr2(b'\n', b'\r', &body[..off]).is_some() {
                                self.preceding_line_break = true;
                            }
                            self.pos += 2 + off + 2;
                        }
                        None => {
                            self.pos = bytes.len();
                            self.error(
                                start,
                                self.pos - start,
                                "'*/' expected.",
                                diagnostic_codes::UNTERMINATED_COMMENT,
                            );
                        }
                    }
                    self.comments
                        .push(CommentRange::new(start as u32, self.pos as u32, true));
                }
                0xc2 if bytes.get(self.pos + 1) == Some(&0xa0) => self.pos += 2,
                0xe2 if bytes.get(self.pos + 1) == Some(&0x80)
                    && matches!(bytes.get(self.pos + 2), Some(0xa8 | 0xa9)) =>
                {
                    // U+2028 / U+2029
                    self.preceding_line_break = true;
                    self.pos += 3;
                }
                0xef if bytes.get(self.pos + 1) == Some(&0xbb)
                    && bytes.get(self.pos + 2) == Some(&0xbf) =>
                {
                    self.pos += 3;
                }
                _ => break,
            }
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.source[self.pos..].chars().next() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' || (!c.is_ascii() && c.is_alphanumeric())
            {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        let text = &self.source[start..self.pos];
        self.token_value.push_str(text);
        text_to_keyword(text).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let bytes = self.source.as_bytes();
        if bytes[self.pos] == b'0'
            && matches!(
                self.byte_at(self.pos + 1),
                Some(b'x' | b'X' | b'o' | b'O' | b'b' | b'B')
            )
        {
            self.pos += 2;
            while matches!(self.byte_at(self.pos), Some(c) if c.is_ascii_hexdigit() || c == b'_') {
                self.pos += 1;
            }
        } else {
            self.eat_digits();
            if self.byte_at(self.pos) == Some(b'.') {
                self.pos += 1;
                self.eat_digits();
            }
            if matches!(self.byte_at(self.pos), Some(b'e' | b'E')) {
                let save = self.pos;
                self.pos += 1;
                if matches!(self.byte_at(self.pos), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                if matches!(self.byte_at(self.pos), Some(b'0'..=b'9')) {
                    self.eat_digits();
                } else {
                    self.pos = save;
                }
            }
        }
        self.token_value.push_str(&self.source[start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn eat_digits(&mut self) {
        while matches!(self.byte_at(self.pos), Some(b'0'..=b'9' | b'_')) {
            self.pos += 1;
        }
    }

    fn scan_string(&mut self, quote: u8) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let body_start = self.pos;
        loop {
            match self.byte_at(self.pos) {
                None | Some(b'\n' | b'\r') => {
                    self.error(
                        start,
                        self.pos - start,
                        "Unterminated string literal.",
                        diagnostic_codes::UNTERMINATED_STRING_LITERAL,
                    );
                    self.token_value
                        .push_str(&self.source[body_start..self.pos]);
                    return SyntaxKind::StringLiteral;
                }
                Some(b'\\') => {
                    // Skip the escaped character; a backslash-newline continues the line.
                    self.pos += 1;
                    if let Some(c) = self.source[self.pos..].chars().next() {
                        self.pos += c.len_utf8();
                        if c == '\r' && self.byte_at(self.pos) == Some(b'\n') {
                            self.pos += 1;
                        }
                    }
                }
                Some(c) if c == quote => {
                    self.token_value
                        .push_str(&self.source[body_start..self.pos]);
                    self.pos += 1;
                    return SyntaxKind::StringLiteral;
                }
                Some(_) => {
                    let c = self.source[self.pos..].chars().next().unwrap_or('\u{0}');
                    self.pos += c.len_utf8().max(1);
                }
            }
        }
    }

    fn scan_punctuation(&mut self, ch: u8) -> SyntaxKind {
        let next = self.byte_at(self.pos + 1);
        let next2 = self.byte_at(self.pos + 2);
        let next3 = self.byte_at(self.pos + 3);
        let (kind, len) = match (ch, next, next2, next3) {
            (b'{', ..) => (SyntaxKind::OpenBraceToken, 1),
            (b'}', ..) => (SyntaxKind::CloseBraceToken, 1),
            (b'(', ..) => (SyntaxKind::OpenParenToken, 1),
            (b')', ..) => (SyntaxKind::CloseParenToken, 1),
            (b'[', ..) => (SyntaxKind::OpenBracketToken, 1),
            (b']', ..) => (SyntaxKind::CloseBracketToken, 1),
            (b';', ..) => (SyntaxKind::SemicolonToken, 1),
            (b',', ..) => (SyntaxKind::CommaToken, 1),
            (b':', ..) => (SyntaxKind::ColonToken, 1),
            (b'~', ..) => (SyntaxKind::TildeToken, 1),
            (b'.', Some(b'.'), Some(b'.'), _) => (SyntaxKind::DotDotDotToken, 3),
            (b'.', ..) => (SyntaxKind::DotToken, 1),
            (b'?', Some(b'?'), Some(b'='), _) => (SyntaxKind::QuestionQuestionEqualsToken, 3),
            (b'?', Some(b'?'), ..) => (SyntaxKind::QuestionQuestionToken, 2),
            (b'?', Some(b'.'), Some(d), _) if !d.is_ascii_digit() => {
                (SyntaxKind::QuestionDotToken, 2)
            }
            (b'?', ..) => (SyntaxKind::QuestionToken, 1),
            (b'<', Some(b'<'), Some(b'='), _) => (SyntaxKind::LessThanLessThanEqualsToken, 3),
            (b'<', Some(b'<'), ..) => (SyntaxKind::LessThanLessThanToken, 2),
            (b'<', Some(b'='), ..) => (SyntaxKind::LessThanEqualsToken, 2),
            (b'<', ..) => (SyntaxKind::LessThanToken, 1),
            (b'>', Some(b'>'), Some(b'>'), Some(b'=')) => {
                (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4)
            }
            (b'>', Some(b'>'), Some(b'>'), _) => {
                (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3)
            }
            (b'>', Some(b'>'), Some(b'='), _) => {
                (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3)
            }
            (b'>', Some(b'>'), ..) => (SyntaxKind::GreaterThanGreaterThanToken, 2),
            (b'>', Some(b'='), ..) => (SyntaxKind::GreaterThanEqualsToken, 2),
            (b'>', ..) => (SyntaxKind::GreaterThanToken, 1),
            (b'=', Some(b'='), Some(b'='), _) => (SyntaxKind::EqualsEqualsEqualsToken, 3),
            (b'=', Some(b'='), ..) => (SyntaxKind::EqualsEqualsToken, 2),
            (b'=', Some(b'>'), ..) => (SyntaxKind::EqualsGreaterThanToken, 2),
            (b'=', ..) => (SyntaxKind::EqualsToken, 1),
            (b'!', Some(b'='), Some(b'='), _) => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
            (b'!', Some(b'='), ..) => (SyntaxKind::ExclamationEqualsToken, 2),
            (b'!', ..) => (SyntaxKind::ExclamationToken, 1),
            (b'+', Some(b'+'), ..) => (SyntaxKind::PlusPlusToken, 2),
            (b'+', Some(b'='), ..) => (SyntaxKind::PlusEqualsToken, 2),
            (b'+', ..) => (SyntaxKind::PlusToken, 1),
            (b'-', Some(b'-'), ..) => (SyntaxKind::MinusMinusToken, 2),
            (b'-', Some(b'='), ..) => (SyntaxKind::MinusEqualsToken, 2),
            (b'-', ..) => (SyntaxKind::MinusToken, 1),
            (b'*', Some(b'*'), Some(b'='), _) => (SyntaxKind::AsteriskAsteriskEqualsToken, 3),
            (b'*', Some(b'*'), ..) => (SyntaxKind::AsteriskAsteriskToken, 2),
            (b'*', Some(b'='), ..) => (SyntaxKind::AsteriskEqualsToken, 2),
            (b'*', ..) => (SyntaxKind::AsteriskToken, 1),
            (b'/', Some(b'='), ..) => (SyntaxKind::SlashEqualsToken, 2),
            (b'/', ..) => (SyntaxKind::SlashToken, 1),
            (b'%', Some(b'='), ..) => (SyntaxKind::PercentEqualsToken, 2),
            (b'%', ..) => (SyntaxKind::PercentToken, 1),
            (b'&', Some(b'&'), Some(b'='), _) => (SyntaxKind::AmpersandAmpersandEqualsToken, 3),
            (b'&', Some(b'&'), ..) => (SyntaxKind::AmpersandAmpersandToken, 2),
            (b'&', Some(b'='), ..) => (SyntaxKind::AmpersandEqualsToken, 2),
            (b'&', ..) => (SyntaxKind::AmpersandToken, 1),
            (b'|', Some(b'|'), Some(b'='), _) => (SyntaxKind::BarBarEqualsToken, 3),
            (b'|', Some(b'|'), ..) => (SyntaxKind::BarBarToken, 2),
            (b'|', Some(b'='), ..) => (SyntaxKind::BarEqualsToken, 2),
            (b'|', ..) => (SyntaxKind::BarToken, 1),
            (b'^', Some(b'='), ..) => (SyntaxKind::CaretEqualsToken, 2),
            (b'^', ..) => (SyntaxKind::CaretToken, 1),
            _ => {
                self.error(
                    self.pos,
                    1,
                    "Invalid character.",
                    diagnostic_codes::INVALID_CHARACTER,
                );
                (SyntaxKind::Unknown, 1)
            }
        };
        self.pos += len;
        kind
    }
}

#[inline]
fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$'
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
