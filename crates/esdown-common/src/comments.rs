//! Comment ranges.
//!
//! Comments are not part of the node tree. The scanner records every comment
//! it skips so later phases (scope option directives) can inspect them.

use serde::Serialize;

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    /// Whether this is a `/* */` comment
    pub is_multi_line: bool,
}

impl CommentRange {
    pub fn new(pos: u32, end: u32, is_multi_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
        }
    }

    /// Get the full comment text (including delimiters) from source.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        if end <= source.len() && start < end {
            &source[start..end]
        } else {
            ""
        }
    }

    /// Get the comment text without its `//` or `/* */` delimiters.
    pub fn get_body<'a>(&self, source: &'a str) -> &'a str {
        let text = self.get_text(source);
        if self.is_multi_line {
            let inner = text.strip_prefix("/*").unwrap_or(text);
            inner.strip_suffix("*/").unwrap_or(inner)
        } else {
            text.strip_prefix("//").unwrap_or(text)
        }
    }
}
