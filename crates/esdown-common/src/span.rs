//! Byte-offset source ranges.

use serde::Serialize;

/// A half-open byte range `pos..end` into the original source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TextRange {
    pub pos: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    #[must_use]
    pub const fn new(pos: u32, end: u32) -> Self {
        TextRange { pos, end }
    }

    /// An empty range sitting at `offset`.
    #[inline]
    #[must_use]
    pub const fn at(offset: u32) -> Self {
        TextRange {
            pos: offset,
            end: offset,
        }
    }

    #[inline]
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.pos)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.pos
    }

    /// True when `other` lies entirely inside `self` (bounds inclusive).
    #[inline]
    #[must_use]
    pub const fn contains_range(&self, other: TextRange) -> bool {
        self.pos <= other.pos && other.end <= self.end
    }

    /// True when the two ranges share at least one byte.
    #[inline]
    #[must_use]
    pub const fn intersects(&self, other: TextRange) -> bool {
        self.pos < other.end && other.pos < self.end
    }

    /// Nesting relation used by scope-aware allocation: either range contains
    /// the other.
    #[inline]
    #[must_use]
    pub const fn nests_with(&self, other: TextRange) -> bool {
        self.contains_range(other) || other.contains_range(*self)
    }

    /// Slice the range out of `source`, returning "" when out of bounds.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.pos as usize..self.end as usize).unwrap_or("")
    }
}

impl std::fmt::Display for TextRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

#[cfg(test)]
#[path = "../tests/span.rs"]
mod tests;
