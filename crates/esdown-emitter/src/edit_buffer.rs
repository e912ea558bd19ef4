//! Position-based text edits over the original source.
//!
//! Every edit is addressed in original-source offsets, so edits recorded by
//! independent transforms never shift each other. Inserts are stored as
//! ordered fragment lists per offset; range edits (`replace`/`remove`) are
//! stored per start offset and must not partially overlap.
//!
//! Edits can be grouped with `push_state`/`pop_state`. While a state is open
//! its edits are pending: they are invisible to `get_range` and only move to
//! the enclosing state (or the committed set) when the state is popped.

use esdown_common::TextRange;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// Flags accepted by the insert operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditOptions {
    /// Glue the text onto the adjacent fragment already recorded at the
    /// offset instead of starting a new fragment.
    pub extend: bool,
    /// Commit immediately, bypassing any open state.
    pub apply_changes: bool,
}

impl EditOptions {
    pub const NONE: EditOptions = EditOptions {
        extend: false,
        apply_changes: false,
    };

    pub const EXTEND: EditOptions = EditOptions {
        extend: true,
        apply_changes: false,
    };

    #[must_use]
    pub const fn applied(self) -> EditOptions {
        EditOptions {
            apply_changes: true,
            ..self
        }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("edit {range} conflicts with an existing edit at {existing}")]
    Conflict { range: TextRange, existing: TextRange },
    #[error("edit {range} is outside the source text (length {len})")]
    OutOfBounds { range: TextRange, len: u32 },
    #[error("pop_state called with no open state")]
    UnbalancedState,
}

impl EditError {
    /// Source range the error is reported at.
    #[must_use]
    pub const fn range(&self) -> TextRange {
        match self {
            EditError::Conflict { range, .. } | EditError::OutOfBounds { range, .. } => *range,
            EditError::UnbalancedState => TextRange::at(0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    Before,
    After,
}

#[derive(Clone, Debug)]
enum Edit {
    Insert {
        offset: u32,
        text: String,
        placement: Placement,
        extend: bool,
    },
    Replace {
        range: TextRange,
        text: String,
    },
}

#[derive(Debug)]
struct PendingState {
    name: String,
    edits: Vec<Edit>,
}

/// Accumulates edits against an immutable source text and renders the result.
#[derive(Debug)]
pub struct EditBuffer {
    source: Arc<str>,
    inserts: BTreeMap<u32, Vec<String>>,
    /// start -> (end, replacement)
    ranges: BTreeMap<u32, (u32, String)>,
    states: Vec<PendingState>,
}

impl EditBuffer {
    #[must_use]
    pub fn new(source: impl Into<Arc<str>>) -> EditBuffer {
        EditBuffer {
            source: source.into(),
            inserts: BTreeMap::new(),
            ranges: BTreeMap::new(),
            states: Vec::new(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn len(&self) -> u32 {
        self.source.len() as u32
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// True when nothing has been committed yet.
    #[must_use]
    pub fn has_committed_edits(&self) -> bool {
        !self.inserts.is_empty() || !self.ranges.is_empty()
    }

    /// Number of currently open states.
    #[must_use]
    pub fn state_depth(&self) -> usize {
        self.states.len()
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Insert `text` at `offset`, after anything already inserted there.
    pub fn insert(&mut self, offset: u32, text: &str, options: EditOptions) -> Result<(), EditError> {
        self.insert_after(offset, text, options)
    }

    /// Insert `text` at `offset`, after anything already inserted there.
    pub fn insert_after(
        &mut self,
        offset: u32,
        text: &str,
        options: EditOptions,
    ) -> Result<(), EditError> {
        self.record_insert(offset, text, Placement::After, options)
    }

    /// Insert `text` at `offset`, before anything already inserted there.
    pub fn insert_before(
        &mut self,
        offset: u32,
        text: &str,
        options: EditOptions,
    ) -> Result<(), EditError> {
        self.record_insert(offset, text, Placement::Before, options)
    }

    /// Replace `from..to` with `text`. An empty range degrades to an insert.
    pub fn replace(&mut self, from: u32, to: u32, text: &str) -> Result<(), EditError> {
        self.replace_with(from, to, text, EditOptions::NONE)
    }

    pub fn replace_with(
        &mut self,
        from: u32,
        to: u32,
        text: &str,
        options: EditOptions,
    ) -> Result<(), EditError> {
        let range = self.checked_range(from, to)?;
        if range.is_empty() {
            return self.record_insert(from, text, Placement::After, options);
        }
        self.record(
            Edit::Replace {
                range,
                text: text.to_string(),
            },
            options.apply_changes,
        )
    }

    /// Delete `from..to`. Removing an empty range is a no-op.
    pub fn remove(&mut self, from: u32, to: u32) -> Result<(), EditError> {
        let range = self.checked_range(from, to)?;
        if range.is_empty() {
            return Ok(());
        }
        self.record(
            Edit::Replace {
                range,
                text: String::new(),
            },
            false,
        )
    }

    fn record_insert(
        &mut self,
        offset: u32,
        text: &str,
        placement: Placement,
        options: EditOptions,
    ) -> Result<(), EditError> {
        self.checked_range(offset, offset)?;
        if text.is_empty() {
            return Ok(());
        }
        self.record(
            Edit::Insert {
                offset,
                text: text.to_string(),
                placement,
                extend: options.extend,
            },
            options.apply_changes,
        )
    }

    fn checked_range(&self, from: u32, to: u32) -> Result<TextRange, EditError> {
        let range = TextRange::new(from, to);
        let len = self.len();
        if from > to || to > len {
            return Err(EditError::OutOfBounds { range, len });
        }
        Ok(range)
    }

    fn record(&mut self, edit: Edit, apply_changes: bool) -> Result<(), EditError> {
        match self.states.last_mut() {
            Some(state) if !apply_changes => {
                state.edits.push(edit);
                Ok(())
            }
            _ => self.apply(edit),
        }
    }

    fn apply(&mut self, edit: Edit) -> Result<(), EditError> {
        match edit {
            Edit::Insert {
                offset,
                text,
                placement,
                extend,
            } => {
                if let Some(existing) = self.range_strictly_containing(offset) {
                    return Err(EditError::Conflict {
                        range: TextRange::at(offset),
                        existing,
                    });
                }
                trace!(offset, ?placement, extend, text = %text, "insert");
                let fragments = self.inserts.entry(offset).or_default();
                match (placement, extend) {
                    (Placement::After, true) if !fragments.is_empty() => {
                        if let Some(last) = fragments.last_mut() {
                            last.push_str(&text);
                        }
                    }
                    (Placement::Before, true) if !fragments.is_empty() => {
                        fragments[0].insert_str(0, &text);
                    }
                    (Placement::After, _) => fragments.push(text),
                    (Placement::Before, _) => fragments.insert(0, text),
                }
                Ok(())
            }
            Edit::Replace { range, text } => {
                let mut superseded = Vec::new();
                for (&pos, &(end, _)) in self.ranges.range(..range.end) {
                    let existing = TextRange::new(pos, end);
                    if !existing.intersects(range) {
                        continue;
                    }
                    if range.contains_range(existing) {
                        superseded.push(pos);
                    } else {
                        return Err(EditError::Conflict { range, existing });
                    }
                }
                for pos in superseded {
                    self.ranges.remove(&pos);
                }
                let inner: Vec<u32> = self
                    .inserts
                    .range(range.pos + 1..range.end)
                    .map(|(&offset, _)| offset)
                    .collect();
                for offset in inner {
                    self.inserts.remove(&offset);
                }
                trace!(%range, text = %text, "replace");
                self.ranges.insert(range.pos, (range.end, text));
                Ok(())
            }
        }
    }

    fn range_strictly_containing(&self, offset: u32) -> Option<TextRange> {
        self.ranges
            .range(..offset)
            .next_back()
            .map(|(&pos, &(end, _))| TextRange::new(pos, end))
            .filter(|range| offset < range.end)
    }

    // =========================================================================
    // States
    // =========================================================================

    /// Open a named group of pending edits.
    pub fn push_state(&mut self, name: &str) {
        trace!(name, depth = self.states.len() + 1, "push edit state");
        self.states.push(PendingState {
            name: name.to_string(),
            edits: Vec::new(),
        });
    }

    /// Close the innermost state, moving its edits to the enclosing state or
    /// committing them when it was the outermost.
    pub fn pop_state(&mut self) -> Result<(), EditError> {
        let state = self.states.pop().ok_or(EditError::UnbalancedState)?;
        trace!(name = %state.name, edits = state.edits.len(), "pop edit state");
        match self.states.last_mut() {
            Some(parent) => {
                parent.edits.extend(state.edits);
                Ok(())
            }
            None => state.edits.into_iter().try_for_each(|edit| self.apply(edit)),
        }
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Text of `from..to` with committed edits applied.
    ///
    /// Inserts exactly at `from` or `to` belong to the surrounding text and
    /// are left out; range edits are applied only when fully inside.
    #[must_use]
    pub fn get_range(&self, from: u32, to: u32) -> String {
        self.render(from, to.min(self.len()), false)
    }

    /// The full edited text. Pending states are ignored.
    #[must_use]
    pub fn commit(&self) -> String {
        self.render(0, self.len(), true)
    }

    fn render(&self, from: u32, to: u32, boundary_inserts: bool) -> String {
        let mut out = String::with_capacity((to.saturating_sub(from)) as usize + 64);
        let mut pos = from;
        loop {
            let at_boundary = pos == from || pos == to;
            if boundary_inserts || !at_boundary {
                if let Some(fragments) = self.inserts.get(&pos) {
                    fragments.iter().for_each(|fragment| out.push_str(fragment));
                }
            }
            if pos >= to {
                break;
            }
            if let Some((end, text)) = self.ranges.get(&pos)
                && *end <= to
            {
                out.push_str(text);
                pos = *end;
                continue;
            }
            let next_insert = self
                .inserts
                .range(pos + 1..=to)
                .next()
                .map_or(to, |(&offset, _)| offset);
            let next_range = self
                .ranges
                .range(pos + 1..to)
                .find(|(_, (end, _))| *end <= to)
                .map_or(to, |(&offset, _)| offset);
            let next = next_insert.min(next_range);
            out.push_str(TextRange::new(pos, next).slice(&self.source));
            pos = next;
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/edit_buffer.rs"]
mod tests;
