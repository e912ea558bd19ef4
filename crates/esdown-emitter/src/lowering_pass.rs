//! Lowering Pass
//!
//! Walks the tree children-first and lowers every `for...of` statement.
//! Post-order matters: when an outer loop copies the text of its iterated
//! expression or a pattern default, the edits of loops nested inside that
//! text are already committed and come along.
//!
//! When the walk leaves a function or the program, helpers bubbled into
//! that scope are inserted at the scope's helper offset.

use crate::edit_buffer::{EditBuffer, EditError, EditOptions};
use crate::error::LoweringError;
use crate::temp_vars::{HelperDeclaration, TempVariablePool};
use crate::transforms::for_of_es5::{ForOfLowerer, LoopPlacement};
use esdown_binder::ScopeTable;
use esdown_common::limits::MAX_AST_DEPTH;
use esdown_parser::NodeIndex;
use esdown_parser::parser::node::NodeArena;
use esdown_parser::parser::syntax_kind_ext;
use tracing::{debug, trace, warn};

pub struct LoweringPass<'a> {
    arena: &'a NodeArena,
    scopes: &'a ScopeTable,
    source: &'a str,
    edits: EditBuffer,
    pool: TempVariablePool,
    /// Nodes currently being visited, outermost first.
    ancestors: Vec<NodeIndex>,
    lowered_loops: u32,
    emitted_helpers: u32,
}

impl<'a> LoweringPass<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena, scopes: &'a ScopeTable, source: &'a str) -> LoweringPass<'a> {
        LoweringPass {
            arena,
            scopes,
            source,
            edits: EditBuffer::new(source),
            pool: TempVariablePool::new(scopes.identifiers().clone()),
            ancestors: Vec::new(),
            lowered_loops: 0,
            emitted_helpers: 0,
        }
    }

    /// Lower the tree under `root` and return the rewritten source.
    pub fn run(mut self, root: NodeIndex) -> Result<String, LoweringError> {
        self.visit(root)?;
        if self.edits.state_depth() != 0 {
            return Err(EditError::UnbalancedState.into());
        }
        if self.pool.has_pending_helpers() {
            warn!("helpers bubbled to a scope that was never left");
        }
        debug!(
            loops = self.lowered_loops,
            helpers = self.emitted_helpers,
            "lowering pass complete"
        );
        if !self.edits.has_committed_edits() {
            return Ok(self.source.to_string());
        }
        Ok(self.edits.commit())
    }

    fn visit(&mut self, idx: NodeIndex) -> Result<(), LoweringError> {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return Ok(());
        };
        if self.ancestors.len() as u32 >= MAX_AST_DEPTH {
            return Err(LoweringError::NestingTooDeep {
                limit: MAX_AST_DEPTH,
                range: node.range(),
            });
        }

        self.ancestors.push(idx);
        let visited = arena
            .children(idx)
            .into_iter()
            .try_for_each(|child| self.visit(child));
        self.ancestors.pop();
        visited?;

        if node.kind == syntax_kind_ext::FOR_OF_STATEMENT {
            self.lower_for_of(idx)?;
        }
        if node.kind == syntax_kind_ext::SOURCE_FILE || arena.is_function_like(idx) {
            self.flush_helpers(idx)?;
        }
        Ok(())
    }

    fn lower_for_of(&mut self, idx: NodeIndex) -> Result<(), LoweringError> {
        let placement = self.placement(idx);
        trace!(
            node = idx.0,
            anchor = placement.anchor_pos,
            needs_block = placement.needs_block,
            "lowering for...of"
        );
        ForOfLowerer::new(self.arena, self.scopes, self.source).lower_into(
            idx,
            placement,
            &mut self.pool,
            &mut self.edits,
        )?;
        self.lowered_loops += 1;
        Ok(())
    }

    /// Anchor the preamble before any labels of the loop, and ask for braces
    /// unless the labelled loop sits in a statement list.
    fn placement(&self, idx: NodeIndex) -> LoopPlacement {
        let mut anchor_pos = self.arena.get(idx).map_or(0, |node| node.pos);
        let mut container = None;
        for &ancestor in self.ancestors.iter().rev() {
            let Some(node) = self.arena.get(ancestor) else {
                break;
            };
            if node.kind == syntax_kind_ext::LABELED_STATEMENT {
                anchor_pos = node.pos;
                continue;
            }
            container = Some(node.kind);
            break;
        }
        let needs_block = !matches!(
            container,
            Some(
                syntax_kind_ext::SOURCE_FILE
                    | syntax_kind_ext::BLOCK
                    | syntax_kind_ext::CASE_CLAUSE
                    | syntax_kind_ext::DEFAULT_CLAUSE
            )
        );
        LoopPlacement {
            anchor_pos,
            needs_block,
        }
    }

    fn flush_helpers(&mut self, container: NodeIndex) -> Result<(), LoweringError> {
        let Some(scope_id) = self.scopes.scope_for_container(container) else {
            return Ok(());
        };
        let helpers = self.pool.take_helpers(scope_id);
        if helpers.is_empty() {
            return Ok(());
        }
        let Some(scope) = self.scopes.get(scope_id) else {
            return Ok(());
        };
        let text: String = helpers.iter().map(HelperDeclaration::to_source).collect();
        debug!(
            scope = scope_id.0,
            at = scope.helper_insert_pos,
            count = helpers.len(),
            "inserting helpers"
        );
        self.edits
            .insert_before(scope.helper_insert_pos, &text, EditOptions::NONE)?;
        self.emitted_helpers += helpers.len() as u32;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/lowering_pass.rs"]
mod tests;
