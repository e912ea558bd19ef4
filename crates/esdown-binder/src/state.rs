//! Binder walk: scope creation, `for...of` scope recording, directive
//! resolution.

use crate::scopes::{Scope, ScopeId, ScopeOptions, ScopeTable};
use esdown_common::TextRange;
use esdown_common::limits::MAX_AST_DEPTH;
use esdown_parser::NodeIndex;
use esdown_parser::parser::node::NodeArena;
use esdown_parser::parser::syntax_kind_ext;
use esdown_scanner::SyntaxKind;
use tracing::{debug, trace, warn};

pub struct Binder<'a> {
    arena: &'a NodeArena,
    source: &'a str,
    table: ScopeTable,
    /// Options set directly on each scope by directive comments.
    own_options: Vec<ScopeOptions>,
    scope_stack: Vec<ScopeId>,
    depth: u32,
}

impl<'a> Binder<'a> {
    /// Bind a parsed source file. `defaults` seed the program scope's options.
    #[must_use]
    pub fn bind(
        arena: &'a NodeArena,
        root: NodeIndex,
        source: &'a str,
        defaults: ScopeOptions,
    ) -> ScopeTable {
        let mut binder = Binder {
            arena,
            source,
            table: ScopeTable::default(),
            own_options: Vec::new(),
            scope_stack: Vec::new(),
            depth: 0,
        };
        binder.collect_identifiers();

        let insert_pos = binder.prologue_end(root, 0);
        let range = TextRange::new(0, source.len() as u32);
        let program = binder.push_scope(root, range, insert_pos);
        for child in arena.children(root) {
            binder.bind_node(child);
        }
        binder.scope_stack.pop();
        debug_assert_eq!(program, ScopeId::ROOT);

        binder.apply_directives(root);
        binder.resolve_options(defaults);

        debug!(
            scopes = binder.table.len(),
            for_of = binder.table.for_of_scopes.len(),
            identifiers = binder.table.identifiers.len(),
            "bound source file"
        );
        binder.table
    }

    fn collect_identifiers(&mut self) {
        for ident in &self.arena.identifiers {
            if !ident.escaped_text.is_empty() {
                self.table.identifiers.insert(ident.escaped_text.clone());
            }
        }
    }

    fn current_scope(&self) -> ScopeId {
        self.scope_stack.last().copied().unwrap_or(ScopeId::ROOT)
    }

    fn push_scope(&mut self, node: NodeIndex, range: TextRange, helper_insert_pos: u32) -> ScopeId {
        let id = ScopeId(self.table.scopes.len() as u32);
        let parent = self.scope_stack.last().copied();
        self.table.scopes.push(Scope {
            parent,
            node,
            range,
            options: ScopeOptions::default(),
            helper_insert_pos,
        });
        self.own_options.push(ScopeOptions::default());
        self.table.container_scopes.insert(node, id);
        self.scope_stack.push(id);
        trace!(scope = id.0, ?parent, %range, "enter scope");
        id
    }

    fn bind_node(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return;
        };
        if self.depth >= MAX_AST_DEPTH {
            warn!(pos = node.pos, "binder: maximum nesting depth reached, skipping subtree");
            return;
        }
        self.depth += 1;

        if node.kind == syntax_kind_ext::FOR_OF_STATEMENT {
            let scope = self.current_scope();
            self.table.for_of_scopes.insert(idx, scope);
        }

        if let Some(func) = arena.get_function(node) {
            let body = func.body;
            let insert_pos = arena
                .get(body)
                .map_or(node.end, |body_node| self.prologue_end(body, body_node.pos + 1));
            self.push_scope(idx, node.range(), insert_pos);
            for child in arena.children(idx) {
                self.bind_node(child);
            }
            self.scope_stack.pop();
        } else {
            for child in arena.children(idx) {
                self.bind_node(child);
            }
        }

        self.depth -= 1;
    }

    /// End of the directive prologue (`"use strict";` ...) of a statement
    /// list, or `start` when there is none.
    fn prologue_end(&self, container: NodeIndex, start: u32) -> u32 {
        let Some(statements) = self.arena.statement_list(container) else {
            return start;
        };
        let mut end = start;
        for &stmt in statements {
            let Some(stmt_node) = self.arena.get(stmt) else {
                break;
            };
            let is_directive = self
                .arena
                .get_expression_statement(stmt_node)
                .is_some_and(|expr| self.arena.is_kind(expr.expression, SyntaxKind::StringLiteral as u16));
            if !is_directive {
                break;
            }
            end = stmt_node.end;
        }
        end
    }

    /// Attach option directives found in comments to the innermost scope
    /// containing them.
    fn apply_directives(&mut self, root: NodeIndex) {
        let arena = self.arena;
        let Some(source_file) = arena.get_source_file_at(root) else {
            return;
        };
        for comment in &source_file.comments {
            let Some(parsed) = ScopeOptions::parse_directive(comment.get_body(self.source)) else {
                continue;
            };
            let comment_range = TextRange::new(comment.pos, comment.end);
            let target = self
                .table
                .iter()
                .filter(|(_, scope)| scope.range.contains_range(comment_range))
                .min_by_key(|(_, scope)| scope.range.len())
                .map_or(ScopeId::ROOT, |(id, _)| id);
            debug!(scope = target.0, ?parsed, "scope option directive");
            let own = &mut self.own_options[target.0 as usize];
            *own = own.overridden_by(parsed);
        }
    }

    /// Scopes are stored parent-first, so one forward pass resolves inheritance.
    fn resolve_options(&mut self, defaults: ScopeOptions) {
        for i in 0..self.table.scopes.len() {
            let inherited = match self.table.scopes[i].parent {
                Some(parent) => self.table.scopes[parent.0 as usize].options,
                None => defaults,
            };
            self.table.scopes[i].options = self.own_options[i].inherit_from(inherited);
        }
    }
}
