//! Transform utilities for syntax analysis.
//!
//! Common functions used by ES5 transformations.

use crate::parser::{NodeArena, NodeIndex, syntax_kind_ext};

/// Strip any number of enclosing parentheses.
#[must_use]
pub fn skip_parentheses(arena: &NodeArena, mut idx: NodeIndex) -> NodeIndex {
    while let Some(node) = arena.get(idx) {
        if node.kind != syntax_kind_ext::PARENTHESIZED_EXPRESSION {
            break;
        }
        let Some(inner) = arena.get_wrapped_expr(node) else {
            break;
        };
        idx = inner.expression;
    }
    idx
}

/// True for a bare identifier reference, which can be read repeatedly
/// without caching.
#[must_use]
pub fn is_simple_reference(arena: &NodeArena, idx: NodeIndex) -> bool {
    arena.is_identifier(idx)
}
