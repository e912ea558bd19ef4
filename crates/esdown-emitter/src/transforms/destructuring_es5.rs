//! ES5 Destructuring Transform
//!
//! Lowers a binding pattern plus a source value into a flat declaration
//! list of plain assignments:
//!
//! ```javascript
//! var {a, b: [c, , d = 1]} = obj;
//! ```
//!
//! Becomes:
//!
//! ```javascript
//! var a = obj.a, _a = obj.b, c = _a[0], d = _a[2], d = d === void 0 ? (1) : d;
//! ```
//!
//! A source that cannot be read twice is cached in a temp first, unless the
//! pattern reads it only once. Array rest elements become
//! `Array.prototype.slice.call(src, k)`; object rest elements are rejected.

use crate::edit_buffer::EditBuffer;
use crate::temp_vars::TempVariablePool;
use esdown_binder::ScopeId;
use esdown_common::TextRange;
use esdown_common::limits::MAX_BINDING_PATTERN_DEPTH;
use esdown_parser::parser::node::{BindingElementData, NodeArena};
use esdown_parser::parser::syntax_kind_ext::{self, kind_name};
use esdown_parser::syntax::transform_utils::is_simple_reference;
use esdown_parser::NodeIndex;
use esdown_scanner::SyntaxKind;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::trace;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("object rest elements are not supported")]
    ObjectRest { range: TextRange },
    #[error("binding pattern is nested deeper than {limit} levels")]
    TooDeep { limit: u32, range: TextRange },
    #[error("unexpected {kind} in a binding pattern")]
    UnexpectedNode { kind: &'static str, range: TextRange },
    #[error("binding pattern has no source value")]
    MissingSource { range: TextRange },
}

impl PatternError {
    #[must_use]
    pub const fn range(&self) -> TextRange {
        match self {
            PatternError::ObjectRest { range }
            | PatternError::TooDeep { range, .. }
            | PatternError::UnexpectedNode { range, .. }
            | PatternError::MissingSource { range } => *range,
        }
    }
}

/// A value the pattern reads from.
struct SourceValue {
    text: String,
    /// Can be read more than once without re-evaluating anything.
    reusable: bool,
    /// Can be followed directly by `.name` or `[index]`.
    member_safe: bool,
}

pub struct PatternLowerer<'a> {
    arena: &'a NodeArena,
    edits: &'a EditBuffer,
    pool: &'a mut TempVariablePool,
    scope: ScopeId,
    /// Range the temps are reserved for.
    anchor: TextRange,
    temps: Vec<String>,
}

impl<'a> PatternLowerer<'a> {
    #[must_use]
    pub fn new(
        arena: &'a NodeArena,
        edits: &'a EditBuffer,
        pool: &'a mut TempVariablePool,
        scope: ScopeId,
        anchor: TextRange,
    ) -> PatternLowerer<'a> {
        PatternLowerer {
            arena,
            edits,
            pool,
            scope,
            anchor,
            temps: Vec::new(),
        }
    }

    /// Temps used by the last `unwrap`, in allocation order. They are
    /// already released to the pool.
    #[must_use]
    pub fn temps(&self) -> &[String] {
        &self.temps
    }

    /// Lower `pattern` into `<keyword> n1 = v1, n2 = v2, ...`.
    ///
    /// The source is `source_expr_placeholder` when given (a primary
    /// expression, used verbatim), otherwise the current text of
    /// `init_node`. Every name and temp the output assigns is appended to
    /// `out_new_declarations` once.
    pub fn unwrap(
        &mut self,
        keyword: &str,
        pattern: NodeIndex,
        source_expr_placeholder: Option<&str>,
        init_node: NodeIndex,
        out_new_declarations: &mut Vec<String>,
    ) -> Result<String, PatternError> {
        self.temps.clear();
        let source = match source_expr_placeholder {
            Some(placeholder) => SourceValue {
                text: placeholder.to_string(),
                reusable: is_identifier_text(placeholder),
                member_safe: true,
            },
            None => self.init_source(pattern, init_node)?,
        };

        let mut assignments = Vec::new();
        let result = self.lower_pattern(pattern, source, 0, &mut assignments, out_new_declarations);
        for temp in &self.temps {
            self.pool.release(temp, self.anchor, self.scope);
        }
        result?;

        trace!(
            assignments = assignments.len(),
            temps = self.temps.len(),
            "lowered binding pattern"
        );
        let body = assignments
            .iter()
            .map(|(target, value)| format!("{target} = {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        Ok(format!("{keyword} {body}"))
    }

    fn init_source(&self, pattern: NodeIndex, init_node: NodeIndex) -> Result<SourceValue, PatternError> {
        let Some(init) = self.arena.get(init_node) else {
            let range = self.arena.get(pattern).map(|node| node.range()).unwrap_or_default();
            return Err(PatternError::MissingSource { range });
        };
        let member_safe = matches!(
            init.kind,
            syntax_kind_ext::PARENTHESIZED_EXPRESSION
                | syntax_kind_ext::CALL_EXPRESSION
                | syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
        ) || init.kind == SyntaxKind::Identifier as u16
            || init.kind == SyntaxKind::ThisKeyword as u16;
        Ok(SourceValue {
            text: self.edits.get_range(init.pos, init.end),
            reusable: is_simple_reference(self.arena, init_node),
            member_safe,
        })
    }

    fn lower_pattern(
        &mut self,
        pattern: NodeIndex,
        source: SourceValue,
        depth: u32,
        assignments: &mut Vec<(String, String)>,
        out: &mut Vec<String>,
    ) -> Result<(), PatternError> {
        let arena = self.arena;
        let Some(node) = arena.get(pattern) else {
            return Err(PatternError::UnexpectedNode {
                kind: "missing node",
                range: self.anchor,
            });
        };
        if depth >= MAX_BINDING_PATTERN_DEPTH {
            return Err(PatternError::TooDeep {
                limit: MAX_BINDING_PATTERN_DEPTH,
                range: node.range(),
            });
        }
        let Some(data) = arena.get_binding_pattern(node) else {
            return Err(PatternError::UnexpectedNode {
                kind: kind_name(node.kind),
                range: node.range(),
            });
        };
        let is_array = node.kind == syntax_kind_ext::ARRAY_BINDING_PATTERN;
        let elements: SmallVec<[NodeIndex; 8]> = data.elements.nodes.iter().copied().collect();
        let reads = elements.iter().filter(|elem| elem.is_some()).count();

        let base = if source.reusable || (reads == 1 && source.member_safe) {
            source.text
        } else if reads == 1 {
            format!("({})", source.text)
        } else {
            let temp = self.temp(out);
            assignments.push((temp.clone(), source.text));
            temp
        };

        for (index, &elem_idx) in elements.iter().enumerate() {
            let Some(elem_node) = arena.get(elem_idx) else {
                continue;
            };
            let Some(elem) = arena.get_binding_element(elem_node) else {
                return Err(PatternError::UnexpectedNode {
                    kind: kind_name(elem_node.kind),
                    range: elem_node.range(),
                });
            };
            let access = if is_array {
                if elem.dot_dot_dot_token {
                    format!("Array.prototype.slice.call({base}, {index})")
                } else {
                    format!("{base}[{index}]")
                }
            } else {
                if elem.dot_dot_dot_token {
                    return Err(PatternError::ObjectRest {
                        range: elem_node.range(),
                    });
                }
                self.property_access(&base, elem, elem_node.range())?
            };
            self.bind_element(elem, access, depth, assignments, out)?;
        }
        Ok(())
    }

    /// `base.key`, `base["key"]`, or `base[<computed>]`.
    fn property_access(
        &self,
        base: &str,
        elem: &BindingElementData,
        elem_range: TextRange,
    ) -> Result<String, PatternError> {
        let key_idx = if elem.property_name.is_some() {
            elem.property_name
        } else {
            elem.name
        };
        let Some(key) = self.arena.get(key_idx) else {
            return Err(PatternError::UnexpectedNode {
                kind: "missing property name",
                range: elem_range,
            });
        };
        if let Some(ident) = self.arena.get_identifier(key) {
            return Ok(format!("{base}.{}", ident.escaped_text));
        }
        if let Some(literal) = self.arena.get_literal(key) {
            return Ok(format!("{base}[{}]", literal.text));
        }
        if key.kind == syntax_kind_ext::COMPUTED_PROPERTY_NAME
            && let Some(computed) = self.arena.get_wrapped_expr(key)
            && let Some(expr) = self.arena.get(computed.expression)
        {
            return Ok(format!("{base}[{}]", self.edits.get_range(expr.pos, expr.end)));
        }
        Err(PatternError::UnexpectedNode {
            kind: kind_name(key.kind),
            range: key.range(),
        })
    }

    fn bind_element(
        &mut self,
        elem: &BindingElementData,
        access: String,
        depth: u32,
        assignments: &mut Vec<(String, String)>,
        out: &mut Vec<String>,
    ) -> Result<(), PatternError> {
        let arena = self.arena;
        let Some(name_node) = arena.get(elem.name) else {
            return Err(PatternError::UnexpectedNode {
                kind: "missing binding name",
                range: self.anchor,
            });
        };
        let default = arena
            .get(elem.initializer)
            .map(|init| self.edits.get_range(init.pos, init.end));

        if let Some(ident) = arena.get_identifier(name_node) {
            let name = ident.escaped_text.clone();
            push_unique(out, &name);
            assignments.push((name.clone(), access));
            if let Some(default) = default {
                assignments.push((name.clone(), with_default(&name, &default)));
            }
            return Ok(());
        }

        if !arena.is_binding_pattern(elem.name) {
            return Err(PatternError::UnexpectedNode {
                kind: kind_name(name_node.kind),
                range: name_node.range(),
            });
        }
        let source = match default {
            Some(default) => {
                let temp = self.temp(out);
                assignments.push((temp.clone(), access));
                assignments.push((temp.clone(), with_default(&temp, &default)));
                SourceValue {
                    text: temp,
                    reusable: true,
                    member_safe: true,
                }
            }
            None => SourceValue {
                text: access,
                reusable: false,
                member_safe: true,
            },
        };
        self.lower_pattern(elem.name, source, depth + 1, assignments, out)
    }

    fn temp(&mut self, out: &mut Vec<String>) -> String {
        let temp = self.pool.acquire(self.anchor, self.scope);
        push_unique(out, &temp);
        self.temps.push(temp.clone());
        temp
    }
}

fn with_default(name: &str, default: &str) -> String {
    format!("{name} === void 0 ? ({default}) : {name}")
}

fn push_unique(out: &mut Vec<String>, name: &str) {
    if !out.iter().any(|existing| existing == name) {
        out.push(name.to_string());
    }
}

fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
#[path = "../../tests/destructuring_es5.rs"]
mod tests;
