//! ES5 For-Of Transform
//!
//! Rewrites `for (<target> of <expr>) <body>` into a classic three-clause
//! loop that works on ES5 runtimes:
//!
//! ```javascript
//! for (var x of list) { use(x); }
//! ```
//!
//! Becomes, when the scope may see iterator objects:
//!
//! ```javascript
//! var _a, _b, _c;_a = GET_ITER(list);_c = _a === 0;_b = (_c ? list.length : void 0);
//! for (var x; _c ? (_a < _b) : !(_b = _a["next"]())["done"]; ) {x = (_c ? list[_a++] : _b["value"]); use(x); };_a = _b = _c = void 0;
//! ```
//!
//! `GET_ITER` returns `0` for arrays (the loop then indexes the value) and
//! the iterator object otherwise. When both `has-iterators` and
//! `has-generators` are ruled out for the scope, the array path is emitted
//! alone and no helper is requested.
//!
//! Lowering is split in two steps: `lower` computes the fragments and
//! manages temps, `emit` records them as edits inside one
//! `replaceForOf` edit state.

use crate::edit_buffer::{EditBuffer, EditOptions};
use crate::error::LoweringError;
use crate::temp_vars::TempVariablePool;
use crate::transforms::destructuring_es5::PatternLowerer;
use esdown_binder::{ScopeId, ScopeTable};
use esdown_common::TextRange;
use esdown_parser::NodeIndex;
use esdown_parser::parser::node::{NodeArena, node_flags};
use esdown_parser::parser::syntax_kind_ext;
use esdown_parser::syntax::transform_utils::{is_simple_reference, skip_parentheses};
use tracing::{debug, trace};

/// Base name of the iterator classification helper.
pub const GET_ITER_HELPER: &str = "GET_ITER";

/// Parameter list and body of the iterator classification helper.
pub const GET_ITER_BODY: &str = "(v){if(v!=null){if(Array.isArray(v))return 0;var f;if(typeof Symbol==='function'&&Symbol.iterator&&typeof (f=v[Symbol.iterator])==='function')return f.call(v);if(typeof v['@@iterator']==='function')return v['@@iterator']();}throw new Error(v+' is not iterable')}";

/// Name of the edit state wrapping one loop's edits.
const EDIT_STATE: &str = "replaceForOf";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclarationKeyword {
    Var,
    Let,
    Const,
}

impl DeclarationKeyword {
    #[must_use]
    pub const fn from_flags(flags: u16) -> DeclarationKeyword {
        if flags & node_flags::CONST != 0 {
            DeclarationKeyword::Const
        } else if flags & node_flags::LET != 0 {
            DeclarationKeyword::Let
        } else {
            DeclarationKeyword::Var
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DeclarationKeyword::Var => "var",
            DeclarationKeyword::Let => "let",
            DeclarationKeyword::Const => "const",
        }
    }
}

/// The binding target of a `for...of` head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForOfTarget {
    /// `for (x of ...)`
    Reference { name: String },
    /// `for (var x of ...)`
    Declaration {
        keyword: DeclarationKeyword,
        name: String,
        list: NodeIndex,
    },
    /// `for (let {a, b} of ...)`
    Pattern {
        keyword: DeclarationKeyword,
        pattern: NodeIndex,
        list: NodeIndex,
    },
}

/// Text produced for one loop, before it is recorded as edits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForOfFragments {
    /// Declarations and setup placed before the loop.
    pub preamble: String,
    /// Replacement for ` of <expr>)`: `; <test>; )`.
    pub header: String,
    /// Per-iteration binding placed at the start of the body.
    pub prologue: String,
    /// Temp reset placed after the loop.
    pub epilogue: String,
    /// Declaration list deleted from the head (pattern targets).
    pub removal: Option<TextRange>,
    /// `let`/`const` keyword rewritten to `var` (plain-name targets).
    pub keyword_rewrite: Option<TextRange>,
    /// Every temp the fragments use, loop temps first.
    pub temps: Vec<String>,
    pub uses_helper: bool,
}

/// Where the lowered loop's preamble goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopPlacement {
    /// Start of the loop, or of its outermost label.
    pub anchor_pos: u32,
    /// The loop is the sole statement of an `if`/loop body and needs braces
    /// to keep preamble and epilogue attached.
    pub needs_block: bool,
}

impl LoopPlacement {
    /// A loop sitting directly in a statement list.
    #[must_use]
    pub const fn in_statement_list(anchor_pos: u32) -> LoopPlacement {
        LoopPlacement {
            anchor_pos,
            needs_block: false,
        }
    }
}

pub struct ForOfLowerer<'a> {
    arena: &'a NodeArena,
    scopes: &'a ScopeTable,
    source: &'a str,
}

impl<'a> ForOfLowerer<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena, scopes: &'a ScopeTable, source: &'a str) -> ForOfLowerer<'a> {
        ForOfLowerer {
            arena,
            scopes,
            source,
        }
    }

    /// Lower one loop and record its edits.
    pub fn lower_into(
        &self,
        loop_idx: NodeIndex,
        placement: LoopPlacement,
        pool: &mut TempVariablePool,
        edits: &mut EditBuffer,
    ) -> Result<ForOfFragments, LoweringError> {
        let fragments = self.lower(loop_idx, pool, edits)?;
        self.emit(loop_idx, placement, &fragments, edits)?;
        Ok(fragments)
    }

    /// Classify the head binding of a `for...of`.
    pub fn classify_target(&self, initializer: NodeIndex) -> Result<ForOfTarget, LoweringError> {
        let arena = self.arena;
        let Some(node) = arena.get(initializer) else {
            return Err(LoweringError::InvalidForOfTarget {
                target: String::new(),
                range: TextRange::default(),
            });
        };
        let invalid = || LoweringError::InvalidForOfTarget {
            target: node.range().slice(self.source).to_string(),
            range: node.range(),
        };

        if let Some(ident) = arena.get_identifier(node) {
            if ident.escaped_text.is_empty() {
                return Err(invalid());
            }
            return Ok(ForOfTarget::Reference {
                name: ident.escaped_text.clone(),
            });
        }

        let Some(list) = arena.get_variable(node) else {
            return Err(invalid());
        };
        let [decl_idx] = list.declarations.nodes.as_slice() else {
            return Err(invalid());
        };
        let decl = arena
            .get(*decl_idx)
            .and_then(|decl_node| arena.get_variable_declaration(decl_node))
            .ok_or_else(invalid)?;
        if decl.initializer.is_some() {
            return Err(invalid());
        }

        let keyword = DeclarationKeyword::from_flags(node.flags);
        if let Some(name) = arena.identifier_text(decl.name)
            && !name.is_empty()
        {
            return Ok(ForOfTarget::Declaration {
                keyword,
                name: name.to_string(),
                list: initializer,
            });
        }
        if arena.is_binding_pattern(decl.name) {
            return Ok(ForOfTarget::Pattern {
                keyword,
                pattern: decl.name,
                list: initializer,
            });
        }
        Err(invalid())
    }

    /// Compute the fragments for one loop.
    ///
    /// Temps are acquired for the body range and released before
    /// returning; the helper is requested from the pool when the loop's
    /// scope may see iterator objects.
    pub fn lower(
        &self,
        loop_idx: NodeIndex,
        pool: &mut TempVariablePool,
        edits: &EditBuffer,
    ) -> Result<ForOfFragments, LoweringError> {
        let arena = self.arena;
        let Some(node) = arena.get(loop_idx) else {
            return Err(LoweringError::UnsupportedConstruct {
                construct: "missing statement",
                range: TextRange::default(),
            });
        };
        let data = match arena.get_for_in_of(node) {
            Some(data) if node.kind == syntax_kind_ext::FOR_OF_STATEMENT => data,
            _ => {
                return Err(LoweringError::UnsupportedConstruct {
                    construct: syntax_kind_ext::kind_name(node.kind),
                    range: node.range(),
                });
            }
        };
        if data.await_modifier {
            return Err(LoweringError::UnsupportedConstruct {
                construct: "for await...of",
                range: node.range(),
            });
        }
        let target = self.classify_target(data.initializer)?;
        let (Some(body), Some(expr)) = (arena.get(data.statement), arena.get(data.expression)) else {
            return Err(LoweringError::UnsupportedConstruct {
                construct: "incomplete for...of",
                range: node.range(),
            });
        };

        let scope = self.scopes.scope_of(loop_idx).unwrap_or(ScopeId::ROOT);
        let needs_protocol = self.scopes.options(scope).needs_iterator_protocol();
        let anchor = body.range();
        let iterated = skip_parentheses(arena, data.expression);

        let cursor = pool.acquire(anchor, scope);
        let bound = pool.acquire(anchor, scope);
        let flag = needs_protocol.then(|| pool.acquire(anchor, scope));
        let cache = (!is_simple_reference(arena, iterated)).then(|| pool.acquire(anchor, scope));
        let mut loop_temps = vec![cursor.clone(), bound.clone()];
        loop_temps.extend(flag.iter().cloned());
        loop_temps.extend(cache.iter().cloned());
        let mut temps = loop_temps.clone();

        let value_source = match (&cache, arena.identifier_text(iterated)) {
            (Some(cache), _) => cache.clone(),
            (None, Some(name)) => name.to_string(),
            (None, None) => String::new(),
        };

        let mut preamble_tail = String::new();
        if let Some(cache) = &cache {
            let expr_text = edits.get_range(expr.pos, expr.end);
            preamble_tail.push_str(&format!("{cache} = ({expr_text});"));
        }
        let (test, value, uses_helper) = match &flag {
            Some(flag) => {
                let helper = pool.bubble_helper(scope, GET_ITER_HELPER, GET_ITER_BODY, true);
                preamble_tail.push_str(&format!(
                    "{cursor} = {helper}({value_source});{flag} = {cursor} === 0;{bound} = ({flag} ? {value_source}.length : void 0);"
                ));
                (
                    format!("{flag} ? ({cursor} < {bound}) : !({bound} = {cursor}[\"next\"]())[\"done\"]"),
                    format!("({flag} ? {value_source}[{cursor}++] : {bound}[\"value\"])"),
                    true,
                )
            }
            None => {
                preamble_tail.push_str(&format!("{cursor} = 0;{bound} = {value_source}.length;"));
                (
                    format!("{cursor} < {bound}"),
                    format!("({value_source}[{cursor}++])"),
                    false,
                )
            }
        };

        let mut declarations: Vec<String> = Vec::new();
        let mut removal = None;
        let mut keyword_rewrite = None;
        let prologue = match &target {
            ForOfTarget::Reference { name } => Ok(format!("{name} = {value};")),
            ForOfTarget::Declaration { keyword, name, list } => {
                if *keyword != DeclarationKeyword::Var
                    && let Some(list_node) = arena.get(*list)
                {
                    let keyword_end = list_node.pos + keyword.as_str().len() as u32;
                    keyword_rewrite = Some(TextRange::new(list_node.pos, keyword_end));
                }
                Ok(format!("{name} = {value};"))
            }
            ForOfTarget::Pattern { pattern, list, .. } => {
                removal = arena.get(*list).map(|list_node| list_node.range());
                let mut lowerer = PatternLowerer::new(arena, edits, pool, scope, anchor);
                let lowered =
                    lowerer.unwrap("var", *pattern, Some(&value), NodeIndex::NONE, &mut declarations);
                temps.extend(lowerer.temps().iter().cloned());
                lowered.map(|text| {
                    let assignments = text.strip_prefix("var ").unwrap_or(&text);
                    format!("{assignments};")
                })
            }
        };

        for temp in &loop_temps {
            pool.release(temp, anchor, scope);
        }
        let prologue = prologue?;

        for temp in &temps {
            if !declarations.contains(temp) {
                declarations.push(temp.clone());
            }
        }
        let preamble = format!("var {};{preamble_tail}", declarations.join(", "));
        let epilogue = format!(";{} = void 0;", temps.join(" = "));

        debug!(
            pos = node.pos,
            scope = scope.0,
            protocol = needs_protocol,
            cached = cache.is_some(),
            temps = temps.len(),
            "lowered for...of"
        );
        Ok(ForOfFragments {
            preamble,
            header: format!("; {test}; )"),
            prologue,
            epilogue,
            removal,
            keyword_rewrite,
            temps,
            uses_helper,
        })
    }

    /// Record `fragments` as edits for the loop at `loop_idx`.
    pub fn emit(
        &self,
        loop_idx: NodeIndex,
        placement: LoopPlacement,
        fragments: &ForOfFragments,
        edits: &mut EditBuffer,
    ) -> Result<(), LoweringError> {
        let arena = self.arena;
        let incomplete = |range: TextRange| LoweringError::UnsupportedConstruct {
            construct: "incomplete for...of",
            range,
        };
        let node = arena
            .get(loop_idx)
            .ok_or_else(|| incomplete(TextRange::default()))?;
        let data = arena.get_for_in_of(node).ok_or_else(|| incomplete(node.range()))?;
        let (Some(target), Some(expr), Some(body)) = (
            arena.get(data.initializer),
            arena.get(data.expression),
            arena.get(data.statement),
        ) else {
            return Err(incomplete(node.range()));
        };
        let header_end = self
            .close_paren_end(expr.end)
            .ok_or_else(|| incomplete(node.range()))?;
        let has_block = body.kind == syntax_kind_ext::BLOCK;

        let mut header = fragments.header.clone();
        if !has_block {
            header.extend(
                TextRange::new(target.end, header_end)
                    .slice(self.source)
                    .chars()
                    .filter(|c| matches!(c, '\r' | '\n')),
            );
        }

        edits.push_state(EDIT_STATE);
        let recorded = self.record_edits(
            node.end,
            placement,
            fragments,
            TextRange::new(target.end, header_end),
            &header,
            body.pos,
            has_block,
            edits,
        );
        let popped = edits.pop_state();
        recorded?;
        popped?;
        trace!(pos = node.pos, header_end, has_block, "recorded for...of edits");
        Ok(())
    }

    fn record_edits(
        &self,
        loop_end: u32,
        placement: LoopPlacement,
        fragments: &ForOfFragments,
        header_range: TextRange,
        header: &str,
        body_pos: u32,
        has_block: bool,
        edits: &mut EditBuffer,
    ) -> Result<(), LoweringError> {
        let mut preamble = String::new();
        if placement.needs_block {
            preamble.push('{');
        }
        preamble.push_str(&fragments.preamble);
        edits.insert(placement.anchor_pos, &preamble, EditOptions::EXTEND)?;

        if let Some(removal) = fragments.removal {
            edits.remove(removal.pos, removal.end)?;
        }
        if let Some(keyword) = fragments.keyword_rewrite {
            edits.replace(keyword.pos, keyword.end, "var")?;
        }
        edits.replace(header_range.pos, header_range.end, header)?;

        if has_block {
            edits.insert_before(body_pos + 1, &fragments.prologue, EditOptions::NONE)?;
        } else {
            edits.insert_before(body_pos, &format!("{{{}", fragments.prologue), EditOptions::NONE)?;
        }

        let mut epilogue = String::new();
        if !has_block {
            epilogue.push('}');
        }
        epilogue.push_str(&fragments.epilogue);
        if placement.needs_block {
            epilogue.push('}');
        }
        edits.insert_after(loop_end, &epilogue, EditOptions::EXTEND)?;
        Ok(())
    }

    /// Offset just past the `)` closing the loop head, skipping trivia
    /// after the iterated expression.
    fn close_paren_end(&self, from: u32) -> Option<u32> {
        let bytes = self.source.as_bytes();
        let mut pos = from as usize;
        while pos < bytes.len() {
            match bytes[pos] {
                b')' => return Some(pos as u32 + 1),
                b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => pos += 1,
                b'/' if bytes.get(pos + 1) == Some(&b'/') => {
                    pos = memchr::memchr2(b'\n', b'\r', &bytes[pos..]).map_or(bytes.len(), |offset| pos + offset);
                }
                b'/' if bytes.get(pos + 1) == Some(&b'*') => {
                    let close = self.source.get(pos + 2..)?.find("*/")?;
                    pos += close + 4;
                }
                _ if self.source.get(pos..)?.starts_with(char::is_whitespace) => {
                    pos += self.source.get(pos..)?.chars().next()?.len_utf8();
                }
                _ => return None,
            }
        }
        None
    }
}

#[cfg(test)]
#[path = "../../tests/for_of_es5.rs"]
mod tests;
