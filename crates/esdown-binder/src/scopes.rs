//! Scope records and the scope side table.

use esdown_common::TextRange;
use esdown_parser::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use tracing::warn;

/// Prefixes that mark a comment as a scope option directive.
const DIRECTIVE_PREFIXES: &[&str] = &["es6-transpiler", "esdown"];

/// Handle of a scope in a `ScopeTable`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Per-scope capability record.
///
/// `Some(false)` means the scope is statically known never to see iterator
/// objects (resp. generators); `None` means unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScopeOptions {
    pub has_iterators: Option<bool>,
    pub has_generators: Option<bool>,
}

impl ScopeOptions {
    /// Iterator protocol support is needed unless both capabilities are
    /// explicitly ruled out.
    #[must_use]
    pub const fn needs_iterator_protocol(&self) -> bool {
        !matches!(self.has_iterators, Some(false)) || !matches!(self.has_generators, Some(false))
    }

    /// Fill unset options from `parent`.
    #[must_use]
    pub const fn inherit_from(self, parent: ScopeOptions) -> ScopeOptions {
        ScopeOptions {
            has_iterators: match self.has_iterators {
                Some(v) => Some(v),
                None => parent.has_iterators,
            },
            has_generators: match self.has_generators {
                Some(v) => Some(v),
                None => parent.has_generators,
            },
        }
    }

    /// Options set in `other` win over options set in `self`.
    #[must_use]
    pub const fn overridden_by(self, other: ScopeOptions) -> ScopeOptions {
        other.inherit_from(self)
    }

    /// Parse a directive comment body such as
    /// `es6-transpiler has-iterators:false, has-generators:false`.
    ///
    /// Returns `None` when the comment is not a directive.
    #[must_use]
    pub fn parse_directive(body: &str) -> Option<ScopeOptions> {
        let body = body.trim().trim_start_matches('*').trim_start();
        let rest = DIRECTIVE_PREFIXES.iter().find_map(|prefix| {
            body.strip_prefix(prefix)
                .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        })?;

        // Entries may be written `key: value` or `key : value`.
        let rest = rest.split(':').map(str::trim).collect::<Vec<_>>().join(":");
        let mut options = ScopeOptions::default();
        for entry in rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|entry| !entry.is_empty())
        {
            let Some((key, value)) = entry.split_once(':') else {
                warn!(entry, "ignoring malformed scope option");
                continue;
            };
            let value = match value {
                "true" => true,
                "false" => false,
                other => {
                    warn!(key, value = other, "ignoring non-boolean scope option");
                    continue;
                }
            };
            match key {
                "has-iterators" => options.has_iterators = Some(value),
                "has-generators" => options.has_generators = Some(value),
                other => warn!(key = other, "ignoring unknown scope option"),
            }
        }
        Some(options)
    }
}

/// A function or program scope.
#[derive(Clone, Debug)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// Function or source file node that owns the scope.
    pub node: NodeIndex,
    pub range: TextRange,
    /// Resolved options (defaults, then directives, then inheritance).
    pub options: ScopeOptions,
    /// Offset where helper declarations bubbled to this scope are inserted.
    pub helper_insert_pos: u32,
}

/// Scope side table keyed by node identity.
#[derive(Debug, Default)]
pub struct ScopeTable {
    pub(crate) scopes: Vec<Scope>,
    /// Function/source file node -> the scope it owns.
    pub(crate) container_scopes: FxHashMap<NodeIndex, ScopeId>,
    /// `for...of` node -> enclosing scope.
    pub(crate) for_of_scopes: FxHashMap<NodeIndex, ScopeId>,
    pub(crate) identifiers: FxHashSet<String>,
}

impl ScopeTable {
    #[must_use]
    pub fn root(&self) -> ScopeId {
        ScopeId::ROOT
    }

    #[must_use]
    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, scope)| (ScopeId(i as u32), scope))
    }

    /// Enclosing scope of a `for...of` statement.
    #[must_use]
    pub fn scope_of(&self, for_of: NodeIndex) -> Option<ScopeId> {
        self.for_of_scopes.get(&for_of).copied()
    }

    /// Scope owned by a function or source file node.
    #[must_use]
    pub fn scope_for_container(&self, node: NodeIndex) -> Option<ScopeId> {
        self.container_scopes.get(&node).copied()
    }

    #[must_use]
    pub fn options(&self, id: ScopeId) -> ScopeOptions {
        self.get(id).map(|scope| scope.options).unwrap_or_default()
    }

    /// True when `name` appears as an identifier anywhere in the file.
    #[must_use]
    pub fn is_identifier_used(&self, name: &str) -> bool {
        self.identifiers.contains(name)
    }

    #[must_use]
    pub fn identifiers(&self) -> &FxHashSet<String> {
        &self.identifiers
    }
}
