//! Temporary variable pool and helper bubbling.
//!
//! Temps are minted from a single per-file counter (`_a` .. `_z`, then
//! `_0`, `_1`, ...) and never collide with an identifier used in the file.
//! Each scope keeps its own reuse list: a released temp is reserved for the
//! anchor range it served and is only handed out again for an anchor that
//! neither overlaps nor nests with any of its reservations.
//!
//! Helpers (runtime support functions) are declared at most once per scope
//! and flushed by the lowering pass when it leaves the scope.

use esdown_binder::ScopeId;
use esdown_common::TextRange;
use esdown_common::limits::MAX_UNIQUE_NAME_ATTEMPTS;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::{trace, warn};

/// A helper function waiting to be inserted at its scope's helper offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HelperDeclaration {
    pub name: String,
    /// Parameter list and body, e.g. `(v){...}`.
    pub body: String,
}

impl HelperDeclaration {
    #[must_use]
    pub fn to_source(&self) -> String {
        format!("function {}{}", self.name, self.body)
    }
}

#[derive(Debug, Default)]
struct ScopeTemps {
    /// Names in allocation order; reuse prefers the oldest.
    names: Vec<String>,
    live: FxHashSet<String>,
    reservations: FxHashMap<String, SmallVec<[TextRange; 4]>>,
}

impl ScopeTemps {
    fn reusable(&self, anchor: TextRange) -> Option<String> {
        self.names
            .iter()
            .find(|name| {
                !self.live.contains(*name)
                    && self.reservations.get(*name).is_none_or(|ranges| {
                        ranges
                            .iter()
                            .all(|range| !range.intersects(anchor) && !range.nests_with(anchor))
                    })
            })
            .cloned()
    }
}

#[derive(Debug, Default)]
pub struct TempVariablePool {
    /// Identifiers used in the file; never handed out.
    file_identifiers: FxHashSet<String>,
    generated_names: FxHashSet<String>,
    counter: u32,
    scopes: FxHashMap<ScopeId, ScopeTemps>,
    /// (scope, base name) -> declared helper name
    helpers: IndexMap<(ScopeId, String), String>,
    /// Every helper name declared per scope, memoized or not.
    helper_names: FxHashSet<(ScopeId, String)>,
    pending_helpers: IndexMap<ScopeId, Vec<HelperDeclaration>>,
}

impl TempVariablePool {
    #[must_use]
    pub fn new(file_identifiers: FxHashSet<String>) -> TempVariablePool {
        TempVariablePool {
            file_identifiers,
            ..TempVariablePool::default()
        }
    }

    /// Hand out a temp for code anchored at `anchor` in `scope`.
    pub fn acquire(&mut self, anchor: TextRange, scope: ScopeId) -> String {
        let reused = self
            .scopes
            .get(&scope)
            .and_then(|temps| temps.reusable(anchor));
        let name = match reused {
            Some(name) => name,
            None => {
                let name = self.make_unique_name();
                self.scopes
                    .entry(scope)
                    .or_default()
                    .names
                    .push(name.clone());
                name
            }
        };
        trace!(scope = scope.0, %anchor, name = %name, "acquire temp");
        self.scopes
            .entry(scope)
            .or_default()
            .live
            .insert(name.clone());
        name
    }

    /// Return a temp to its scope, reserving it for `anchor`.
    pub fn release(&mut self, name: &str, anchor: TextRange, scope: ScopeId) {
        let Some(temps) = self.scopes.get_mut(&scope) else {
            warn!(scope = scope.0, name, "release of a temp from an unknown scope");
            return;
        };
        if !temps.live.remove(name) {
            warn!(scope = scope.0, name, "release of a temp that is not live");
            return;
        }
        trace!(scope = scope.0, %anchor, name, "release temp");
        temps
            .reservations
            .entry(name.to_string())
            .or_default()
            .push(anchor);
    }

    /// Number of temps currently handed out in `scope`.
    #[must_use]
    pub fn live_count(&self, scope: ScopeId) -> usize {
        self.scopes.get(&scope).map_or(0, |temps| temps.live.len())
    }

    /// All temp names ever allocated in `scope`, oldest first.
    #[must_use]
    pub fn names_in(&self, scope: ScopeId) -> &[String] {
        self.scopes
            .get(&scope)
            .map_or(&[], |temps| temps.names.as_slice())
    }

    /// Next `_a`.. `_z`, `_0`.. name not used anywhere in the file.
    fn make_unique_name(&mut self) -> String {
        loop {
            let counter = self.counter;
            let name = if counter < 26 {
                format!("_{}", (b'a' + counter as u8) as char)
            } else {
                format!("_{}", counter - 26)
            };
            self.counter += 1;

            if !self.file_identifiers.contains(&name) && !self.generated_names.contains(&name) {
                self.generated_names.insert(name.clone());
                return name;
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Request helper `name` in `scope` and get the identifier to call it by.
    ///
    /// With `memoize`, repeated requests in the same scope return the
    /// first declaration. The declared name is `name`, or `name_1`,
    /// `name_2`, ... when the file already uses it.
    pub fn bubble_helper(&mut self, scope: ScopeId, name: &str, body: &str, memoize: bool) -> String {
        let key = (scope, name.to_string());
        if memoize && let Some(declared) = self.helpers.get(&key) {
            return declared.clone();
        }

        let declared = self.unique_helper_name(scope, name);
        self.helper_names.insert((scope, declared.clone()));
        trace!(scope = scope.0, helper = %declared, "bubble helper");
        if memoize {
            self.helpers.insert(key, declared.clone());
        }
        self.pending_helpers
            .entry(scope)
            .or_default()
            .push(HelperDeclaration {
                name: declared.clone(),
                body: body.to_string(),
            });
        declared
    }

    fn unique_helper_name(&self, scope: ScopeId, base: &str) -> String {
        let taken = |candidate: &str| {
            self.file_identifiers.contains(candidate)
                || self.generated_names.contains(candidate)
                || self.helper_names.contains(&(scope, candidate.to_string()))
        };
        if !taken(base) {
            return base.to_string();
        }
        for suffix in 1..=MAX_UNIQUE_NAME_ATTEMPTS {
            let candidate = format!("{base}_{suffix}");
            if !taken(&candidate) {
                return candidate;
            }
        }
        warn!(base, "no free helper name found");
        format!("{base}_{}", MAX_UNIQUE_NAME_ATTEMPTS + 1)
    }

    /// Drain helpers declared for `scope`, in request order.
    pub fn take_helpers(&mut self, scope: ScopeId) -> Vec<HelperDeclaration> {
        self.pending_helpers.shift_remove(&scope).unwrap_or_default()
    }

    /// True when helpers are still waiting to be flushed anywhere.
    #[must_use]
    pub fn has_pending_helpers(&self) -> bool {
        self.pending_helpers.values().any(|helpers| !helpers.is_empty())
    }
}

#[cfg(test)]
#[path = "../tests/temp_vars.rs"]
mod tests;
