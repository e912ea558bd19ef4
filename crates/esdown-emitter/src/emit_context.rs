//! Per-compilation options shared by every file.

use esdown_binder::ScopeOptions;

/// Options the driver applies to each file it lowers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitContext {
    /// Program-scope options; directive comments override them per scope.
    pub scope_defaults: ScopeOptions,
}

impl EmitContext {
    #[must_use]
    pub const fn new(scope_defaults: ScopeOptions) -> EmitContext {
        EmitContext { scope_defaults }
    }

    /// Every scope is known to see arrays only, so no helper is emitted
    /// unless a directive says otherwise.
    #[must_use]
    pub const fn arrays_only() -> EmitContext {
        EmitContext {
            scope_defaults: ScopeOptions {
                has_iterators: Some(false),
                has_generators: Some(false),
            },
        }
    }
}
