//! Centralized limits and thresholds.
//!
//! Recursive phases (parser, binder, lowering pass, pattern lowering) all
//! bail out at these depths instead of overflowing the stack on
//! pathological input.

/// Maximum nesting depth for expression and statement parsing.
///
/// ```javascript
/// // Deeply nested parentheses / calls:
/// f(f(f(f(f(f(f(f(/* ... 500 levels ... */)))))))));
/// ```
pub const MAX_PARSE_DEPTH: u32 = 500;

/// Maximum recursion depth for tree traversal in the binder and the
/// lowering pass.
pub const MAX_AST_DEPTH: u32 = 500;

/// Maximum depth for binding pattern recursion (`{a: {b: {c: ...}}}`).
pub const MAX_BINDING_PATTERN_DEPTH: u32 = 100;

/// Upper bound on suffix attempts when uniquifying a generated name against
/// the identifiers already present in a file.
pub const MAX_UNIQUE_NAME_ATTEMPTS: u32 = 10_000;
