use super::*;
use esdown_binder::{Binder, ScopeOptions};
use esdown_parser::ParserState;

const ARRAYS_ONLY: ScopeOptions = ScopeOptions {
    has_iterators: Some(false),
    has_generators: Some(false),
};

fn lower(source: &str, defaults: ScopeOptions) -> Result<String, LoweringError> {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let scopes = Binder::bind(&arena, root, source, defaults);
    LoweringPass::new(&arena, &scopes, source).run(root)
}

#[test]
fn source_without_for_of_is_unchanged() {
    let source = "var a = [1, 2];\nfor (var i = 0; i < a.length; i++) { f(a[i]); }\n";
    assert_eq!(lower(source, ScopeOptions::default()).unwrap(), source);
}

#[test]
fn labeled_loop_preamble_goes_before_label() {
    let output = lower("outer: for (x of xs) { continue outer; }", ARRAYS_ONLY).unwrap();
    assert_eq!(
        output,
        "var _a, _b;_a = 0;_b = xs.length;outer: for (x; _a < _b; ) {x = (xs[_a++]); continue outer; };_a = _b = void 0;"
    );
}

#[test]
fn labeled_loop_in_if_is_wrapped_with_its_label() {
    let output = lower("if (c) outer: for (x of xs) f(x);", ARRAYS_ONLY).unwrap();
    assert_eq!(
        output,
        "if (c) {var _a, _b;_a = 0;_b = xs.length;outer: for (x; _a < _b; ) {x = (xs[_a++]);f(x);};_a = _b = void 0;}"
    );
}

#[test]
fn loop_in_case_clause_is_not_wrapped() {
    let output = lower("switch (k) { case 1: for (x of xs) f(x); }", ARRAYS_ONLY).unwrap();
    assert_eq!(
        output,
        "switch (k) { case 1: var _a, _b;_a = 0;_b = xs.length;for (x; _a < _b; ) {x = (xs[_a++]);f(x);};_a = _b = void 0; }"
    );
}

#[test]
fn helper_is_inserted_at_function_body_start() {
    let output = lower(
        "function f(list) { for (var x of list) g(x); }",
        ScopeOptions::default(),
    )
    .unwrap();
    let helper = format!("function f(list) {{function GET_ITER{}", crate::transforms::for_of_es5::GET_ITER_BODY);
    assert!(output.starts_with(&helper), "{output}");
    assert!(output.contains(" var _a, _b, _c;_a = GET_ITER(list);"));
}

#[test]
fn helper_follows_use_strict_prologue() {
    let output = lower("\"use strict\";\nfor (x of xs);", ScopeOptions::default()).unwrap();
    assert!(output.starts_with("\"use strict\";function GET_ITER(v){"), "{output}");
    assert_eq!(output.matches("function GET_ITER").count(), 1);
}

#[test]
fn each_function_scope_gets_its_own_helper() {
    let output = lower(
        "function a(p) { for (x of p); }\nfunction b(q) { for (y of q); for (z of q); }",
        ScopeOptions::default(),
    )
    .unwrap();
    assert_eq!(output.matches("function GET_ITER").count(), 2);
    assert!(output.starts_with("function a(p) {function GET_ITER"));
    assert!(output.contains("function b(q) {function GET_ITER"));
}

#[test]
fn nested_loops_get_distinct_temps() {
    let output = lower("for (var a of xs) for (var b of a) f(b);", ARRAYS_ONLY).unwrap();
    assert_eq!(
        output,
        "var _c, _d;_c = 0;_d = xs.length;for (var a; _c < _d; ) {a = (xs[_c++]);{var _a, _b;_a = 0;_b = a.length;for (var b; _a < _b; ) {b = (a[_a++]);f(b);};_a = _b = void 0;}};_c = _d = void 0;"
    );
}

#[test]
fn adjacent_loops_keep_epilogue_before_next_preamble() {
    let output = lower("for(a of x);for(b of y);", ARRAYS_ONLY).unwrap();
    assert_eq!(
        output,
        "var _a, _b;_a = 0;_b = x.length;for(a; _a < _b; ){a = (x[_a++]);;};_a = _b = void 0;var _a, _b;_a = 0;_b = y.length;for(b; _a < _b; ){b = (y[_a++]);;};_a = _b = void 0;"
    );
}

#[test]
fn loop_in_iterated_expression_is_lowered_first() {
    let source = "for (var r of (function(){ var out = []; for (var i of src) out.push(i); return out; })()) use(r);";
    let output = lower(source, ARRAYS_ONLY).unwrap();
    assert!(
        output.contains(
            "_e = ((function(){ var out = []; var _a, _b;_a = 0;_b = src.length;for (var i; _a < _b; ) {i = (src[_a++]);out.push(i);};_a = _b = void 0; return out; })());"
        ),
        "{output}"
    );
    assert!(!output.contains(" of "));
    assert!(output.ends_with("{r = (_e[_c++]);use(r);};_c = _d = _e = void 0;"));
}

#[test]
fn invalid_target_aborts_the_file() {
    let err = lower("for (a.b of c);", ARRAYS_ONLY).unwrap_err();
    assert!(matches!(err, LoweringError::InvalidForOfTarget { .. }));
}
