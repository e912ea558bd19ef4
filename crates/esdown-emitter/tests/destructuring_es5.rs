use super::*;
use esdown_parser::ParserState;
use rustc_hash::FxHashSet;

struct Lowered {
    result: Result<String, PatternError>,
    names: Vec<String>,
    temps: Vec<String>,
    live_after: usize,
}

/// Lower the pattern of the first `var <pattern> = <init>;` in `source`.
fn lower_declaration(source: &str, placeholder: Option<&str>) -> Lowered {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).unwrap();
    let stmt = arena.get(sf.statements.nodes[0]).unwrap();
    let list = arena.get_variable_statement(stmt).unwrap().declaration_list;
    let decl_idx = arena.get_variable(arena.get(list).unwrap()).unwrap().declarations.nodes[0];
    let decl = arena.get_variable_declaration(arena.get(decl_idx).unwrap()).unwrap();

    let edits = EditBuffer::new(source);
    let mut pool = TempVariablePool::new(FxHashSet::default());
    let anchor = TextRange::new(0, source.len() as u32);
    let mut names = Vec::new();
    let (result, temps) = {
        let mut lowerer = PatternLowerer::new(arena, &edits, &mut pool, ScopeId::ROOT, anchor);
        let result = lowerer.unwrap("var", decl.name, placeholder, decl.initializer, &mut names);
        (result, lowerer.temps().to_vec())
    };
    Lowered {
        result,
        names,
        temps,
        live_after: pool.live_count(ScopeId::ROOT),
    }
}

#[test]
fn object_pattern_over_identifier_reads_source_directly() {
    let lowered = lower_declaration("var {a, b} = obj;", None);
    assert_eq!(lowered.result.unwrap(), "var a = obj.a, b = obj.b");
    assert_eq!(lowered.names, ["a", "b"]);
    assert!(lowered.temps.is_empty());
}

#[test]
fn call_source_is_cached_in_a_temp() {
    let lowered = lower_declaration("var {a, b} = getObj();", None);
    assert_eq!(lowered.result.unwrap(), "var _a = getObj(), a = _a.a, b = _a.b");
    assert_eq!(lowered.names, ["_a", "a", "b"]);
    assert_eq!(lowered.temps, ["_a"]);
    assert_eq!(lowered.live_after, 0);
}

#[test]
fn single_read_skips_the_temp() {
    let lowered = lower_declaration("var [x] = f();", None);
    assert_eq!(lowered.result.unwrap(), "var x = f()[0]");

    let lowered = lower_declaration("var [x] = a || b;", None);
    assert_eq!(lowered.result.unwrap(), "var x = (a || b)[0]");
}

#[test]
fn array_holes_and_rest() {
    let lowered = lower_declaration("var [first, , third, ...rest] = list;", None);
    assert_eq!(
        lowered.result.unwrap(),
        "var first = list[0], third = list[2], rest = Array.prototype.slice.call(list, 3)"
    );
    assert_eq!(lowered.names, ["first", "third", "rest"]);
}

#[test]
fn nested_pattern_with_defaults() {
    let lowered = lower_declaration("var {a, b: [c, , d = 1]} = obj;", None);
    assert_eq!(
        lowered.result.unwrap(),
        "var a = obj.a, _a = obj.b, c = _a[0], d = _a[2], d = d === void 0 ? (1) : d"
    );
    assert_eq!(lowered.names, ["a", "_a", "c", "d"]);
}

#[test]
fn nested_pattern_default_reuses_its_temp() {
    let lowered = lower_declaration("var {p: {q, r} = {}} = o;", None);
    assert_eq!(
        lowered.result.unwrap(),
        "var _a = o.p, _a = _a === void 0 ? ({}) : _a, q = _a.q, r = _a.r"
    );
    assert_eq!(lowered.names, ["_a", "q", "r"]);
}

#[test]
fn literal_and_computed_keys_use_element_access() {
    let lowered = lower_declaration("var {\"x-y\": p, 0: q, [k]: r} = o;", None);
    assert_eq!(lowered.result.unwrap(), "var p = o[\"x-y\"], q = o[0], r = o[k]");
}

#[test]
fn placeholder_replaces_the_initializer() {
    let lowered = lower_declaration("var {a, b} = o;", Some("(_c ? v[_a++] : _b[\"value\"])"));
    assert_eq!(
        lowered.result.unwrap(),
        "var _a = (_c ? v[_a++] : _b[\"value\"]), a = _a.a, b = _a.b"
    );

    let lowered = lower_declaration("var {a, b} = o;", Some("item"));
    assert_eq!(lowered.result.unwrap(), "var a = item.a, b = item.b");
}

#[test]
fn empty_pattern_still_evaluates_its_source() {
    let lowered = lower_declaration("var {} = f();", None);
    assert_eq!(lowered.result.unwrap(), "var _a = f()");
}

#[test]
fn repeated_names_are_declared_once() {
    let lowered = lower_declaration("var [a, a] = xs;", None);
    assert_eq!(lowered.result.unwrap(), "var a = xs[0], a = xs[1]");
    assert_eq!(lowered.names, ["a"]);
}

#[test]
fn object_rest_is_rejected_and_temps_released() {
    let lowered = lower_declaration("var {a, ...r} = f();", None);
    assert!(matches!(lowered.result, Err(PatternError::ObjectRest { .. })));
    assert_eq!(lowered.temps, ["_a"]);
    assert_eq!(lowered.live_after, 0);
}

#[test]
fn missing_initializer_is_reported() {
    let lowered = lower_declaration("var {a} = o;", None);
    assert!(lowered.result.is_ok());

    let mut parser = ParserState::new("test.js".to_string(), "var {a} = o;".to_string());
    let root = parser.parse_source_file();
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).unwrap();
    let stmt = arena.get(sf.statements.nodes[0]).unwrap();
    let list = arena.get_variable_statement(stmt).unwrap().declaration_list;
    let decl_idx = arena.get_variable(arena.get(list).unwrap()).unwrap().declarations.nodes[0];
    let decl = arena.get_variable_declaration(arena.get(decl_idx).unwrap()).unwrap();
    let edits = EditBuffer::new("var {a} = o;");
    let mut pool = TempVariablePool::default();
    let mut lowerer = PatternLowerer::new(arena, &edits, &mut pool, ScopeId::ROOT, TextRange::new(0, 12));
    let err = lowerer
        .unwrap("var", decl.name, None, NodeIndex::NONE, &mut Vec::new())
        .unwrap_err();
    assert!(matches!(err, PatternError::MissingSource { .. }));
}

#[test]
fn identifier_text_detection() {
    assert!(is_identifier_text("_a"));
    assert!(is_identifier_text("$item1"));
    assert!(!is_identifier_text("1x"));
    assert!(!is_identifier_text("(a)"));
    assert!(!is_identifier_text(""));
}
