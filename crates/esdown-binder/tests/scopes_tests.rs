//! Tests for scope creation, option directives and helper offsets.
use esdown_binder::{Binder, ScopeId, ScopeOptions, ScopeTable};
use esdown_parser::parser::NodeArena;
use esdown_parser::parser::syntax_kind_ext;
use esdown_parser::{NodeIndex, ParserState};

fn bind_source(source: &str, defaults: ScopeOptions) -> (NodeArena, NodeIndex, ScopeTable) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let table = Binder::bind(&arena, root, source, defaults);
    (arena, root, table)
}

fn for_of_nodes(arena: &NodeArena) -> Vec<NodeIndex> {
    (0..arena.len() as u32)
        .map(NodeIndex)
        .filter(|&idx| arena.is_kind(idx, syntax_kind_ext::FOR_OF_STATEMENT))
        .collect()
}

#[test]
fn program_and_function_scopes() {
    let source = "for (x of a) {}\nfunction f() { for (y of b) {} var g = function () { for (z of c) {} }; }";
    let (arena, root, table) = bind_source(source, ScopeOptions::default());
    assert_eq!(table.len(), 3);
    assert_eq!(table.scope_for_container(root), Some(ScopeId::ROOT));

    let loops = for_of_nodes(&arena);
    let scopes: Vec<u32> = loops.iter().map(|&l| table.scope_of(l).unwrap().0).collect();
    // Post-order arena allocation: innermost loop first.
    let mut sorted = scopes.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, vec![0, 1, 2]);

    let inner = table.get(ScopeId(2)).unwrap();
    assert_eq!(inner.parent, Some(ScopeId(1)));
}

#[test]
fn default_options_require_iterator_protocol() {
    let options = ScopeOptions::default();
    assert!(options.needs_iterator_protocol());

    let only_iterators_off = ScopeOptions {
        has_iterators: Some(false),
        has_generators: None,
    };
    assert!(only_iterators_off.needs_iterator_protocol());

    let both_off = ScopeOptions {
        has_iterators: Some(false),
        has_generators: Some(false),
    };
    assert!(!both_off.needs_iterator_protocol());
}

#[test]
fn parse_directive_reads_both_flags() {
    let parsed =
        ScopeOptions::parse_directive(" es6-transpiler has-iterators:false, has-generators:false ")
            .unwrap();
    assert_eq!(parsed.has_iterators, Some(false));
    assert_eq!(parsed.has_generators, Some(false));

    let partial = ScopeOptions::parse_directive("esdown has-iterators:true").unwrap();
    assert_eq!(partial.has_iterators, Some(true));
    assert_eq!(partial.has_generators, None);

    assert!(ScopeOptions::parse_directive("just a comment").is_none());
    assert!(ScopeOptions::parse_directive("esdownish has-iterators:false").is_none());
}

#[test]
fn parse_directive_tolerates_spaces_around_colons() {
    for body in [
        " esdown has-iterators: false ",
        "esdown has-iterators : false , has-generators :false",
        "es6-transpiler has-iterators:\tfalse has-generators: false",
    ] {
        let parsed = ScopeOptions::parse_directive(body).unwrap();
        assert_eq!(parsed.has_iterators, Some(false), "{body:?}");
    }

    let both =
        ScopeOptions::parse_directive("esdown has-iterators: false, has-generators: false").unwrap();
    assert!(!both.needs_iterator_protocol());

    let unknown = ScopeOptions::parse_directive("esdown has-iterators: maybe, fast: true").unwrap();
    assert_eq!(unknown, ScopeOptions::default());
}

#[test]
fn directive_applies_to_enclosing_function_and_is_inherited() {
    let source = "\
function outer() {
  /* es6-transpiler has-iterators:false, has-generators:false */
  function inner() {}
}
function other() {}";
    let (_arena, _root, table) = bind_source(source, ScopeOptions::default());
    let by_parent: Vec<(Option<ScopeId>, bool)> = table
        .iter()
        .map(|(_, scope)| (scope.parent, scope.options.needs_iterator_protocol()))
        .collect();
    assert_eq!(
        by_parent,
        vec![
            (None, true),
            (Some(ScopeId(0)), false),
            (Some(ScopeId(1)), false),
            (Some(ScopeId(0)), true),
        ]
    );
}

#[test]
fn defaults_seed_program_scope_and_directives_override() {
    let defaults = ScopeOptions {
        has_iterators: Some(false),
        has_generators: Some(false),
    };
    let source = "function f() { // esdown has-iterators:true\n}";
    let (_arena, _root, table) = bind_source(source, defaults);
    assert!(!table.options(ScopeId(0)).needs_iterator_protocol());
    let f = table.options(ScopeId(1));
    assert_eq!(f.has_iterators, Some(true));
    assert_eq!(f.has_generators, Some(false));
    assert!(f.needs_iterator_protocol());
}

#[test]
fn helper_offsets_skip_directive_prologues() {
    let source = "'use strict';\nfunction f() {\"use strict\"; x(); }\nfunction g() { x(); }";
    let (_arena, _root, table) = bind_source(source, ScopeOptions::default());
    let program = table.get(ScopeId(0)).unwrap();
    assert_eq!(program.helper_insert_pos, "'use strict';".len() as u32);

    let f = table.get(ScopeId(1)).unwrap();
    let f_expected = source.find("\"use strict\";").unwrap() + "\"use strict\";".len();
    assert_eq!(f.helper_insert_pos as usize, f_expected);

    let g = table.get(ScopeId(2)).unwrap();
    let g_expected = source.rfind('{').unwrap() + 1;
    assert_eq!(g.helper_insert_pos as usize, g_expected);
}

#[test]
fn identifiers_are_collected() {
    let (_arena, _root, table) = bind_source("var _a = obj.prop; GET_ITER();", ScopeOptions::default());
    assert!(table.is_identifier_used("_a"));
    assert!(table.is_identifier_used("prop"));
    assert!(table.is_identifier_used("GET_ITER"));
    assert!(!table.is_identifier_used("_b"));
}
