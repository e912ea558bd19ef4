//! Unit tests for the parser state and node arena.
use super::*;
use crate::syntax::transform_utils::skip_parentheses;
use esdown_common::diagnostics::diagnostic_codes;
use esdown_scanner::SyntaxKind;

fn parse_source(source: &str) -> (ParserState, NodeIndex) {
    let mut parser = ParserState::new("test.js".to_string(), source.to_string());
    let root = parser.parse_source_file();
    (parser, root)
}

fn first_statement(parser: &ParserState, root: NodeIndex) -> NodeIndex {
    let sf = parser.get_arena().get_source_file_at(root).unwrap();
    sf.statements.nodes[0]
}

fn text_of<'a>(source: &'a str, arena: &NodeArena, idx: NodeIndex) -> &'a str {
    let node = arena.get(idx).unwrap();
    &source[node.pos as usize..node.end as usize]
}

#[test]
fn for_of_with_var_declaration() {
    let source = "for (var x of arr) { sum += x; }";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let node = arena.get(stmt).unwrap();
    assert_eq!(node.kind, syntax_kind_ext::FOR_OF_STATEMENT);
    assert_eq!(node.pos, 0);
    assert_eq!(node.end as usize, source.len());

    let data = arena.get_for_in_of(node).unwrap();
    assert!(!data.await_modifier);
    assert_eq!(text_of(source, arena, data.initializer), "var x");
    assert_eq!(text_of(source, arena, data.expression), "arr");
    assert_eq!(text_of(source, arena, data.statement), "{ sum += x; }");
    assert!(arena.is_kind(data.statement, syntax_kind_ext::BLOCK));
}

#[test]
fn let_and_const_set_declaration_list_flags() {
    let (parser, root) = parse_source("for (let a of b) ;\nfor (const c of d) ;");
    let arena = parser.get_arena();
    let sf = arena.get_source_file_at(root).unwrap();
    let flags: Vec<u16> = sf
        .statements
        .nodes
        .iter()
        .map(|&stmt| {
            let node = arena.get(stmt).unwrap();
            let data = arena.get_for_in_of(node).unwrap();
            arena.get(data.initializer).unwrap().flags
        })
        .collect();
    assert_eq!(flags, vec![node_flags::LET, node_flags::CONST]);
}

#[test]
fn for_of_with_destructuring_pattern() {
    let source = "for (let {a, b: [c, , d = 1], ...rest} of list) {}";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let data = arena.get_for_in_of(arena.get(stmt).unwrap()).unwrap();
    let list = arena.get_variable(arena.get(data.initializer).unwrap()).unwrap();
    let decl = arena
        .get_variable_declaration(arena.get(list.declarations.nodes[0]).unwrap())
        .unwrap();
    assert!(arena.is_binding_pattern(decl.name));
    assert_eq!(text_of(source, arena, decl.name), "{a, b: [c, , d = 1], ...rest}");

    let pattern = arena.get_binding_pattern(arena.get(decl.name).unwrap()).unwrap();
    let elements: Vec<&str> = pattern
        .elements
        .nodes
        .iter()
        .map(|&e| text_of(source, arena, e))
        .collect();
    assert_eq!(elements, vec!["a", "b: [c, , d = 1]", "...rest"]);
}

#[test]
fn array_binding_pattern_keeps_holes() {
    let (parser, root) = parse_source("var [, x, , y] = z;");
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let var_stmt = arena.get_variable_statement(arena.get(stmt).unwrap()).unwrap();
    let list = arena.get_variable(arena.get(var_stmt.declaration_list).unwrap()).unwrap();
    let decl = arena
        .get_variable_declaration(arena.get(list.declarations.nodes[0]).unwrap())
        .unwrap();
    let pattern = arena.get_binding_pattern(arena.get(decl.name).unwrap()).unwrap();
    let holes: Vec<bool> = pattern.elements.nodes.iter().map(|e| e.is_none()).collect();
    assert_eq!(holes, vec![true, false, true, false]);
}

#[test]
fn for_of_with_multiple_declarations_reports_1188() {
    let (parser, _root) = parse_source("for (var a, b of c) {}");
    let codes: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.code).collect();
    assert!(codes.contains(&1188), "got {codes:?}");
}

#[test]
fn for_of_with_initializer_reports_1190() {
    let (parser, _root) = parse_source("for (var a = 1 of c) {}");
    let codes: Vec<u32> = parser.get_diagnostics().iter().map(|d| d.code).collect();
    assert!(codes.contains(&1190), "got {codes:?}");
}

#[test]
fn for_await_sets_modifier_and_flag() {
    let (parser, root) = parse_source("for await (const x of xs) {}");
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let node = arena.get(stmt).unwrap();
    assert_eq!(node.flags & node_flags::AWAIT, node_flags::AWAIT);
    assert!(arena.get_for_in_of(node).unwrap().await_modifier);
}

#[test]
fn for_in_initializer_does_not_consume_in() {
    let (parser, root) = parse_source("for (var k in obj) {}");
    assert!(parser.get_diagnostics().is_empty());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    assert!(arena.is_kind(stmt, syntax_kind_ext::FOR_IN_STATEMENT));
}

#[test]
fn classic_for_with_in_operator_in_parentheses() {
    let (parser, root) = parse_source("for (var i = ('a' in o) ? 1 : 0; i < 3; i++) {}");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    assert!(arena.is_kind(stmt, syntax_kind_ext::FOR_STATEMENT));
}

#[test]
fn binary_precedence_groups_multiplication_first() {
    let source = "x = a + b * c;";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let expr = arena.get_expression_statement(arena.get(stmt).unwrap()).unwrap();
    let assign = arena.get_binary_expr(arena.get(expr.expression).unwrap()).unwrap();
    assert_eq!(assign.operator_token, SyntaxKind::EqualsToken as u16);
    let sum = arena.get_binary_expr(arena.get(assign.right).unwrap()).unwrap();
    assert_eq!(sum.operator_token, SyntaxKind::PlusToken as u16);
    assert_eq!(text_of(source, arena, sum.right), "b * c");
}

#[test]
fn call_member_and_new_chains() {
    let source = "new Foo.Bar(1).baz[0](x, ...ys);";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let expr = arena.get_expression_statement(arena.get(stmt).unwrap()).unwrap();
    let call_node = arena.get(expr.expression).unwrap();
    assert_eq!(call_node.kind, syntax_kind_ext::CALL_EXPRESSION);
    let call = arena.get_call_expr(call_node).unwrap();
    assert_eq!(call.arguments.as_ref().map(NodeList::len), Some(2));
    assert_eq!(text_of(source, arena, call.expression), "new Foo.Bar(1).baz[0]");
}

#[test]
fn object_literal_members() {
    let source = "o = { a: 1, b, [k]: 2, m() { return 1; }, get g() { return 2; }, 'q': 3 };";
    let (parser, root) = parse_source(source);
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let expr = arena.get_expression_statement(arena.get(stmt).unwrap()).unwrap();
    let assign = arena.get_binary_expr(arena.get(expr.expression).unwrap()).unwrap();
    let object = arena.get_literal_expr(arena.get(assign.right).unwrap()).unwrap();
    assert_eq!(object.elements.len(), 6);
    assert!(arena.is_kind(object.elements.nodes[1], syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT));
}

#[test]
fn asi_at_line_breaks() {
    let (parser, root) = parse_source("a = 1\nb = 2\nreturn\nc");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let sf = parser.get_arena().get_source_file_at(root).unwrap();
    assert_eq!(sf.statements.len(), 4);
}

#[test]
fn recovery_skips_stray_tokens() {
    let (parser, root) = parse_source("var a = ;\n) var b = 2;");
    let sf = parser.get_arena().get_source_file_at(root).unwrap();
    assert!(!parser.get_diagnostics().is_empty());
    assert_eq!(sf.statements.len(), 2);
}

#[test]
fn comments_are_recorded_on_source_file() {
    let (parser, root) = parse_source("/* es6-transpiler has-iterators:false */\nvar a; // tail");
    let sf = parser.get_arena().get_source_file_at(root).unwrap();
    assert_eq!(sf.comments.len(), 2);
    assert!(sf.comments[0].is_multi_line);
}

#[test]
fn skip_parentheses_unwraps_nested() {
    let source = "((x));";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let expr = arena.get_expression_statement(arena.get(stmt).unwrap()).unwrap();
    let inner = skip_parentheses(arena, expr.expression);
    assert_eq!(arena.identifier_text(inner), Some("x"));
}

#[test]
fn children_follow_source_order() {
    let source = "for (x of y) z();";
    let (parser, root) = parse_source(source);
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let children = arena.children(stmt);
    let texts: Vec<&str> = children.iter().map(|&c| text_of(source, arena, c)).collect();
    assert_eq!(texts, vec!["x", "y", "z();"]);
}

#[test]
fn nested_functions_and_parameters() {
    let (parser, root) = parse_source("function outer(a, b = 1, ...c) { var f = function () {}; }");
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.get_arena();
    let stmt = first_statement(&parser, root);
    let func = arena.get_function(arena.get(stmt).unwrap()).unwrap();
    assert_eq!(func.parameters.len(), 3);
    assert_eq!(arena.identifier_text(func.name), Some("outer"));
}

#[test]
fn generator_functions_are_rejected() {
    for source in [
        "function* g() { yield 1; }",
        "var g = function* () {};",
        "var o = { *m() {} };",
    ] {
        let (parser, _) = parse_source(source);
        let first = parser.get_diagnostics().first().expect("expected a diagnostic");
        assert_eq!(first.code, diagnostic_codes::UNSUPPORTED_CONSTRUCT, "{source}");
        assert_eq!(first.message, "'function*' cannot be lowered to ES5.");
        assert_eq!(&source[first.start as usize..(first.start + first.length) as usize], "*");
    }
}
