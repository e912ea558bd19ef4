//! Node kinds.
//!
//! Token kinds come from `esdown_scanner::SyntaxKind`; node kinds continue
//! the same `u16` numbering above the last token. Leaf nodes (identifiers,
//! literals, `this`, `null`, `true`, `false`) reuse their token kind.

use esdown_scanner::SyntaxKind;

const FIRST_NODE: u16 = SyntaxKind::LAST_TOKEN as u16 + 1;

pub const SOURCE_FILE: u16 = FIRST_NODE;
// Declarations
pub const VARIABLE_STATEMENT: u16 = FIRST_NODE + 1;
pub const VARIABLE_DECLARATION_LIST: u16 = FIRST_NODE + 2;
pub const VARIABLE_DECLARATION: u16 = FIRST_NODE + 3;
pub const OBJECT_BINDING_PATTERN: u16 = FIRST_NODE + 4;
pub const ARRAY_BINDING_PATTERN: u16 = FIRST_NODE + 5;
pub const BINDING_ELEMENT: u16 = FIRST_NODE + 6;
pub const FUNCTION_DECLARATION: u16 = FIRST_NODE + 7;
pub const FUNCTION_EXPRESSION: u16 = FIRST_NODE + 8;
pub const PARAMETER: u16 = FIRST_NODE + 9;
// Statements
pub const BLOCK: u16 = FIRST_NODE + 10;
pub const EMPTY_STATEMENT: u16 = FIRST_NODE + 11;
pub const EXPRESSION_STATEMENT: u16 = FIRST_NODE + 12;
pub const IF_STATEMENT: u16 = FIRST_NODE + 13;
pub const FOR_STATEMENT: u16 = FIRST_NODE + 14;
pub const FOR_IN_STATEMENT: u16 = FIRST_NODE + 15;
pub const FOR_OF_STATEMENT: u16 = FIRST_NODE + 16;
pub const WHILE_STATEMENT: u16 = FIRST_NODE + 17;
pub const DO_STATEMENT: u16 = FIRST_NODE + 18;
pub const RETURN_STATEMENT: u16 = FIRST_NODE + 19;
pub const THROW_STATEMENT: u16 = FIRST_NODE + 20;
pub const BREAK_STATEMENT: u16 = FIRST_NODE + 21;
pub const CONTINUE_STATEMENT: u16 = FIRST_NODE + 22;
pub const LABELED_STATEMENT: u16 = FIRST_NODE + 23;
pub const TRY_STATEMENT: u16 = FIRST_NODE + 24;
pub const CATCH_CLAUSE: u16 = FIRST_NODE + 25;
pub const SWITCH_STATEMENT: u16 = FIRST_NODE + 26;
pub const CASE_CLAUSE: u16 = FIRST_NODE + 27;
pub const DEFAULT_CLAUSE: u16 = FIRST_NODE + 28;
pub const DEBUGGER_STATEMENT: u16 = FIRST_NODE + 29;
// Expressions
pub const BINARY_EXPRESSION: u16 = FIRST_NODE + 30;
pub const PREFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 31;
pub const POSTFIX_UNARY_EXPRESSION: u16 = FIRST_NODE + 32;
pub const CALL_EXPRESSION: u16 = FIRST_NODE + 33;
pub const NEW_EXPRESSION: u16 = FIRST_NODE + 34;
pub const PROPERTY_ACCESS_EXPRESSION: u16 = FIRST_NODE + 35;
pub const ELEMENT_ACCESS_EXPRESSION: u16 = FIRST_NODE + 36;
pub const CONDITIONAL_EXPRESSION: u16 = FIRST_NODE + 37;
pub const PARENTHESIZED_EXPRESSION: u16 = FIRST_NODE + 38;
pub const ARRAY_LITERAL_EXPRESSION: u16 = FIRST_NODE + 39;
pub const OBJECT_LITERAL_EXPRESSION: u16 = FIRST_NODE + 40;
pub const PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 41;
pub const SHORTHAND_PROPERTY_ASSIGNMENT: u16 = FIRST_NODE + 42;
pub const SPREAD_ELEMENT: u16 = FIRST_NODE + 43;
pub const COMPUTED_PROPERTY_NAME: u16 = FIRST_NODE + 44;
pub const OMITTED_EXPRESSION: u16 = FIRST_NODE + 45;

/// Human-readable kind name for diagnostics and tracing.
#[must_use]
pub fn kind_name(kind: u16) -> &'static str {
    match kind {
        k if k == SyntaxKind::Identifier as u16 => "Identifier",
        k if k == SyntaxKind::StringLiteral as u16 => "StringLiteral",
        k if k == SyntaxKind::NumericLiteral as u16 => "NumericLiteral",
        k if k == SyntaxKind::ThisKeyword as u16 => "ThisKeyword",
        SOURCE_FILE => "SourceFile",
        VARIABLE_STATEMENT => "VariableStatement",
        VARIABLE_DECLARATION_LIST => "VariableDeclarationList",
        VARIABLE_DECLARATION => "VariableDeclaration",
        OBJECT_BINDING_PATTERN => "ObjectBindingPattern",
        ARRAY_BINDING_PATTERN => "ArrayBindingPattern",
        BINDING_ELEMENT => "BindingElement",
        FUNCTION_DECLARATION => "FunctionDeclaration",
        FUNCTION_EXPRESSION => "FunctionExpression",
        PARAMETER => "Parameter",
        BLOCK => "Block",
        EMPTY_STATEMENT => "EmptyStatement",
        EXPRESSION_STATEMENT => "ExpressionStatement",
        IF_STATEMENT => "IfStatement",
        FOR_STATEMENT => "ForStatement",
        FOR_IN_STATEMENT => "ForInStatement",
        FOR_OF_STATEMENT => "ForOfStatement",
        WHILE_STATEMENT => "WhileStatement",
        DO_STATEMENT => "DoStatement",
        RETURN_STATEMENT => "ReturnStatement",
        THROW_STATEMENT => "ThrowStatement",
        BREAK_STATEMENT => "BreakStatement",
        CONTINUE_STATEMENT => "ContinueStatement",
        LABELED_STATEMENT => "LabeledStatement",
        TRY_STATEMENT => "TryStatement",
        CATCH_CLAUSE => "CatchClause",
        SWITCH_STATEMENT => "SwitchStatement",
        CASE_CLAUSE => "CaseClause",
        DEFAULT_CLAUSE => "DefaultClause",
        DEBUGGER_STATEMENT => "DebuggerStatement",
        BINARY_EXPRESSION => "BinaryExpression",
        PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
        POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
        CALL_EXPRESSION => "CallExpression",
        NEW_EXPRESSION => "NewExpression",
        PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
        ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
        CONDITIONAL_EXPRESSION => "ConditionalExpression",
        PARENTHESIZED_EXPRESSION => "ParenthesizedExpression",
        ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
        OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
        PROPERTY_ASSIGNMENT => "PropertyAssignment",
        SHORTHAND_PROPERTY_ASSIGNMENT => "ShorthandPropertyAssignment",
        SPREAD_ELEMENT => "SpreadElement",
        COMPUTED_PROPERTY_NAME => "ComputedPropertyName",
        OMITTED_EXPRESSION => "OmittedExpression",
        _ => "Token",
    }
}
