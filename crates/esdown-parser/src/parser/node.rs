//! Node storage.
//!
//! A `Node` is a thin header (kind, flags, range, data slot). Kind-specific
//! payloads live in typed pools on the `NodeArena`; `data_index` points into
//! the pool selected by `kind`.

use super::base::{NodeIndex, NodeList};
use esdown_common::{CommentRange, TextRange};
use std::sync::Arc;

pub mod node_flags {
    pub const NONE: u16 = 0;
    /// Variable declaration list declared with `let`.
    pub const LET: u16 = 1;
    /// Variable declaration list declared with `const`.
    pub const CONST: u16 = 2;
    pub const BLOCK_SCOPED: u16 = LET | CONST;
    /// `for await (...)`
    pub const AWAIT: u16 = 8;
    /// Node synthesized by error recovery.
    pub const MISSING: u16 = 16;
}

/// Thin node header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: u16,
    pub flags: u16,
    /// Start of the node's first token (no leading trivia)
    pub pos: u32,
    /// End of the node's last token
    pub end: u32,
    pub data_index: u32,
}

impl Node {
    pub const NO_DATA: u32 = u32::MAX;

    #[inline]
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.data_index != Self::NO_DATA
    }

    #[inline]
    #[must_use]
    pub const fn range(&self) -> TextRange {
        TextRange::new(self.pos, self.end)
    }
}

// =============================================================================
// Node data
// =============================================================================

#[derive(Clone, Debug)]
pub struct IdentifierData {
    pub escaped_text: String,
}

/// Numeric or string literal; `text` is the raw source text.
#[derive(Clone, Debug)]
pub struct LiteralData {
    pub text: String,
}

#[derive(Clone, Debug)]
pub struct SourceFileData {
    pub statements: NodeList,
    pub file_name: String,
    pub text: Arc<str>,
    pub comments: Vec<CommentRange>,
}

#[derive(Clone, Debug)]
pub struct VariableStatementData {
    pub declaration_list: NodeIndex,
}

/// `var`/`let`/`const` declaration list; the keyword is in the node flags.
#[derive(Clone, Debug)]
pub struct VariableData {
    pub declarations: NodeList,
}

#[derive(Clone, Debug)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

/// Object or array binding pattern. Array holes are `NodeIndex::NONE`.
#[derive(Clone, Debug)]
pub struct BindingPatternData {
    pub elements: NodeList,
}

#[derive(Clone, Debug)]
pub struct BindingElementData {
    pub dot_dot_dot_token: bool,
    /// Property key in object patterns (`key` in `{key: name}`), NONE otherwise
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: NodeList,
    pub body: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ParameterData {
    pub dot_dot_dot_token: bool,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct BlockData {
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct ExprStatementData {
    pub expression: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IfStatementData {
    pub expression: NodeIndex,
    pub then_statement: NodeIndex,
    pub else_statement: NodeIndex,
}

/// `for (;;)`, `while`, and `do ... while` loops.
#[derive(Clone, Debug)]
pub struct LoopData {
    pub initializer: NodeIndex,
    pub condition: NodeIndex,
    pub incrementor: NodeIndex,
    pub statement: NodeIndex,
}

/// `for (initializer in/of expression) statement`
#[derive(Clone, Debug)]
pub struct ForInOfData {
    pub await_modifier: bool,
    pub initializer: NodeIndex,
    pub expression: NodeIndex,
    pub statement: NodeIndex,
}

/// `return`/`throw` operand.
#[derive(Clone, Debug)]
pub struct ReturnData {
    pub expression: NodeIndex,
}

/// `break`/`continue` label.
#[derive(Clone, Debug)]
pub struct JumpData {
    pub label: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct LabeledData {
    pub label: NodeIndex,
    pub statement: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TryData {
    pub try_block: NodeIndex,
    pub catch_clause: NodeIndex,
    pub finally_block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CatchClauseData {
    pub variable_declaration: NodeIndex,
    pub block: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct SwitchData {
    pub expression: NodeIndex,
    pub clauses: NodeList,
}

/// `case expr:` (expression set) or `default:` (expression NONE).
#[derive(Clone, Debug)]
pub struct CaseClauseData {
    pub expression: NodeIndex,
    pub statements: NodeList,
}

#[derive(Clone, Debug)]
pub struct BinaryExprData {
    pub left: NodeIndex,
    pub operator_token: u16,
    pub right: NodeIndex,
}

/// Prefix or postfix unary expression, including `typeof`/`void`/`delete`.
#[derive(Clone, Debug)]
pub struct UnaryExprData {
    pub operator: u16,
    pub operand: NodeIndex,
}

/// Call or `new` expression. `new` without parentheses has no arguments.
#[derive(Clone, Debug)]
pub struct CallExprData {
    pub expression: NodeIndex,
    pub arguments: Option<NodeList>,
}

/// Property access (`a.b`) or element access (`a[b]`).
#[derive(Clone, Debug)]
pub struct AccessExprData {
    pub expression: NodeIndex,
    pub name_or_argument: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ConditionalExprData {
    pub condition: NodeIndex,
    pub when_true: NodeIndex,
    pub when_false: NodeIndex,
}

/// Parenthesized expression, spread element, or computed property name.
#[derive(Clone, Debug)]
pub struct WrappedExprData {
    pub expression: NodeIndex,
}

/// Array or object literal.
#[derive(Clone, Debug)]
pub struct LiteralExprData {
    pub elements: NodeList,
}

/// `name: initializer`, shorthand `name` / `name = default`, or a method
/// (`name() {}`, initializer is a function expression).
#[derive(Clone, Debug)]
pub struct PropertyAssignmentData {
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}

// =============================================================================
// Arena
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    pub nodes: Vec<Node>,
    pub identifiers: Vec<IdentifierData>,
    pub literals: Vec<LiteralData>,
    pub source_files: Vec<SourceFileData>,
    pub variable_statements: Vec<VariableStatementData>,
    pub variables: Vec<VariableData>,
    pub variable_declarations: Vec<VariableDeclarationData>,
    pub binding_patterns: Vec<BindingPatternData>,
    pub binding_elements: Vec<BindingElementData>,
    pub functions: Vec<FunctionData>,
    pub parameters: Vec<ParameterData>,
    pub blocks: Vec<BlockData>,
    pub expr_statements: Vec<ExprStatementData>,
    pub if_statements: Vec<IfStatementData>,
    pub loops: Vec<LoopData>,
    pub for_in_of: Vec<ForInOfData>,
    pub return_data: Vec<ReturnData>,
    pub jump_data: Vec<JumpData>,
    pub labeled_data: Vec<LabeledData>,
    pub try_data: Vec<TryData>,
    pub catch_clauses: Vec<CatchClauseData>,
    pub switch_data: Vec<SwitchData>,
    pub case_clauses: Vec<CaseClauseData>,
    pub binary_exprs: Vec<BinaryExprData>,
    pub unary_exprs: Vec<UnaryExprData>,
    pub call_exprs: Vec<CallExprData>,
    pub access_exprs: Vec<AccessExprData>,
    pub conditional_exprs: Vec<ConditionalExprData>,
    pub wrapped_exprs: Vec<WrappedExprData>,
    pub literal_exprs: Vec<LiteralExprData>,
    pub property_assignments: Vec<PropertyAssignmentData>,
}

/// Generates `add_*` constructors that push the payload into its pool and
/// link a new node header to it.
macro_rules! node_constructors {
    ($($fn_name:ident => $pool:ident : $data:ty),+ $(,)?) => {
        impl NodeArena {
            $(
                pub fn $fn_name(&mut self, kind: u16, pos: u32, end: u32, data: $data) -> NodeIndex {
                    let data_index = self.$pool.len() as u32;
                    self.$pool.push(data);
                    self.push_node(kind, pos, end, data_index)
                }
            )+
        }
    };
}

node_constructors! {
    add_identifier => identifiers: IdentifierData,
    add_literal => literals: LiteralData,
    add_source_file_data => source_files: SourceFileData,
    add_variable_statement => variable_statements: VariableStatementData,
    add_variable => variables: VariableData,
    add_variable_declaration => variable_declarations: VariableDeclarationData,
    add_binding_pattern => binding_patterns: BindingPatternData,
    add_binding_element => binding_elements: BindingElementData,
    add_function => functions: FunctionData,
    add_parameter => parameters: ParameterData,
    add_block => blocks: BlockData,
    add_expr_statement => expr_statements: ExprStatementData,
    add_if_statement => if_statements: IfStatementData,
    add_loop => loops: LoopData,
    add_for_in_of => for_in_of: ForInOfData,
    add_return => return_data: ReturnData,
    add_jump => jump_data: JumpData,
    add_labeled => labeled_data: LabeledData,
    add_try => try_data: TryData,
    add_catch_clause => catch_clauses: CatchClauseData,
    add_switch => switch_data: SwitchData,
    add_case_clause => case_clauses: CaseClauseData,
    add_binary_expr => binary_exprs: BinaryExprData,
    add_unary_expr => unary_exprs: UnaryExprData,
    add_call_expr => call_exprs: CallExprData,
    add_access_expr => access_exprs: AccessExprData,
    add_conditional_expr => conditional_exprs: ConditionalExprData,
    add_wrapped_expr => wrapped_exprs: WrappedExprData,
    add_literal_expr => literal_exprs: LiteralExprData,
    add_property_assignment => property_assignments: PropertyAssignmentData,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    fn push_node(&mut self, kind: u16, pos: u32, end: u32, data_index: u32) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            flags: node_flags::NONE,
            pos,
            end,
            data_index,
        });
        index
    }

    /// Add a node without payload (`this`, `null`, empty statement, ...).
    pub fn add_token(&mut self, kind: u16, pos: u32, end: u32) -> NodeIndex {
        self.push_node(kind, pos, end, Node::NO_DATA)
    }

    pub fn set_flags(&mut self, index: NodeIndex, flags: u16) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
