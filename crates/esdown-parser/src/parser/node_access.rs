//! NodeArena access methods.
//!
//! Typed getters return `None` when the node's kind does not carry the
//! requested payload, so callers can chain them with `let ... else`.

use super::base::NodeIndex;
use super::node::*;
use super::syntax_kind_ext::*;
use esdown_scanner::SyntaxKind;
use smallvec::SmallVec;

/// Generates a typed getter that checks the node kind before indexing the pool.
macro_rules! node_getters {
    ($($fn_name:ident => $pool:ident : $data:ty, [$($kind:expr),+ $(,)?]);+ $(;)?) => {
        impl NodeArena {
            $(
                #[inline]
                pub fn $fn_name(&self, node: &Node) -> Option<&$data> {
                    if node.has_data() && ($(node.kind == $kind)||+) {
                        self.$pool.get(node.data_index as usize)
                    } else {
                        None
                    }
                }
            )+
        }
    };
}

node_getters! {
    get_identifier => identifiers: IdentifierData, [SyntaxKind::Identifier as u16];
    get_literal => literals: LiteralData, [SyntaxKind::StringLiteral as u16, SyntaxKind::NumericLiteral as u16];
    get_source_file => source_files: SourceFileData, [SOURCE_FILE];
    get_variable_statement => variable_statements: VariableStatementData, [VARIABLE_STATEMENT];
    get_variable => variables: VariableData, [VARIABLE_DECLARATION_LIST];
    get_variable_declaration => variable_declarations: VariableDeclarationData, [VARIABLE_DECLARATION];
    get_binding_pattern => binding_patterns: BindingPatternData, [OBJECT_BINDING_PATTERN, ARRAY_BINDING_PATTERN];
    get_binding_element => binding_elements: BindingElementData, [BINDING_ELEMENT];
    get_function => functions: FunctionData, [FUNCTION_DECLARATION, FUNCTION_EXPRESSION];
    get_parameter => parameters: ParameterData, [PARAMETER];
    get_block => blocks: BlockData, [BLOCK];
    get_expression_statement => expr_statements: ExprStatementData, [EXPRESSION_STATEMENT];
    get_if_statement => if_statements: IfStatementData, [IF_STATEMENT];
    get_loop => loops: LoopData, [FOR_STATEMENT, WHILE_STATEMENT, DO_STATEMENT];
    get_for_in_of => for_in_of: ForInOfData, [FOR_IN_STATEMENT, FOR_OF_STATEMENT];
    get_return_statement => return_data: ReturnData, [RETURN_STATEMENT, THROW_STATEMENT];
    get_jump_data => jump_data: JumpData, [BREAK_STATEMENT, CONTINUE_STATEMENT];
    get_labeled_statement => labeled_data: LabeledData, [LABELED_STATEMENT];
    get_try => try_data: TryData, [TRY_STATEMENT];
    get_catch_clause => catch_clauses: CatchClauseData, [CATCH_CLAUSE];
    get_switch => switch_data: SwitchData, [SWITCH_STATEMENT];
    get_case_clause => case_clauses: CaseClauseData, [CASE_CLAUSE, DEFAULT_CLAUSE];
    get_binary_expr => binary_exprs: BinaryExprData, [BINARY_EXPRESSION];
    get_unary_expr => unary_exprs: UnaryExprData, [PREFIX_UNARY_EXPRESSION, POSTFIX_UNARY_EXPRESSION];
    get_call_expr => call_exprs: CallExprData, [CALL_EXPRESSION, NEW_EXPRESSION];
    get_access_expr => access_exprs: AccessExprData, [PROPERTY_ACCESS_EXPRESSION, ELEMENT_ACCESS_EXPRESSION];
    get_conditional_expr => conditional_exprs: ConditionalExprData, [CONDITIONAL_EXPRESSION];
    get_wrapped_expr => wrapped_exprs: WrappedExprData, [PARENTHESIZED_EXPRESSION, SPREAD_ELEMENT, COMPUTED_PROPERTY_NAME];
    get_literal_expr => literal_exprs: LiteralExprData, [ARRAY_LITERAL_EXPRESSION, OBJECT_LITERAL_EXPRESSION];
    get_property_assignment => property_assignments: PropertyAssignmentData, [PROPERTY_ASSIGNMENT, SHORTHAND_PROPERTY_ASSIGNMENT];
}

impl NodeArena {
    /// Get a node by index
    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_source_file_at(&self, index: NodeIndex) -> Option<&SourceFileData> {
        self.get(index).and_then(|node| self.get_source_file(node))
    }

    /// Identifier text for an identifier node, `None` for anything else.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        let node = self.get(index)?;
        self.get_identifier(node).map(|ident| ident.escaped_text.as_str())
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: u16) -> bool {
        self.get(index).is_some_and(|node| node.kind == kind)
    }

    #[inline]
    pub fn is_identifier(&self, index: NodeIndex) -> bool {
        self.is_kind(index, SyntaxKind::Identifier as u16)
    }

    pub fn is_binding_pattern(&self, index: NodeIndex) -> bool {
        self.get(index)
            .is_some_and(|node| node.kind == OBJECT_BINDING_PATTERN || node.kind == ARRAY_BINDING_PATTERN)
    }

    pub fn is_function_like(&self, index: NodeIndex) -> bool {
        self.get(index)
            .is_some_and(|node| node.kind == FUNCTION_DECLARATION || node.kind == FUNCTION_EXPRESSION)
    }

    /// Direct children of a node in source order. Absent children are skipped.
    pub fn children(&self, index: NodeIndex) -> SmallVec<[NodeIndex; 4]> {
        let mut out: SmallVec<[NodeIndex; 4]> = SmallVec::new();
        let Some(node) = self.get(index) else {
            return out;
        };
        let mut push = |idx: NodeIndex| {
            if idx.is_some() {
                out.push(idx);
            }
        };

        if let Some(sf) = self.get_source_file(node) {
            sf.statements.nodes.iter().copied().for_each(&mut push);
        } else if let Some(stmt) = self.get_variable_statement(node) {
            push(stmt.declaration_list);
        } else if let Some(list) = self.get_variable(node) {
            list.declarations.nodes.iter().copied().for_each(&mut push);
        } else if let Some(decl) = self.get_variable_declaration(node) {
            push(decl.name);
            push(decl.initializer);
        } else if let Some(pattern) = self.get_binding_pattern(node) {
            pattern.elements.nodes.iter().copied().for_each(&mut push);
        } else if let Some(elem) = self.get_binding_element(node) {
            push(elem.property_name);
            push(elem.name);
            push(elem.initializer);
        } else if let Some(func) = self.get_function(node) {
            push(func.name);
            func.parameters.nodes.iter().copied().for_each(&mut push);
            push(func.body);
        } else if let Some(param) = self.get_parameter(node) {
            push(param.name);
            push(param.initializer);
        } else if let Some(block) = self.get_block(node) {
            block.statements.nodes.iter().copied().for_each(&mut push);
        } else if let Some(stmt) = self.get_expression_statement(node) {
            push(stmt.expression);
        } else if let Some(if_stmt) = self.get_if_statement(node) {
            push(if_stmt.expression);
            push(if_stmt.then_statement);
            push(if_stmt.else_statement);
        } else if let Some(loop_data) = self.get_loop(node) {
            if node.kind == DO_STATEMENT {
                push(loop_data.statement);
                push(loop_data.condition);
            } else {
                push(loop_data.initializer);
                push(loop_data.condition);
                push(loop_data.incrementor);
                push(loop_data.statement);
            }
        } else if let Some(for_in_of) = self.get_for_in_of(node) {
            push(for_in_of.initializer);
            push(for_in_of.expression);
            push(for_in_of.statement);
        } else if let Some(ret) = self.get_return_statement(node) {
            push(ret.expression);
        } else if let Some(jump) = self.get_jump_data(node) {
            push(jump.label);
        } else if let Some(labeled) = self.get_labeled_statement(node) {
            push(labeled.label);
            push(labeled.statement);
        } else if let Some(try_data) = self.get_try(node) {
            push(try_data.try_block);
            push(try_data.catch_clause);
            push(try_data.finally_block);
        } else if let Some(catch) = self.get_catch_clause(node) {
            push(catch.variable_declaration);
            push(catch.block);
        } else if let Some(switch) = self.get_switch(node) {
            push(switch.expression);
            switch.clauses.nodes.iter().copied().for_each(&mut push);
        } else if let Some(clause) = self.get_case_clause(node) {
            push(clause.expression);
            clause.statements.nodes.iter().copied().for_each(&mut push);
        } else if let Some(bin) = self.get_binary_expr(node) {
            push(bin.left);
            push(bin.right);
        } else if let Some(unary) = self.get_unary_expr(node) {
            push(unary.operand);
        } else if let Some(call) = self.get_call_expr(node) {
            push(call.expression);
            if let Some(args) = &call.arguments {
                args.nodes.iter().copied().for_each(&mut push);
            }
        } else if let Some(access) = self.get_access_expr(node) {
            push(access.expression);
            push(access.name_or_argument);
        } else if let Some(cond) = self.get_conditional_expr(node) {
            push(cond.condition);
            push(cond.when_true);
            push(cond.when_false);
        } else if let Some(wrapped) = self.get_wrapped_expr(node) {
            push(wrapped.expression);
        } else if let Some(lit) = self.get_literal_expr(node) {
            lit.elements.nodes.iter().copied().for_each(&mut push);
        } else if let Some(prop) = self.get_property_assignment(node) {
            push(prop.name);
            push(prop.initializer);
        }
        out
    }

    /// Statement lists owned by a node (source file, block, case clause).
    pub fn statement_list(&self, index: NodeIndex) -> Option<&[NodeIndex]> {
        let node = self.get(index)?;
        if let Some(sf) = self.get_source_file(node) {
            return Some(&sf.statements.nodes);
        }
        if let Some(block) = self.get_block(node) {
            return Some(&block.statements.nodes);
        }
        self.get_case_clause(node)
            .map(|clause| clause.statements.nodes.as_slice())
    }
}
