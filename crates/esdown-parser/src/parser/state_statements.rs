//! Parser state - statement and declaration parsing methods

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        BindingElementData, BindingPatternData, BlockData, CaseClauseData, CatchClauseData,
        ExprStatementData, ForInOfData, FunctionData, IfStatementData, JumpData, LabeledData,
        LoopData, ParameterData, ReturnData, SourceFileData, SwitchData, TryData, VariableData,
        VariableDeclarationData, VariableStatementData, node_flags,
    },
    syntax_kind_ext,
};
use esdown_common::diagnostics::{diagnostic_codes, format_message, get_message_template};
use esdown_scanner::SyntaxKind;
use tracing::debug;

impl ParserState {
    // =========================================================================
    // Source file
    // =========================================================================

    /// Parse a source file
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            if let Some(stmt) = self.parse_statement_in_list() {
                statements.push(stmt);
            }
        }

        self.collect_scanner_diagnostics();

        let end_pos = self.scanner.source_text().len() as u32;
        let comments = self.scanner.comments().to_vec();
        debug!(
            file = %self.file_name,
            statements = statements.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        self.arena.add_source_file_data(
            syntax_kind_ext::SOURCE_FILE,
            0,
            end_pos,
            SourceFileData {
                statements: NodeList::new(statements),
                file_name: self.file_name.clone(),
                text: self.scanner.source_text_arc(),
                comments,
            },
        )
    }

    /// Parse one statement of a statement list, reporting and skipping a
    /// token when no statement can start here.
    fn parse_statement_in_list(&mut self) -> Option<NodeIndex> {
        let pos_before = self.token_pos();
        if self.is_token(SyntaxKind::Unknown) {
            // Already reported by the scanner.
            self.next_token();
            return None;
        }
        let stmt = self.parse_statement();
        if stmt.is_some() {
            return Some(stmt);
        }
        if self.token_pos() == pos_before && !self.is_token(SyntaxKind::EndOfFileToken) {
            self.parse_error_for_code(
                self.token_pos(),
                self.token_end().saturating_sub(self.token_pos()),
                diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
            );
            self.next_token();
        }
        None
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse a statement. Returns `NodeIndex::NONE` without consuming input
    /// when no statement starts at the current token.
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let stmt = match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => self.parse_empty_statement(),
            SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword => self.parse_variable_statement(),
            SyntaxKind::Identifier if self.is_let_declaration() => self.parse_variable_statement(),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ReturnKeyword | SyntaxKind::ThrowKeyword => self.parse_return_or_throw(),
            SyntaxKind::BreakKeyword | SyntaxKind::ContinueKeyword => {
                self.parse_break_or_continue()
            }
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::DebuggerKeyword => {
                let start = self.token_pos();
                self.next_token();
                self.parse_semicolon();
                self.arena.add_token(
                    syntax_kind_ext::DEBUGGER_STATEMENT,
                    start,
                    self.prev_token_end,
                )
            }
            SyntaxKind::Identifier
                if self.look_ahead_token() == SyntaxKind::ColonToken =>
            {
                self.parse_labeled_statement()
            }
            SyntaxKind::CloseBraceToken
            | SyntaxKind::EndOfFileToken
            | SyntaxKind::CaseKeyword
            | SyntaxKind::DefaultKeyword
            | SyntaxKind::ElseKeyword
            | SyntaxKind::CatchKeyword
            | SyntaxKind::FinallyKeyword => NodeIndex::NONE,
            _ => self.parse_expression_statement(),
        };
        self.exit_recursion();
        stmt
    }

    /// `let` starts a declaration when followed by a name or a binding pattern.
    pub(crate) fn is_let_declaration(&mut self) -> bool {
        self.is_contextual("let")
            && matches!(
                self.look_ahead_token(),
                SyntaxKind::Identifier | SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
            )
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statements_until_close_brace();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.arena.add_block(
            syntax_kind_ext::BLOCK,
            start,
            self.prev_token_end,
            BlockData {
                statements: NodeList::new(statements),
            },
        )
    }

    fn parse_statements_until_close_brace(&mut self) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if let Some(stmt) = self.parse_statement_in_list() {
                statements.push(stmt);
            }
        }
        statements
    }

    fn parse_empty_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.arena
            .add_token(syntax_kind_ext::EMPTY_STATEMENT, start, self.prev_token_end)
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        if expression.is_none() {
            return NodeIndex::NONE;
        }
        self.parse_semicolon();
        self.arena.add_expr_statement(
            syntax_kind_ext::EXPRESSION_STATEMENT,
            start,
            self.prev_token_end,
            ExprStatementData { expression },
        )
    }

    fn parse_labeled_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let label = self.parse_identifier();
        self.parse_expected(SyntaxKind::ColonToken);
        let statement = self.parse_statement();
        self.arena.add_labeled(
            syntax_kind_ext::LABELED_STATEMENT,
            start,
            self.prev_token_end,
            LabeledData { label, statement },
        )
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_variable_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let declaration_list = self.parse_variable_declaration_list();
        self.parse_semicolon();
        self.arena.add_variable_statement(
            syntax_kind_ext::VARIABLE_STATEMENT,
            start,
            self.prev_token_end,
            VariableStatementData { declaration_list },
        )
    }

    /// Parse `var`/`let`/`const` followed by comma-separated declarations.
    /// The keyword is recorded in the list's node flags.
    pub(crate) fn parse_variable_declaration_list(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let flags = match self.token() {
            SyntaxKind::ConstKeyword => node_flags::CONST,
            SyntaxKind::Identifier if self.is_contextual("let") => node_flags::LET,
            _ => node_flags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        let list = self.arena.add_variable(
            syntax_kind_ext::VARIABLE_DECLARATION_LIST,
            start,
            self.prev_token_end,
            VariableData {
                declarations: NodeList::new(declarations),
            },
        );
        self.arena.set_flags(list, flags);
        list
    }

    fn parse_variable_declaration(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let name = self.parse_binding_name();
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_variable_declaration(
            syntax_kind_ext::VARIABLE_DECLARATION,
            start,
            self.prev_token_end,
            VariableDeclarationData { name, initializer },
        )
    }

    /// Identifier, object binding pattern, or array binding pattern.
    pub(crate) fn parse_binding_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_object_binding_pattern(),
            SyntaxKind::OpenBracketToken => self.parse_array_binding_pattern(),
            _ => self.parse_identifier(),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            elements.push(self.parse_object_binding_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();
        self.arena.add_binding_pattern(
            syntax_kind_ext::OBJECT_BINDING_PATTERN,
            start,
            self.prev_token_end,
            BindingPatternData {
                elements: NodeList::new(elements),
            },
        )
    }

    fn parse_object_binding_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);

        let (property_name, name) = if dot_dot_dot_token {
            (NodeIndex::NONE, self.parse_identifier())
        } else {
            let key_is_identifier = self.is_identifier();
            let key = self.parse_property_name();
            if self.parse_optional(SyntaxKind::ColonToken) {
                (key, self.parse_binding_name())
            } else {
                if !key_is_identifier {
                    self.error_expected(":");
                }
                (NodeIndex::NONE, key)
            }
        };

        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_binding_element(
            syntax_kind_ext::BINDING_ELEMENT,
            start,
            self.prev_token_end,
            BindingElementData {
                dot_dot_dot_token,
                property_name,
                name,
                initializer,
            },
        )
    }

    fn parse_array_binding_pattern(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return self.create_missing_identifier();
        }
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                // Hole
                self.next_token();
                elements.push(NodeIndex::NONE);
                continue;
            }
            let elem_start = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            elements.push(self.arena.add_binding_element(
                syntax_kind_ext::BINDING_ELEMENT,
                elem_start,
                self.prev_token_end,
                BindingElementData {
                    dot_dot_dot_token,
                    property_name: NodeIndex::NONE,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.exit_recursion();
        self.arena.add_binding_pattern(
            syntax_kind_ext::ARRAY_BINDING_PATTERN,
            start,
            self.prev_token_end,
            BindingPatternData {
                elements: NodeList::new(elements),
            },
        )
    }

    fn parse_function_declaration(&mut self) -> NodeIndex {
        self.parse_function_like(syntax_kind_ext::FUNCTION_DECLARATION)
    }

    /// Parse `function [name] (params) { body }` as a declaration or expression.
    pub(crate) fn parse_function_like(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword);
        self.reject_generator_marker();
        let name = if self.is_identifier() || kind == syntax_kind_ext::FUNCTION_DECLARATION {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_function_rest(kind, start, name)
    }

    /// Parameters and body of a function whose name has been consumed.
    pub(crate) fn parse_function_rest(
        &mut self,
        kind: u16,
        start: u32,
        name: NodeIndex,
    ) -> NodeIndex {
        let parameters = self.parse_parameter_list();
        let body = if self.is_token(SyntaxKind::OpenBraceToken) {
            // `in` is allowed again inside a nested function body.
            let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
            let body = self.parse_block();
            self.disallow_in = saved_disallow_in;
            body
        } else {
            self.error_expected("{");
            NodeIndex::NONE
        };
        self.arena.add_function(
            kind,
            start,
            self.prev_token_end,
            FunctionData {
                name,
                parameters,
                body,
            },
        )
    }

    /// Generators have no ES5 lowering; `*` is reported and skipped so the
    /// rest of the function still parses.
    pub(crate) fn reject_generator_marker(&mut self) {
        if self.is_token(SyntaxKind::AsteriskToken) {
            let message = get_message_template(diagnostic_codes::UNSUPPORTED_CONSTRUCT)
                .map(|template| format_message(template, &["function*"]))
                .unwrap_or_else(|| "'function*' cannot be lowered to ES5.".to_string());
            self.parse_error_at_current_token(&message, diagnostic_codes::UNSUPPORTED_CONSTRUCT);
            self.next_token();
        }
    }

    fn parse_parameter_list(&mut self) -> NodeList {
        let mut parameters = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenParenToken) {
            return NodeList::default();
        }
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            let dot_dot_dot_token = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
                self.parse_assignment_expression()
            } else {
                NodeIndex::NONE
            };
            parameters.push(self.arena.add_parameter(
                syntax_kind_ext::PARAMETER,
                start,
                self.prev_token_end,
                ParameterData {
                    dot_dot_dot_token,
                    name,
                    initializer,
                },
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::new(parameters)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_statement = self.parse_embedded_statement();
        let else_statement = if self.parse_optional(SyntaxKind::ElseKeyword) {
            self.parse_embedded_statement()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_if_statement(
            syntax_kind_ext::IF_STATEMENT,
            start,
            self.prev_token_end,
            IfStatementData {
                expression,
                then_statement,
                else_statement,
            },
        )
    }

    /// Statement in a single-statement position (loop or `if` body).
    fn parse_embedded_statement(&mut self) -> NodeIndex {
        let stmt = self.parse_statement();
        if stmt.is_none() {
            self.parse_error_for_code(
                self.token_pos(),
                self.token_end().saturating_sub(self.token_pos()),
                diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
            );
        }
        stmt
    }

    /// Parse `for (;;)`, `for (x in o)`, `for (x of o)` and `for await (x of o)`.
    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let await_modifier = if self.is_contextual("await") {
            self.next_token();
            true
        } else {
            false
        };
        self.parse_expected(SyntaxKind::OpenParenToken);

        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, true);
        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else if matches!(self.token(), SyntaxKind::VarKeyword | SyntaxKind::ConstKeyword)
            || self.is_let_declaration()
        {
            self.parse_variable_declaration_list()
        } else {
            self.parse_expression()
        };
        self.disallow_in = saved_disallow_in;

        if self.is_contextual("of") {
            self.next_token();
            self.check_for_of_declaration(initializer);
            let expression = self.parse_assignment_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_embedded_statement();
            let node = self.arena.add_for_in_of(
                syntax_kind_ext::FOR_OF_STATEMENT,
                start,
                self.prev_token_end,
                ForInOfData {
                    await_modifier,
                    initializer,
                    expression,
                    statement,
                },
            );
            if await_modifier {
                self.arena.set_flags(node, node_flags::AWAIT);
            }
            return node;
        }

        if await_modifier {
            self.error_expected("of");
        }

        if self.parse_optional(SyntaxKind::InKeyword) {
            let expression = self.parse_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let statement = self.parse_embedded_statement();
            return self.arena.add_for_in_of(
                syntax_kind_ext::FOR_IN_STATEMENT,
                start,
                self.prev_token_end,
                ForInOfData {
                    await_modifier: false,
                    initializer,
                    expression,
                    statement,
                },
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_embedded_statement();
        self.arena.add_loop(
            syntax_kind_ext::FOR_STATEMENT,
            start,
            self.prev_token_end,
            LoopData {
                initializer,
                condition,
                incrementor,
                statement,
            },
        )
    }

    /// A `for...of` declaration list must hold exactly one declarator without
    /// an initializer.
    fn check_for_of_declaration(&mut self, initializer: NodeIndex) {
        let Some(node) = self.arena.get(initializer) else {
            return;
        };
        let Some(list) = self.arena.get_variable(node) else {
            return;
        };
        let (list_pos, list_len) = (node.pos, node.end.saturating_sub(node.pos));
        let declarations = list.declarations.nodes.clone();
        if declarations.len() != 1 {
            self.parse_error_for_code(
                list_pos,
                list_len,
                diagnostic_codes::ONLY_ONE_VARIABLE_DECLARATION_IN_FOR_OF,
            );
            return;
        }
        let Some(decl_node) = self.arena.get(declarations[0]) else {
            return;
        };
        let has_initializer = self
            .arena
            .get_variable_declaration(decl_node)
            .is_some_and(|decl| decl.initializer.is_some());
        if has_initializer {
            let (pos, len) = (decl_node.pos, decl_node.end.saturating_sub(decl_node.pos));
            self.parse_error_for_code(
                pos,
                len,
                diagnostic_codes::FOR_OF_DECLARATION_CANNOT_HAVE_INITIALIZER,
            );
        }
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let statement = self.parse_embedded_statement();
        self.arena.add_loop(
            syntax_kind_ext::WHILE_STATEMENT,
            start,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let statement = self.parse_embedded_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        // The semicolon after `do ... while (...)` is always optional.
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.arena.add_loop(
            syntax_kind_ext::DO_STATEMENT,
            start,
            self.prev_token_end,
            LoopData {
                initializer: NodeIndex::NONE,
                condition,
                incrementor: NodeIndex::NONE,
                statement,
            },
        )
    }

    fn parse_return_or_throw(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = if self.is_token(SyntaxKind::ThrowKeyword) {
            syntax_kind_ext::THROW_STATEMENT
        } else {
            syntax_kind_ext::RETURN_STATEMENT
        };
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            NodeIndex::NONE
        } else {
            self.parse_expression()
        };
        self.parse_semicolon();
        self.arena
            .add_return(kind, start, self.prev_token_end, ReturnData { expression })
    }

    fn parse_break_or_continue(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = if self.is_token(SyntaxKind::BreakKeyword) {
            syntax_kind_ext::BREAK_STATEMENT
        } else {
            syntax_kind_ext::CONTINUE_STATEMENT
        };
        self.next_token();
        let label = if self.is_identifier() && !self.scanner.has_preceding_line_break() {
            self.parse_identifier()
        } else {
            NodeIndex::NONE
        };
        self.parse_semicolon();
        self.arena
            .add_jump(kind, start, self.prev_token_end, JumpData { label })
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_start = self.token_pos();
            self.next_token();
            let variable_declaration = if self.parse_optional(SyntaxKind::OpenParenToken) {
                let decl_start = self.token_pos();
                let name = self.parse_binding_name();
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_variable_declaration(
                    syntax_kind_ext::VARIABLE_DECLARATION,
                    decl_start,
                    self.prev_token_end,
                    VariableDeclarationData {
                        name,
                        initializer: NodeIndex::NONE,
                    },
                )
            } else {
                NodeIndex::NONE
            };
            let block = self.parse_block();
            self.arena.add_catch_clause(
                syntax_kind_ext::CATCH_CLAUSE,
                catch_start,
                self.prev_token_end,
                CatchClauseData {
                    variable_declaration,
                    block,
                },
            )
        } else {
            NodeIndex::NONE
        };

        let finally_block = if self.parse_optional(SyntaxKind::FinallyKeyword) {
            self.parse_block()
        } else {
            NodeIndex::NONE
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.error_expected("catch");
        }

        self.arena.add_try(
            syntax_kind_ext::TRY_STATEMENT,
            start,
            self.prev_token_end,
            TryData {
                try_block,
                catch_clause,
                finally_block,
            },
        )
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let expression = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let clause_start = self.token_pos();
            let (kind, expression) = if self.parse_optional(SyntaxKind::CaseKeyword) {
                (syntax_kind_ext::CASE_CLAUSE, self.parse_expression())
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                (syntax_kind_ext::DEFAULT_CLAUSE, NodeIndex::NONE)
            } else {
                self.error_expected("case");
                self.next_token();
                continue;
            };
            self.parse_expected(SyntaxKind::ColonToken);

            let mut statements = Vec::new();
            while !matches!(
                self.token(),
                SyntaxKind::CaseKeyword
                    | SyntaxKind::DefaultKeyword
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EndOfFileToken
            ) {
                if let Some(stmt) = self.parse_statement_in_list() {
                    statements.push(stmt);
                }
            }
            clauses.push(self.arena.add_case_clause(
                kind,
                clause_start,
                self.prev_token_end,
                CaseClauseData {
                    expression,
                    statements: NodeList::new(statements),
                },
            ));
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);

        self.arena.add_switch(
            syntax_kind_ext::SWITCH_STATEMENT,
            start,
            self.prev_token_end,
            SwitchData {
                expression,
                clauses: NodeList::new(clauses),
            },
        )
    }
}
