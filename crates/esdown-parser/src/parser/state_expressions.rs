//! Parser state - expression parsing methods

use super::state::ParserState;
use crate::parser::{
    NodeIndex, NodeList,
    node::{
        AccessExprData, BinaryExprData, CallExprData, ConditionalExprData, LiteralData,
        LiteralExprData, PropertyAssignmentData, UnaryExprData, WrappedExprData,
    },
    syntax_kind_ext,
};
use esdown_common::diagnostics::diagnostic_codes;
use esdown_scanner::SyntaxKind;

/// Binary operator precedence; 0 means "not a binary operator".
fn binary_precedence(kind: SyntaxKind, disallow_in: bool) -> u8 {
    match kind {
        SyntaxKind::QuestionQuestionToken => 1,
        SyntaxKind::BarBarToken => 2,
        SyntaxKind::AmpersandAmpersandToken => 3,
        SyntaxKind::BarToken => 4,
        SyntaxKind::CaretToken => 5,
        SyntaxKind::AmpersandToken => 6,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 7,
        SyntaxKind::InKeyword if disallow_in => 0,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 8,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 9,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 10,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 11,
        SyntaxKind::AsteriskAsteriskToken => 12,
        _ => 0,
    }
}

impl ParserState {
    // =========================================================================
    // Comma / assignment / conditional
    // =========================================================================

    /// Parse a comma expression.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_assignment_expression();
        if left.is_none() {
            return left;
        }
        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            if right.is_none() {
                self.parse_error_for_code(
                    self.token_pos(),
                    0,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                break;
            }
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token: SyntaxKind::CommaToken as u16,
                    right,
                },
            );
        }
        left
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        let start = self.token_pos();
        let left = self.parse_conditional_expression();
        let result = if left.is_some() && self.token().is_assignment_operator() {
            let operator_token = self.token() as u16;
            self.next_token();
            let right = self.parse_assignment_expression();
            if right.is_none() {
                self.parse_error_for_code(
                    self.token_pos(),
                    0,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
            }
            self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token,
                    right,
                },
            )
        } else {
            left
        };
        self.exit_recursion();
        result
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(0);
        if condition.is_none() || !self.is_token(SyntaxKind::QuestionToken) {
            return condition;
        }
        self.next_token();
        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
        let when_true = self.parse_assignment_expression();
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        self.arena.add_conditional_expr(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start,
            self.prev_token_end,
            ConditionalExprData {
                condition,
                when_true,
                when_false,
            },
        )
    }

    /// Precedence climbing over binary operators binding tighter than `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression();
        if left.is_none() {
            return left;
        }
        loop {
            let precedence = binary_precedence(self.token(), self.disallow_in);
            if precedence == 0 || precedence <= min_precedence {
                // `**` is right-associative.
                if !(precedence == min_precedence
                    && precedence != 0
                    && self.is_token(SyntaxKind::AsteriskAsteriskToken))
                {
                    break;
                }
            }
            let operator_token = self.token() as u16;
            self.next_token();
            let right = self.parse_binary_expression(precedence);
            if right.is_none() {
                self.parse_error_for_code(
                    self.token_pos(),
                    0,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
            }
            left = self.arena.add_binary_expr(
                syntax_kind_ext::BINARY_EXPRESSION,
                start,
                self.prev_token_end,
                BinaryExprData {
                    left,
                    operator_token,
                    right,
                },
            );
        }
        left
    }

    // =========================================================================
    // Unary / update
    // =========================================================================

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                if !self.enter_recursion() {
                    return NodeIndex::NONE;
                }
                let operator = self.token() as u16;
                self.next_token();
                let operand = self.parse_unary_expression();
                if operand.is_none() {
                    self.parse_error_for_code(
                        self.token_pos(),
                        0,
                        diagnostic_codes::EXPRESSION_EXPECTED,
                    );
                }
                self.exit_recursion();
                self.arena.add_unary_expr(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start,
                    self.prev_token_end,
                    UnaryExprData { operator, operand },
                )
            }
            _ => {
                let operand = self.parse_left_hand_side_expression();
                if operand.is_some()
                    && matches!(
                        self.token(),
                        SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
                    )
                    && !self.scanner.has_preceding_line_break()
                {
                    let operator = self.token() as u16;
                    self.next_token();
                    return self.arena.add_unary_expr(
                        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                        start,
                        self.prev_token_end,
                        UnaryExprData { operator, operand },
                    );
                }
                operand
            }
        }
    }

    // =========================================================================
    // Member / call / new
    // =========================================================================

    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if expression.is_none() {
            return expression;
        }
        loop {
            expression = match self.token() {
                SyntaxKind::DotToken | SyntaxKind::OpenBracketToken => {
                    self.parse_member_suffix(start, expression)
                }
                SyntaxKind::OpenParenToken => {
                    let arguments = self.parse_argument_list();
                    self.arena.add_call_expr(
                        syntax_kind_ext::CALL_EXPRESSION,
                        start,
                        self.prev_token_end,
                        CallExprData {
                            expression,
                            arguments: Some(arguments),
                        },
                    )
                }
                _ => return expression,
            };
        }
    }

    /// `.name` or `[expr]` applied to `expression`.
    fn parse_member_suffix(&mut self, start: u32, expression: NodeIndex) -> NodeIndex {
        if self.parse_optional(SyntaxKind::DotToken) {
            let name_or_argument = self.parse_identifier_name();
            return self.arena.add_access_expr(
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                start,
                self.prev_token_end,
                AccessExprData {
                    expression,
                    name_or_argument,
                },
            );
        }
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
        let name_or_argument = self.parse_expression();
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.arena.add_access_expr(
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
            start,
            self.prev_token_end,
            AccessExprData {
                expression,
                name_or_argument,
            },
        )
    }

    /// `new Callee(args)`; the callee takes member accesses but not calls.
    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let mut callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if callee.is_none() {
            self.parse_error_for_code(self.token_pos(), 0, diagnostic_codes::EXPRESSION_EXPECTED);
        } else {
            let callee_start = self.arena.get(callee).map_or(start, |n| n.pos);
            while matches!(
                self.token(),
                SyntaxKind::DotToken | SyntaxKind::OpenBracketToken
            ) {
                callee = self.parse_member_suffix(callee_start, callee);
            }
        }
        let arguments = if self.is_token(SyntaxKind::OpenParenToken) {
            Some(self.parse_argument_list())
        } else {
            None
        };
        self.exit_recursion();
        self.arena.add_call_expr(
            syntax_kind_ext::NEW_EXPRESSION,
            start,
            self.prev_token_end,
            CallExprData {
                expression: callee,
                arguments,
            },
        )
    }

    fn parse_argument_list(&mut self) -> NodeList {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let arg = self.parse_spread_or_assignment();
            if arg.is_none() {
                break;
            }
            arguments.push(arg);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseParenToken);
        NodeList::new(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression();
        }
        let start = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression();
        self.arena.add_wrapped_expr(
            syntax_kind_ext::SPREAD_ELEMENT,
            start,
            self.prev_token_end,
            WrappedExprData { expression },
        )
    }

    // =========================================================================
    // Primary
    // =========================================================================

    /// Parse a primary expression. Reports "Expression expected." and returns
    /// `NodeIndex::NONE` without consuming when nothing matches.
    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier(),
            SyntaxKind::NumericLiteral | SyntaxKind::StringLiteral => self.parse_literal(),
            SyntaxKind::ThisKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                self.next_token();
                self.arena.add_token(kind, start, self.prev_token_end)
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
                let expression = self.parse_expression();
                self.disallow_in = saved_disallow_in;
                if expression.is_none() {
                    self.parse_error_for_code(
                        self.token_pos(),
                        0,
                        diagnostic_codes::EXPRESSION_EXPECTED,
                    );
                }
                self.parse_expected(SyntaxKind::CloseParenToken);
                self.arena.add_wrapped_expr(
                    syntax_kind_ext::PARENTHESIZED_EXPRESSION,
                    start,
                    self.prev_token_end,
                    WrappedExprData { expression },
                )
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => {
                let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
                let func = self.parse_function_like(syntax_kind_ext::FUNCTION_EXPRESSION);
                self.disallow_in = saved_disallow_in;
                func
            }
            _ => {
                self.parse_error_for_code(
                    start,
                    self.token_end().saturating_sub(start),
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                NodeIndex::NONE
            }
        }
    }

    fn parse_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = self.token() as u16;
        let text = self.scanner.token_text().to_string();
        self.next_token();
        self.arena
            .add_literal(kind, start, self.prev_token_end, LiteralData { text })
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                let pos = self.token_pos();
                elements.push(
                    self.arena
                        .add_token(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos),
                );
                self.next_token();
                continue;
            }
            let element = self.parse_spread_or_assignment();
            if element.is_none() {
                break;
            }
            elements.push(element);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.exit_recursion();
        self.arena.add_literal_expr(
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION,
            start,
            self.prev_token_end,
            LiteralExprData {
                elements: NodeList::new(elements),
            },
        )
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if !self.enter_recursion() {
            return NodeIndex::NONE;
        }
        self.next_token();
        let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let property = self.parse_object_literal_member();
            if property.is_none() {
                break;
            }
            properties.push(property);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.exit_recursion();
        self.arena.add_literal_expr(
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION,
            start,
            self.prev_token_end,
            LiteralExprData {
                elements: NodeList::new(properties),
            },
        )
    }

    /// `key: value`, shorthand `key`, method `key() {}`, accessor
    /// `get key() {}`, or `...spread`.
    fn parse_object_literal_member(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_spread_or_assignment();
        }

        let is_accessor = (self.is_contextual("get") || self.is_contextual("set"))
            && !matches!(
                self.look_ahead_token(),
                SyntaxKind::ColonToken
                    | SyntaxKind::OpenParenToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::EqualsToken
            );
        if is_accessor {
            self.next_token();
        }
        let starred = self.is_token(SyntaxKind::AsteriskToken);
        self.reject_generator_marker();
        let is_shorthand_candidate = self.is_identifier();
        let name = self.parse_property_name();
        if name.is_none() {
            return NodeIndex::NONE;
        }

        if is_accessor || starred || self.is_token(SyntaxKind::OpenParenToken) {
            let func_start = self.arena.get(name).map_or(start, |n| n.pos);
            let method = self.parse_function_rest(
                syntax_kind_ext::FUNCTION_EXPRESSION,
                func_start,
                NodeIndex::NONE,
            );
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start,
                self.prev_token_end,
                PropertyAssignmentData {
                    name,
                    initializer: method,
                },
            );
        }

        if self.parse_optional(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression();
            return self.arena.add_property_assignment(
                syntax_kind_ext::PROPERTY_ASSIGNMENT,
                start,
                self.prev_token_end,
                PropertyAssignmentData { name, initializer },
            );
        }

        if !is_shorthand_candidate {
            self.error_expected(":");
        }
        // Shorthand; `= default` only appears in destructuring assignment targets.
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            self.parse_assignment_expression()
        } else {
            NodeIndex::NONE
        };
        self.arena.add_property_assignment(
            syntax_kind_ext::SHORTHAND_PROPERTY_ASSIGNMENT,
            start,
            self.prev_token_end,
            PropertyAssignmentData { name, initializer },
        )
    }

    /// Identifier name, string or numeric literal, or `[computed]`.
    pub(crate) fn parse_property_name(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => self.parse_literal(),
            SyntaxKind::OpenBracketToken => {
                let start = self.token_pos();
                self.next_token();
                let saved_disallow_in = std::mem::replace(&mut self.disallow_in, false);
                let expression = self.parse_assignment_expression();
                self.disallow_in = saved_disallow_in;
                self.parse_expected(SyntaxKind::CloseBracketToken);
                self.arena.add_wrapped_expr(
                    syntax_kind_ext::COMPUTED_PROPERTY_NAME,
                    start,
                    self.prev_token_end,
                    WrappedExprData { expression },
                )
            }
            _ => self.parse_identifier_name(),
        }
    }
}
