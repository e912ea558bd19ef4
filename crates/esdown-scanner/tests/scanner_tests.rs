use super::*;

fn kinds(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = Scanner::new(source);
    let mut out = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        out.push(kind);
    }
    out
}

#[test]
fn test_for_of_header_tokens() {
    assert_eq!(
        kinds("for (var x of arr) {}"),
        vec![
            SyntaxKind::ForKeyword,
            SyntaxKind::OpenParenToken,
            SyntaxKind::VarKeyword,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::OpenBraceToken,
            SyntaxKind::CloseBraceToken,
        ]
    );
}

#[test]
fn test_longest_punctuation_match() {
    assert_eq!(
        kinds(">>>= === ... ?? **= ?."),
        vec![
            SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
            SyntaxKind::EqualsEqualsEqualsToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::AsteriskAsteriskEqualsToken,
            SyntaxKind::QuestionDotToken,
        ]
    );
}

#[test]
fn test_comments_are_recorded_and_skipped() {
    let source = "/* es6-transpiler has-iterators:false */\nx // tail";
    let mut scanner = Scanner::new(source);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    let comments = scanner.comments();
    assert_eq!(comments.len(), 2);
    assert!(comments[0].is_multi_line);
    assert_eq!(
        comments[0].get_body(source).trim(),
        "es6-transpiler has-iterators:false"
    );
    assert_eq!(comments[1].get_text(source), "// tail");
}

#[test]
fn test_string_and_number_values() {
    let mut scanner = Scanner::new("'a\\'b' 1.5e3 0xff");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a\\'b");
    assert_eq!(scanner.token_text(), "'a\\'b'");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.token_value(), "1.5e3");
    assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
    assert_eq!(scanner.token_value(), "0xff");
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = Scanner::new("'abc\nx");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
}

#[test]
fn test_look_ahead_rewinds() {
    let mut scanner = Scanner::new("label: x");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    let next = scanner.look_ahead(|s| s.scan());
    assert_eq!(next, SyntaxKind::ColonToken);
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_value(), "label");
    assert_eq!(scanner.scan(), SyntaxKind::ColonToken);
}

#[test]
fn test_contextual_words_are_identifiers() {
    assert_eq!(kinds("let of await"), vec![SyntaxKind::Identifier; 3]);
    assert!(SyntaxKind::VarKeyword.is_keyword());
    assert!(SyntaxKind::PlusEqualsToken.is_assignment_operator());
    assert!(!SyntaxKind::PlusToken.is_assignment_operator());
}
