use super::*;

#[test]
fn test_format_message_fills_placeholders() {
    assert_eq!(format_message("'{0}' expected.", &[")"]), "')' expected.");
    assert_eq!(format_message("{0} and {1}", &["a", "b"]), "a and b");
}

#[test]
fn test_from_code_uses_table_template() {
    let diag = Diagnostic::from_code(
        "a.js".to_string(),
        4,
        2,
        diagnostic_codes::INVALID_FOR_OF_TARGET,
        &["a.b"],
    );
    assert_eq!(diag.message_text, "'a.b' is not a valid 'for...of' binding target.");
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert!(diag.is_error());
}

#[test]
fn test_every_code_has_unique_entry() {
    for message in DIAGNOSTIC_MESSAGES {
        let count = DIAGNOSTIC_MESSAGES
            .iter()
            .filter(|m| m.code == message.code)
            .count();
        assert_eq!(count, 1, "duplicate code {}", message.code);
    }
    assert!(get_message_template(diagnostic_codes::EXPECTED).is_some());
    assert!(get_message_template(42).is_none());
}

#[test]
fn test_line_map_positions() {
    use crate::LineMap;
    let map = LineMap::build("a\nbc\r\nd");
    assert_eq!(map.line_count(), 3);
    assert_eq!(map.offset_to_position(0).line, 0);
    assert_eq!(map.offset_to_position(3).line, 1);
    assert_eq!(map.offset_to_position(3).character, 1);
    assert_eq!(map.offset_to_position(6).line, 2);
    assert_eq!(map.offset_to_position(6).character, 0);
}
