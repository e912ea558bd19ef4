use super::*;

fn buffer(source: &str) -> EditBuffer {
    EditBuffer::new(source)
}

#[test]
fn commit_without_edits_returns_source() {
    let edits = buffer("let a = 1;");
    assert_eq!(edits.commit(), "let a = 1;");
    assert!(!edits.has_committed_edits());
}

#[test]
fn inserts_at_same_offset_keep_call_order() {
    let mut edits = buffer("ab");
    edits.insert(1, "1", EditOptions::NONE).unwrap();
    edits.insert_after(1, "2", EditOptions::NONE).unwrap();
    edits.insert_before(1, "0", EditOptions::NONE).unwrap();
    assert_eq!(edits.commit(), "a012b");
}

#[test]
fn extend_glues_onto_existing_fragment() {
    let mut edits = buffer("ab");
    edits.insert(1, "x", EditOptions::NONE).unwrap();
    edits.insert(1, "y", EditOptions::EXTEND).unwrap();
    edits.insert_before(1, "w", EditOptions::EXTEND).unwrap();
    assert_eq!(edits.commit(), "awxyb");
    assert_eq!(edits.inserts.get(&1).map(Vec::len), Some(1));
}

#[test]
fn inserts_at_both_ends_are_rendered_by_commit() {
    let mut edits = buffer("body");
    edits.insert(0, "<", EditOptions::NONE).unwrap();
    edits.insert(4, ">", EditOptions::NONE).unwrap();
    assert_eq!(edits.commit(), "<body>");
}

#[test]
fn replace_and_remove() {
    let mut edits = buffer("let x = y;");
    edits.replace(0, 3, "var").unwrap();
    edits.remove(5, 9).unwrap();
    assert_eq!(edits.commit(), "var x;");
}

#[test]
fn insert_at_range_end_follows_replacement() {
    let mut edits = buffer("abcdef");
    edits.insert(4, "|", EditOptions::NONE).unwrap();
    edits.replace(2, 4, "XY").unwrap();
    edits.insert(2, "<", EditOptions::NONE).unwrap();
    assert_eq!(edits.commit(), "ab<XY|ef");
}

#[test]
fn empty_replace_becomes_insert_and_empty_remove_is_noop() {
    let mut edits = buffer("ab");
    edits.replace(1, 1, "-").unwrap();
    edits.remove(2, 2).unwrap();
    assert_eq!(edits.commit(), "a-b");
    assert!(edits.ranges.is_empty());
}

#[test]
fn enclosing_replace_supersedes_inner_edits() {
    let mut edits = buffer("0123456789");
    edits.replace(3, 5, "x").unwrap();
    edits.insert(6, "i", EditOptions::NONE).unwrap();
    edits.replace(2, 8, "OUTER").unwrap();
    assert_eq!(edits.commit(), "01OUTER89");
    assert_eq!(edits.ranges.len(), 1);
    assert!(edits.inserts.is_empty());
}

#[test]
fn partially_overlapping_replace_conflicts() {
    let mut edits = buffer("0123456789");
    edits.replace(2, 6, "a").unwrap();
    let err = edits.replace(4, 8, "b").unwrap_err();
    assert_eq!(
        err,
        EditError::Conflict {
            range: TextRange::new(4, 8),
            existing: TextRange::new(2, 6),
        }
    );
    let err = edits.replace(3, 4, "c").unwrap_err();
    assert!(matches!(err, EditError::Conflict { .. }));
    assert_eq!(edits.commit(), "01a6789");
}

#[test]
fn insert_inside_replaced_range_conflicts() {
    let mut edits = buffer("0123456789");
    edits.replace(2, 6, "a").unwrap();
    assert!(edits.insert(4, "x", EditOptions::NONE).is_err());
    edits.insert(2, "<", EditOptions::NONE).unwrap();
    edits.insert(6, ">", EditOptions::NONE).unwrap();
    assert_eq!(edits.commit(), "01<a>6789");
}

#[test]
fn out_of_bounds_edits_are_rejected() {
    let mut edits = buffer("abc");
    assert_eq!(
        edits.insert(4, "x", EditOptions::NONE),
        Err(EditError::OutOfBounds {
            range: TextRange::at(4),
            len: 3
        })
    );
    assert!(edits.replace(2, 1, "x").is_err());
    assert!(edits.remove(0, 9).is_err());
}

#[test]
fn get_range_excludes_boundary_inserts() {
    let mut edits = buffer("f(a, b)");
    edits.insert(0, "<", EditOptions::NONE).unwrap();
    edits.insert(2, "[", EditOptions::NONE).unwrap();
    edits.insert(7, ">", EditOptions::NONE).unwrap();
    assert_eq!(edits.get_range(0, 7), "f([a, b)");
    assert_eq!(edits.get_range(2, 3), "a");
}

#[test]
fn get_range_applies_only_contained_ranges() {
    let mut edits = buffer("0123456789");
    edits.replace(2, 4, "ab").unwrap();
    edits.replace(6, 9, "cde").unwrap();
    assert_eq!(edits.get_range(1, 5), "1ab4");
    assert_eq!(edits.get_range(1, 7), "1ab456");
    assert_eq!(edits.get_range(5, 10), "5cde9");
}

#[test]
fn pending_state_is_invisible_until_popped() {
    let mut edits = buffer("abc");
    edits.push_state("outer");
    edits.insert(1, "x", EditOptions::NONE).unwrap();
    assert_eq!(edits.get_range(0, 3), "abc");
    assert_eq!(edits.commit(), "abc");
    edits.pop_state().unwrap();
    assert_eq!(edits.commit(), "axbc");
    assert_eq!(edits.state_depth(), 0);
}

#[test]
fn nested_state_moves_edits_to_parent() {
    let mut edits = buffer("abc");
    edits.push_state("outer");
    edits.push_state("inner");
    edits.replace(1, 2, "B").unwrap();
    edits.pop_state().unwrap();
    assert_eq!(edits.commit(), "abc");
    edits.pop_state().unwrap();
    assert_eq!(edits.commit(), "aBc");
}

#[test]
fn apply_changes_bypasses_open_state() {
    let mut edits = buffer("abc");
    edits.push_state("pending");
    edits
        .insert(3, "!", EditOptions::NONE.applied())
        .unwrap();
    assert_eq!(edits.commit(), "abc!");
    edits.pop_state().unwrap();
}

#[test]
fn unbalanced_pop_is_an_error() {
    let mut edits = buffer("abc");
    assert_eq!(edits.pop_state(), Err(EditError::UnbalancedState));
}

#[test]
fn conflicting_pending_edit_surfaces_on_pop() {
    let mut edits = buffer("0123456789");
    edits.replace(2, 6, "a").unwrap();
    edits.push_state("later");
    edits.replace(5, 8, "b").unwrap();
    assert!(matches!(edits.pop_state(), Err(EditError::Conflict { .. })));
}
