use super::*;

const ROOT: ScopeId = ScopeId::ROOT;

fn pool() -> TempVariablePool {
    TempVariablePool::new(FxHashSet::default())
}

#[test]
fn names_follow_alphabet_then_digits() {
    let mut pool = pool();
    let anchor = TextRange::new(0, 10);
    let names: Vec<String> = (0..28).map(|_| pool.acquire(anchor, ROOT)).collect();
    assert_eq!(names[0], "_a");
    assert_eq!(names[25], "_z");
    assert_eq!(names[26], "_0");
    assert_eq!(names[27], "_1");
}

#[test]
fn file_identifiers_are_skipped() {
    let identifiers: FxHashSet<String> = ["_a", "_c"].into_iter().map(String::from).collect();
    let mut pool = TempVariablePool::new(identifiers);
    let anchor = TextRange::new(0, 10);
    assert_eq!(pool.acquire(anchor, ROOT), "_b");
    assert_eq!(pool.acquire(anchor, ROOT), "_d");
}

#[test]
fn live_temps_are_never_shared() {
    let mut pool = pool();
    let first = pool.acquire(TextRange::new(0, 10), ROOT);
    let second = pool.acquire(TextRange::new(20, 30), ROOT);
    assert_ne!(first, second);
    assert_eq!(pool.live_count(ROOT), 2);
}

#[test]
fn disjoint_anchor_reuses_released_temp() {
    let mut pool = pool();
    let first = pool.acquire(TextRange::new(0, 10), ROOT);
    pool.release(&first, TextRange::new(0, 10), ROOT);
    let again = pool.acquire(TextRange::new(20, 30), ROOT);
    assert_eq!(first, again);
    assert_eq!(pool.names_in(ROOT).len(), 1);
}

#[test]
fn nested_or_overlapping_anchor_gets_fresh_temp() {
    let mut pool = pool();
    let inner = pool.acquire(TextRange::new(10, 20), ROOT);
    pool.release(&inner, TextRange::new(10, 20), ROOT);

    let outer = pool.acquire(TextRange::new(0, 30), ROOT);
    assert_ne!(inner, outer);
    pool.release(&outer, TextRange::new(0, 30), ROOT);

    let overlapping = pool.acquire(TextRange::new(15, 40), ROOT);
    assert_ne!(overlapping, inner);
    assert_ne!(overlapping, outer);
}

#[test]
fn reuse_prefers_oldest_free_name() {
    let mut pool = pool();
    let a = pool.acquire(TextRange::new(0, 5), ROOT);
    let b = pool.acquire(TextRange::new(0, 5), ROOT);
    pool.release(&b, TextRange::new(0, 5), ROOT);
    pool.release(&a, TextRange::new(0, 5), ROOT);
    assert_eq!(pool.acquire(TextRange::new(10, 15), ROOT), a);
    assert_eq!(pool.acquire(TextRange::new(10, 15), ROOT), b);
}

#[test]
fn scopes_keep_separate_reuse_lists() {
    let mut pool = pool();
    let inner_scope = ScopeId(1);
    let root_temp = pool.acquire(TextRange::new(0, 5), ROOT);
    pool.release(&root_temp, TextRange::new(0, 5), ROOT);
    let fn_temp = pool.acquire(TextRange::new(10, 15), inner_scope);
    assert_ne!(root_temp, fn_temp);
    assert_eq!(pool.names_in(inner_scope), [fn_temp]);
}

#[test]
fn releasing_unknown_temp_is_ignored() {
    let mut pool = pool();
    pool.release("_q", TextRange::new(0, 1), ROOT);
    let temp = pool.acquire(TextRange::new(0, 1), ROOT);
    pool.release(&temp, TextRange::new(0, 1), ROOT);
    pool.release(&temp, TextRange::new(0, 1), ROOT);
    assert_eq!(pool.live_count(ROOT), 0);
}

#[test]
fn memoized_helper_is_declared_once_per_scope() {
    let mut pool = pool();
    let first = pool.bubble_helper(ROOT, "GET_ITER", "(v){}", true);
    let second = pool.bubble_helper(ROOT, "GET_ITER", "(v){}", true);
    assert_eq!(first, "GET_ITER");
    assert_eq!(first, second);

    let helpers = pool.take_helpers(ROOT);
    assert_eq!(helpers.len(), 1);
    assert_eq!(helpers[0].to_source(), "function GET_ITER(v){}");
    assert!(pool.take_helpers(ROOT).is_empty());
    assert!(!pool.has_pending_helpers());
}

#[test]
fn helper_name_avoids_file_identifiers() {
    let identifiers: FxHashSet<String> = ["GET_ITER", "GET_ITER_1"]
        .into_iter()
        .map(String::from)
        .collect();
    let mut pool = TempVariablePool::new(identifiers);
    assert_eq!(pool.bubble_helper(ROOT, "GET_ITER", "(v){}", true), "GET_ITER_2");
}

#[test]
fn unmemoized_helpers_get_distinct_names() {
    let mut pool = pool();
    let first = pool.bubble_helper(ROOT, "H", "(){}", false);
    let second = pool.bubble_helper(ROOT, "H", "(){}", false);
    assert_eq!(first, "H");
    assert_eq!(second, "H_1");
    assert_eq!(pool.take_helpers(ROOT).len(), 2);
}

#[test]
fn helpers_are_tracked_per_scope() {
    let mut pool = pool();
    let func = ScopeId(3);
    pool.bubble_helper(func, "GET_ITER", "(v){}", true);
    pool.bubble_helper(ROOT, "GET_ITER", "(v){}", true);
    assert_eq!(pool.take_helpers(func)[0].name, "GET_ITER");
    assert_eq!(pool.take_helpers(ROOT)[0].name, "GET_ITER");
}
