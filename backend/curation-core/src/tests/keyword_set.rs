// Unit tests for the curated keyword set
// Tests uniqueness, ordering, and revision tracking

use crate::keyword_set::KeywordSet;

use models::Keyword;

fn kw(text: &str) -> Keyword {
    Keyword::parse(text).expect("test keyword must be valid")
}

/// **VALUE**: Verifies adding an existing keyword is a no-op.
///
/// **WHY THIS MATTERS**: The same keyword can arrive from auto-population, a
/// suggestion click and manual entry. The finalized list must not repeat it.
///
/// **BUG THIS CATCHES**: Would catch if `add` pushed without checking membership.
#[test]
fn given_keyword_already_present_when_add_then_set_is_unchanged() {
    let mut set = KeywordSet::new();

    assert!(set.add(kw("transformers")));
    let revision = set.revision();

    assert!(!set.add(kw("transformers")));
    assert_eq!(set.len(), 1);
    assert_eq!(set.revision(), revision);
}

/// **VALUE**: Verifies insertion order is preserved.
///
/// **WHY THIS MATTERS**: Display order and finalized order are the order the
/// user built the list in.
///
/// **BUG THIS CATCHES**: Would catch a switch to a sorted or hashed container.
#[test]
fn given_several_keywords_when_to_strings_then_insertion_order_is_kept() {
    let mut set = KeywordSet::new();
    set.add(kw("zeta"));
    set.add(kw("alpha"));
    set.add(kw("mid"));

    assert_eq!(set.to_strings(), vec!["zeta", "alpha", "mid"]);
}

/// **VALUE**: Verifies uniqueness is exact-match.
///
/// **WHY THIS MATTERS**: Keywords differing only by case are kept as distinct
/// entries; the validator is responsible for normalizing spelling.
///
/// **BUG THIS CATCHES**: Would catch accidental case folding in `contains`.
#[test]
fn given_keywords_differing_by_case_when_add_then_both_are_kept() {
    let mut set = KeywordSet::new();

    assert!(set.add(kw("NLP")));
    assert!(set.add(kw("nlp")));
    assert_eq!(set.len(), 2);
}

/// **VALUE**: Verifies removal by index shifts later keywords.
///
/// **WHY THIS MATTERS**: The UI removes by display position.
///
/// **BUG THIS CATCHES**: Would catch `swap_remove` reordering the list.
#[test]
fn given_middle_index_when_remove_then_returns_keyword_and_keeps_order() {
    let mut set = KeywordSet::new();
    set.add(kw("a"));
    set.add(kw("b"));
    set.add(kw("c"));

    assert_eq!(set.remove(1), Some(kw("b")));
    assert_eq!(set.to_strings(), vec!["a", "c"]);
}

/// **VALUE**: Verifies out-of-range removal does nothing.
///
/// **WHY THIS MATTERS**: A stale index from the UI must not panic the session.
///
/// **BUG THIS CATCHES**: Would catch a direct `Vec::remove` call that panics.
#[test]
fn given_out_of_range_index_when_remove_then_returns_none_without_revision_bump() {
    let mut set = KeywordSet::new();
    set.add(kw("a"));
    let revision = set.revision();

    assert_eq!(set.remove(5), None);
    assert_eq!(set.revision(), revision);
}

/// **VALUE**: Verifies every effective mutation bumps the revision.
///
/// **WHY THIS MATTERS**: Validation staleness is detected by comparing revisions.
///
/// **BUG THIS CATCHES**: Would catch a mutation path that forgets to bump,
/// leaving an outdated validation result looking current.
#[test]
fn given_mutations_when_applied_then_revision_increases_each_time() {
    let mut set = KeywordSet::new();
    assert_eq!(set.revision(), 0);

    set.add(kw("a"));
    assert_eq!(set.revision(), 1);

    set.add(kw("b"));
    assert_eq!(set.revision(), 2);

    set.remove(0);
    assert_eq!(set.revision(), 3);

    set.clear();
    assert_eq!(set.revision(), 4);
    assert!(set.is_empty());
}

/// **VALUE**: Verifies clearing an empty set is not a mutation.
///
/// **WHY THIS MATTERS**: A no-op clear must not mark a validation result stale.
///
/// **BUG THIS CATCHES**: Would catch an unconditional revision bump.
#[test]
fn given_empty_set_when_clear_then_revision_is_unchanged() {
    let mut set = KeywordSet::new();

    set.clear();

    assert_eq!(set.revision(), 0);
}
