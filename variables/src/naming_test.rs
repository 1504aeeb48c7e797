use std::collections::HashSet;

use proptest::prelude::*;

use super::*;

fn taken(names: &[&str]) -> HashSet<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[test]
fn free_name_is_kept() {
    let existing = taken(&["Other"]);
    assert_eq!(new_name_generator("Score", |n| existing.contains(n), Some(COPY_PREFIX)), "Score");
}

#[test]
fn collision_with_prefix_uses_prefix_first() {
    let existing = taken(&["Score"]);
    assert_eq!(
        new_name_generator("Score", |n| existing.contains(n), Some(COPY_PREFIX)),
        "CopyOfScore"
    );
}

#[test]
fn collision_with_prefix_then_counts() {
    let existing = taken(&["Score", "CopyOfScore", "CopyOfScore2"]);
    assert_eq!(
        new_name_generator("Score", |n| existing.contains(n), Some(COPY_PREFIX)),
        "CopyOfScore3"
    );
}

#[test]
fn collision_without_prefix_counts_from_two() {
    let existing = taken(&["Variable"]);
    assert_eq!(new_name_generator("Variable", |n| existing.contains(n), None), "Variable2");
}

proptest! {
    #[test]
    fn generated_name_is_always_free(
        base in "[A-Za-z]{1,6}",
        others in proptest::collection::hash_set("[A-Za-z0-9]{1,10}", 0..20),
        use_prefix in any::<bool>(),
    ) {
        let mut existing = others;
        existing.insert(base.clone());
        let prefix = use_prefix.then_some(COPY_PREFIX);
        let name = new_name_generator(&base, |n| existing.contains(n), prefix);
        prop_assert!(!existing.contains(&name));
        if use_prefix {
            prop_assert!(name.starts_with(COPY_PREFIX));
        } else {
            prop_assert!(!name.starts_with(COPY_PREFIX) || base.starts_with(COPY_PREFIX));
        }
    }
}
