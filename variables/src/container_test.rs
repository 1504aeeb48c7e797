use super::*;
use crate::variable::VariableValue;

fn container_with(names: &[&str]) -> VariablesContainer {
    let mut container = VariablesContainer::new();
    let source = container.arena_mut().alloc(VariableValue::default());
    for name in names {
        let at = container.count();
        container.insert(name, source, at).unwrap();
    }
    container.arena_mut().release(source).unwrap();
    container
}

#[test]
fn insert_keeps_order_and_clamps_index() {
    let mut container = container_with(&["a", "b"]);
    let source = container.arena_mut().alloc(VariableValue::Number(3.0));
    container.insert("front", source, 0).unwrap();
    container.insert("back", source, 100).unwrap();

    let names: Vec<&str> = container.names().collect();
    assert_eq!(names, ["front", "a", "b", "back"]);
}

#[test]
fn insert_existing_name_returns_existing_root() {
    let mut container = container_with(&["score"]);
    let existing = container.get("score").unwrap();
    let source = container.arena_mut().alloc(VariableValue::Number(9.0));

    let result = container.insert("score", source, 0).unwrap();
    assert_eq!(result, existing);
    assert_eq!(container.count(), 1);
}

#[test]
fn insert_copies_source() {
    let mut container = VariablesContainer::new();
    let source = container.arena_mut().alloc(VariableValue::String("v".into()));
    let root = container.insert("x", source, 0).unwrap();
    assert_ne!(root, source);

    container.arena_mut().release(source).unwrap();
    assert_eq!(container.arena().string(root).unwrap(), "v");
    assert_eq!(container.arena().len(), 1);
}

#[test]
fn get_at_and_has() {
    let container = container_with(&["a", "b"]);
    assert!(container.has("b"));
    assert!(!container.has("c"));
    assert_eq!(container.get_at(1).map(|(name, _)| name), Some("b"));
    assert!(container.get_at(2).is_none());
}

#[test]
fn remove_releases_root() {
    let mut container = container_with(&["a", "b"]);
    assert_eq!(container.arena().len(), 2);
    assert!(container.remove("a").unwrap());
    assert!(!container.remove("a").unwrap());
    assert_eq!(container.arena().len(), 1);
    assert_eq!(container.count(), 1);
}

#[test]
fn rename_refuses_taken_names() {
    let mut container = container_with(&["a", "b"]);
    assert!(!container.rename("a", "b"));
    assert!(container.rename("a", "c"));
    assert!(!container.rename("missing", "d"));
    assert!(container.has("c"));
    assert!(!container.has("a"));
}
