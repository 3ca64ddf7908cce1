use crate::integration::test_utils::*;
use rendition::context::Context;
use rendition::engine::{Engine, Invocation};
use rendition::registry::{FieldRegistry, FieldResult};
use rendition::types::Fragment;
use std::sync::Arc;

const TABLE: &str = r#"
[speech.prefix]
unfocused = "['window']"

[speech.roles."push button"]
unfocused = "name + asLink"

[speech.roles.link]
unfocused = "linkOnly + ['link']"

[speech.roles.list]
unfocused = "name + activeDescendant"

[speech.roles."list item"]
unfocused = "name + roleName"
"#;

/// Presents the same target again, under the `link` category.
fn as_link(target: &NodeId, inv: &mut Invocation<'_, NodeId>) -> FieldResult {
    let context = inv.nested_context().with_role("link");
    Ok(inv.resolve(target, context))
}

fn link_only(_: &NodeId, _: &mut Invocation<'_, NodeId>) -> FieldResult {
    Ok(vec![Fragment::text("visited")])
}

fn setup() -> Engine<NodeId> {
    let tree = Arc::new(
        Tree::new()
            .with(1, Node::new("push button").name("Help"))
            .with(2, Node::new("list").name("Files").active_descendant(3))
            .with(3, Node::new("list item").name("notes.txt").parent(2)),
    );
    let mut registry = standard_registry();
    registry.register("asLink", as_link).unwrap();
    registry.register("linkOnly", link_only).unwrap();
    engine(tree, table(TABLE), registry).0
}

#[test]
fn nested_call_uses_the_overridden_category() {
    let engine = setup();

    let output = engine.resolve(&1, Context::new());

    assert_eq!(texts(&output), vec!["window", "Help", "visited", "link"]);
}

#[test]
fn nested_bindings_do_not_leak_into_the_caller() {
    let engine = setup();

    let resolution = engine.resolve_detailed(&1, Context::new());

    assert!(resolution.bindings.contains("name"));
    assert!(resolution.bindings.contains("asLink"));
    assert!(!resolution.bindings.contains("linkOnly"));
}

#[test]
fn caller_context_is_untouched_by_the_override() {
    let engine = setup();

    let resolution = engine.resolve_detailed(&1, Context::new());

    assert_eq!(resolution.key.unwrap().category.as_str(), "push button");
}

#[test]
fn active_descendant_is_presented_under_its_own_category() {
    let engine = setup();

    let output = engine.resolve(&2, Context::new());

    assert_eq!(
        texts(&output),
        vec!["window", "Files", "notes.txt", "list item"]
    );
}

#[test]
fn nested_calls_do_not_share_memoized_values() {
    let counter = Counter::new();
    let mut registry = FieldRegistry::new();
    registry.register("probe", counting(&counter, "probe")).unwrap();
    registry
        .register("again", |target: &NodeId, inv: &mut Invocation<'_, NodeId>| -> FieldResult {
            let context = inv.nested_context();
            Ok(inv.resolve(target, context.with_role("label")))
        })
        .unwrap();

    let tree = Arc::new(Tree::new().with(1, Node::new("push button")));
    let formats = table(
        r#"
[speech.roles."push button"]
unfocused = "probe + again"

[speech.roles.label]
unfocused = "probe"
"#,
    );
    let (engine, _clock) = engine(tree, formats, registry);

    let output = engine.resolve(&1, Context::new());

    assert_eq!(texts(&output), vec!["probe", "probe"]);
    assert_eq!(counter.count(), 2);
}
