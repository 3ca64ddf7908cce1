use crate::integration::test_utils::*;
use rendition::context::Context;
use rendition::engine::Engine;
use std::sync::Arc;

const TABLE: &str = r#"
[speech.prefix]
focused = "namedContainingPanel"

[speech.roles."push button"]
unfocused = "labelAndName + roleName"
focused = "labelAndName"

[speech.roles.entry]
unfocused = "labelOrName + placeholderText + description"

[speech.roles.text]
unfocused = "currentLineText"

[speech.roles.paragraph]
unfocused = "displayedText"

[speech.roles.icon]
unfocused = "name"

[speech.roles.table]
unfocused = "realActiveDescendantDisplayedText + realActiveDescendantRoleName"

[speech.roles.frame]
unfocused = "applicationName + name"

[speech.roles."table cell"]
unfocused = "labelAndName"
"#;

fn setup() -> Engine<NodeId> {
    let tree = Arc::new(
        Tree::new()
            .with(1, Node::new("push button").label("Save file").name("Save"))
            .with(2, Node::new("push button").label("Save").name("Save as copy"))
            .with(
                3,
                Node::new("entry")
                    .label("Email")
                    .description("email")
                    .attribute("placeholder", "you@example.com"),
            )
            .with(
                4,
                Node::new("text")
                    .text("hello world")
                    .caret_line("second line"),
            )
            .with(5, Node::new("paragraph").text("Chapter one"))
            .with(6, Node::new("panel").name("Toolbar"))
            .with(7, Node::new("icon").parent(6))
            .with(8, Node::new("table").active_descendant(9))
            .with(9, Node::new("table cell").text("42").parent(8))
            .with(10, Node::new("frame").name("Main window").application(11))
            .with(11, Node::new("application").name("Editor"))
            .with(12, Node::new("panel").label("Settings"))
            .with(13, Node::new("push button").name("Apply").parent(12))
            .with(14, Node::new("table cell").active_descendant(15))
            .with(15, Node::new("check box").name("Done")),
    );
    engine(tree, table(TABLE), standard_registry()).0
}

#[test]
fn name_redundant_to_label_is_dropped() {
    let engine = setup();

    assert_eq!(
        texts(&engine.resolve(&1, Context::new())),
        vec!["Save file", "push button"]
    );
    assert_eq!(
        texts(&engine.resolve(&2, Context::new())),
        vec!["Save", "Save as copy", "push button"]
    );
}

#[test]
fn description_repeating_the_label_is_suppressed() {
    let engine = setup();

    assert_eq!(
        texts(&engine.resolve(&3, Context::new())),
        vec!["Email", "you@example.com"]
    );
}

#[test]
fn sub_range_takes_precedence_over_caret_line() {
    let engine = setup();

    assert_eq!(
        texts(&engine.resolve(&4, Context::new())),
        vec!["second line"]
    );
    assert_eq!(
        texts(&engine.resolve(&4, Context::new().with_range(0, 5))),
        vec!["hello"]
    );
    assert_eq!(
        texts(&engine.resolve(&5, Context::new().with_range(0, 7))),
        vec!["Chapter"]
    );
}

#[test]
fn embedded_objects_fall_back_to_displayed_text() {
    let engine = setup();

    let context = Context::new()
        .with_range(0, 1)
        .with_string("\u{FFFC}");
    assert_eq!(texts(&engine.resolve(&5, context)), vec!["Chapter one"]);
}

#[test]
fn unnamed_icon_borrows_panel_name() {
    let engine = setup();

    assert_eq!(texts(&engine.resolve(&7, Context::new())), vec!["Toolbar"]);
}

#[test]
fn active_descendant_fields_use_the_descendant() {
    let engine = setup();

    assert_eq!(
        texts(&engine.resolve(&8, Context::new())),
        vec!["42", "table cell"]
    );
}

#[test]
fn application_name_comes_from_the_owner() {
    let engine = setup();

    assert_eq!(
        texts(&engine.resolve(&10, Context::new())),
        vec!["Editor", "Main window"]
    );
}

#[test]
fn focused_presentation_is_prefixed_with_containing_panel() {
    let engine = setup();

    assert_eq!(
        texts(&engine.resolve(&13, Context::new().focused(true))),
        vec!["Settings", "Apply"]
    );
}

#[test]
fn empty_table_cell_uses_active_descendant_name() {
    let engine = setup();

    assert_eq!(texts(&engine.resolve(&14, Context::new())), vec!["Done"]);
}

#[test]
fn description_redundancy_ignores_context_wrapping() {
    let tree = Arc::new(
        Tree::new().with(
            1,
            Node::new("entry").name("Email").description("email"),
        ),
    );
    let formats = table(
        r#"
[speech.prefix]
unfocused = "['form'] or labelAndName"

[speech.roles.entry]
unfocused = "name + description"
"#,
    );
    let (engine, _clock) = engine(tree, formats, standard_registry());

    assert_eq!(
        texts(&engine.resolve(&1, Context::new())),
        vec!["form", "Email", "email"]
    );
}
