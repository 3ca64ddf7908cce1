use crate::integration::test_utils::*;
use rendition::context::Context;
use rendition::engine::ResolutionOutcome;
use rendition::format::ExpressionSite;
use rendition::types::{FormatKey, FormatType, Mode, QuantityName};
use rendition::verify::verify;
use std::sync::Arc;

const TABLE: &str = r#"
[speech.roles."push button"]
focused = "labelAndName + roleName"
unfocused = "labelAndName + doesNotExist"

[speech.roles.label]
unfocused = "displayedText or name"
"#;

fn tree() -> Arc<Tree> {
    Arc::new(
        Tree::new()
            .with(1, Node::new("push button").name("OK"))
            .with(2, Node::new("label").text("Username")),
    )
}

#[test]
fn typo_is_reported_exactly_once() {
    let defects = verify(&table(TABLE), &standard_registry());

    assert_eq!(defects.len(), 1);
    assert_eq!(defects[0].quantity(), &QuantityName::new("doesNotExist"));
    assert_eq!(
        defects[0].site(),
        &ExpressionSite::Category(FormatKey::new("push button", Mode::Speech, FormatType::Unfocused))
    );
}

#[test]
fn engine_starts_despite_malformed_expressions() {
    let (engine, _clock) = engine(tree(), table(TABLE), standard_registry());

    assert_eq!(engine.verify().len(), 1);

    // Other categories, and other focus states of the same category, still work.
    assert_eq!(texts(&engine.resolve(&2, Context::new())), vec!["Username"]);
    assert_eq!(
        texts(&engine.resolve(&1, Context::new().focused(true))),
        vec!["OK", "push button"]
    );
}

#[test]
fn malformed_expression_degrades_to_missing_content() {
    let (engine, _clock) = engine(tree(), table(TABLE), standard_registry());

    let resolution = engine.resolve_detailed(&1, Context::new());

    assert!(resolution.fragments.is_empty());
    assert_eq!(
        resolution.outcome,
        ResolutionOutcome::UnknownQuantity(QuantityName::new("doesNotExist"))
    );
}

#[test]
fn clean_table_has_no_defects() {
    let clean = table(
        r#"
[speech.roles.label]
unfocused = "displayedText or name"
focused = "labelOrName and description"
"#,
    );
    assert!(verify(&clean, &standard_registry()).is_empty());
}

#[test]
fn typo_in_context_prefix_is_reported_and_contained() {
    let formats = table(
        r#"
[speech.prefix]
unfocused = "doesNotExist"

[speech.roles.label]
unfocused = "displayedText or name"
"#,
    );

    let defects = verify(&formats, &standard_registry());
    assert_eq!(defects.len(), 1);
    assert_eq!(
        defects[0].site(),
        &ExpressionSite::Prefix(Mode::Speech, FormatType::Unfocused)
    );
    assert_eq!(defects[0].quantity(), &QuantityName::new("doesNotExist"));

    // The broken prefix is skipped; the category still presents.
    let (engine, _clock) = engine(tree(), formats, standard_registry());
    let resolution = engine.resolve_detailed(&2, Context::new());
    assert!(resolution.is_presented());
    assert_eq!(texts(&resolution.fragments), vec!["Username"]);
}
