//! Names, labels, descriptions, and role names.

use crate::context::FallbackFlag;
use crate::engine::Invocation;
use crate::expr::Expr;
use crate::fields::{first_text, text_of};
use crate::object::Target;
use crate::registry::FieldResult;
use crate::types::{roles, Fragment};
use std::collections::HashSet;
use tracing::debug;

/// Accessible name, falling back on the description.
///
/// Labels never fall back: some toolkits put mnemonic junk in a label's
/// description. Unnamed icons inside a panel borrow the panel's name.
pub fn generate_name<T: Target>(target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    inv.set_flag(FallbackFlag::UsedDescriptionForName, false);
    let objects = inv.objects();
    let category = inv.category();

    let name = text_of(objects.name(target));
    if !name.is_empty() {
        return Ok(name);
    }

    if !category.is(roles::LABEL) {
        let description = text_of(objects.description(target));
        if !description.is_empty() {
            inv.set_flag(FallbackFlag::UsedDescriptionForName, true);
            return Ok(description);
        }
    }

    if category.is(roles::ICON) {
        if let Some(parent) = objects.parent(target) {
            if objects
                .natural_category(&parent)
                .is_some_and(|c| c.is(roles::PANEL))
            {
                return inv.call_on("name", &parent);
            }
        }
    }

    Ok(Vec::new())
}

pub fn generate_label<T: Target>(target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    Ok(text_of(inv.objects().displayed_label(target)))
}

/// Label if there is one, otherwise the name.
pub fn generate_label_or_name<T: Target>(target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    let label = generate_label(target, inv)?;
    if !label.is_empty() {
        return Ok(label);
    }
    generate_name(target, inv)
}

/// Label followed by the name, unless every word of the name is already in the label.
pub fn generate_label_and_name<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let label = generate_label(target, inv)?;
    let mut name = generate_name(target, inv)?;

    if label.is_empty() && name.is_empty() && inv.category().is(roles::TABLE_CELL) {
        if let Some(descendant) = inv.objects().active_descendant(target) {
            name = inv.call_on("name", &descendant)?;
        }
    }

    if label.is_empty() {
        return Ok(name);
    }
    if name.is_empty() {
        return Ok(label);
    }

    if let (Some(label_text), Some(name_text)) = (first_text(&label), first_text(&name)) {
        if is_redundant(name_text, label_text) {
            debug!(name = name_text, label = label_text, "name is redundant to label");
            return Ok(label);
        }
    }

    let mut result = label;
    result.extend(name);
    Ok(result)
}

/// True when every word of `name` also appears in `label`.
fn is_redundant(name: &str, label: &str) -> bool {
    let label_words: HashSet<&str> = words(label).collect();
    words(name).all(|word| label_words.contains(word))
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Placeholder text, when it differs from the accessible name.
pub fn generate_placeholder_text<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let objects = inv.objects();
    let attributes = objects.attributes(target);
    let name = objects.name(target);

    for key in ["placeholder-text", "placeholder"] {
        if let Some(placeholder) = attributes.get(key) {
            if !placeholder.is_empty() && Some(placeholder) != name.as_ref() {
                return Ok(vec![Fragment::text(placeholder.clone())]);
            }
        }
    }
    Ok(Vec::new())
}

/// Description, unless already spent as a fallback or redundant with label/name.
pub fn generate_description<T: Target>(target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    if inv.point_of_reference().description_used() {
        return Ok(Vec::new());
    }

    let category = inv.category();
    if category.is(roles::LABEL) {
        return Ok(Vec::new());
    }

    let objects = inv.objects();
    let Some(description) = objects.description(target).filter(|d| !d.is_empty()) else {
        return Ok(Vec::new());
    };

    let name = if category.is(roles::ICON) {
        objects.displayed_text(target)
    } else {
        objects.name(target)
    }
    .unwrap_or_default()
    .to_lowercase();
    let label = objects
        .displayed_label(target)
        .unwrap_or_default()
        .to_lowercase();
    let lowered = description.to_lowercase();

    let expression = inv.format_expression().unwrap_or_else(Expr::empty);
    let usable = if expression.mentions("labelAndName") {
        !name.contains(&lowered) && !label.contains(&lowered)
    } else if expression.mentions("labelOrName") && !label.is_empty() {
        !label.contains(&lowered)
    } else if expression.mentions("labelOrName") && !name.is_empty() {
        !name.contains(&lowered)
    } else {
        true
    };

    if usable {
        Ok(vec![Fragment::text(description)])
    } else {
        Ok(Vec::new())
    }
}

/// Nearby unrelated labels, falling back on the description.
pub fn generate_unrelated_labels_or_description<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let labels: Vec<Fragment> = inv
        .objects()
        .unrelated_labels(target)
        .into_iter()
        .filter(|label| !label.is_empty())
        .map(Fragment::text)
        .collect();
    if !labels.is_empty() {
        inv.set_flag(FallbackFlag::UsedDescriptionForUnrelatedLabels, false);
        return Ok(labels);
    }

    let description = generate_description(target, inv)?;
    if !description.is_empty() {
        inv.set_flag(FallbackFlag::UsedDescriptionForUnrelatedLabels, true);
    }
    Ok(description)
}

/// Localized name of the effective category; nothing for unknown objects.
pub fn generate_role_name<T: Target>(_target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    let category = inv.category();
    if category.is(roles::UNKNOWN) {
        return Ok(Vec::new());
    }
    Ok(text_of(inv.objects().role_name(category)))
}
