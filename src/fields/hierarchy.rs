//! Providers that look beyond the target: ancestors, application, active descendant.

use crate::engine::Invocation;
use crate::fields::text_of;
use crate::object::Target;
use crate::registry::FieldResult;
use crate::types::{roles, Category};
use std::collections::HashSet;

pub fn generate_application_name<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let objects = inv.objects();
    Ok(text_of(
        objects
            .application(target)
            .and_then(|app| objects.name(&app)),
    ))
}

/// Label and name of the nearest ancestor panel that has either.
pub fn generate_named_containing_panel<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let objects = inv.objects();
    let mut visited = HashSet::new();
    let mut current = objects.parent(target);

    while let Some(ancestor) = current {
        if !visited.insert(ancestor.clone()) {
            break;
        }
        if objects
            .natural_category(&ancestor)
            .is_some_and(|c| c.is(roles::PANEL))
        {
            let label = inv.call_on("labelAndName", &ancestor)?;
            if !label.is_empty() {
                return Ok(label);
            }
        }
        current = objects.parent(&ancestor);
    }
    Ok(Vec::new())
}

fn real_active_descendant<T: Target>(target: &T, inv: &Invocation<'_, T>) -> T {
    inv.objects()
        .active_descendant(target)
        .unwrap_or_else(|| target.clone())
}

/// Text actually painted by the active descendant.
pub fn generate_real_active_descendant_displayed_text<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let descendant = real_active_descendant(target, inv);
    inv.call_on("displayedText", &descendant)
}

/// Role name of the active descendant, under the descendant's own category.
pub fn generate_real_active_descendant_role_name<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let descendant = real_active_descendant(target, inv);
    let category = inv
        .objects()
        .natural_category(&descendant)
        .unwrap_or_else(|| Category::new(roles::UNKNOWN));
    let context = inv.context().with_role(category);
    inv.call_with("roleName", &descendant, &context)
}

/// Full presentation of the active descendant.
pub fn generate_active_descendant<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    match inv.objects().active_descendant(target) {
        Some(descendant) if &descendant != target => {
            let context = inv.nested_context().without_role();
            Ok(inv.resolve(&descendant, context))
        }
        _ => Ok(Vec::new()),
    }
}
