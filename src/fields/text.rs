//! Text content providers.

use crate::engine::Invocation;
use crate::fields::{text_of, EMBEDDED_OBJECT_CHARACTER};
use crate::object::Target;
use crate::registry::FieldResult;
use crate::types::Fragment;

/// Text of the context's sub-range, skipped when it holds embedded objects.
pub fn generate_substring<T: Target>(target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    let context = inv.context();
    let Some((start, end)) = context.range() else {
        return Ok(Vec::new());
    };

    let substring = match &context.string {
        Some(string) => Some(string.clone()),
        None => inv.objects().substring(target, start, end),
    };
    Ok(plain_text(substring))
}

/// Everything the object displays, or just the sub-range when one is given.
pub fn generate_displayed_text<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let substring = generate_substring(target, inv)?;
    if !substring.is_empty() {
        return Ok(substring);
    }
    Ok(text_of(inv.objects().displayed_text(target)))
}

/// Line at the caret, or the sub-range when one is given.
pub fn generate_current_line_text<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let substring = generate_substring(target, inv)?;
    if !substring.is_empty() {
        return Ok(substring);
    }
    Ok(plain_text(inv.objects().line_at_caret(target)))
}

fn plain_text(text: Option<String>) -> Vec<Fragment> {
    text_of(text.filter(|t| !t.contains(EMBEDDED_OBJECT_CHARACTER)))
}
