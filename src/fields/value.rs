//! Value and progress indicator providers.

use crate::engine::Invocation;
use crate::fields::{messages, text_of};
use crate::object::Target;
use crate::registry::FieldResult;
use crate::types::Fragment;

pub fn generate_value<T: Target>(target: &T, inv: &mut Invocation<'_, T>) -> FieldResult {
    Ok(text_of(inv.objects().value_text(target)))
}

/// Current percentage. Continuous updates only speak when the tracker allows it.
pub fn generate_progress_bar_value<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    let Some(percent) = inv.objects().value_as_percent(target) else {
        return Ok(Vec::new());
    };

    if inv.context().is_progress_bar_update && !inv.should_present_progress(target, percent) {
        return Ok(Vec::new());
    }
    Ok(vec![Fragment::text(messages::percentage(percent))])
}

/// Which indicator is updating, when several are being tracked.
pub fn generate_progress_bar_index<T: Target>(
    target: &T,
    inv: &mut Invocation<'_, T>,
) -> FieldResult {
    if !inv.context().is_progress_bar_update {
        return Ok(Vec::new());
    }

    let (number, count) = inv.progress_number_and_count(target);
    if count < 2 {
        return Ok(Vec::new());
    }
    Ok(vec![Fragment::text(messages::progress_bar_number(number, count))])
}
