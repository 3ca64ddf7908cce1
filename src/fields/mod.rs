//! Standard field providers.
//!
//! Each provider computes one quantity from the object model. Providers are
//! plain generic functions so any embedder's target type can use them; the
//! manifest below is the single place they are enumerated.

pub mod hierarchy;
pub mod label;
pub mod messages;
pub mod text;
pub mod value;

use crate::error::RegistryError;
use crate::object::Target;
use crate::registry::{FieldEntry, FieldRegistry};
use crate::types::Fragment;

/// Placeholder character some toolkits put where a child object is embedded in text.
pub const EMBEDDED_OBJECT_CHARACTER: char = '\u{FFFC}';

/// Manifest of every standard provider.
pub fn standard_manifest<T: Target>() -> Vec<FieldEntry<T>> {
    crate::field_manifest!(T;
        label::generate_name,
        label::generate_label,
        label::generate_label_or_name,
        label::generate_label_and_name,
        label::generate_placeholder_text,
        label::generate_description,
        label::generate_unrelated_labels_or_description,
        label::generate_role_name,
        text::generate_substring,
        text::generate_displayed_text,
        text::generate_current_line_text,
        value::generate_value,
        value::generate_progress_bar_value,
        value::generate_progress_bar_index,
        hierarchy::generate_application_name,
        hierarchy::generate_named_containing_panel,
        hierarchy::generate_real_active_descendant_displayed_text,
        hierarchy::generate_real_active_descendant_role_name,
        hierarchy::generate_active_descendant,
    )
}

/// Registry holding the standard providers.
pub fn standard_registry<T: Target>() -> Result<FieldRegistry<T>, RegistryError> {
    FieldRegistry::from_manifest(standard_manifest::<T>())
}

/// One text fragment for a present, non-empty string.
pub(crate) fn text_of(value: Option<String>) -> Vec<Fragment> {
    match value {
        Some(text) if !text.is_empty() => vec![Fragment::text(text)],
        _ => Vec::new(),
    }
}

/// First text fragment of a provider result.
pub(crate) fn first_text(fragments: &[Fragment]) -> Option<&str> {
    fragments.iter().find_map(Fragment::as_text)
}
