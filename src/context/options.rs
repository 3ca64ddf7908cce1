//! Per-call resolution options.
//!
//! A `Context` is built fresh for each top-level call and passed by value into
//! nested calls. Overriding the category for a nested call is done on a copy
//! (`with_role`), so the caller's context is never disturbed.

use crate::types::{Category, FormatType, Mode};
use serde::{Deserialize, Serialize};

/// Options for one resolution call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Category override; takes precedence over the target's natural category.
    #[serde(default)]
    pub role: Option<Category>,

    /// Presentation mode; the engine's configured mode when unset.
    #[serde(default)]
    pub mode: Option<Mode>,

    /// Explicit focus state / format type.
    #[serde(default, with = "format_type_opt")]
    pub format_type: Option<FormatType>,

    /// The target previously had focus; selects `focused` when no format type is set.
    #[serde(default)]
    pub already_focused: bool,

    /// Wrap top-level expressions in the context prefix and suffix.
    #[serde(default = "default_true")]
    pub include_context: bool,

    /// Set once a call has passed the top level; nested calls inherit it.
    #[serde(default)]
    pub recursing: bool,

    /// The resolution is for a continuously-updating progress indicator.
    #[serde(default)]
    pub is_progress_bar_update: bool,

    /// Sub-range bounds when presenting part of a text object.
    #[serde(default)]
    pub start_offset: Option<usize>,
    #[serde(default)]
    pub end_offset: Option<usize>,

    /// Text already extracted for the sub-range, if the caller has it.
    #[serde(default)]
    pub string: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Context {
    fn default() -> Self {
        Self {
            role: None,
            mode: None,
            format_type: None,
            already_focused: false,
            include_context: default_true(),
            recursing: false,
            is_progress_bar_update: false,
            start_offset: None,
            end_offset: None,
            string: None,
        }
    }
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy with the category overridden.
    pub fn with_role(&self, role: impl Into<Category>) -> Self {
        Self {
            role: Some(role.into()),
            ..self.clone()
        }
    }

    /// Copy with the category override removed, so the natural category applies.
    pub fn without_role(&self) -> Self {
        Self {
            role: None,
            ..self.clone()
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_format_type(mut self, format_type: FormatType) -> Self {
        self.format_type = Some(format_type);
        self
    }

    pub fn focused(mut self, already_focused: bool) -> Self {
        self.already_focused = already_focused;
        self
    }

    pub fn include_context(mut self, include: bool) -> Self {
        self.include_context = include;
        self
    }

    pub fn progress_update(mut self) -> Self {
        self.is_progress_bar_update = true;
        self
    }

    pub fn with_range(mut self, start: usize, end: usize) -> Self {
        self.start_offset = Some(start);
        self.end_offset = Some(end);
        self
    }

    pub fn with_string(mut self, string: impl Into<String>) -> Self {
        self.string = Some(string.into());
        self
    }

    /// Both sub-range bounds, when presenting part of a target.
    pub fn range(&self) -> Option<(usize, usize)> {
        match (self.start_offset, self.end_offset) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Format type to use when none was set explicitly.
    pub fn effective_format_type(&self) -> FormatType {
        self.format_type
            .clone()
            .unwrap_or_else(|| FormatType::from_focus(self.already_focused))
    }
}

mod format_type_opt {
    use crate::types::FormatType;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<FormatType>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(format_type) => s.serialize_some(format_type.as_str()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<FormatType>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        raw.map(|s| s.parse().map_err(serde::de::Error::custom))
            .transpose()
    }
}
