//! Core value types shared by the registry, expressions, and the engine.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

/// Reserved binding holding the resolution target.
pub const RESERVED_TARGET: &str = "obj";

/// Reserved binding holding the effective category.
pub const RESERVED_CATEGORY: &str = "role";

/// Name of an independently computable piece of presentation content.
///
/// Names are case-normalized on construction: the first character is
/// lower-cased, so `LabelAndName` and `labelAndName` are the same quantity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuantityName(String);

impl QuantityName {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        let mut chars = raw.chars();
        let normalized = match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        };
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True for the sentinel names every binding environment pre-seeds.
    pub fn is_reserved(&self) -> bool {
        self.0 == RESERVED_TARGET || self.0 == RESERVED_CATEGORY
    }
}

impl fmt::Display for QuantityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for QuantityName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for QuantityName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Object category (accessible role), e.g. `push button` or `progress bar`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Well-known category names consulted by the standard field set.
pub mod roles {
    pub const COMBO_BOX: &str = "combo box";
    pub const ICON: &str = "icon";
    pub const LABEL: &str = "label";
    pub const LINK: &str = "link";
    pub const PANEL: &str = "panel";
    pub const PROGRESS_BAR: &str = "progress bar";
    pub const TABLE_CELL: &str = "table cell";
    pub const UNKNOWN: &str = "unknown";
}

/// Presentation mode an expression is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Speech,
    Braille,
    Sound,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Speech => "speech",
            Mode::Braille => "braille",
            Mode::Sound => "sound",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Speech
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "speech" => Ok(Mode::Speech),
            "braille" => Ok(Mode::Braille),
            "sound" => Ok(Mode::Sound),
            other => Err(format!(
                "unknown mode '{}' (expected speech, braille, or sound)",
                other
            )),
        }
    }
}

/// Focus state / format type selecting which expression of a category applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormatType {
    Focused,
    Unfocused,
    BasicWhereAmI,
    DetailedWhereAmI,
    Custom(String),
}

impl FormatType {
    pub fn as_str(&self) -> &str {
        match self {
            FormatType::Focused => "focused",
            FormatType::Unfocused => "unfocused",
            FormatType::BasicWhereAmI => "basicWhereAmI",
            FormatType::DetailedWhereAmI => "detailedWhereAmI",
            FormatType::Custom(name) => name,
        }
    }

    /// `focused` when the object already had focus, `unfocused` otherwise.
    pub fn from_focus(already_focused: bool) -> Self {
        if already_focused {
            FormatType::Focused
        } else {
            FormatType::Unfocused
        }
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err("format type cannot be empty".to_string()),
            "focused" => Ok(FormatType::Focused),
            "unfocused" => Ok(FormatType::Unfocused),
            "basicWhereAmI" | "basic_where_am_i" => Ok(FormatType::BasicWhereAmI),
            "detailedWhereAmI" | "detailed_where_am_i" => Ok(FormatType::DetailedWhereAmI),
            other => Ok(FormatType::Custom(other.to_string())),
        }
    }
}

/// Expression Store key: (category, mode, focus state).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormatKey {
    pub category: Category,
    pub mode: Mode,
    pub format_type: FormatType,
}

impl FormatKey {
    pub fn new(category: impl Into<Category>, mode: Mode, format_type: FormatType) -> Self {
        Self {
            category: category.into(),
            mode,
            format_type,
        }
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for FormatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.mode, self.category, self.format_type)
    }
}

/// Voice markers interleaved with text in speech output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStyle {
    Default,
    Uppercase,
    Hyperlink,
    System,
    Named(String),
}

/// One atomic unit of output content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Fragment {
    /// Plain text unit.
    Text(String),
    /// Voice/style annotation applying to the fragments that follow.
    Voice(VoiceStyle),
    /// Short break between units.
    Pause,
    /// Audio tone, e.g. a progress beep.
    Tone { frequency_hz: u32, duration_ms: u32 },
}

impl Fragment {
    pub fn text(value: impl Into<String>) -> Self {
        Fragment::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Fragment::Text(text) => Some(text),
            _ => None,
        }
    }

    /// A text fragment with no characters carries no content.
    pub fn is_blank(&self) -> bool {
        matches!(self, Fragment::Text(text) if text.is_empty())
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(text) => f.write_str(&text.replace('\n', "\\n")),
            Fragment::Voice(style) => write!(f, "<voice:{:?}>", style),
            Fragment::Pause => f.write_str("<pause>"),
            Fragment::Tone {
                frequency_hz,
                duration_ms,
            } => write!(f, "<tone:{}Hz/{}ms>", frequency_hz, duration_ms),
        }
    }
}

/// Render fragments into a single debug line.
pub fn render_fragments(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.to_string())
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
