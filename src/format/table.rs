//! TOML-backed format table.
//!
//! ```toml
//! [speech.prefix]
//! focused = "namedContainingPanel"
//!
//! [speech.roles."push button"]
//! focused = "labelAndName + roleName"
//! unfocused = "labelAndName + roleName + description"
//! ```
//!
//! An expression that fails to parse is logged and left out; the rest of the
//! table still loads, so one malformed category only loses its own output.

use crate::context::Context;
use crate::error::{FormatError, ParseError};
use crate::expr::{self, Expr};
use crate::format::{ExpressionSite, ExpressionStore};
use crate::types::{Category, FormatKey, FormatType, Mode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMode {
    #[serde(default)]
    prefix: BTreeMap<String, String>,
    #[serde(default)]
    suffix: BTreeMap<String, String>,
    #[serde(default)]
    roles: BTreeMap<String, BTreeMap<String, String>>,
}

/// Expression that was left out of the table because it did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedEntry {
    pub section: String,
    pub source: String,
    pub error: ParseError,
}

/// In-memory expression store
#[derive(Debug, Clone, Default)]
pub struct FormatTable {
    expressions: BTreeMap<FormatKey, Expr>,
    prefixes: BTreeMap<(Mode, FormatType), Expr>,
    suffixes: BTreeMap<(Mode, FormatType), Expr>,
    rejected: Vec<RejectedEntry>,
}

impl FormatTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a table from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, FormatError> {
        let raw: BTreeMap<String, RawMode> = toml::from_str(source)?;
        let mut table = Self::new();

        for (mode_name, raw_mode) in raw {
            let mode: Mode = mode_name
                .parse()
                .map_err(|_| FormatError::UnknownMode(mode_name.clone()))?;

            for (format_name, source) in raw_mode.prefix {
                let section = format!("{}.prefix.{}", mode, format_name);
                let format_type = parse_format_type(&section, &format_name)?;
                if let Some(expr) = table.parse_entry(&section, &source) {
                    table.prefixes.insert((mode, format_type), expr);
                }
            }

            for (format_name, source) in raw_mode.suffix {
                let section = format!("{}.suffix.{}", mode, format_name);
                let format_type = parse_format_type(&section, &format_name)?;
                if let Some(expr) = table.parse_entry(&section, &source) {
                    table.suffixes.insert((mode, format_type), expr);
                }
            }

            for (category, formats) in raw_mode.roles {
                for (format_name, source) in formats {
                    let section = format!("{}.roles.{}.{}", mode, category, format_name);
                    let format_type = parse_format_type(&section, &format_name)?;
                    if let Some(expr) = table.parse_entry(&section, &source) {
                        let key = FormatKey::new(category.as_str(), mode, format_type);
                        table.expressions.insert(key, expr);
                    }
                }
            }
        }

        debug!(
            expressions = table.expressions.len(),
            rejected = table.rejected.len(),
            "format table loaded"
        );
        Ok(table)
    }

    /// Load a table from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn parse_entry(&mut self, section: &str, source: &str) -> Option<Expr> {
        match expr::parse(source) {
            Ok(expr) => Some(expr),
            Err(err) => {
                error!(section = %section, error = %err, "format expression rejected");
                self.rejected.push(RejectedEntry {
                    section: section.to_string(),
                    source: source.to_string(),
                    error: err,
                });
                None
            }
        }
    }

    /// Store an expression for a key, replacing any previous one.
    pub fn insert(&mut self, key: FormatKey, expr: Expr) -> &mut Self {
        self.expressions.insert(key, expr);
        self
    }

    /// Parse and store an expression for a key.
    pub fn insert_source(&mut self, key: FormatKey, source: &str) -> Result<&mut Self, ParseError> {
        let expr = expr::parse(source)?;
        Ok(self.insert(key, expr))
    }

    pub fn set_prefix(&mut self, mode: Mode, format_type: FormatType, expr: Expr) -> &mut Self {
        self.prefixes.insert((mode, format_type), expr);
        self
    }

    pub fn set_suffix(&mut self, mode: Mode, format_type: FormatType, expr: Expr) -> &mut Self {
        self.suffixes.insert((mode, format_type), expr);
        self
    }

    pub fn get(&self, key: &FormatKey) -> Option<&Expr> {
        self.expressions.get(key)
    }

    /// Expressions that did not parse when the table was loaded.
    pub fn rejected(&self) -> &[RejectedEntry] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    fn wrap_key(context: &Context) -> Option<(Mode, FormatType)> {
        Some((context.mode?, context.effective_format_type()))
    }
}

fn parse_format_type(section: &str, name: &str) -> Result<FormatType, FormatError> {
    name.parse().map_err(|message| FormatError::InvalidFormatType {
        section: section.to_string(),
        message,
    })
}

impl ExpressionStore for FormatTable {
    fn expression_for(
        &self,
        category: &Category,
        mode: Mode,
        format_type: &FormatType,
    ) -> Option<Expr> {
        let key = FormatKey {
            category: category.clone(),
            mode,
            format_type: format_type.clone(),
        };
        self.expressions.get(&key).cloned()
    }

    fn prefix_expression_for(&self, context: &Context) -> Option<Expr> {
        Self::wrap_key(context).and_then(|key| self.prefixes.get(&key).cloned())
    }

    fn suffix_expression_for(&self, context: &Context) -> Option<Expr> {
        Self::wrap_key(context).and_then(|key| self.suffixes.get(&key).cloned())
    }

    fn entries(&self) -> Vec<(ExpressionSite, Expr)> {
        let bodies = self
            .expressions
            .iter()
            .map(|(key, expr)| (ExpressionSite::Category(key.clone()), expr.clone()));
        let prefixes = self.prefixes.iter().map(|((mode, format_type), expr)| {
            (ExpressionSite::Prefix(*mode, format_type.clone()), expr.clone())
        });
        let suffixes = self.suffixes.iter().map(|((mode, format_type), expr)| {
            (ExpressionSite::Suffix(*mode, format_type.clone()), expr.clone())
        });
        bodies.chain(prefixes).chain(suffixes).collect()
    }
}
