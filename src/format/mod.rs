//! Expression Store collaborator contract.
//!
//! The engine only consumes expressions; where they come from is up to the
//! embedder. `FormatTable` is the TOML-backed store shipped with the crate.

pub mod table;

pub use table::{FormatTable, RejectedEntry};

use crate::context::Context;
use crate::expr::Expr;
use crate::types::{Category, FormatKey, FormatType, Mode};
use std::fmt;

/// Where a stored expression is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpressionSite {
    /// Body expression of one category.
    Category(FormatKey),
    /// Context prefix for a mode and focus state.
    Prefix(Mode, FormatType),
    /// Context suffix for a mode and focus state.
    Suffix(Mode, FormatType),
}

impl fmt::Display for ExpressionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionSite::Category(key) => write!(f, "{}", key),
            ExpressionSite::Prefix(mode, format_type) => write!(f, "{}/prefix/{}", mode, format_type),
            ExpressionSite::Suffix(mode, format_type) => write!(f, "{}/suffix/{}", mode, format_type),
        }
    }
}

/// Source of format expressions
pub trait ExpressionStore: Send + Sync {
    /// Expression for (category, mode, focus state), if any.
    fn expression_for(&self, category: &Category, mode: Mode, format_type: &FormatType)
        -> Option<Expr>;

    /// Context prefix wrapped around top-level expressions.
    fn prefix_expression_for(&self, context: &Context) -> Option<Expr>;

    /// Context suffix wrapped around top-level expressions.
    fn suffix_expression_for(&self, context: &Context) -> Option<Expr>;

    /// Every stored expression, prefixes and suffixes included, for startup verification.
    fn entries(&self) -> Vec<(ExpressionSite, Expr)>;
}
