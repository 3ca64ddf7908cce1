//! Format expressions
//!
//! A format expression is the declarative recipe describing which quantities and
//! literals compose a presentation, and in what order. Evaluation never raises:
//! a reference to an unbound quantity yields [`Evaluation::NeedsBinding`] so the
//! caller can compute the quantity and evaluate again.

pub mod parser;

pub use parser::parse;

use crate::types::{Fragment, QuantityName};
use std::fmt;

/// Format expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Fixed fragments.
    Literal(Vec<Fragment>),
    /// Reference to a named quantity.
    Ref(QuantityName),
    /// Left then right.
    Concat(Box<Expr>, Box<Expr>),
    /// Left if non-empty, otherwise right. Right is only evaluated when needed.
    Or(Box<Expr>, Box<Expr>),
    /// Left if empty, otherwise right. Right is only evaluated when needed.
    And(Box<Expr>, Box<Expr>),
}

/// Lookup of already-computed quantities during evaluation.
pub trait Scope {
    fn lookup(&self, name: &QuantityName) -> Option<&[Fragment]>;
}

/// Outcome of one evaluation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Complete(Vec<Fragment>),
    NeedsBinding(QuantityName),
}

impl Evaluation {
    pub fn is_complete(&self) -> bool {
        matches!(self, Evaluation::Complete(_))
    }
}

impl Expr {
    pub fn empty() -> Self {
        Expr::Literal(Vec::new())
    }

    pub fn literal(fragments: impl IntoIterator<Item = Fragment>) -> Self {
        Expr::Literal(fragments.into_iter().collect())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Expr::Literal(vec![Fragment::text(value)])
    }

    pub fn reference(name: impl AsRef<str>) -> Self {
        Expr::Ref(QuantityName::new(name))
    }

    pub fn concat(left: Expr, right: Expr) -> Self {
        Expr::Concat(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Concatenate a sequence of expressions left to right.
    pub fn sequence(parts: impl IntoIterator<Item = Expr>) -> Self {
        parts
            .into_iter()
            .reduce(Expr::concat)
            .unwrap_or_else(Expr::empty)
    }

    /// Surround with context prefix and suffix expressions.
    pub fn wrap(prefix: Option<Expr>, body: Expr, suffix: Option<Expr>) -> Self {
        let with_prefix = match prefix {
            Some(prefix) => Expr::concat(prefix, body),
            None => body,
        };
        match suffix {
            Some(suffix) => Expr::concat(with_prefix, suffix),
            None => with_prefix,
        }
    }

    /// An expression that can only ever produce nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            Expr::Literal(fragments) => fragments.is_empty(),
            Expr::Ref(_) => false,
            Expr::Concat(left, right) => left.is_empty() && right.is_empty(),
            Expr::Or(left, right) => left.is_empty() && right.is_empty(),
            Expr::And(left, right) => left.is_empty() || right.is_empty(),
        }
    }

    /// Referenced quantity names in left-to-right order, duplicates included.
    pub fn references(&self) -> Vec<&QuantityName> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a QuantityName>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Ref(name) => out.push(name),
            Expr::Concat(left, right) | Expr::Or(left, right) | Expr::And(left, right) => {
                left.collect_references(out);
                right.collect_references(out);
            }
        }
    }

    pub fn mentions(&self, name: &str) -> bool {
        self.references().iter().any(|r| r.as_str() == name)
    }

    /// Evaluate against `scope`, depth-first and left to right.
    pub fn evaluate(&self, scope: &dyn Scope) -> Evaluation {
        let mut out = Vec::new();
        match self.evaluate_into(scope, &mut out) {
            Ok(()) => Evaluation::Complete(out),
            Err(Unbound(name)) => Evaluation::NeedsBinding(name),
        }
    }

    fn evaluate_into(&self, scope: &dyn Scope, out: &mut Vec<Fragment>) -> Result<(), Unbound> {
        match self {
            Expr::Literal(fragments) => {
                out.extend(fragments.iter().cloned());
                Ok(())
            }
            Expr::Ref(name) => match scope.lookup(name) {
                Some(bound) => {
                    out.extend(bound.iter().cloned());
                    Ok(())
                }
                None => Err(Unbound(name.clone())),
            },
            Expr::Concat(left, right) => {
                left.evaluate_into(scope, out)?;
                right.evaluate_into(scope, out)
            }
            Expr::Or(left, right) => {
                let mut first = Vec::new();
                left.evaluate_into(scope, &mut first)?;
                if first.is_empty() {
                    right.evaluate_into(scope, out)
                } else {
                    out.extend(first);
                    Ok(())
                }
            }
            Expr::And(left, right) => {
                let mut first = Vec::new();
                left.evaluate_into(scope, &mut first)?;
                if first.is_empty() {
                    Ok(())
                } else {
                    right.evaluate_into(scope, out)
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Or(..) => 1,
            Expr::And(..) => 2,
            Expr::Concat(..) => 3,
            Expr::Literal(_) | Expr::Ref(_) => 4,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8, right_side: bool) -> fmt::Result {
        // Operators are left-associative; a right operand of equal precedence needs parens.
        let needs_parens =
            self.precedence() < parent || (right_side && self.precedence() == parent);
        if needs_parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

struct Unbound(QuantityName);

/// Double-quoted form of `text` that the parser reads back unchanged.
fn quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(fragments) => {
                f.write_str("[")?;
                let mut first = true;
                for fragment in fragments {
                    let rendered = match fragment {
                        Fragment::Text(text) => Some(quoted(text)),
                        Fragment::Pause => Some("pause".to_string()),
                        // Only text and pauses have a textual form.
                        _ => None,
                    };
                    if let Some(rendered) = rendered {
                        if !first {
                            f.write_str(", ")?;
                        }
                        f.write_str(&rendered)?;
                        first = false;
                    }
                }
                f.write_str("]")
            }
            Expr::Ref(name) => f.write_str(name.as_str()),
            Expr::Concat(left, right) => {
                left.fmt_operand(f, 3, false)?;
                f.write_str(" + ")?;
                right.fmt_operand(f, 3, true)
            }
            Expr::Or(left, right) => {
                left.fmt_operand(f, 1, false)?;
                f.write_str(" or ")?;
                right.fmt_operand(f, 1, true)
            }
            Expr::And(left, right) => {
                left.fmt_operand(f, 2, false)?;
                f.write_str(" and ")?;
                right.fmt_operand(f, 2, true)
            }
        }
    }
}
