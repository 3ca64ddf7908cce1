//! Error types for the presentation resolution engine.

use crate::format::ExpressionSite;
use crate::types::QuantityName;
use thiserror::Error;

/// Field registry construction errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate quantity name '{name}' (derived from '{first}' and '{second}')")]
    Duplicate {
        name: QuantityName,
        first: String,
        second: String,
    },

    #[error("Quantity name '{0}' is reserved for the binding environment")]
    Reserved(QuantityName),

    #[error("Provider '{0}' derives an empty quantity name")]
    EmptyName(String),
}

/// Faults raised by a field provider's own computation
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Collaborator query failed: {0}")]
    Collaborator(String),

    #[error("Unknown quantity requested by provider: {0}")]
    UnknownQuantity(QuantityName),

    #[error("Provider panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Textual format expression parse errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("Unterminated string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("Expected {expected} at offset {offset}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        offset: usize,
    },
}

/// Format table loading errors
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Invalid format table: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unknown mode '{0}' in format table")]
    UnknownMode(String),

    #[error("Invalid format type in {section}: {message}")]
    InvalidFormatType { section: String, message: String },

    #[error("Format table I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(String),

    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Load(err.to_string())
    }
}

/// Defect found by the static verifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("Expression for {site} references unknown quantity '{quantity}'")]
    UnknownQuantity {
        site: ExpressionSite,
        quantity: QuantityName,
    },
}

impl VerificationError {
    pub fn site(&self) -> &ExpressionSite {
        match self {
            VerificationError::UnknownQuantity { site, .. } => site,
        }
    }

    pub fn quantity(&self) -> &QuantityName {
        match self {
            VerificationError::UnknownQuantity { quantity, .. } => quantity,
        }
    }
}
