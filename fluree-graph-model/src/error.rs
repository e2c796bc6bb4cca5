//! Error types for fluree-graph-model

use thiserror::Error;

/// Result type alias using [`ModelError`]
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised by resources and collections
///
/// Malformed identifiers and labels never produce an error; they are
/// corrected and reported through [`Diagnostics`](crate::Diagnostics).
#[derive(Error, Debug)]
pub enum ModelError {
    /// No identifier, label, or address could be determined
    #[error("Missing identity: {0}")]
    MissingIdentity(String),

    /// Identifier resolved to the empty string
    #[error("Empty identifier for {0}")]
    EmptyIdentifier(String),

    /// Positional access outside `[-len, len)`
    #[error("Index {index} is out of range for a collection of length {len}")]
    IndexOutOfRange { index: isize, len: usize },

    /// Lookup of an element absent from the requested range
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A statement failed a registered constraint
    #[error("Constraint violation on {subject}: {message}")]
    ConstraintViolation { subject: String, message: String },

    /// Predicate is neither an absolute IRI nor a known prefixed name
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ModelError {
    pub fn missing_identity(msg: impl Into<String>) -> Self {
        ModelError::MissingIdentity(msg.into())
    }

    pub fn empty_identifier(msg: impl Into<String>) -> Self {
        ModelError::EmptyIdentifier(msg.into())
    }

    pub fn out_of_range(index: isize, len: usize) -> Self {
        ModelError::IndexOutOfRange { index, len }
    }

    /// Create an element-not-found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        ModelError::ElementNotFound(msg.into())
    }

    pub fn constraint(subject: impl Into<String>, message: impl Into<String>) -> Self {
        ModelError::ConstraintViolation {
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn invalid_predicate(msg: impl Into<String>) -> Self {
        ModelError::InvalidPredicate(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ModelError::Config(msg.into())
    }

    /// Whether this error is a positional or lookup failure rather than a
    /// store-level problem
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            ModelError::IndexOutOfRange { .. } | ModelError::ElementNotFound(_)
        )
    }
}
