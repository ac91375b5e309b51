//! Error types for Corazon operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Corazon operations.
///
/// Covers malformed records, configuration mistakes, and external
/// predictor failures.
///
/// # Examples
///
/// ```
/// use corazon::error::CorazonError;
///
/// let err = CorazonError::UnknownField {
///     field: "thalach".to_string(),
/// };
/// assert!(err.to_string().contains("thalach"));
/// ```
#[derive(Debug)]
pub enum CorazonError {
    /// Record is missing a field required by a linguistic variable.
    UnknownField {
        /// Name of the missing field
        field: String,
    },

    /// A value cannot be evaluated against a variable's membership
    /// functions (e.g. categorical where numeric is required).
    Domain {
        /// Linguistic variable being evaluated
        variable: String,
        /// What was wrong with the value
        message: String,
    },

    /// The external predictor failed to produce a probability.
    ///
    /// Always propagated, never defaulted: substituting a probability
    /// would corrupt every downstream rule.
    PredictorUnavailable {
        /// Failure description from the predictor
        reason: String,
    },

    /// A rule references a (variable, term) pair that is not declared.
    UnknownTerm {
        /// Variable name from the rule
        variable: String,
        /// Term name from the rule
        term: String,
    },

    /// Pipeline configuration failed validation.
    InvalidConfig {
        /// Validation failure message
        message: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for CorazonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorazonError::UnknownField { field } => {
                write!(f, "Record is missing required field: {field}")
            }
            CorazonError::Domain { variable, message } => {
                write!(f, "Domain error for variable {variable}: {message}")
            }
            CorazonError::PredictorUnavailable { reason } => {
                write!(f, "Predictor unavailable: {reason}")
            }
            CorazonError::UnknownTerm { variable, term } => {
                write!(f, "Unknown term: {variable} has no term named {term}")
            }
            CorazonError::InvalidConfig { message } => {
                write!(f, "Invalid configuration: {message}")
            }
            CorazonError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CorazonError {}

impl From<&str> for CorazonError {
    fn from(msg: &str) -> Self {
        CorazonError::Other(msg.to_string())
    }
}

impl From<String> for CorazonError {
    fn from(msg: String) -> Self {
        CorazonError::Other(msg)
    }
}

impl CorazonError {
    /// Create an unknown-field error.
    #[must_use]
    pub fn unknown_field(field: &str) -> Self {
        Self::UnknownField {
            field: field.to_string(),
        }
    }

    /// Create a domain error with descriptive context.
    #[must_use]
    pub fn domain(variable: &str, message: &str) -> Self {
        Self::Domain {
            variable: variable.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a predictor-unavailable error.
    #[must_use]
    pub fn predictor_unavailable(reason: &str) -> Self {
        Self::PredictorUnavailable {
            reason: reason.to_string(),
        }
    }

    /// Create an invalid-configuration error.
    #[must_use]
    pub fn invalid_config(message: &str) -> Self {
        Self::InvalidConfig {
            message: message.to_string(),
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for CorazonError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<CorazonError> for &str {
    fn eq(&self, other: &CorazonError) -> bool {
        *self == other.to_string()
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, CorazonError>;
