use crate::model::FilterOperator;
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// ErrorDetails
///
/// Structured context attached to value and lookup errors, shaped for
/// direct surfacing in an API error body. `value` is the raw input exactly
/// as received, quotes included.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ErrorDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub lookup: FilterOperator,
    pub value: String,
}

impl ErrorDetails {
    #[must_use]
    pub fn new(filter: Option<&str>, lookup: FilterOperator, value: &str) -> Self {
        Self {
            filter: filter.map(str::to_string),
            lookup,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(filter) = &self.filter {
            write!(f, "filter '{filter}', ")?;
        }

        write!(f, "lookup '{}', value '{}'", self.lookup, self.value)
    }
}

///
/// FilterError
///
/// Every way a single `(filter, operator, value)` compilation can fail.
/// Failures are deterministic; callers translate them into API errors.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum FilterError {
    /// The raw value does not coerce to the filter's type, is not a declared
    /// choice, or is an ambiguous wildcard pattern.
    #[error("invalid filter value: {0}")]
    Value(ErrorDetails),

    /// The operator (or a sentinel value) is not permitted for the filter.
    #[error("unsupported filter lookup: {0}")]
    Lookup(ErrorDetails),

    /// An unregistered filter that nothing was able to handle.
    #[error("filter parsing error: {error}")]
    Parsing { error: String },
}

impl FilterError {
    pub(crate) fn value(filter: &str, lookup: FilterOperator, value: &str) -> Self {
        Self::Value(ErrorDetails::new(Some(filter), lookup, value))
    }

    pub(crate) fn lookup(filter: &str, lookup: FilterOperator, value: &str) -> Self {
        Self::Lookup(ErrorDetails::new(Some(filter), lookup, value))
    }

    pub(crate) fn not_implemented(filter: &str) -> Self {
        Self::Parsing {
            error: format!("Filter logic is not implemented: {filter}."),
        }
    }

    /// Structured context for value and lookup errors.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Value(details) | Self::Lookup(details) => Some(details),
            Self::Parsing { .. } => None,
        }
    }
}

///
/// TESTS
///
