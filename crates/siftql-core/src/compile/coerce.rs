//! Module: compile::coerce
//! Responsibility: raw request text to typed `Value`, per semantic type.
//! Does not own: operator legality, sentinel tokens, or wildcard patterns.
//! Boundary: called by the compiler after operator validation succeeds.

use crate::{
    error::FilterError,
    model::{FilterDescriptor, FilterOperator, SemanticType},
    types::{Date, DateTime},
    value::Value,
};

/// Scalar coercer: `None` means the raw text is not a legal literal.
type Coercer = fn(&str) -> Option<Value>;

/// Coercer for every scalar semantic type. Choices resolve through their
/// table instead.
const fn scalar_coercer(semantic_type: &SemanticType) -> Option<Coercer> {
    match semantic_type {
        SemanticType::Integer => Some(coerce_integer),
        SemanticType::Float => Some(coerce_float),
        SemanticType::Boolean => Some(coerce_boolean),
        SemanticType::Date => Some(coerce_date),
        SemanticType::DateTime => Some(coerce_datetime),
        SemanticType::String => Some(coerce_string),
        SemanticType::Choice(_) => None,
    }
}

/// Coerce `raw` to the descriptor's type, or fail with a value error that
/// echoes the raw input.
pub(crate) fn coerce(
    descriptor: &FilterDescriptor,
    op: FilterOperator,
    raw: &str,
) -> Result<Value, FilterError> {
    let coerced = match scalar_coercer(descriptor.semantic_type()) {
        Some(coercer) => coercer(raw),
        None => descriptor
            .choice_table()
            .and_then(|table| table.lookup(unquote(raw)))
            .map(|choice| choice.to_value()),
    };

    coerced.ok_or_else(|| FilterError::value(descriptor.name(), op, raw))
}

/// Strip one pair of matching outer quotes (`'…'` or `"…"`).
#[must_use]
pub(crate) fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }

    raw
}

fn coerce_integer(raw: &str) -> Option<Value> {
    let digits = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    raw.parse::<i64>().ok().map(Value::Int)
}

fn coerce_float(raw: &str) -> Option<Value> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Value::Float)
}

fn coerce_boolean(raw: &str) -> Option<Value> {
    match raw {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn coerce_date(raw: &str) -> Option<Value> {
    Date::parse(raw).map(Value::Date)
}

fn coerce_datetime(raw: &str) -> Option<Value> {
    DateTime::parse(raw).map(Value::DateTime)
}

#[allow(clippy::unnecessary_wraps)]
fn coerce_string(raw: &str) -> Option<Value> {
    Some(Value::text(unquote(raw)))
}

///
/// TESTS
///
