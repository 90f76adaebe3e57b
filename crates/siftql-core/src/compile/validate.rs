use crate::{
    compile::sentinel::Sentinel,
    error::FilterError,
    model::{FilterDescriptor, FilterOperator, SemanticType},
};

/// Check that `op` is declared for the descriptor and, when `raw` is a
/// sentinel token, that the sentinel may be used here.
///
/// Returns the sentinel so the caller can skip value coercion.
pub(crate) fn validate_operator(
    descriptor: &FilterDescriptor,
    op: FilterOperator,
    raw: &str,
) -> Result<Option<Sentinel>, FilterError> {
    let reject = || FilterError::lookup(descriptor.name(), op, raw);

    if !descriptor.allowed_operators().contains(op) {
        return Err(reject());
    }

    let Some(sentinel) = Sentinel::parse(raw) else {
        return Ok(None);
    };

    let admitted = op.is_equality()
        && match sentinel {
            Sentinel::Null => descriptor.is_nullable(),
            Sentinel::Empty => matches!(descriptor.semantic_type(), SemanticType::String),
        };

    if admitted {
        Ok(Some(sentinel))
    } else {
        Err(reject())
    }
}
