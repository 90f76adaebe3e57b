use crate::{
    compile::sentinel::Sentinel,
    model::{AttributePath, FilterDescriptor, FilterOperator},
    predicate::{CompareOp, Pattern, Predicate},
    value::{TextMode, Value},
};

///
/// Operand
///
/// Right-hand side of one filter leaf after validation and coercion.
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Operand {
    Sentinel(Sentinel),
    Value(Value),
    Pattern(Pattern, TextMode),
}

/// Build the predicate for one validated triple.
///
/// Each source path gets its own positive leaf; several sources are joined by
/// `Or`. `Ne` negates the whole disjunction, so a record is excluded when any
/// source matches.
pub(crate) fn assemble(
    descriptor: &FilterDescriptor,
    op: FilterOperator,
    operand: &Operand,
) -> Predicate {
    let leaves = descriptor
        .sources()
        .iter()
        .map(|path| leaf(path.clone(), op, operand))
        .collect();
    let positive = Predicate::or(leaves);

    match op {
        FilterOperator::Ne => Predicate::not(positive),
        _ => positive,
    }
}

fn leaf(path: AttributePath, op: FilterOperator, operand: &Operand) -> Predicate {
    match operand {
        Operand::Sentinel(Sentinel::Null) => Predicate::IsNull { path },
        Operand::Sentinel(Sentinel::Empty) => Predicate::IsEmpty { path },
        Operand::Pattern(pattern, mode) => Predicate::matches(path, pattern.clone(), *mode),
        Operand::Value(value) => Predicate::compare(path, compare_op(op), value.clone()),
    }
}

// Positive comparison for a value operand; `Ne` is applied by the caller.
const fn compare_op(op: FilterOperator) -> CompareOp {
    match op {
        FilterOperator::Lt => CompareOp::Lt,
        FilterOperator::Le => CompareOp::Lte,
        FilterOperator::Gt => CompareOp::Gt,
        FilterOperator::Ge => CompareOp::Gte,
        FilterOperator::Eq | FilterOperator::Ne | FilterOperator::Like | FilterOperator::ILike => {
            CompareOp::Eq
        }
    }
}
