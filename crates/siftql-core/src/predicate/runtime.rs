use crate::{
    model::AttributePath,
    predicate::{CompareOp, ComparePredicate, MatchPredicate, Pattern, Predicate},
    value::{TextMode, Value, strict_order_cmp},
};
use regex::{Regex, RegexBuilder};
use std::{cmp::Ordering, collections::BTreeMap};

///
/// Row
///
/// Read access to one candidate record by attribute path. Implementations
/// follow relations themselves; a to-many hop yields `Value::List`.
///

pub trait Row {
    fn field(&self, path: &AttributePath) -> FieldPresence;
}

///
/// FieldPresence
///
/// Result of reading an attribute path from a row.
///

#[derive(Clone, Debug, PartialEq)]
pub enum FieldPresence {
    Present(Value),
    Missing,
}

// Flat rows keyed by dotted attribute path.
impl Row for BTreeMap<String, Value> {
    fn field(&self, path: &AttributePath) -> FieldPresence {
        self.get(&path.to_string()).cloned().into()
    }
}

impl From<Option<Value>> for FieldPresence {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Missing, Self::Present)
    }
}

///
/// PredicateProgram
///
/// In-memory evaluator for compiled predicates. Regex leaves are built once
/// at compile time; evaluation never allocates a new pattern.
///

#[derive(Clone, Debug)]
pub struct PredicateProgram {
    resolved: ResolvedPredicate,
}

impl PredicateProgram {
    /// Compile a predicate tree into its executable form.
    pub fn compile(predicate: &Predicate) -> Result<Self, regex::Error> {
        let resolved = resolve(predicate)?;

        Ok(Self { resolved })
    }

    /// Evaluate the program against one row.
    #[must_use]
    pub fn eval<R: Row + ?Sized>(&self, row: &R) -> bool {
        eval_resolved(row, &self.resolved)
    }

    /// Keep the rows the program accepts, in input order.
    pub fn filter<'a, R, I>(&'a self, rows: I) -> impl Iterator<Item = &'a R> + 'a
    where
        R: Row + 'a,
        I: IntoIterator<Item = &'a R>,
        I::IntoIter: 'a,
    {
        rows.into_iter().filter(move |row| self.eval(*row))
    }
}

///
/// ResolvedPredicate
///

#[derive(Clone, Debug)]
enum ResolvedPredicate {
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare {
        path: AttributePath,
        op: CompareOp,
        value: Value,
    },
    Text {
        path: AttributePath,
        op: TextOp,
        needle: Value,
        mode: TextMode,
    },
    Regex {
        path: AttributePath,
        regex: Regex,
    },
    IsNull {
        path: AttributePath,
    },
    IsEmpty {
        path: AttributePath,
    },
}

#[derive(Clone, Copy, Debug)]
enum TextOp {
    Eq,
    StartsWith,
    EndsWith,
    Contains,
}

fn resolve(predicate: &Predicate) -> Result<ResolvedPredicate, regex::Error> {
    let resolved = match predicate {
        Predicate::True => ResolvedPredicate::True,
        Predicate::And(children) => {
            ResolvedPredicate::And(children.iter().map(resolve).collect::<Result<_, _>>()?)
        }
        Predicate::Or(children) => {
            ResolvedPredicate::Or(children.iter().map(resolve).collect::<Result<_, _>>()?)
        }
        Predicate::Not(inner) => ResolvedPredicate::Not(Box::new(resolve(inner)?)),
        Predicate::Compare(ComparePredicate { path, op, value }) => ResolvedPredicate::Compare {
            path: path.clone(),
            op: *op,
            value: value.clone(),
        },
        Predicate::Match(MatchPredicate {
            path,
            pattern,
            mode,
        }) => resolve_match(path, pattern, *mode)?,
        Predicate::IsNull { path } => ResolvedPredicate::IsNull { path: path.clone() },
        Predicate::IsEmpty { path } => ResolvedPredicate::IsEmpty { path: path.clone() },
    };

    Ok(resolved)
}

fn resolve_match(
    path: &AttributePath,
    pattern: &Pattern,
    mode: TextMode,
) -> Result<ResolvedPredicate, regex::Error> {
    let op = match pattern {
        Pattern::Exact(_) => TextOp::Eq,
        Pattern::Prefix(_) => TextOp::StartsWith,
        Pattern::Suffix(_) => TextOp::EndsWith,
        Pattern::Contains(_) => TextOp::Contains,
        Pattern::Regex(source) => {
            let regex = RegexBuilder::new(source)
                .case_insensitive(mode == TextMode::Ci)
                .dot_matches_new_line(true)
                .build()?;

            return Ok(ResolvedPredicate::Regex {
                path: path.clone(),
                regex,
            });
        }
    };

    Ok(ResolvedPredicate::Text {
        path: path.clone(),
        op,
        needle: Value::text(pattern.operand()),
        mode,
    })
}

// Flatten a field read into the values a leaf is tested against.
fn candidates(presence: FieldPresence) -> Vec<Value> {
    match presence {
        FieldPresence::Present(Value::List(values)) => values,
        FieldPresence::Present(value) => vec![value],
        FieldPresence::Missing => Vec::new(),
    }
}

// A leaf holds when any value reachable along the path satisfies it.
fn any_candidate<R: Row + ?Sized>(
    row: &R,
    path: &AttributePath,
    f: impl Fn(&Value) -> bool,
) -> bool {
    candidates(row.field(path)).iter().any(f)
}

fn eval_resolved<R: Row + ?Sized>(row: &R, predicate: &ResolvedPredicate) -> bool {
    match predicate {
        ResolvedPredicate::True => true,
        ResolvedPredicate::And(children) => children.iter().all(|child| eval_resolved(row, child)),
        ResolvedPredicate::Or(children) => children.iter().any(|child| eval_resolved(row, child)),
        ResolvedPredicate::Not(inner) => !eval_resolved(row, inner),
        ResolvedPredicate::Compare { path, op, value } => {
            any_candidate(row, path, |actual| eval_compare(actual, *op, value))
        }
        ResolvedPredicate::Text {
            path,
            op,
            needle,
            mode,
        } => any_candidate(row, path, |actual| {
            let matched = match op {
                TextOp::Eq => actual.text_eq(needle, *mode),
                TextOp::StartsWith => actual.text_starts_with(needle, *mode),
                TextOp::EndsWith => actual.text_ends_with(needle, *mode),
                TextOp::Contains => actual.text_contains(needle, *mode),
            };

            matched.unwrap_or(false)
        }),
        ResolvedPredicate::Regex { path, regex } => any_candidate(row, path, |actual| {
            actual.as_text().is_some_and(|text| regex.is_match(text))
        }),
        ResolvedPredicate::IsNull { path } => {
            candidates(row.field(path)).iter().all(Value::is_null)
        }
        ResolvedPredicate::IsEmpty { path } => any_candidate(row, path, Value::is_empty_text),
    }
}

fn eval_compare(actual: &Value, op: CompareOp, value: &Value) -> bool {
    let Some(ordering) = strict_order_cmp(actual, value) else {
        return false;
    };

    match op {
        CompareOp::Eq => ordering == Ordering::Equal,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Gte => ordering != Ordering::Less,
    }
}
