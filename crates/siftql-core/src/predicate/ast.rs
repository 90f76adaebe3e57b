use crate::{
    model::AttributePath,
    value::{TextMode, Value},
};
use derive_more::Display;
use serde::Serialize;
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Backend-agnostic output of the compiler. Leaves name a full attribute
/// path; following relations along that path is the backend's job.
///

///
/// CompareOp
///
/// Comparison carried by a [`ComparePredicate`]. Inequality is never a leaf;
/// it is expressed as `Not(Compare(Eq))`.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    #[display("=")]
    Eq,
    #[display("<")]
    Lt,
    #[display("<=")]
    Lte,
    #[display(">")]
    Gt,
    #[display(">=")]
    Gte,
}

///
/// ComparePredicate
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparePredicate {
    pub path: AttributePath,
    pub op: CompareOp,
    pub value: Value,
}

///
/// MatchKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    #[display("exact")]
    Exact,
    #[display("prefix")]
    Prefix,
    #[display("suffix")]
    Suffix,
    #[display("contains")]
    Contains,
    #[display("regex")]
    Regex,
}

///
/// Pattern
///
/// Compiled wildcard search. `Regex` holds a pattern source whose literal
/// fragments are already escaped.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", content = "operand", rename_all = "snake_case")]
pub enum Pattern {
    Exact(String),
    Prefix(String),
    Suffix(String),
    Contains(String),
    Regex(String),
}

impl Pattern {
    #[must_use]
    pub const fn kind(&self) -> MatchKind {
        match self {
            Self::Exact(_) => MatchKind::Exact,
            Self::Prefix(_) => MatchKind::Prefix,
            Self::Suffix(_) => MatchKind::Suffix,
            Self::Contains(_) => MatchKind::Contains,
            Self::Regex(_) => MatchKind::Regex,
        }
    }

    #[must_use]
    pub fn operand(&self) -> &str {
        match self {
            Self::Exact(s)
            | Self::Prefix(s)
            | Self::Suffix(s)
            | Self::Contains(s)
            | Self::Regex(s) => s,
        }
    }
}

///
/// MatchPredicate
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchPredicate {
    pub path: AttributePath,
    pub pattern: Pattern,
    pub mode: TextMode,
}

///
/// Predicate
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Matches every record.
    True,
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare(ComparePredicate),
    Match(MatchPredicate),
    /// Attribute is absent or unset.
    IsNull { path: AttributePath },
    /// Attribute equals the empty string.
    IsEmpty { path: AttributePath },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    /// Disjunction that collapses to its only member.
    #[must_use]
    pub fn or(mut preds: Vec<Self>) -> Self {
        if preds.len() == 1 {
            return preds.remove(0);
        }

        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub const fn compare(path: AttributePath, op: CompareOp, value: Value) -> Self {
        Self::Compare(ComparePredicate { path, op, value })
    }

    #[must_use]
    pub const fn eq(path: AttributePath, value: Value) -> Self {
        Self::compare(path, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(path: AttributePath, value: Value) -> Self {
        Self::not(Self::eq(path, value))
    }

    #[must_use]
    pub const fn matches(path: AttributePath, pattern: Pattern, mode: TextMode) -> Self {
        Self::Match(MatchPredicate {
            path,
            pattern,
            mode,
        })
    }

    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::and(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::and(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}
