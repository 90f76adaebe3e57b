use derive_more::Display;
use serde::{Serialize, Serializer};
use std::str::FromStr;
use thiserror::Error as ThisError;

///
/// FilterOperator
///
/// Closed set of comparison operators a request may carry.
/// `Like`/`ILike` are search-only and never order or compare values.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[repr(u8)]
pub enum FilterOperator {
    #[display("eq")]
    #[serde(rename = "eq")]
    Eq = 0x01,
    #[display("ne")]
    #[serde(rename = "ne")]
    Ne = 0x02,
    #[display("lt")]
    #[serde(rename = "lt")]
    Lt = 0x03,
    #[display("le")]
    #[serde(rename = "le")]
    Le = 0x04,
    #[display("gt")]
    #[serde(rename = "gt")]
    Gt = 0x05,
    #[display("ge")]
    #[serde(rename = "ge")]
    Ge = 0x06,
    #[display("like")]
    #[serde(rename = "like")]
    Like = 0x07,
    #[display("ilike")]
    #[serde(rename = "ilike")]
    ILike = 0x08,
}

impl FilterOperator {
    pub const ALL: [Self; 8] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Like,
        Self::ILike,
    ];

    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn is_equality(self) -> bool {
        matches!(self, Self::Eq | Self::Ne)
    }

    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Lt | Self::Le | Self::Gt | Self::Ge)
    }

    #[must_use]
    pub const fn is_search(self) -> bool {
        matches!(self, Self::Like | Self::ILike)
    }

    const fn bit(self) -> u8 {
        1 << (self.tag() - 1)
    }
}

///
/// UnknownOperator
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperator(pub String);

impl FromStr for FilterOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.to_string() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

///
/// OperatorSet
///
/// Compact set of [`FilterOperator`]s, one bit per operator tag.
///

#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct OperatorSet(u8);

impl OperatorSet {
    pub const EMPTY: Self = Self(0);
    pub const EQUALITY: Self = Self::EMPTY.with(FilterOperator::Eq).with(FilterOperator::Ne);
    pub const ORDERED: Self = Self::EQUALITY
        .with(FilterOperator::Lt)
        .with(FilterOperator::Le)
        .with(FilterOperator::Gt)
        .with(FilterOperator::Ge);
    pub const SEARCH: Self = Self::EMPTY
        .with(FilterOperator::Like)
        .with(FilterOperator::ILike);

    #[must_use]
    pub const fn with(self, op: FilterOperator) -> Self {
        Self(self.0 | op.bit())
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn contains(self, op: FilterOperator) -> bool {
        self.0 & op.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn has_ordering(self) -> bool {
        self.0 & !Self::EQUALITY.0 & !Self::SEARCH.0 != 0
    }

    #[must_use]
    pub const fn has_search(self) -> bool {
        self.0 & Self::SEARCH.0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = FilterOperator> {
        FilterOperator::ALL
            .into_iter()
            .filter(move |op| self.contains(*op))
    }
}

impl FromIterator<FilterOperator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = FilterOperator>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl Serialize for OperatorSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl std::fmt::Debug for OperatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

///
/// TESTS
///
