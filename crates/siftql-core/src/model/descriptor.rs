use crate::{
    model::{
        operator::{FilterOperator, OperatorSet},
        path::AttributePath,
    },
    value::Value,
};
use derive_more::Display;
use serde::Serialize;

///
/// ChoiceKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    #[display("int")]
    Int,
    #[display("str")]
    Text,
}

///
/// ChoiceValue
///
/// Stored value of one enumerated choice.
///

#[derive(Clone, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChoiceValue {
    Int(i64),
    Text(String),
}

impl ChoiceValue {
    #[must_use]
    pub const fn kind(&self) -> ChoiceKind {
        match self {
            Self::Int(_) => ChoiceKind::Int,
            Self::Text(_) => ChoiceKind::Text,
        }
    }

    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Int(v) => Value::Int(*v),
            Self::Text(v) => Value::Text(v.clone()),
        }
    }
}

///
/// Choice
///
/// One row of a choice table: the stored value plus an optional
/// human-readable representation accepted as an alias for it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Choice {
    pub value: ChoiceValue,
    pub repr: Option<String>,
}

impl Choice {
    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self {
            value: ChoiceValue::Int(value),
            repr: None,
        }
    }

    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: ChoiceValue::Text(value.into()),
            repr: None,
        }
    }

    #[must_use]
    pub fn with_repr(mut self, repr: impl Into<String>) -> Self {
        self.repr = Some(repr.into());
        self
    }
}

///
/// ChoiceTable
///
/// Enumerated legal values of a Choice filter. Stored values and
/// representations are unique across the table; the catalogue enforces
/// this when the descriptor is sealed.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ChoiceTable {
    kind: ChoiceKind,
    choices: Vec<Choice>,
}

impl ChoiceTable {
    #[must_use]
    pub fn new(kind: ChoiceKind, choices: impl IntoIterator<Item = Choice>) -> Self {
        Self {
            kind,
            choices: choices.into_iter().collect(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ChoiceKind {
        self.kind
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Resolve raw input to a stored value.
    ///
    /// The input is first matched structurally against stored values (parsed
    /// as an integer for int-backed tables), then textually against
    /// representations.
    #[must_use]
    pub fn lookup(&self, raw: &str) -> Option<&ChoiceValue> {
        let structural = match self.kind {
            ChoiceKind::Int => raw.parse::<i64>().ok().and_then(|parsed| {
                self.choices
                    .iter()
                    .find(|choice| choice.value == ChoiceValue::Int(parsed))
            }),
            ChoiceKind::Text => self
                .choices
                .iter()
                .find(|choice| matches!(&choice.value, ChoiceValue::Text(v) if v == raw)),
        };

        structural
            .or_else(|| {
                self.choices
                    .iter()
                    .find(|choice| choice.repr.as_deref() == Some(raw))
            })
            .map(|choice| &choice.value)
    }
}

///
/// SemanticType
///
/// Type tag selecting a descriptor's coercer and default operator set.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    String,
    Choice(ChoiceTable),
}

impl SemanticType {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::String => "string",
            Self::Choice(_) => "choice",
        }
    }

    /// Operators granted when the author declares none.
    #[must_use]
    pub const fn default_operators(&self, searchable: bool) -> OperatorSet {
        match self {
            Self::Integer | Self::Float | Self::Date | Self::DateTime => OperatorSet::ORDERED,
            Self::String if searchable => OperatorSet::EQUALITY.union(OperatorSet::SEARCH),
            Self::Boolean | Self::String | Self::Choice(_) => OperatorSet::EQUALITY,
        }
    }

    /// Whether ordering operators may be declared at all.
    /// Strings and choices only order when the author says so.
    #[must_use]
    pub const fn admits_ordering(&self) -> bool {
        !matches!(self, Self::Boolean)
    }

    #[must_use]
    pub const fn choice_table(&self) -> Option<&ChoiceTable> {
        match self {
            Self::Choice(table) => Some(table),
            _ => None,
        }
    }
}

///
/// FilterModel
///
/// Authoring record for one catalogue entry. Unvalidated; the catalogue
/// turns it into a sealed [`FilterDescriptor`].
///

#[derive(Clone, Debug)]
pub struct FilterModel {
    pub name: String,
    pub sources: Vec<String>,
    pub semantic_type: SemanticType,
    pub operators: Option<OperatorSet>,
    pub searchable: bool,
    pub nullable: bool,
}

impl FilterModel {
    #[must_use]
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            sources: Vec::new(),
            semantic_type,
            operators: None,
            searchable: false,
            nullable: false,
        }
    }

    #[must_use]
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Integer)
    }

    #[must_use]
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Float)
    }

    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Boolean)
    }

    #[must_use]
    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::Date)
    }

    #[must_use]
    pub fn datetime(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::DateTime)
    }

    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, SemanticType::String)
    }

    #[must_use]
    pub fn choice(name: impl Into<String>, table: ChoiceTable) -> Self {
        Self::new(name, SemanticType::Choice(table))
    }

    /// Read the value from `source` instead of the attribute the name spells.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.sources = vec![source.into()];
        self
    }

    /// Match when any of `sources` matches.
    #[must_use]
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn operators(mut self, operators: impl IntoIterator<Item = FilterOperator>) -> Self {
        self.operators = Some(operators.into_iter().collect());
        self
    }

    #[must_use]
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

///
/// FilterDescriptor
///
/// Sealed, immutable metadata for one public filter name.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FilterDescriptor {
    pub(crate) name: String,
    pub(crate) sources: Vec<AttributePath>,
    pub(crate) semantic_type: SemanticType,
    pub(crate) operators: OperatorSet,
    pub(crate) searchable: bool,
    pub(crate) nullable: bool,
}

impl FilterDescriptor {
    /// Canonical (dotted) public name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Primary attribute path.
    #[must_use]
    pub fn attribute_path(&self) -> &AttributePath {
        &self.sources[0]
    }

    /// Every attribute path the filter reads, primary first.
    #[must_use]
    pub fn sources(&self) -> &[AttributePath] {
        &self.sources
    }

    #[must_use]
    pub const fn semantic_type(&self) -> &SemanticType {
        &self.semantic_type
    }

    #[must_use]
    pub const fn allowed_operators(&self) -> OperatorSet {
        self.operators
    }

    #[must_use]
    pub const fn is_searchable(&self) -> bool {
        self.searchable
    }

    #[must_use]
    pub const fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[must_use]
    pub const fn choice_table(&self) -> Option<&ChoiceTable> {
        self.semantic_type.choice_table()
    }
}
