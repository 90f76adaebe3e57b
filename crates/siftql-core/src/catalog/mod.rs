//! Module: catalog
//! Responsibility: seal authored filter models into an immutable name index.
//! Does not own: coercion, operator checks per request, or predicate shapes.
//! Boundary: the compiler reads descriptors from here and never mutates them.


use crate::model::{
    AttributePath, Choice, ChoiceKind, ChoiceValue, FilterDescriptor, FilterModel,
    FilterOperator, OperatorSet, SemanticType, canonical_filter_name,
};
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::OnceLock,
};
use thiserror::Error as ThisError;
use tracing::debug;

static GLOBAL_CATALOG: OnceLock<FilterCatalog> = OnceLock::new();

///
/// CatalogError
///
/// Authoring mistakes caught while sealing the catalogue.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CatalogError {
    #[error("invalid filter name '{name}'")]
    InvalidName { name: String },

    #[error("duplicate filter '{name}'")]
    DuplicateFilter { name: String },

    #[error("filter '{filter}' has invalid source '{source_path}'")]
    InvalidSource { filter: String, source_path: String },

    #[error("filter '{filter}' of type {semantic_type} cannot declare operator '{op}'")]
    InvalidOperator {
        filter: String,
        semantic_type: &'static str,
        op: FilterOperator,
    },

    #[error("filter '{filter}' of type {semantic_type} cannot be searchable")]
    NotSearchable {
        filter: String,
        semantic_type: &'static str,
    },

    #[error("choice filter '{filter}' declares no choices")]
    EmptyChoices { filter: String },

    #[error("choice filter '{filter}' mixes value kinds at '{value}'")]
    ChoiceKindMismatch { filter: String, value: String },

    #[error("choice filter '{filter}' repeats '{token}'")]
    DuplicateChoice { filter: String, token: String },

    #[error("a global filter catalog is already installed")]
    AlreadyInstalled,
}

///
/// FilterCatalogBuilder
///

#[derive(Clone, Debug, Default)]
pub struct FilterCatalogBuilder {
    models: Vec<FilterModel>,
}

impl FilterCatalogBuilder {
    #[must_use]
    pub fn filter(mut self, model: FilterModel) -> Self {
        self.models.push(model);
        self
    }

    #[must_use]
    pub fn filters(mut self, models: impl IntoIterator<Item = FilterModel>) -> Self {
        self.models.extend(models);
        self
    }

    /// Validate every model and seal the catalogue.
    pub fn build(self) -> Result<FilterCatalog, CatalogError> {
        let mut filters = BTreeMap::new();

        for model in self.models {
            let descriptor = seal(model)?;
            if filters.contains_key(descriptor.name()) {
                return Err(CatalogError::DuplicateFilter {
                    name: descriptor.name,
                });
            }

            filters.insert(descriptor.name.clone(), descriptor);
        }

        debug!(filters = filters.len(), "filter catalog sealed");

        Ok(FilterCatalog { filters })
    }
}

///
/// FilterCatalog
///
/// Sealed mapping from canonical filter name to descriptor. Immutable once
/// built, so it can be shared freely across threads.
///

#[derive(Clone, Debug, Default)]
pub struct FilterCatalog {
    filters: BTreeMap<String, FilterDescriptor>,
}

impl FilterCatalog {
    #[must_use]
    pub fn builder() -> FilterCatalogBuilder {
        FilterCatalogBuilder::default()
    }

    /// Look up a filter by either spelling of its name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&FilterDescriptor> {
        self.filters.get(&canonical_filter_name(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Descriptors in name order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterDescriptor> {
        self.filters.values()
    }

    /// Install as the process-wide catalogue. Succeeds once.
    pub fn install(self) -> Result<&'static Self, CatalogError> {
        let mut pending = Some(self);
        let installed = GLOBAL_CATALOG.get_or_init(|| pending.take().unwrap_or_default());

        if pending.is_some() {
            return Err(CatalogError::AlreadyInstalled);
        }

        Ok(installed)
    }

    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL_CATALOG.get()
    }
}

// Turn one authored model into a descriptor, or report why it is unusable.
fn seal(model: FilterModel) -> Result<FilterDescriptor, CatalogError> {
    let FilterModel {
        name,
        sources,
        semantic_type,
        operators,
        searchable,
        nullable,
    } = model;

    let name = canonical_filter_name(&name);
    if AttributePath::parse(&name).is_none() {
        return Err(CatalogError::InvalidName { name });
    }

    let sources = seal_sources(&name, sources)?;
    let operators = seal_operators(&name, &semantic_type, operators, searchable)?;
    if let Some(table) = semantic_type.choice_table() {
        check_choices(&name, table.kind(), table.choices())?;
    }

    Ok(FilterDescriptor {
        name,
        sources,
        semantic_type,
        operators,
        searchable,
        nullable,
    })
}

fn seal_sources(name: &str, sources: Vec<String>) -> Result<Vec<AttributePath>, CatalogError> {
    if sources.is_empty() {
        return AttributePath::parse(name)
            .map(|path| vec![path])
            .ok_or_else(|| CatalogError::InvalidName {
                name: name.to_string(),
            });
    }

    sources
        .into_iter()
        .map(|source| {
            AttributePath::parse(&source).ok_or_else(|| CatalogError::InvalidSource {
                filter: name.to_string(),
                source_path: source,
            })
        })
        .collect()
}

fn seal_operators(
    name: &str,
    semantic_type: &SemanticType,
    declared: Option<OperatorSet>,
    searchable: bool,
) -> Result<OperatorSet, CatalogError> {
    let is_string = matches!(semantic_type, SemanticType::String);
    if searchable && !is_string {
        return Err(CatalogError::NotSearchable {
            filter: name.to_string(),
            semantic_type: semantic_type.name(),
        });
    }

    let mut operators = declared
        .unwrap_or_else(|| semantic_type.default_operators(searchable))
        .union(OperatorSet::EQUALITY);
    if searchable {
        operators = operators.union(OperatorSet::SEARCH);
    }

    let invalid = operators.iter().find(|op| {
        (op.is_ordering() && !semantic_type.admits_ordering()) || (op.is_search() && !searchable)
    });
    if let Some(op) = invalid {
        return Err(CatalogError::InvalidOperator {
            filter: name.to_string(),
            semantic_type: semantic_type.name(),
            op,
        });
    }

    Ok(operators)
}

fn check_choices(
    name: &str,
    kind: ChoiceKind,
    choices: &[Choice],
) -> Result<(), CatalogError> {
    if choices.is_empty() {
        return Err(CatalogError::EmptyChoices {
            filter: name.to_string(),
        });
    }

    let mut seen = BTreeSet::new();
    for choice in choices {
        if choice.value.kind() != kind {
            return Err(CatalogError::ChoiceKindMismatch {
                filter: name.to_string(),
                value: choice.value.to_string(),
            });
        }

        // Stored values and representations share one namespace; a repr that
        // spells another choice's value would make lookup ambiguous.
        let value_token = match &choice.value {
            ChoiceValue::Int(v) => v.to_string(),
            ChoiceValue::Text(v) => v.clone(),
        };
        let repr = choice.repr.clone().filter(|repr| *repr != value_token);
        for token in std::iter::once(value_token).chain(repr) {
            if !seen.insert(token.clone()) {
                return Err(CatalogError::DuplicateChoice {
                    filter: name.to_string(),
                    token,
                });
            }
        }
    }

    Ok(())
}
