use crate::{
    config::CompilerConfig,
    model::{FilterOperator, canonical_filter_name},
    predicate::Predicate,
};
use derive_more::Display;
use serde::Deserialize;
use std::collections::BTreeSet;

///
/// UnknownFilterAction
///
/// What to do with a filter name the catalogue does not know.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFilterAction {
    /// Match every record.
    #[display("ignore")]
    Ignore,

    /// Hand the triple to the custom filter hook.
    #[default]
    #[display("delegate")]
    Delegate,
}

///
/// CustomFilter
///
/// Fallback hook for names the catalogue does not resolve. Receives the
/// triple exactly as requested; `None` declines it.
///

pub trait CustomFilter: Send + Sync {
    fn build(&self, name: &str, op: FilterOperator, raw: &str) -> Option<Predicate>;
}

impl<F> CustomFilter for F
where
    F: Fn(&str, FilterOperator, &str) -> Option<Predicate> + Send + Sync,
{
    fn build(&self, name: &str, op: FilterOperator, raw: &str) -> Option<Predicate> {
        self(name, op, raw)
    }
}

///
/// UnknownFilterPolicy
///
/// Decision table for unresolved names: explicitly ignored names, then the
/// fallback action.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UnknownFilterPolicy {
    ignored: BTreeSet<String>,
    fallback: UnknownFilterAction,
}

impl UnknownFilterPolicy {
    #[must_use]
    pub fn new<I, S>(ignored: I, fallback: UnknownFilterAction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ignored: ignored
                .into_iter()
                .map(|name| canonical_filter_name(name.as_ref()))
                .collect(),
            fallback,
        }
    }

    #[must_use]
    pub fn action_for(&self, name: &str) -> UnknownFilterAction {
        if self.ignored.contains(&canonical_filter_name(name)) {
            UnknownFilterAction::Ignore
        } else {
            self.fallback
        }
    }
}

impl From<&CompilerConfig> for UnknownFilterPolicy {
    fn from(config: &CompilerConfig) -> Self {
        Self::new(&config.ignored_filters, config.unknown_filter_action)
    }
}

///
/// TESTS
///
