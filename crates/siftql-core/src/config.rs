use crate::compile::UnknownFilterAction;
use serde::Deserialize;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid compiler config: {0}")]
    Toml(#[from] toml::de::Error),
}

///
/// CompilerConfig
///
/// Runtime knobs for [`FilterCompiler`](crate::compile::FilterCompiler).
///
/// ```toml
/// ignored_filters = ["search", "ordering"]
/// unknown_filter_action = "delegate"
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    /// Unregistered names that compile to a match-all predicate.
    pub ignored_filters: BTreeSet<String>,

    /// Action for every other unregistered name.
    pub unknown_filter_action: UnknownFilterAction,
}

impl CompilerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    #[must_use]
    pub fn ignore(mut self, name: impl Into<String>) -> Self {
        self.ignored_filters.insert(name.into());
        self
    }

    #[must_use]
    pub const fn unknown_filter_action(mut self, action: UnknownFilterAction) -> Self {
        self.unknown_filter_action = action;
        self
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = CompilerConfig::from_toml_str("").unwrap();

        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.unknown_filter_action, UnknownFilterAction::Delegate);
        assert!(config.ignored_filters.is_empty());
    }

    #[test]
    fn parses_full_document() {
        let config = CompilerConfig::from_toml_str(
            r#"
            ignored_filters = ["search", "ordering", "invalid"]
            unknown_filter_action = "ignore"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            CompilerConfig::default()
                .ignore("invalid")
                .ignore("ordering")
                .ignore("search")
                .unknown_filter_action(UnknownFilterAction::Ignore)
        );
    }

    #[test]
    fn rejects_unknown_keys_and_actions() {
        assert!(CompilerConfig::from_toml_str("strict = true").is_err());

        let err = CompilerConfig::from_toml_str(r#"unknown_filter_action = "panic""#).unwrap_err();
        assert!(err.to_string().starts_with("invalid compiler config"));
    }
}
