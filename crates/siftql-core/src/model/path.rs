use derive_more::{Deref, IntoIterator};
use serde::Serialize;
use std::fmt;

/// Canonical nested-path separator.
pub const PATH_SEPARATOR: &str = ".";

/// Backend-native join separator, accepted as an alias of [`PATH_SEPARATOR`].
pub const JOIN_SEPARATOR: &str = "__";

/// Fold both accepted spellings of a filter name into the dotted form.
#[must_use]
pub fn canonical_filter_name(name: &str) -> String {
    name.replace(JOIN_SEPARATOR, PATH_SEPARATOR)
}

///
/// AttributePath
///
/// Ordered storage-layer attribute segments, e.g. `author → publisher → id`.
/// Always holds at least one segment and never an empty one.
///

#[derive(Clone, Debug, Deref, Eq, Hash, IntoIterator, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct AttributePath(Vec<String>);

impl AttributePath {
    /// Parse a dotted or `__`-joined path.
    ///
    /// Returns `None` for an empty path or one with an empty segment.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = canonical_filter_name(raw);
        let segments: Vec<String> = canonical
            .split(PATH_SEPARATOR)
            .map(str::to_string)
            .collect();

        Self::from_segments(segments)
    }

    #[must_use]
    pub fn from_segments<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() || segments.iter().any(String::is_empty) {
            return None;
        }

        Some(Self(segments))
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whether the path traverses at least one relation.
    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.0.len() > 1
    }

    /// Render the path with the backend join separator (`author__publisher__id`).
    #[must_use]
    pub fn join_with(&self, separator: &str) -> String {
        self.0.join(separator)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_with(PATH_SEPARATOR))
    }
}

///
/// TESTS
///
