use crate::predicate::Pattern;
use thiserror::Error as ThisError;

const WILDCARD: char = '*';
const ANY_CHARS: &str = "(.*?)";
const MATCH_ANYTHING: &str = ".*";

///
/// PatternError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PatternError {
    #[error("adjacent wildcards in search pattern '{0}'")]
    AdjacentWildcards(String),
}

/// Compile an unquoted `*`-delimited search value.
///
/// Plain values match exactly; a single leading and/or trailing marker
/// yields suffix, prefix or contains; any interior marker falls back to an
/// anchored regex over escaped literal fragments.
pub fn compile_pattern(value: &str) -> Result<Pattern, PatternError> {
    if value.contains("**") {
        return Err(PatternError::AdjacentWildcards(value.to_string()));
    }
    if value == "*" {
        return Ok(Pattern::Regex(MATCH_ANYTHING.to_string()));
    }

    let leading = value.starts_with(WILDCARD);
    let trailing = value.ends_with(WILDCARD);
    let inner = value.strip_prefix(WILDCARD).unwrap_or(value);
    let inner = inner.strip_suffix(WILDCARD).unwrap_or(inner);

    if !inner.contains(WILDCARD) {
        let inner = inner.to_string();
        let pattern = match (leading, trailing) {
            (false, false) => Pattern::Exact(inner),
            (true, false) => Pattern::Suffix(inner),
            (false, true) => Pattern::Prefix(inner),
            (true, true) => Pattern::Contains(inner),
        };

        return Ok(pattern);
    }

    Ok(Pattern::Regex(regex_source(value, leading, trailing)))
}

// Escaped literal fragments joined by lazy any-chars, anchored on the sides
// that carry no marker.
fn regex_source(value: &str, leading: bool, trailing: bool) -> String {
    let body = value
        .split(WILDCARD)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(ANY_CHARS);

    let mut source = String::with_capacity(body.len() + 2);
    if !leading {
        source.push('^');
    }
    source.push_str(&body);
    if !trailing {
        source.push('$');
    }

    source
}

///
/// TESTS
///
