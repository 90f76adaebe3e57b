use derive_more::Display;

///
/// Sentinel
///
/// Reserved request tokens that stand for a state rather than a literal.
/// Only the bare token counts; a quoted `'null()'` is an ordinary string.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Sentinel {
    /// Attribute is absent or unset.
    #[display("null()")]
    Null,

    /// Attribute is the empty string.
    #[display("empty()")]
    Empty,
}

impl Sentinel {
    pub const NULL_TOKEN: &'static str = "null()";
    pub const EMPTY_TOKEN: &'static str = "empty()";

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            Self::NULL_TOKEN => Some(Self::Null),
            Self::EMPTY_TOKEN => Some(Self::Empty),
            _ => None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_bare_tokens_are_sentinels() {
        assert_eq!(Sentinel::parse("null()"), Some(Sentinel::Null));
        assert_eq!(Sentinel::parse("empty()"), Some(Sentinel::Empty));

        for raw in ["'null()'", "\"empty()\"", "null", "NULL()", "", "empty"] {
            assert_eq!(Sentinel::parse(raw), None, "{raw:?}");
        }
    }

    #[test]
    fn display_matches_token() {
        for sentinel in [Sentinel::Null, Sentinel::Empty] {
            assert_eq!(Sentinel::parse(&sentinel.to_string()), Some(sentinel));
        }
    }
}
