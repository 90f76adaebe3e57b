mod ast;
mod runtime;


pub use ast::{
    CompareOp, ComparePredicate, MatchKind, MatchPredicate, Pattern, Predicate,
};
pub use runtime::{FieldPresence, PredicateProgram, Row};
