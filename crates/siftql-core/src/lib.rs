//! Core of siftql: the filter catalogue, value coercion, wildcard search
//! patterns, and the compiler that turns `(filter, operator, value)` triples
//! into backend-agnostic predicates.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod catalog;
pub mod compile;
pub mod config;
pub mod error;
pub mod model;
pub mod predicate;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Vocabulary needed to author a catalogue and compile requests against it.
///

pub mod prelude {
    pub use crate::{
        catalog::FilterCatalog,
        compile::{FilterCompiler, UnknownFilterAction},
        config::CompilerConfig,
        error::FilterError,
        model::{Choice, ChoiceKind, ChoiceTable, FilterModel, FilterOperator},
        predicate::{Predicate, PredicateProgram, Row},
        value::Value,
    };
}
