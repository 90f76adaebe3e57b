//! ## Crate layout
//! - `core`: catalogue, coercers, wildcard patterns, compiler, and the
//!   in-memory predicate evaluator.
//!
//! The `prelude` module carries everything a request handler needs to
//! compile filters; lower-level pieces stay reachable through `core`.

pub use siftql_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Errors
//

pub use crate::core::{catalog::CatalogError, config::ConfigError, error::FilterError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        catalog::FilterCatalog,
        compile::{CustomFilter as _, FilterCompiler, UnknownFilterAction},
        config::CompilerConfig,
        error::{ErrorDetails, FilterError},
        model::{AttributePath, Choice, ChoiceKind, ChoiceTable, FilterModel, FilterOperator},
        predicate::{FieldPresence, Predicate, PredicateProgram, Row},
        types::{Date, DateTime},
        value::Value,
    };
}

///
/// TESTS
///
