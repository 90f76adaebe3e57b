//! Module: compile
//! Responsibility: one `(filter, operator, raw value)` triple to one predicate.
//! Does not own: catalogue authoring or predicate execution.
//! Boundary: resolve, validate, coerce or pattern-compile, then assemble.

mod assemble;
mod coerce;
mod pattern;
mod policy;
mod sentinel;
mod validate;

#[cfg(test)]
mod tests;

use crate::{
    catalog::FilterCatalog,
    config::CompilerConfig,
    error::FilterError,
    model::{FilterDescriptor, FilterOperator},
    predicate::Predicate,
    value::TextMode,
};
use assemble::{Operand, assemble};
use coerce::{coerce, unquote};
use std::{fmt, sync::Arc};
use tracing::{debug, trace};
use validate::validate_operator;

pub use pattern::{PatternError, compile_pattern};
pub use policy::{CustomFilter, UnknownFilterAction, UnknownFilterPolicy};
pub use sentinel::Sentinel;

///
/// FilterCompiler
///
/// Compiles request triples against a sealed catalogue. Holds no mutable
/// state; one instance can serve every request on every thread.
///

#[derive(Clone)]
pub struct FilterCompiler {
    catalog: Arc<FilterCatalog>,
    policy: UnknownFilterPolicy,
    custom: Option<Arc<dyn CustomFilter>>,
}

impl FilterCompiler {
    #[must_use]
    pub fn new(catalog: impl Into<Arc<FilterCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
            policy: UnknownFilterPolicy::default(),
            custom: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: &CompilerConfig) -> Self {
        self.policy = UnknownFilterPolicy::from(config);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: UnknownFilterPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_custom_filter(mut self, custom: impl CustomFilter + 'static) -> Self {
        self.custom = Some(Arc::new(custom));
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &FilterCatalog {
        &self.catalog
    }

    /// Compile one triple into exactly one predicate.
    pub fn compile(
        &self,
        name: &str,
        op: FilterOperator,
        raw: &str,
    ) -> Result<Predicate, FilterError> {
        let Some(descriptor) = self.catalog.resolve(name) else {
            return self.compile_unknown(name, op, raw);
        };

        trace!(filter = descriptor.name(), %op, raw, "compiling filter");
        let operand = operand(descriptor, op, raw)?;

        Ok(assemble(descriptor, op, &operand))
    }

    fn compile_unknown(
        &self,
        name: &str,
        op: FilterOperator,
        raw: &str,
    ) -> Result<Predicate, FilterError> {
        match self.policy.action_for(name) {
            UnknownFilterAction::Ignore => {
                debug!(filter = name, %op, "ignoring unknown filter");
                Ok(Predicate::True)
            }
            UnknownFilterAction::Delegate => {
                debug!(filter = name, %op, "delegating unknown filter");
                self.custom
                    .as_ref()
                    .and_then(|custom| custom.build(name, op, raw))
                    .ok_or_else(|| FilterError::not_implemented(name))
            }
        }
    }
}

impl fmt::Debug for FilterCompiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterCompiler")
            .field("filters", &self.catalog.len())
            .field("policy", &self.policy)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

// Validate, then turn the raw text into whatever the leaf compares against.
fn operand(
    descriptor: &FilterDescriptor,
    op: FilterOperator,
    raw: &str,
) -> Result<Operand, FilterError> {
    if let Some(sentinel) = validate_operator(descriptor, op, raw)? {
        return Ok(Operand::Sentinel(sentinel));
    }

    if op.is_search() {
        let mode = match op {
            FilterOperator::ILike => TextMode::Ci,
            _ => TextMode::Cs,
        };
        let pattern = compile_pattern(unquote(raw))
            .map_err(|_| FilterError::value(descriptor.name(), op, raw))?;
        trace!(filter = descriptor.name(), kind = %pattern.kind(), "compiled search pattern");

        return Ok(Operand::Pattern(pattern, mode));
    }

    coerce(descriptor, op, raw).map(Operand::Value)
}
