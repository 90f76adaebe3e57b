//! Static catalogue metadata: filter descriptors, operators, attribute paths.

pub mod descriptor;
pub mod operator;
pub mod path;

pub use descriptor::{
    Choice, ChoiceKind, ChoiceTable, ChoiceValue, FilterDescriptor, FilterModel, SemanticType,
};
pub use operator::{FilterOperator, OperatorSet, UnknownOperator};
pub use path::{AttributePath, JOIN_SEPARATOR, PATH_SEPARATOR, canonical_filter_name};
