//! Translate storage-agnostic select descriptors (field filters, OR-groups,
//! sort order) into MongoDB filter and sort documents.
//!
//! ```
//! use bsonquery::{FilterDescriptor, Operator, QueryTranslator, SelectParameter};
//!
//! let translator = QueryTranslator::new("createdAt");
//! let param = SelectParameter {
//!     filter_descriptors: vec![FilterDescriptor::new("name", Operator::BeginsWith, "jo")],
//!     ..SelectParameter::default()
//! };
//! let filter = translator.build_filter(&param).unwrap();
//! assert_eq!(filter.to_json().unwrap(), r#"{"name":{"$regex":"^jo","$options":"i"}}"#);
//! assert_eq!(translator.build_sort(&param).to_json().unwrap(), r#"{"createdAt":1}"#);
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod logger;
pub mod query;

#[cfg(test)]
mod test_support;

pub use config::TranslatorConfig;
pub use errors::TranslateError;
pub use query::{
    CompositeFilterDescriptor, FilterDescriptor, GroupFilterDescriptor, Operator, QueryDocument,
    QueryTranslator, SelectParameter, SortDescriptor, SortDirection, map_operator,
};
