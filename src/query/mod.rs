// Submodules for separation of concerns
mod document;
mod operator;
mod parse;
mod translate;
mod types;

pub use document::QueryDocument;
pub use operator::{Operator, map_operator};
pub use parse::{parse_select_json, parse_sort_spec};
pub use translate::QueryTranslator;
pub use types::{
    CompositeFilterDescriptor, FilterDescriptor, GroupFilterDescriptor, SelectParameter,
    SortDescriptor, SortDirection,
};
