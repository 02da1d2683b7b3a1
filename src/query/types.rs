use bson::Bson;
use serde::{Deserialize, Serialize};

use super::operator::Operator;

/// One `field <op> value` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
    pub field_name: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Bson,
}

impl FilterDescriptor {
    pub fn new(field_name: impl Into<String>, operator: Operator, value: impl Into<Bson>) -> Self {
        Self {
            field_name: field_name.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Members of a single OR-group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupFilterDescriptor {
    #[serde(default)]
    pub items: Vec<FilterDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeFilterDescriptor {
    #[serde(default)]
    pub group_filter_descriptor: GroupFilterDescriptor,
}

impl CompositeFilterDescriptor {
    pub fn any_of(items: Vec<FilterDescriptor>) -> Self {
        Self {
            group_filter_descriptor: GroupFilterDescriptor { items },
        }
    }

    pub fn items(&self) -> &[FilterDescriptor] {
        &self.group_filter_descriptor.items
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDescriptor {
    pub field_name: String,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl SortDescriptor {
    pub fn asc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            sort_direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            sort_direction: SortDirection::Descending,
        }
    }
}

/// Everything a caller asks of one select: simple filters (ANDed), OR-groups
/// and sort order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectParameter {
    #[serde(default)]
    pub filter_descriptors: Vec<FilterDescriptor>,
    #[serde(default)]
    pub composite_filter_descriptors: Vec<CompositeFilterDescriptor>,
    #[serde(default)]
    pub sort_descriptors: Vec<SortDescriptor>,
}
