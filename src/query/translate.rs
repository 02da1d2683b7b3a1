use bson::{Bson, Document};

use crate::config::{CompositeMode, RangeOperatorMode, TranslatorConfig};
use crate::errors::TranslateError;

use super::document::QueryDocument;
use super::operator::{Operator, map_operator};
use super::types::{
    CompositeFilterDescriptor, FilterDescriptor, SelectParameter, SortDirection,
};

/// Turns a [`SelectParameter`] into the filter and sort documents a MongoDB
/// driver expects.
///
/// Immutable once built; one translator can serve any number of threads.
#[derive(Debug, Clone)]
pub struct QueryTranslator {
    config: TranslatorConfig,
}

impl QueryTranslator {
    pub fn new(default_field_for_sort: impl Into<String>) -> Self {
        Self::with_config(TranslatorConfig::with_default_sort(default_field_for_sort))
    }

    pub fn with_config(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn default_field_for_sort(&self) -> &str {
        &self.config.default_sort_field
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Build the filter document: simple filters in input order, then one
    /// composite clause if any OR-groups were given.
    ///
    /// Composite items never get the anchored, case-insensitive regex that
    /// simple pattern filters get; they use the raw mapped token.
    ///
    /// # Errors
    /// Returns [`TranslateError::InvalidOperandType`] if a `begins_with` or
    /// `ends_with` value is not a string, or (native range mode only) if a
    /// `between`/`in`/`not_in` value is not a suitable array.
    pub fn build_filter(
        &self,
        param: &SelectParameter,
    ) -> Result<QueryDocument, TranslateError> {
        let mut out = QueryDocument::new();
        for filter in &param.filter_descriptors {
            out.push(filter.field_name.clone(), self.simple_condition(filter)?);
        }
        if !param.composite_filter_descriptors.is_empty() {
            let (key, value) = self.composite_clause(&param.composite_filter_descriptors);
            out.push(key, value);
        }
        let gaps = self.gap_fields(param);
        if !gaps.is_empty() {
            log::warn!(
                "operators without a faithful mapping (placeholder $eq or empty token): {}",
                gaps.join(", ")
            );
        }
        log::debug!(
            "built filter: {} simple, {} composite -> {} entries",
            param.filter_descriptors.len(),
            param.composite_filter_descriptors.len(),
            out.len()
        );
        Ok(out)
    }

    /// Build the sort document, falling back to the default field ascending.
    pub fn build_sort(&self, param: &SelectParameter) -> QueryDocument {
        let mut out = QueryDocument::new();
        if param.sort_descriptors.is_empty() {
            out.push(self.config.default_sort_field.clone(), 1);
            return out;
        }
        for sort in &param.sort_descriptors {
            let dir = match sort.sort_direction {
                SortDirection::Ascending => 1,
                SortDirection::Descending => -1,
            };
            out.push(sort.field_name.clone(), dir);
        }
        out
    }

    /// # Errors
    /// Same as [`QueryTranslator::build_filter`].
    pub fn build(
        &self,
        param: &SelectParameter,
    ) -> Result<(QueryDocument, QueryDocument), TranslateError> {
        Ok((self.build_filter(param)?, self.build_sort(param)))
    }

    fn simple_condition(&self, filter: &FilterDescriptor) -> Result<Document, TranslateError> {
        let cond = match filter.operator {
            Operator::Contains => regex_condition(filter.value.clone()),
            Operator::BeginsWith => {
                let s = string_operand(filter)?;
                regex_condition(Bson::String(format!("^{s}")))
            }
            Operator::EndsWith => {
                let s = string_operand(filter)?;
                regex_condition(Bson::String(format!("{s}$")))
            }
            op if op.is_placeholder()
                && self.config.range_operators == RangeOperatorMode::Native =>
            {
                range_condition(filter)?
            }
            op => mapped_condition(op, &filter.value),
        };
        Ok(cond)
    }

    fn composite_clause(
        &self,
        composites: &[CompositeFilterDescriptor],
    ) -> (&'static str, Bson) {
        if self.config.composite_mode == CompositeMode::Nested {
            let groups: Vec<Bson> = composites
                .iter()
                .filter(|c| !c.items().is_empty())
                .map(|c| {
                    let mut group = Document::new();
                    group.insert("$or", or_items(c.items()));
                    Bson::Document(group)
                })
                .collect();
            if groups.len() > 1 {
                return ("$and", Bson::Array(groups));
            }
        }
        let items: Vec<Bson> = composites
            .iter()
            .flat_map(|c| c.items().iter().map(item_condition))
            .collect();
        ("$or", Bson::Array(items))
    }

    /// Fields whose operator has no faithful token: `field:operator` for
    /// every unknown operator, and for `between`/`in`/`not_in` wherever they
    /// still translate to the `$eq` placeholder.
    pub fn gap_fields(&self, param: &SelectParameter) -> Vec<String> {
        let native = self.config.range_operators == RangeOperatorMode::Native;
        let is_gap = |op: Operator| op == Operator::Unknown || op.is_placeholder();
        let simple = param
            .filter_descriptors
            .iter()
            .filter(|f| is_gap(f.operator) && !(native && f.operator.is_placeholder()));
        let composite = param
            .composite_filter_descriptors
            .iter()
            .flat_map(|c| c.items())
            .filter(|f| is_gap(f.operator));
        simple
            .chain(composite)
            .map(|f| format!("{}:{}", f.field_name, f.operator))
            .collect()
    }
}

fn regex_condition(pattern: Bson) -> Document {
    let mut d = Document::new();
    d.insert("$regex", pattern);
    d.insert("$options", "i");
    d
}

fn mapped_condition(op: Operator, value: &Bson) -> Document {
    let mut d = Document::new();
    d.insert(map_operator(op), value.clone());
    d
}

fn item_condition(item: &FilterDescriptor) -> Bson {
    let mut d = Document::new();
    d.insert(item.field_name.clone(), mapped_condition(item.operator, &item.value));
    Bson::Document(d)
}

fn or_items(items: &[FilterDescriptor]) -> Bson {
    Bson::Array(items.iter().map(item_condition).collect())
}

fn string_operand(filter: &FilterDescriptor) -> Result<&str, TranslateError> {
    match &filter.value {
        Bson::String(s) => Ok(s.as_str()),
        other => Err(invalid_operand(filter, "a string", other)),
    }
}

fn range_condition(filter: &FilterDescriptor) -> Result<Document, TranslateError> {
    let mut d = Document::new();
    match (filter.operator, &filter.value) {
        (Operator::Between, Bson::Array(bounds)) if bounds.len() == 2 => {
            d.insert("$gte", bounds[0].clone());
            d.insert("$lte", bounds[1].clone());
        }
        (Operator::Between, other) => {
            return Err(invalid_operand(filter, "an array of two bounds", other));
        }
        (Operator::In, Bson::Array(values)) => {
            d.insert("$in", values.clone());
        }
        (Operator::NotIn, Bson::Array(values)) => {
            d.insert("$nin", values.clone());
        }
        (_, other) => return Err(invalid_operand(filter, "an array", other)),
    }
    Ok(d)
}

fn invalid_operand(
    filter: &FilterDescriptor,
    expected: &'static str,
    found: &Bson,
) -> TranslateError {
    TranslateError::InvalidOperandType {
        field: filter.field_name.clone(),
        operator: filter.operator,
        expected,
        found: bson_type_name(found),
    }
}

pub(crate) fn bson_type_name(b: &Bson) -> &'static str {
    match b {
        Bson::Double(_) => "double",
        Bson::String(_) => "string",
        Bson::Array(_) => "array",
        Bson::Document(_) => "document",
        Bson::Boolean(_) => "bool",
        Bson::Null => "null",
        Bson::Int32(_) => "int32",
        Bson::Int64(_) => "int64",
        Bson::DateTime(_) => "date",
        Bson::ObjectId(_) => "objectId",
        Bson::Decimal128(_) => "decimal128",
        Bson::RegularExpression(_) => "regex",
        Bson::Timestamp(_) => "timestamp",
        Bson::Binary(_) => "binary",
        _ => "other",
    }
}
