use crate::errors::TranslateError;

use super::types::{SelectParameter, SortDescriptor, SortDirection};

/// # Errors
/// Returns an error if the JSON string cannot be parsed into a select parameter.
pub fn parse_select_json(json: &str) -> Result<SelectParameter, TranslateError> {
    Ok(serde_json::from_str(json)?)
}

/// Parse a compact sort spec such as `-age,+name,city`.
///
/// `-` means descending; `+` or no prefix means ascending. Blank parts are
/// skipped.
pub fn parse_sort_spec(spec: &str) -> Vec<SortDescriptor> {
    let mut specs = Vec::new();
    for part in spec.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (sort_direction, field) = if let Some(rest) = part.strip_prefix('-') {
            (SortDirection::Descending, rest)
        } else if let Some(rest) = part.strip_prefix('+') {
            (SortDirection::Ascending, rest)
        } else {
            (SortDirection::Ascending, part)
        };
        let field = field.trim();
        if field.is_empty() {
            continue;
        }
        specs.push(SortDescriptor { field_name: field.to_string(), sort_direction });
    }
    specs
}
