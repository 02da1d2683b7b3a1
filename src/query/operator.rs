use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical comparison requested by the caller.
///
/// Names deserialize in snake_case, with the short Mongo-style spellings
/// accepted as aliases. Any other name becomes [`Operator::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[serde(alias = "eq")]
    Equal,
    #[serde(alias = "ne")]
    NotEqual,
    #[serde(alias = "lt")]
    LessThan,
    #[serde(alias = "lte")]
    LessThanOrEqual,
    #[serde(alias = "gt")]
    MoreThan,
    #[serde(alias = "gte")]
    MoreThanOrEqual,
    Contains,
    BeginsWith,
    EndsWith,
    Between,
    In,
    #[serde(alias = "nin")]
    NotIn,
    #[serde(other)]
    Unknown,
}

impl Operator {
    pub const ALL: [Self; 12] = [
        Self::Equal,
        Self::NotEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::MoreThan,
        Self::MoreThanOrEqual,
        Self::Contains,
        Self::BeginsWith,
        Self::EndsWith,
        Self::Between,
        Self::In,
        Self::NotIn,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not_equal",
            Self::LessThan => "less_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::MoreThan => "more_than",
            Self::MoreThanOrEqual => "more_than_or_equal",
            Self::Contains => "contains",
            Self::BeginsWith => "begins_with",
            Self::EndsWith => "ends_with",
            Self::Between => "between",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::Unknown => "unknown",
        }
    }

    /// True for the string-pattern operators that simple filters turn into
    /// case-insensitive `$regex` conditions.
    pub const fn is_pattern(self) -> bool {
        matches!(self, Self::Contains | Self::BeginsWith | Self::EndsWith)
    }

    /// True for operators whose token is a stand-in: `between`, `in` and
    /// `not_in` currently map to `$eq`, which matches the wrong documents.
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::Between | Self::In | Self::NotIn)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Query-engine token for `op`.
///
/// `between`, `in` and `not_in` yield `$eq` until a real mapping exists; see
/// `RangeOperatorMode::Native` for the opt-in range/set translation.
/// [`Operator::Unknown`] yields an empty token.
pub const fn map_operator(op: Operator) -> &'static str {
    match op {
        Operator::Equal => "$eq",
        Operator::NotEqual => "$ne",
        Operator::LessThan => "$lt",
        Operator::LessThanOrEqual => "$lte",
        Operator::MoreThan => "$gt",
        Operator::MoreThanOrEqual => "$gte",
        Operator::Contains | Operator::BeginsWith | Operator::EndsWith => "$regex",
        // TODO: make RangeOperatorMode::Native the default and drop this $eq fallback
        Operator::Between | Operator::In | Operator::NotIn => "$eq",
        Operator::Unknown => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_tokens() {
        assert_eq!(map_operator(Operator::Equal), "$eq");
        assert_eq!(map_operator(Operator::NotEqual), "$ne");
        assert_eq!(map_operator(Operator::LessThan), "$lt");
        assert_eq!(map_operator(Operator::LessThanOrEqual), "$lte");
        assert_eq!(map_operator(Operator::MoreThan), "$gt");
        assert_eq!(map_operator(Operator::MoreThanOrEqual), "$gte");
    }

    #[test]
    fn pattern_operators_share_regex_token() {
        for op in [Operator::Contains, Operator::BeginsWith, Operator::EndsWith] {
            assert!(op.is_pattern());
            assert_eq!(map_operator(op), "$regex");
        }
    }

    #[test]
    fn placeholder_operators_fall_back_to_eq() {
        for op in [Operator::Between, Operator::In, Operator::NotIn] {
            assert!(op.is_placeholder());
            assert_eq!(map_operator(op), "$eq");
        }
    }

    #[test]
    fn unknown_operator_has_empty_token() {
        assert_eq!(map_operator(Operator::Unknown), "");
        assert!(!Operator::ALL.contains(&Operator::Unknown));
    }

    #[test]
    fn every_known_operator_has_a_token() {
        for op in Operator::ALL {
            assert!(map_operator(op).starts_with('$'), "{op} unmapped");
        }
    }

    #[test]
    fn deserialize_names_and_aliases() {
        let ops: Vec<Operator> =
            serde_json::from_str(r#"["equal","ne","gte","begins_with","nin","in"]"#).unwrap();
        assert_eq!(
            ops,
            vec![
                Operator::Equal,
                Operator::NotEqual,
                Operator::MoreThanOrEqual,
                Operator::BeginsWith,
                Operator::NotIn,
                Operator::In,
            ]
        );
    }

    #[test]
    fn unrecognized_name_is_unknown() {
        let op: Operator = serde_json::from_str(r#""sounds_like""#).unwrap();
        assert_eq!(op, Operator::Unknown);
    }

    #[test]
    fn display_matches_serde_name() {
        for op in Operator::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{op}\""));
        }
    }
}
