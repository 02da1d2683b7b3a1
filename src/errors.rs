use thiserror::Error;

use crate::query::Operator;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Invalid operand for `{operator}` on `{field}`: expected {expected}, found {found}")]
    InvalidOperandType {
        field: String,
        operator: Operator,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}
