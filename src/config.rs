//! Translator configuration.
//!
//! Loaded from TOML and then overridden by environment variables. Precedence,
//! lowest first: defaults, the first config file found, `BSONQUERY_*` env vars.
//! CLI flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::TranslateError;

pub const DEFAULT_SORT_FIELD: &str = "_id";

pub const ENV_CONFIG: &str = "BSONQUERY_CONFIG";
pub const ENV_DEFAULT_SORT: &str = "BSONQUERY_DEFAULT_SORT";
pub const ENV_COMPOSITE_MODE: &str = "BSONQUERY_COMPOSITE_MODE";
pub const ENV_RANGE_OPERATORS: &str = "BSONQUERY_RANGE_OPERATORS";

/// How several composite OR-groups are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositeMode {
    /// Every item of every group goes into one shared `$or` array.
    #[default]
    Flatten,
    /// Each group becomes its own `$or`; multiple groups are ANDed.
    Nested,
}

impl FromStr for CompositeMode {
    type Err = TranslateError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flatten" => Ok(Self::Flatten),
            "nested" => Ok(Self::Nested),
            other => Err(TranslateError::Config(format!("unknown composite mode: {other}"))),
        }
    }
}

/// Translation of `between`, `in` and `not_in` on simple filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOperatorMode {
    /// Mapped token (`$eq`), as for every other operator.
    #[default]
    Placeholder,
    /// `between` -> `$gte`/`$lte`, `in` -> `$in`, `not_in` -> `$nin`.
    Native,
}

impl FromStr for RangeOperatorMode {
    type Err = TranslateError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(Self::Placeholder),
            "native" => Ok(Self::Native),
            other => Err(TranslateError::Config(format!(
                "unknown range operator mode: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    pub default_sort_field: String,
    pub composite_mode: CompositeMode,
    pub range_operators: RangeOperatorMode,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            default_sort_field: DEFAULT_SORT_FIELD.to_string(),
            composite_mode: CompositeMode::default(),
            range_operators: RangeOperatorMode::default(),
        }
    }
}

impl TranslatorConfig {
    pub fn with_default_sort(default_sort_field: impl Into<String>) -> Self {
        Self {
            default_sort_field: default_sort_field.into(),
            ..Self::default()
        }
    }

    /// # Errors
    /// Returns an error if the text is not valid TOML for this structure.
    pub fn from_toml_str(s: &str) -> Result<Self, TranslateError> {
        Ok(toml::from_str(s)?)
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, TranslateError> {
        let s = std::fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }

    /// Apply `BSONQUERY_*` overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|k| std::env::var(k).ok());
    }

    /// Apply overrides from `lookup`. Values that fail to parse are logged and
    /// ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(field) = lookup(ENV_DEFAULT_SORT)
            && !field.trim().is_empty()
        {
            self.default_sort_field = field.trim().to_string();
        }
        if let Some(v) = lookup(ENV_COMPOSITE_MODE) {
            match v.parse() {
                Ok(mode) => self.composite_mode = mode,
                Err(e) => log::warn!("ignoring {ENV_COMPOSITE_MODE}: {e}"),
            }
        }
        if let Some(v) = lookup(ENV_RANGE_OPERATORS) {
            match v.parse() {
                Ok(mode) => self.range_operators = mode,
                Err(e) => log::warn!("ignoring {ENV_RANGE_OPERATORS}: {e}"),
            }
        }
    }

    /// Config files to try, in order. Only the explicit path must exist.
    pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(p) = explicit {
            paths.push(p.to_path_buf());
        }
        if let Ok(p) = std::env::var(ENV_CONFIG) {
            paths.push(PathBuf::from(p));
        }
        if let Ok(cur) = std::env::current_dir() {
            paths.push(cur.join("bsonquery.toml"));
        }
        paths
    }

    /// # Errors
    /// Returns an error if `explicit` is given but unreadable, or if the first
    /// config file found fails to parse.
    pub fn load(explicit: Option<&Path>) -> Result<Self, TranslateError> {
        let mut cfg = match explicit {
            Some(p) => Self::from_file(p)?,
            None => {
                let found = Self::candidate_paths(None).into_iter().find(|p| p.exists());
                match found {
                    Some(p) => {
                        log::debug!("loading translator config from {}", p.display());
                        Self::from_file(&p)?
                    }
                    None => Self::default(),
                }
            }
        };
        cfg.apply_env();
        Ok(cfg)
    }
}
